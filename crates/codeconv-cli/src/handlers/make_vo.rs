//! Make-VO command handler.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use codeconv_core::{VoGenerationService, VoGeneratorPanel};

use crate::bootstrap::CliContext;
use crate::handlers::user_path;

/// Execute the make-vo command.
///
/// `project` and `output` override the configured paths; without either
/// the output falls back to `<project>/generated`.
pub async fn execute(
    ctx: &CliContext,
    project: Option<PathBuf>,
    output: Option<PathBuf>,
) -> Result<()> {
    let mut panel = prepare_panel(ctx, project.as_deref(), output.as_deref())?;

    eprintln!(
        "Generating VO for {} ({} source files)...",
        panel
            .project_path()
            .map_or_else(|| "<unset>".to_string(), |p| p.display().to_string()),
        panel.file_count()
    );

    let outcome = VoGenerationService::new(ctx.api.clone())
        .run(&mut panel)
        .await
        .context("VO generation failed")?;

    print!("{}", outcome.vo_code);
    if !outcome.vo_code.ends_with('\n') {
        println!();
    }

    eprintln!("{}", panel.last_result());
    match outcome.saved_to {
        Ok(path) => eprintln!("✓ VO file saved to {}", path.display()),
        Err(reason) => eprintln!("⚠️  Failed to save VO file: {reason}"),
    }
    Ok(())
}

/// The VO panel for one run, with command-line paths made absolute.
fn prepare_panel(
    ctx: &CliContext,
    project: Option<&Path>,
    output: Option<&Path>,
) -> Result<VoGeneratorPanel> {
    let mut panel = ctx.vo_panel();
    if let Some(project) = project {
        panel.set_project_path(user_path(project)?);
        if output.is_none()
            && ctx.settings.output_path.is_none()
            && let Some(default) = panel.default_output_path()
        {
            panel.set_output_path(default);
        }
    }
    if let Some(output) = output {
        panel.set_output_path(user_path(output)?);
    }
    Ok(panel)
}
