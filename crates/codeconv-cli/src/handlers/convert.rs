//! Convert command handler.
//!
//! Sends a line range of a file to `/convert-code` and prints the
//! converted file, or writes it to `--output`.

use std::path::PathBuf;

use anyhow::{Context, Result};
use codeconv_core::{ConversionService, Selection};

use crate::bootstrap::CliContext;
use crate::handlers::user_path;

/// Arguments for the convert command.
pub struct ConvertArgs {
    pub file: PathBuf,
    pub start: u32,
    pub end: u32,
    pub source_language: Option<String>,
    pub target_language: Option<String>,
    pub vo_path: Option<PathBuf>,
    pub output: Option<PathBuf>,
}

impl ConvertArgs {
    /// The same arguments with every path made absolute.
    fn with_absolute_paths(self) -> Result<Self> {
        Ok(Self {
            file: user_path(&self.file)?,
            vo_path: self.vo_path.as_deref().map(user_path).transpose()?,
            output: self.output.as_deref().map(user_path).transpose()?,
            ..self
        })
    }
}

pub async fn execute(ctx: &CliContext, args: ConvertArgs) -> Result<()> {
    let args = args.with_absolute_paths()?;
    let selection = Selection::from_file(&args.file, args.start, args.end)?;

    let service = ConversionService::new(ctx.api.clone())
        .with_target_language(
            args.target_language
                .unwrap_or_else(|| ctx.settings.target_language.clone()),
        )
        .with_source_language(args.source_language)
        .with_vo_path(args.vo_path.or_else(|| ctx.settings.vo_path.clone()));

    let mut panel = ctx.converter_panel();
    eprintln!(
        "Converting lines {}-{} of {}...",
        selection.start_line,
        selection.end_line,
        selection.file_path.display()
    );
    let response = service
        .convert_selection(&mut panel, selection)
        .await
        .context("Conversion failed")?;

    match &args.output {
        Some(path) => {
            std::fs::write(path, &response.converted_code)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            eprintln!("✓ Converted code written to {}", path.display());
        }
        None => print!("{}", response.converted_code),
    }

    eprintln!(
        "✓ Conversion completed ({} → {}) in {:.2}s",
        response.source_language, response.target_language, response.processing_time
    );
    if !response.message.is_empty() {
        eprintln!("  {}", response.message);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relative_paths_are_made_absolute() {
        let cwd = std::env::current_dir().unwrap();
        let args = ConvertArgs {
            file: PathBuf::from("./src/Order.java"),
            start: 1,
            end: 3,
            source_language: None,
            target_language: None,
            vo_path: Some(PathBuf::from("vo/../vo")),
            output: None,
        }
        .with_absolute_paths()
        .unwrap();

        assert_eq!(args.file, cwd.join("src/Order.java"));
        assert_eq!(args.vo_path, Some(cwd.join("vo")));
        assert_eq!(args.output, None);
        assert_eq!((args.start, args.end), (1, 3));
    }
}
