//! Panels command handler.

use anyhow::Result;
use codeconv_core::refresh_api_status;

use crate::bootstrap::CliContext;
use crate::presentation::render_panel;

/// Render both panels once, after a fresh health check.
pub async fn execute(ctx: &CliContext) -> Result<()> {
    let vo = ctx.vo_panel();
    let mut converter = ctx.converter_panel();
    refresh_api_status(ctx.api.as_ref(), &mut converter).await;
    converter.set_server_snapshot(ctx.server_snapshot().await);

    println!("{}", render_panel(VO_TITLE, &vo.items()));
    print!("{}", render_panel(CONVERTER_TITLE, &converter.items()));
    Ok(())
}

pub const VO_TITLE: &str = "VO Generator";
pub const CONVERTER_TITLE: &str = "Code Converter";
