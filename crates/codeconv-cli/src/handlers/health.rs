//! Health command handler.

use anyhow::Result;

use crate::bootstrap::CliContext;
use crate::error::CliError;

/// Check `/health` and report it. Offline is an error so scripts can test it.
pub async fn execute(ctx: &CliContext) -> Result<()> {
    let endpoint = ctx.api.endpoint();
    if ctx.api.check_health().await {
        println!("✓ API Server Online ({endpoint})");
        Ok(())
    } else {
        Err(CliError::Unavailable(format!("API Server Offline ({endpoint})")).into())
    }
}
