//! Backend process management.
//!
//! - `ServerManager` - start/stop/restart of the single backend process
//! - `ServerEvent` - lifecycle events broadcast to subscribers
//! - Stream readers that forward child output to the log sink
//! - Graceful shutdown with SIGTERM → SIGKILL escalation

mod entry;
mod error;
mod events;
mod server;
pub mod shutdown;
mod stream;

pub use entry::{ENTRY_POINT_CANDIDATES, resolve_entry_point};
pub use error::ServerError;
pub use events::ServerEvent;
pub use server::{
    RESTART_DELAY, ServerConfig, ServerManager, ServerStatus, StartOutcome, get_server_manager,
};
pub use shutdown::shutdown_child;
pub use stream::spawn_stream_reader;
pub(crate) use stream::trim_line_ending;
