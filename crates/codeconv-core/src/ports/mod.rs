//! Port definitions (trait abstractions) for external systems.
//!
//! Ports define the interfaces the core workflows expect from
//! infrastructure. They contain no HTTP or process details.

mod converter_api;
mod log_sink;

pub use converter_api::{ApiPortError, ConverterApiPort};
pub use log_sink::{LogSinkPort, LogSource};

#[cfg(test)]
pub use converter_api::MockConverterApiPort;
