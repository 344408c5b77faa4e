//! Workflow services: the glue between panels and the backend port.
//!
//! Each workflow validates its preconditions first and only then talks to
//! the backend, so a missing path never costs a network round trip.

mod conversion;
mod error;
mod vo_generation;

pub use conversion::{ConversionService, refresh_api_status};
pub use error::WorkflowError;
pub use vo_generation::{VoGenerationService, VoOutcome};
