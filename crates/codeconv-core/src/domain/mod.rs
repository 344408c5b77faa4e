//! Domain types exchanged with the conversion backend.
//!
//! These are pure data types with no infrastructure dependencies. The
//! request/response shapes mirror the backend's JSON contract exactly.

mod conversion;
mod selection;
mod vo;

pub use conversion::{ConversionRequest, ConversionResponse};
pub use selection::{Selection, SelectionError};
pub use vo::{MakeVoRequest, MakeVoResponse};
