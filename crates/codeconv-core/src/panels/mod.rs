//! Panel models: the two item trees shown to the user.
//!
//! Each panel owns its state and exposes it as a tree of [`PanelItem`]s.
//! Every state change ends by firing the shared [`RefreshSignal`] so the
//! presentation layer knows which panel to re-render.

mod code_converter;
mod item;
mod refresh;
mod vo_generator;

pub use code_converter::{ApiStatus, CodeConverterPanel, HISTORY_VISIBLE, ServerSnapshot};
pub use item::{PanelCommand, PanelItem};
pub use refresh::{PanelKind, RefreshSignal};
pub use vo_generator::{RunStatus, VoGeneratorPanel};
