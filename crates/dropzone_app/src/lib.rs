//! Dropzone application layer: drives the core state machine against the
//! engine and projects the resulting view for a terminal.
pub mod config;
pub mod effects;
pub mod picker;
pub mod render;
pub mod session;

pub use config::{AppConfig, ConfigError, LogTarget};
pub use effects::EffectRunner;
pub use picker::{candidate_from_path, candidates_from_paths, FilePicker, PathPicker, PickError};
pub use render::{render_blocks, render_view};
pub use session::Session;
