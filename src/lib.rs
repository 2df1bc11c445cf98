pub mod config;
pub mod error;
pub mod player;
pub mod ui;

pub use config::ControlsConfig;
pub use error::{Error, Result};
pub use player::{PlayerState, Progress};
pub use ui::controls::{ControlCallbacks, ControlsProps, MediaControls, PrimaryIcon};
pub use ui::format::humanize_video_duration;
pub use ui::visibility::{Phase, VisibilityController};
