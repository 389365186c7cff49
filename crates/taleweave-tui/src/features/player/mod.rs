pub mod render;
pub mod state;

pub use render::{render, track_area};
pub use state::{PlayerPhase, PlayerState, SEEK_STEP_SECS, format_time};
