pub mod clock;
pub mod tween;

pub use clock::{AnimationClock, PROGRESS_MAX, Profile};
pub use tween::{FrameParams, params_for};
