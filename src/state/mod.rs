pub mod animation;
pub mod drag;
pub mod pan;
pub mod touch;

pub use animation::{GlidePhase, MoveAnimation, Rect};
pub use drag::{DragState, DragVia};
pub use pan::Pan;
pub use touch::TapTracker;
