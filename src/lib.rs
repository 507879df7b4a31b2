pub mod bounds;
pub mod curve;
pub mod frame;
pub mod gauss;
pub mod refresh;
mod winit;

use std::sync::Arc;

pub use crate::curve::{CurveParameters, Point};
pub use crate::frame::{FrameBuffer, FrameHandle, Viewport};
pub use crate::winit::EventLoopError;

/// Open the simulator window and run until it is closed. Blocks the
/// calling thread; the refresh loop runs on its own thread and is
/// stopped when the event loop exits.
pub fn launch(handle: Arc<FrameHandle>) -> Result<(), EventLoopError> {
    winit::run(handle)
}
