use std::sync::Arc;

use arc_swap::{ArcSwap, ArcSwapOption};

use crate::curve::Point;

/// Target rectangle for normalization, in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Exactly two normalized curves ready for rendering. Immutable once
/// published; a refresh cycle replaces the whole frame rather than
/// mutating it.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameBuffer {
    pub curves: [Vec<Point>; 2],
}

/// The only state shared between the refresh thread and the renderer:
/// the most recently published frame and the current target rectangle.
///
/// Publication swaps a single reference, so a reader always observes
/// either the previous complete frame or the next complete one, never a
/// partially written mix.
#[derive(Debug)]
pub struct FrameHandle {
    frame: ArcSwapOption<FrameBuffer>,
    viewport: ArcSwap<Viewport>,
}

impl FrameHandle {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            frame: ArcSwapOption::empty(),
            viewport: ArcSwap::from_pointee(viewport),
        }
    }

    pub fn publish(&self, frame: FrameBuffer) {
        self.frame.store(Some(Arc::new(frame)));
    }

    /// Read-only snapshot of the latest published frame, if any.
    pub fn current_frame(&self) -> Option<Arc<FrameBuffer>> {
        self.frame.load_full()
    }

    /// Called by the renderer when the window size changes; the next
    /// refresh cycle normalizes against the new rectangle.
    pub fn set_viewport(&self, viewport: Viewport) {
        self.viewport.store(Arc::new(viewport));
    }

    pub fn viewport(&self) -> Viewport {
        **self.viewport.load()
    }
}
