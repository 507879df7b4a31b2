use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use hurstsim::{FrameHandle, Viewport};

fn main() -> Result<(), hurstsim::EventLoopError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let handle = Arc::new(FrameHandle::new(Viewport::new(800.0, 600.0)));
    hurstsim::launch(handle)
}
