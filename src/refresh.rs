use std::sync::Arc;
use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use rand::SeedableRng;
use rand::rngs::SmallRng;

use crate::bounds;
use crate::curve::{self, CurveParameters};
use crate::frame::{FrameBuffer, FrameHandle};

/// Time between refresh cycles.
pub const REFRESH_PERIOD: Duration = Duration::from_secs(1);

/// The two series shown by the simulator: a smooth upward-biased walk
/// and a rougher downward-biased one.
pub const SERIES: [CurveParameters; 2] = [
    CurveParameters {
        x0: 0.0,
        y0: 0.0,
        x1: 1.0,
        y1: 0.5,
        var: 0.04,
        h: 1.0,
    },
    CurveParameters {
        x0: 0.0,
        y0: 0.0,
        x1: 1.0,
        y1: -0.5,
        var: 0.01,
        h: 0.5,
    },
];

/// Handle to the background thread that regenerates and publishes both
/// curves once per [`REFRESH_PERIOD`]. Stopping (or dropping) the
/// handle cancels the loop and joins the thread; the sleep between
/// cycles is a bounded wait on the stop channel, so shutdown is prompt.
pub struct RefreshLoop {
    stop: mpsc::Sender<()>,
    thread: Option<JoinHandle<()>>,
}

impl RefreshLoop {
    /// Spawn the refresh thread. `notify` runs once per published
    /// frame, after the swap, and is meant to request a repaint.
    pub fn spawn<F>(handle: Arc<FrameHandle>, notify: F) -> Self
    where
        F: Fn() + Send + 'static,
    {
        let (stop, stop_rx) = mpsc::channel();
        let thread = thread::Builder::new()
            .name("refresh".into())
            .spawn(move || run(&handle, notify, &stop_rx))
            .expect("failed to spawn refresh thread");
        Self {
            stop,
            thread: Some(thread),
        }
    }

    pub fn stop(mut self) {
        self.shutdown();
    }

    fn shutdown(&mut self) {
        let _ = self.stop.send(());
        if let Some(thread) = self.thread.take() {
            let _ = thread.join();
        }
    }
}

impl Drop for RefreshLoop {
    fn drop(&mut self) {
        self.shutdown();
    }
}

fn run<F: Fn()>(handle: &FrameHandle, notify: F, stop: &mpsc::Receiver<()>) {
    // One independent random stream per series, seeded from OS entropy
    // at startup. No determinism guarantee across runs.
    let mut rngs = [SmallRng::from_os_rng(), SmallRng::from_os_rng()];

    loop {
        // The viewport current at publish time; resizes between cycles
        // are picked up here.
        let viewport = handle.viewport();

        let mut curves = [
            curve::generate(SERIES[0], &mut rngs[0]),
            curve::generate(SERIES[1], &mut rngs[1]),
        ];
        bounds::normalize(&mut curves, viewport);

        tracing::debug!(
            points_a = curves[0].len(),
            points_b = curves[1].len(),
            width = viewport.width,
            height = viewport.height,
            "publishing frame"
        );
        handle.publish(FrameBuffer { curves });
        notify();

        match stop.recv_timeout(REFRESH_PERIOD) {
            Err(RecvTimeoutError::Timeout) => {}
            Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Instant;

    use crate::frame::Viewport;

    use super::*;

    #[test]
    fn publishes_a_complete_frame_and_stops() {
        let handle = Arc::new(FrameHandle::new(Viewport::new(800.0, 600.0)));
        let published = Arc::new(AtomicUsize::new(0));

        let refresh = {
            let published = Arc::clone(&published);
            RefreshLoop::spawn(Arc::clone(&handle), move || {
                published.fetch_add(1, Ordering::SeqCst);
            })
        };

        // The first cycle runs immediately; wait for it.
        let deadline = Instant::now() + Duration::from_secs(5);
        while published.load(Ordering::SeqCst) == 0 {
            assert!(Instant::now() < deadline, "no frame published in time");
            thread::sleep(Duration::from_millis(5));
        }

        let frame = handle.current_frame().expect("frame published");
        assert_eq!(frame.curves[0].len(), 129);
        assert_eq!(frame.curves[1].len(), 129);
        for point in frame.curves.iter().flatten() {
            assert!(point.x >= 0.0 && point.x <= 800.0);
            assert!(point.y >= 0.0 && point.y <= 600.0);
        }

        // Stop should interrupt the sleep rather than wait it out.
        let start = Instant::now();
        refresh.stop();
        assert!(Instant::now() - start < REFRESH_PERIOD);
    }
}
