//! Background source loader.
//!
//! Vectorising an image or SVG runs on a worker thread; the animation loop
//! polls for the result without blocking and draws nothing until it lands.
//! Stopping a loader never waits on the worker: vectorisation cannot be
//! interrupted, so the thread is detached and its result discarded.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;

use crossbeam::channel::{bounded, Receiver, TryRecvError};
use epi_core::Point;
use epi_parsers::{vectorize, VectorSource, VectorizeConfig, VectorizeError};

pub type LoadResult = Result<Vec<Point>, VectorizeError>;

pub struct SourceLoader {
    running: Arc<AtomicBool>,
    cancelled: Arc<AtomicBool>,
    result_rx: Receiver<LoadResult>,
    thread: Option<thread::JoinHandle<()>>,
}

impl SourceLoader {
    /// Start vectorising `source` on a background thread.
    pub fn start(source: VectorSource, config: VectorizeConfig) -> Self {
        let running = Arc::new(AtomicBool::new(true));
        let cancelled = Arc::new(AtomicBool::new(false));
        let running_clone = running.clone();
        let cancelled_clone = cancelled.clone();
        let (result_tx, result_rx) = bounded(1);

        let thread = thread::Builder::new()
            .name("source-loader".to_string())
            .spawn(move || {
                let result = vectorize(&source, &config);
                running_clone.store(false, Ordering::Relaxed);
                if cancelled_clone.load(Ordering::Relaxed) {
                    log::debug!("source loader finished after cancel, result dropped");
                    return;
                }
                // receiver gone means the animator was disposed
                let _ = result_tx.send(result);
            })
            .expect("failed to spawn source loader thread");

        Self {
            running,
            cancelled,
            result_rx,
            thread: Some(thread),
        }
    }

    /// The finished result, once. `None` while still working, after it was
    /// taken, or after [`stop`](Self::stop).
    pub fn poll(&self) -> Option<LoadResult> {
        if self.is_cancelled() {
            return None;
        }
        match self.result_rx.try_recv() {
            Ok(result) => Some(result),
            Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => None,
        }
    }

    /// Block until the result is available. Only for hosts that want to
    /// wait; the animation loop uses [`poll`](Self::poll).
    pub fn wait(&self) -> Option<LoadResult> {
        self.result_rx.recv().ok()
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Relaxed)
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }

    /// Discard the pending result and detach the worker without joining it.
    pub fn stop(&mut self) {
        self.cancelled.store(true, Ordering::Relaxed);
        // dropping the handle detaches the thread
        self.thread.take();
    }
}

impl Drop for SourceLoader {
    fn drop(&mut self) {
        self.stop();
    }
}
