//! Pointer input shared between event handlers and the animation loop.
//!
//! Handlers write through a [`PointerHandle`]; the animator reads a
//! [`PointerSnapshot`] once per tick. Reads may be a frame stale, which only
//! affects smoothness.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

use crossbeam::channel::{Receiver, Sender, TrySendError};
use epi_core::Point;

/// Clicks queued beyond this between two ticks are dropped.
pub const CLICK_QUEUE: usize = 32;

/// Atomic f64 wrapper for lock-free cross-thread access.
#[derive(Debug)]
pub struct AtomicF64(AtomicU64);

impl AtomicF64 {
    pub fn new(val: f64) -> Self {
        Self(AtomicU64::new(val.to_bits()))
    }

    pub fn load(&self) -> f64 {
        f64::from_bits(self.0.load(Ordering::Relaxed))
    }

    pub fn store(&self, val: f64) {
        self.0.store(val.to_bits(), Ordering::Relaxed);
    }
}

impl Default for AtomicF64 {
    fn default() -> Self {
        Self::new(0.0)
    }
}

#[derive(Debug, Default)]
pub struct PointerState {
    x: AtomicF64,
    y: AtomicF64,
    inside: AtomicBool,
    moves: AtomicU64,
}

/// One consistent-enough read of the pointer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerSnapshot {
    pub position: Point,
    pub inside: bool,
    /// Increments on every move; lets readers detect activity.
    pub moves: u64,
}

impl PointerState {
    pub fn snapshot(&self) -> PointerSnapshot {
        PointerSnapshot {
            position: Point::new(self.x.load(), self.y.load()),
            inside: self.inside.load(Ordering::Relaxed),
            moves: self.moves.load(Ordering::Relaxed),
        }
    }
}

/// Write side of the pointer state, cheap to clone into event handlers.
#[derive(Debug, Clone)]
pub struct PointerHandle {
    state: Arc<PointerState>,
    clicks: Sender<Point>,
}

impl PointerHandle {
    /// Pointer moved to screen position `(x, y)`; also marks it inside.
    pub fn move_to(&self, x: f64, y: f64) {
        self.state.x.store(x);
        self.state.y.store(y);
        self.state.inside.store(true, Ordering::Relaxed);
        self.state.moves.fetch_add(1, Ordering::Relaxed);
    }

    /// Pointer left the canvas.
    pub fn leave(&self) {
        self.state.inside.store(false, Ordering::Relaxed);
    }

    /// Click or tap at `(x, y)`. Also counts as a move.
    pub fn click(&self, x: f64, y: f64) {
        self.move_to(x, y);
        match self.clicks.try_send(Point::new(x, y)) {
            Ok(()) => {}
            Err(TrySendError::Full(_)) => log::trace!("click queue full, dropping click"),
            Err(TrySendError::Disconnected(_)) => {}
        }
    }
}

/// Read side, owned by the animator.
pub(crate) struct PointerInput {
    state: Arc<PointerState>,
    clicks_tx: Sender<Point>,
    clicks_rx: Receiver<Point>,
}

impl PointerInput {
    pub(crate) fn new() -> Self {
        let (clicks_tx, clicks_rx) = crossbeam::channel::bounded(CLICK_QUEUE);
        Self {
            state: Arc::new(PointerState::default()),
            clicks_tx,
            clicks_rx,
        }
    }

    pub(crate) fn handle(&self) -> PointerHandle {
        PointerHandle {
            state: self.state.clone(),
            clicks: self.clicks_tx.clone(),
        }
    }

    pub(crate) fn snapshot(&self) -> PointerSnapshot {
        self.state.snapshot()
    }

    /// Clicks received since the last call, oldest first.
    pub(crate) fn drain_clicks(&self) -> Vec<Point> {
        self.clicks_rx.try_iter().collect()
    }
}
