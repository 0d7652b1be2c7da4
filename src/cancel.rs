use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Cooperative cancellation signal.
///
/// The scene partitioner polls this between `end` iterations of its
/// outermost scan so an interactive caller can abort a large optimization
/// without waiting for it to run to completion. Cancelling never produces
/// partial output: a cancelled partition returns `None` all the way up.
#[derive(Clone, Default)]
pub struct CancellationToken(Arc<AtomicBool>);

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}
