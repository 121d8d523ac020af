use std::sync::{Arc, Condvar, Mutex, MutexGuard};

/// Counting semaphore over the airport's runways.
///
/// Synchronized independently of the tower so that long runway occupancy
/// never holds up state changes or queue work.
#[derive(Debug)]
pub struct RunwayPool {
    capacity: usize,
    in_use: Mutex<usize>,
    freed: Condvar,
}

impl RunwayPool {
    pub const DEFAULT_CAPACITY: usize = 3;

    pub fn new(capacity: usize) -> RunwayPool {
        RunwayPool {
            capacity,
            in_use: Mutex::new(0),
            freed: Condvar::new(),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn in_use(&self) -> usize {
        *self.lock()
    }

    /// Blocks until a runway is free and reserves it. No timeout.
    pub fn acquire(self: &Arc<Self>) -> RunwaySlot {
        let mut in_use = self.lock();
        while *in_use >= self.capacity {
            in_use = self
                .freed
                .wait(in_use)
                .unwrap_or_else(|poisoned| poisoned.into_inner());
        }
        *in_use += 1;
        RunwaySlot {
            pool: Arc::clone(self),
        }
    }

    fn release(&self) {
        let mut in_use = self.lock();
        *in_use = in_use.saturating_sub(1);
        self.freed.notify_one();
    }

    fn lock(&self) -> MutexGuard<'_, usize> {
        self.in_use
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Default for RunwayPool {
    fn default() -> Self {
        RunwayPool::new(RunwayPool::DEFAULT_CAPACITY)
    }
}

/// A reserved runway, handed back to the pool when dropped.
#[derive(Debug)]
pub struct RunwaySlot {
    pool: Arc<RunwayPool>,
}

impl RunwaySlot {
    pub fn release(self) {
        drop(self)
    }
}

impl Drop for RunwaySlot {
    fn drop(&mut self) {
        self.pool.release();
    }
}
