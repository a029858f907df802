use parking_lot::{Condvar, Mutex};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};
use tracing::trace;

/// How long a consumer waits for enough data before playing silence
pub const DEFAULT_WAIT_BUDGET: Duration = Duration::from_millis(100);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PopOutcome {
    /// Destination holds the oldest buffered bytes
    Filled,
    /// Not enough data arrived in time; destination was zeroed and nothing consumed
    Silence,
}

/// Byte FIFO between the engine's audio callback and the output device.
///
/// Appends never block on the consumer; pops wait a bounded time.
pub struct AudioBufferQueue {
    buffer: Mutex<VecDeque<u8>>,
    available: Condvar,
    wait_budget: Duration,
    underruns: AtomicU64,
}

impl AudioBufferQueue {
    pub fn new() -> Self {
        Self::with_wait_budget(DEFAULT_WAIT_BUDGET)
    }

    pub fn with_wait_budget(wait_budget: Duration) -> Self {
        Self {
            buffer: Mutex::new(VecDeque::new()),
            available: Condvar::new(),
            wait_budget,
            underruns: AtomicU64::new(0),
        }
    }

    pub fn append(&self, data: &[u8]) {
        if data.is_empty() {
            return;
        }
        let mut buffer = self.buffer.lock();
        buffer.extend(data);
        self.available.notify_one();
    }

    /// Fill `dest` entirely from the front of the queue, or with silence
    pub fn pop(&self, dest: &mut [u8]) -> PopOutcome {
        let len = dest.len();
        let deadline = Instant::now() + self.wait_budget;

        let mut buffer = self.buffer.lock();
        while buffer.len() < len {
            if self.available.wait_until(&mut buffer, deadline).timed_out() {
                break;
            }
        }

        if buffer.len() < len {
            let buffered = buffer.len();
            drop(buffer);
            dest.fill(0);
            self.underruns.fetch_add(1, Ordering::Relaxed);
            trace!("Audio underrun: wanted {} bytes, had {}", len, buffered);
            return PopOutcome::Silence;
        }

        let (front, back) = buffer.as_slices();
        if front.len() >= len {
            dest.copy_from_slice(&front[..len]);
        } else {
            let (head, tail) = dest.split_at_mut(front.len());
            head.copy_from_slice(front);
            tail.copy_from_slice(&back[..tail.len()]);
        }
        buffer.drain(..len);
        PopOutcome::Filled
    }

    pub fn buffered(&self) -> usize {
        self.buffer.lock().len()
    }

    pub fn clear(&self) {
        self.buffer.lock().clear();
    }

    /// Number of pops answered with silence so far
    pub fn underruns(&self) -> u64 {
        self.underruns.load(Ordering::Relaxed)
    }
}

impl Default for AudioBufferQueue {
    fn default() -> Self {
        Self::new()
    }
}
