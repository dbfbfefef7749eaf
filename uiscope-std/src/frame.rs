//! A frame queue for work deferred to the next paint.

use futures::{
    StreamExt,
    channel::mpsc::{UnboundedReceiver, UnboundedSender, unbounded},
    lock::Mutex,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use uiscope_core::{DeferredTask, FrameScheduler};

/// Queues deferred tasks until the host reaches its next frame.
///
/// A synchronous host calls [`flush`](Self::flush) once per paint; an async
/// event loop can `await` [`next_frame`](Self::next_frame) instead. Tasks run
/// in the order they were deferred, each exactly once.
///
/// # Example
/// ```rust
/// use uiscope_core::FrameScheduler;
/// use uiscope_std::FrameQueue;
///
/// let queue = FrameQueue::new();
/// queue.defer(Box::new(|| println!("painted"))).ok();
/// assert_eq!(queue.pending(), 1);
/// assert_eq!(queue.flush(), 1);
/// ```
pub struct FrameQueue {
    sender: UnboundedSender<DeferredTask>,
    receiver: Mutex<UnboundedReceiver<DeferredTask>>,
    pending: AtomicUsize,
}

impl Default for FrameQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameQueue {
    /// Create an open, empty queue.
    pub fn new() -> Self {
        let (sender, receiver) = unbounded();
        Self {
            sender,
            receiver: Mutex::new(receiver),
            pending: AtomicUsize::new(0),
        }
    }

    /// Number of tasks waiting for the next frame.
    pub fn pending(&self) -> usize {
        self.pending.load(Ordering::Acquire)
    }

    /// Run every queued task. Returns how many ran.
    ///
    /// Tasks deferred while flushing run in the same flush. Returns 0 if an
    /// async [`next_frame`](Self::next_frame) currently owns the queue.
    pub fn flush(&self) -> usize {
        let mut ran = 0;
        while let Some(task) = self.try_take() {
            self.run(task);
            ran += 1;
        }
        ran
    }

    /// Wait for at least one task, then run everything queued.
    ///
    /// Resolves to 0 once the queue is closed and drained.
    pub async fn next_frame(&self) -> usize {
        let first = self.receiver.lock().await.next().await;
        match first {
            Some(task) => {
                self.run(task);
                1 + self.flush()
            }
            None => 0,
        }
    }

    /// Stop accepting tasks. Already queued tasks still run.
    pub fn close(&self) {
        self.sender.close_channel();
    }

    fn try_take(&self) -> Option<DeferredTask> {
        let mut receiver = self.receiver.try_lock()?;
        match receiver.try_next() {
            Ok(Some(task)) => Some(task),
            // Closed or empty.
            Ok(None) | Err(_) => None,
        }
    }

    fn run(&self, task: DeferredTask) {
        self.pending.fetch_sub(1, Ordering::AcqRel);
        task();
    }
}

impl FrameScheduler for FrameQueue {
    fn defer(&self, task: DeferredTask) -> Result<(), DeferredTask> {
        self.pending.fetch_add(1, Ordering::AcqRel);
        self.sender.unbounded_send(task).map_err(|err| {
            self.pending.fetch_sub(1, Ordering::AcqRel);
            #[cfg(feature = "tracing")]
            tracing::warn!("frame queue closed; running deferred task immediately");
            err.into_inner()
        })
    }
}
