use core::{
    future::poll_fn,
    sync::atomic::{AtomicBool, Ordering},
    task::Poll,
};

use embassy_sync::waitqueue::AtomicWaker;
use embassy_time::{with_timeout, Duration};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LatchWait {
    Ready,
    TimedOut,
}

/// Single-slot signal between one waiter and any number of raisers.
///
/// Unlike `embassy_sync::signal::Signal`, waiting does not consume the state:
/// once raised the latch stays set until [`EventLatch::reset`] is called.
/// Raising an already set latch is a no-op apart from a redundant wake.
pub struct EventLatch {
    set: AtomicBool,
    waker: AtomicWaker,
}

impl EventLatch {
    pub const fn new() -> Self {
        Self {
            set: AtomicBool::new(false),
            waker: AtomicWaker::new(),
        }
    }

    /// Safe from notification context: never blocks, never allocates.
    pub fn raise(&self) {
        self.set.store(true, Ordering::Release);
        self.waker.wake();
    }

    pub fn is_set(&self) -> bool {
        self.set.load(Ordering::Acquire)
    }

    pub fn reset(&self) {
        self.set.store(false, Ordering::Release);
    }

    /// `None` waits forever.
    pub async fn wait(&self, timeout: Option<Duration>) -> LatchWait {
        match timeout {
            None => {
                self.wait_set().await;
                LatchWait::Ready
            }
            Some(timeout) => match with_timeout(timeout, self.wait_set()).await {
                Ok(()) => LatchWait::Ready,
                Err(_) => LatchWait::TimedOut,
            },
        }
    }

    async fn wait_set(&self) {
        poll_fn(|cx| {
            // Register before checking so a raise between the two is not lost.
            self.waker.register(cx.waker());
            if self.is_set() {
                Poll::Ready(())
            } else {
                Poll::Pending
            }
        })
        .await
    }
}

impl Default for EventLatch {
    fn default() -> Self {
        Self::new()
    }
}
