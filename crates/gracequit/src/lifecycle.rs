//! One-shot cancellation signal shared between a quiter and its workers.
//!
//! Uses `Mutex + Condvar` from std — no external dependencies.

use std::sync::{Arc, Condvar, Mutex, Weak};
use std::time::Duration;

/// Shared state behind both handle types.
struct SignalState {
    done: Mutex<bool>,
    cond: Condvar,
    /// Children derived via [`QuitSignal::child`], cancelled in cascade.
    children: Mutex<Vec<Weak<SignalState>>>,
}

impl SignalState {
    fn new(done: bool) -> Arc<Self> {
        Arc::new(Self {
            done: Mutex::new(done),
            cond: Condvar::new(),
            children: Mutex::new(Vec::new()),
        })
    }

    fn cancel(&self) {
        {
            let mut done = self.done.lock().unwrap();
            if *done {
                return;
            }
            *done = true;
        }
        self.cond.notify_all();
        let children = std::mem::take(&mut *self.children.lock().unwrap());
        for child in children {
            if let Some(child) = child.upgrade() {
                child.cancel();
            }
        }
    }

    fn is_done(&self) -> bool {
        *self.done.lock().unwrap()
    }

    fn wait(&self) {
        let mut done = self.done.lock().unwrap();
        while !*done {
            done = self.cond.wait(done).unwrap();
        }
    }

    fn wait_timeout(&self, timeout: Duration) -> bool {
        let done = self.done.lock().unwrap();
        let (done, _) = self
            .cond
            .wait_timeout_while(done, timeout, |done| !*done)
            .unwrap();
        *done
    }
}

/// Full-capability lifecycle signal: cancelled once, observed by many.
///
/// Clones share the same underlying flag. Use [`child`](QuitSignal::child)
/// to derive a signal that completes when either the parent is cancelled or
/// its own [`cancel`](QuitSignal::cancel) is called, and
/// [`live`](QuitSignal::live) to hand workers a view that cannot cancel.
#[derive(Clone)]
pub struct QuitSignal {
    inner: Arc<SignalState>,
}

impl QuitSignal {
    /// Create a root signal. It completes only through [`cancel`](Self::cancel).
    pub fn new() -> Self {
        Self {
            inner: SignalState::new(false),
        }
    }

    /// Derive a child signal.
    ///
    /// Cancelling the parent cancels the child; cancelling the child leaves
    /// the parent untouched. A child derived from an already-cancelled
    /// parent starts out done.
    pub fn child(&self) -> QuitSignal {
        // Hold the parent's flag lock across registration so a concurrent
        // cancel either sees the new child or is observed here.
        let done = self.inner.done.lock().unwrap();
        let child = SignalState::new(*done);
        if !*done {
            self.inner
                .children
                .lock()
                .unwrap()
                .push(Arc::downgrade(&child));
        }
        drop(done);
        QuitSignal { inner: child }
    }

    /// Cancel the signal and wake all waiters. First call wins; the rest
    /// are no-ops.
    pub fn cancel(&self) {
        self.inner.cancel();
    }

    /// Whether the signal has been cancelled.
    pub fn is_done(&self) -> bool {
        self.inner.is_done()
    }

    /// Block until cancelled.
    pub fn wait(&self) {
        self.inner.wait();
    }

    /// Block until cancelled or `timeout` elapses. Returns `true` if the
    /// signal is done.
    pub fn wait_timeout(&self, timeout: Duration) -> bool {
        self.inner.wait_timeout(timeout)
    }

    /// Read-only view of this signal for worker threads.
    pub fn live(&self) -> LiveSignal {
        LiveSignal {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl Default for QuitSignal {
    fn default() -> Self {
        Self::new()
    }
}

/// Read-only view of a [`QuitSignal`].
///
/// Workers hold one of these to detect shutdown and begin their own
/// wind-down. It observes the transition the moment shutdown is triggered,
/// before any quit handler runs.
#[derive(Clone)]
pub struct LiveSignal {
    inner: Arc<SignalState>,
}

impl LiveSignal {
    /// Whether shutdown has been triggered.
    pub fn is_done(&self) -> bool {
        self.inner.is_done()
    }

    /// Block until shutdown is triggered.
    pub fn wait(&self) {
        self.inner.wait();
    }

    /// Block until shutdown is triggered or `timeout` elapses. Returns
    /// `true` if the signal is done.
    pub fn wait_timeout(&self, timeout: Duration) -> bool {
        self.inner.wait_timeout(timeout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;
    use std::time::Instant;

    #[test]
    fn cancel_wakes_waiter() {
        let signal = QuitSignal::new();
        let live = signal.live();

        let handle = thread::spawn(move || {
            live.wait();
            42
        });

        // Give thread time to block
        thread::sleep(Duration::from_millis(50));
        signal.cancel();

        assert_eq!(handle.join().unwrap(), 42);
    }

    #[test]
    fn cancel_is_idempotent() {
        let signal = QuitSignal::new();
        signal.cancel();
        signal.cancel();
        signal.cancel();
        assert!(signal.is_done());
        assert!(signal.wait_timeout(Duration::from_millis(1)));
    }

    #[test]
    fn wait_timeout_expires_without_cancel() {
        let signal = QuitSignal::new();
        let start = Instant::now();
        assert!(!signal.wait_timeout(Duration::from_millis(50)));
        assert!(start.elapsed() >= Duration::from_millis(50));
        assert!(!signal.is_done());
    }

    #[test]
    fn child_cancelled_with_parent() {
        let parent = QuitSignal::new();
        let child = parent.child();
        assert!(!child.is_done());
        parent.cancel();
        assert!(child.is_done());
    }

    #[test]
    fn child_cancel_leaves_parent() {
        let parent = QuitSignal::new();
        let child = parent.child();
        child.cancel();
        assert!(child.is_done());
        assert!(!parent.is_done());
    }

    #[test]
    fn child_of_cancelled_parent_starts_done() {
        let parent = QuitSignal::new();
        parent.cancel();
        assert!(parent.child().is_done());
    }

    #[test]
    fn parent_cancel_wakes_child_waiter() {
        let parent = QuitSignal::new();
        let child = parent.child();

        let handle = thread::spawn(move || {
            child.wait();
        });

        thread::sleep(Duration::from_millis(50));
        parent.cancel();
        handle.join().unwrap();
    }

    #[test]
    fn live_clones_observe_same_flag() {
        let signal = QuitSignal::new();
        let a = signal.live();
        let b = a.clone();
        signal.cancel();
        assert!(a.is_done());
        assert!(b.is_done());
    }
}
