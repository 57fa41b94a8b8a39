//! Shutdown coordinator: one cancellation, ordered handlers, blocking wait.

use std::io;
use std::sync::Mutex;
use std::time::Duration;

use crate::handler::QuitHandler;
use crate::lifecycle::{LiveSignal, QuitSignal};
use crate::signals::SignalSubscription;

/// Coordinates graceful shutdown for a long-running process.
///
/// A `Quiter` owns a lifecycle signal derived from a parent [`QuitSignal`],
/// an ordered list of shutdown handlers, and a SIGINT/SIGTERM subscription.
/// Receiving either signal, or an explicit
/// [`trigger_shutdown`](Self::trigger_shutdown) call, cancels the lifecycle
/// signal; [`wait_until_exit`](Self::wait_until_exit) blocks until that
/// happens and then drains the handlers.
///
/// Workers observe shutdown through [`live_signal`](Self::live_signal). The
/// live signal completes when shutdown is *triggered*, not when handlers
/// finish, so workers wind down concurrently with the drain.
pub struct Quiter {
    signal: QuitSignal,
    handlers: Mutex<Option<Vec<Box<dyn QuitHandler + Send>>>>,
    subscription: SignalSubscription,
}

impl Quiter {
    /// Create a quiter whose lifecycle signal is a child of `parent`.
    ///
    /// The handler list is fixed here and may be empty; insertion order is
    /// invocation order. Behavior is unspecified if `parent` is already
    /// cancelled.
    pub fn new(
        parent: &QuitSignal,
        handlers: Vec<Box<dyn QuitHandler + Send>>,
    ) -> io::Result<Quiter> {
        let signal = parent.child();
        let subscription = SignalSubscription::listen(signal.clone())?;
        Ok(Quiter {
            signal,
            handlers: Mutex::new(Some(handlers)),
            subscription,
        })
    }

    /// Read-only lifecycle view for worker threads.
    pub fn live_signal(&self) -> LiveSignal {
        self.signal.live()
    }

    /// Whether shutdown has been triggered.
    pub fn is_quitting(&self) -> bool {
        self.signal.is_done()
    }

    /// Start shutdown now. Idempotent, never blocks; safe from any thread.
    pub fn trigger_shutdown(&self) {
        self.signal.cancel();
    }

    /// Block until shutdown is triggered or `timeout` elapses.
    ///
    /// A zero `timeout` waits indefinitely. On expiry without shutdown this
    /// returns `false`: no handler has run, the subscription is still
    /// armed, and a later call can pick up where this one left off. Returns
    /// `true` once shutdown is observed, after the drain: the signal
    /// subscription is revoked first (a second SIGINT/SIGTERM during handler
    /// execution terminates the process instead of being swallowed), then
    /// each handler runs once, synchronously, in registration order.
    ///
    /// Handler panics are not caught: a panicking handler unwinds out of
    /// this call and the handlers after it never run. Handlers never run
    /// twice: once drained, further calls return `true` immediately.
    pub fn wait_until_exit(&self, timeout: Duration) -> bool {
        if timeout > Duration::ZERO {
            if !self.signal.wait_timeout(timeout) {
                return false;
            }
        } else {
            self.signal.wait();
        }
        self.drain();
        true
    }

    /// Revoke the subscription and run the handlers. First caller wins;
    /// concurrent and repeat drains are no-ops.
    fn drain(&self) {
        let Some(mut handlers) = self.handlers.lock().unwrap().take() else {
            return;
        };
        self.subscription.revoke();
        log::debug!("draining {} quit handler(s)", handlers.len());
        for handler in &mut handlers {
            handler.on_quit();
        }
    }
}
