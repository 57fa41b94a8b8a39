//! OS termination-signal subscription.
//!
//! SIGINT and SIGTERM are hooked through `signal-hook`: a dedicated listener
//! thread cancels the lifecycle signal on every delivery, and a conditional
//! shutdown hook terminates the process (exit code 130) for any signal that
//! arrives after the subscription has been revoked.

use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;

use signal_hook::SigId;
use signal_hook::consts::{SIGINT, SIGTERM};
use signal_hook::flag;
use signal_hook::iterator::Signals;
use signal_hook::iterator::backend::Handle;
use signal_hook::low_level;

use crate::lifecycle::QuitSignal;

const TERM_SIGNALS: [i32; 2] = [SIGINT, SIGTERM];

pub(crate) struct SignalSubscription {
    /// Arms process termination for signals arriving after revocation.
    revoked: Arc<AtomicBool>,
    handle: Handle,
    listener: Mutex<Option<JoinHandle<()>>>,
    shutdown_ids: Vec<SigId>,
}

impl SignalSubscription {
    /// Hook SIGINT/SIGTERM and spawn the listener thread.
    ///
    /// Hooks must stay async-signal-safe, so cancellation happens on the
    /// listener thread, never inside the signal handler itself.
    pub(crate) fn listen(signal: QuitSignal) -> io::Result<SignalSubscription> {
        let revoked = Arc::new(AtomicBool::new(false));
        let mut shutdown_ids = Vec::new();
        match Self::hook(&revoked, &mut shutdown_ids, signal) {
            Ok((handle, listener)) => Ok(SignalSubscription {
                revoked,
                handle,
                listener: Mutex::new(Some(listener)),
                shutdown_ids,
            }),
            Err(e) => {
                for id in shutdown_ids {
                    low_level::unregister(id);
                }
                Err(e)
            }
        }
    }

    fn hook(
        revoked: &Arc<AtomicBool>,
        shutdown_ids: &mut Vec<SigId>,
        signal: QuitSignal,
    ) -> io::Result<(Handle, JoinHandle<()>)> {
        for sig in TERM_SIGNALS {
            // Inert while `revoked` is false; the arming happens in revoke()
            shutdown_ids.push(flag::register_conditional_shutdown(
                sig,
                130,
                Arc::clone(revoked),
            )?);
        }

        let mut signals = Signals::new(TERM_SIGNALS)?;
        let handle = signals.handle();
        let listener = std::thread::Builder::new()
            .name("gracequit-signals".into())
            .spawn(move || {
                for sig in signals.forever() {
                    log::debug!("termination signal {sig} received, triggering shutdown");
                    signal.cancel();
                }
            })?;
        Ok((handle, listener))
    }

    /// Stop intercepting SIGINT/SIGTERM.
    ///
    /// From here on a termination signal exits the process with code 130
    /// instead of being swallowed by a dead subscription. Called from the
    /// drain path only.
    pub(crate) fn revoke(&self) {
        self.revoked.store(true, Ordering::SeqCst);
        self.handle.close();
        if let Some(listener) = self.listener.lock().unwrap().take() {
            let _ = listener.join();
        }
        log::debug!("signal subscription revoked");
    }

    fn is_revoked(&self) -> bool {
        self.revoked.load(Ordering::SeqCst)
    }
}

impl Drop for SignalSubscription {
    fn drop(&mut self) {
        // A quiter dropped without ever draining releases its hooks without
        // arming the post-revocation termination path.
        if !self.is_revoked() {
            for id in &self.shutdown_ids {
                low_level::unregister(*id);
            }
            self.handle.close();
        }
    }
}
