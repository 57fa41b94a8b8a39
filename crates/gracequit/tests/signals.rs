//! Real-signal path: a raised SIGTERM must drive trigger and drain.
//!
//! Kept as a single test in its own binary: signal dispositions are
//! process-global, and draining arms process termination for any later
//! termination signal.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use gracequit::{QuitSignal, Quiter, handler_fn};

#[test]
fn sigterm_triggers_drain() {
    let counter = Arc::new(AtomicUsize::new(0));
    let root = QuitSignal::new();
    let quiter = {
        let counter = Arc::clone(&counter);
        Quiter::new(
            &root,
            vec![handler_fn(move || {
                counter.fetch_add(1, Ordering::SeqCst);
            })],
        )
        .unwrap()
    };
    let live = quiter.live_signal();

    signal_hook::low_level::raise(signal_hook::consts::SIGTERM).unwrap();

    assert!(quiter.wait_until_exit(Duration::from_secs(10)));
    assert!(live.is_done());
    assert_eq!(counter.load(Ordering::SeqCst), 1);
}
