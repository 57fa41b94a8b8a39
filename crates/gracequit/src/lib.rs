//! Gracequit - graceful shutdown coordination for long-running processes
//!
//! A [`Quiter`] listens for SIGINT/SIGTERM, propagates a one-shot
//! cancellation to worker threads through a shared [`LiveSignal`], runs
//! registered [`QuitHandler`]s, and lets the main thread block until
//! shutdown is complete or a timeout elapses.
//!
//! ```no_run
//! use std::time::Duration;
//! use gracequit::{QuitSignal, Quiter, handler_fn};
//!
//! let root = QuitSignal::new();
//! let quiter = Quiter::new(
//!     &root,
//!     vec![handler_fn(|| {
//!         println!("flushing state before exit");
//!     })],
//! )?;
//!
//! let live = quiter.live_signal();
//! std::thread::spawn(move || {
//!     while !live.is_done() {
//!         // ... one unit of work ...
//!     }
//! });
//!
//! quiter.wait_until_exit(Duration::ZERO);
//! # Ok::<(), std::io::Error>(())
//! ```

pub mod handler;
pub mod lifecycle;
pub mod quiter;
mod signals;

// Re-exports for convenience
pub use handler::{QuitHandler, handler_fn};
pub use lifecycle::{LiveSignal, QuitSignal};
pub use quiter::Quiter;
