//! Graceful shutdown demo.
//!
//! Run with: cargo run -p gracequit --example graceful
//! Then press Ctrl-C (or send SIGTERM) to watch the coordinated wind-down.
//! A second Ctrl-C during the wind-down kills the process immediately.

use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use gracequit::{QuitSignal, Quiter, handler_fn};

#[derive(Parser)]
#[command(about = "Spawn workers and shut them down gracefully on Ctrl-C")]
struct Cli {
    /// Number of worker threads
    #[arg(long, default_value_t = 2)]
    workers: usize,

    /// Seconds each worker takes to wind down after the quit signal
    #[arg(long, default_value_t = 2)]
    linger: u64,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    // Workers report completion here; the quit handler collects them all
    // before letting the process exit.
    let (done_tx, done_rx) = mpsc::channel();

    let worker_count = cli.workers;
    let root = QuitSignal::new();
    let quiter = Quiter::new(
        &root,
        vec![handler_fn(move || {
            log::info!("quit handler: waiting for {worker_count} worker(s) to finish");
            for _ in 0..worker_count {
                let _ = done_rx.recv();
            }
            log::info!("all workers finished");
        })],
    )?;

    for id in 0..cli.workers {
        let live = quiter.live_signal();
        let done_tx = done_tx.clone();
        let linger = cli.linger;
        thread::spawn(move || {
            log::info!("worker {id} started");
            live.wait();
            log::info!("worker {id}: quit signal received, winding down for {linger}s");
            thread::sleep(Duration::from_secs(linger));
            log::info!("worker {id} exited");
            let _ = done_tx.send(());
        });
    }
    drop(done_tx);

    log::info!("running, press Ctrl-C to quit");
    quiter.wait_until_exit(Duration::ZERO);
    log::info!("exit");
    Ok(())
}
