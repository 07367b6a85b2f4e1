use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use listing_core::Effect;
use listing_logging::{listing_debug, listing_error};
use tokio_util::sync::CancellationToken;

use crate::collaborators::{execute_effect, Collaborators};
use crate::ListingEvent;

enum ListingCommand {
    Run(Effect),
}

/// Executes effects on a background runtime and hands results back as events.
///
/// Effects are dispatched without waiting for them. After `shutdown` no
/// further event is delivered, including results of work already in flight.
pub struct ListingHandle {
    cmd_tx: Option<mpsc::Sender<ListingCommand>>,
    event_rx: mpsc::Receiver<ListingEvent>,
    cancel: CancellationToken,
    worker: Option<thread::JoinHandle<()>>,
}

impl ListingHandle {
    pub fn new(collaborators: Collaborators) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let cancel = CancellationToken::new();

        let worker_cancel = cancel.clone();
        let worker = thread::spawn(move || {
            run_worker(Arc::new(collaborators), cmd_rx, event_tx, worker_cancel);
        });

        Self {
            cmd_tx: Some(cmd_tx),
            event_rx,
            cancel,
            worker: Some(worker),
        }
    }

    pub fn execute(&self, effects: Vec<Effect>) {
        let Some(cmd_tx) = &self.cmd_tx else {
            listing_debug!("listing handle shut down; dropping {} effect(s)", effects.len());
            return;
        };
        for effect in effects {
            let _ = cmd_tx.send(ListingCommand::Run(effect));
        }
    }

    pub fn try_recv(&self) -> Option<ListingEvent> {
        if self.is_shut_down() {
            return None;
        }
        self.event_rx.try_recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<ListingEvent> {
        if self.is_shut_down() {
            return None;
        }
        self.event_rx.recv_timeout(timeout).ok()
    }

    pub fn is_shut_down(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Cancels in-flight effects and discards anything not yet received.
    pub fn shutdown(&mut self) {
        if self.cancel.is_cancelled() && self.worker.is_none() {
            return;
        }
        self.cancel.cancel();
        self.cmd_tx.take();
        if let Some(worker) = self.worker.take() {
            if worker.join().is_err() {
                listing_error!("listing worker panicked during shutdown");
            }
        }
        while self.event_rx.try_recv().is_ok() {}
    }
}

impl Drop for ListingHandle {
    fn drop(&mut self) {
        self.shutdown();
    }
}

fn run_worker(
    collaborators: Arc<Collaborators>,
    cmd_rx: mpsc::Receiver<ListingCommand>,
    event_tx: mpsc::Sender<ListingEvent>,
    cancel: CancellationToken,
) {
    let runtime = match tokio::runtime::Runtime::new() {
        Ok(runtime) => runtime,
        Err(err) => {
            listing_error!("failed to start listing runtime: {}", err);
            return;
        }
    };

    while let Ok(command) = cmd_rx.recv() {
        if cancel.is_cancelled() {
            break;
        }
        match command {
            ListingCommand::Run(effect) => {
                let collaborators = collaborators.clone();
                let event_tx = event_tx.clone();
                let cancel = cancel.clone();
                runtime.spawn(async move {
                    tokio::select! {
                        biased;
                        _ = cancel.cancelled() => {
                            listing_debug!("effect cancelled by shutdown");
                        }
                        event = execute_effect(&collaborators, effect) => {
                            if !cancel.is_cancelled() {
                                let _ = event_tx.send(event);
                            }
                        }
                    }
                });
            }
        }
    }

    runtime.shutdown_timeout(Duration::from_millis(250));
}
