//! Debounced preview regeneration.
//!
//! Edits push the latest final code into the worker; once the input has
//! been quiet for the debounce window the most recent code is emitted for
//! rendering. Intermediate values are dropped.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{sleep_until, Instant};

use crate::config::EditorConfig;
use crate::debounce::Debouncer;

pub struct PreviewWorker {
    tx: mpsc::UnboundedSender<String>,
    handle: JoinHandle<()>,
}

impl PreviewWorker {
    /// Queue `code` for rendering, restarting the quiet period.
    /// Returns false once the worker has stopped.
    pub fn request(&self, code: impl Into<String>) -> bool {
        self.tx.send(code.into()).is_ok()
    }

    /// Stop the worker. A pending, not yet emitted render is discarded.
    pub async fn shutdown(self) {
        drop(self.tx);
        if let Err(err) = self.handle.await {
            tracing::warn!(error = %err, "preview worker ended abnormally");
        }
    }
}

/// Spawn the worker on the current tokio runtime. The receiver yields the
/// code to render after each quiet period.
pub fn spawn_preview_worker(window: Duration) -> (PreviewWorker, mpsc::UnboundedReceiver<String>) {
    let (tx, mut rx) = mpsc::unbounded_channel::<String>();
    let (out_tx, out_rx) = mpsc::unbounded_channel::<String>();

    let handle = tokio::spawn(async move {
        let mut debouncer = Debouncer::new(window);
        let mut pending: Option<String> = None;

        loop {
            let deadline = debouncer.deadline().unwrap_or_else(Instant::now);
            tokio::select! {
                msg = rx.recv() => match msg {
                    Some(code) => {
                        pending = Some(code);
                        debouncer.schedule(Instant::now());
                    }
                    None => break,
                },
                _ = sleep_until(deadline), if debouncer.is_pending() => {
                    if debouncer.fire_if_due(Instant::now()) {
                        if let Some(code) = pending.take() {
                            if out_tx.send(code).is_err() {
                                break;
                            }
                        }
                    }
                }
            }
        }
        tracing::debug!("preview worker stopped");
    });

    (PreviewWorker { tx, handle }, out_rx)
}

/// [`spawn_preview_worker`] with the debounce window from `config`
pub fn spawn_preview_worker_with_config(
    config: &EditorConfig,
) -> (PreviewWorker, mpsc::UnboundedReceiver<String>) {
    spawn_preview_worker(config.debounce_window())
}
