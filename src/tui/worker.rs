//! Background prediction worker.
//!
//! Runs the blocking HTTP call off the TUI main loop so the interface stays
//! responsive while showing a busy indicator. At most one worker exists at a
//! time; a new request is only started after the previous one resolved.

use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use crate::application::PredictionService;
use crate::domain::{Assessment, CustomerRecord};
use crate::ports::PredictionBackend;

/// Progress updates from the prediction worker.
#[derive(Debug, Clone)]
pub enum PredictionProgress {
    /// Request sent, waiting for the service
    Contacting,
    /// Prediction complete
    Complete(Box<Assessment>),
    /// Error occurred; carries the categorized user-facing message
    Error(String),
}

/// Handle to a running prediction worker.
pub struct PredictionWorkerHandle {
    progress_rx: Receiver<PredictionProgress>,
    _handle: JoinHandle<()>,
}

impl PredictionWorkerHandle {
    /// Try to receive the next progress update (non-blocking).
    #[must_use]
    pub fn try_recv(&self) -> Option<PredictionProgress> {
        self.progress_rx.try_recv().ok()
    }
}

/// Prediction worker that performs the remote call in the background.
pub struct PredictionWorker;

impl PredictionWorker {
    /// Spawn a background prediction task.
    ///
    /// Returns a handle to receive progress updates.
    pub fn spawn<B>(
        service: Arc<PredictionService<B>>,
        record: CustomerRecord,
    ) -> PredictionWorkerHandle
    where
        B: PredictionBackend + Send + Sync + 'static,
    {
        let (tx, rx) = mpsc::channel();

        let handle = thread::spawn(move || {
            Self::run_prediction(service, record, &tx);
        });

        PredictionWorkerHandle {
            progress_rx: rx,
            _handle: handle,
        }
    }

    fn run_prediction<B>(
        service: Arc<PredictionService<B>>,
        record: CustomerRecord,
        tx: &Sender<PredictionProgress>,
    ) where
        B: PredictionBackend + Send + Sync + 'static,
    {
        let _ = tx.send(PredictionProgress::Contacting);

        match service.run_prediction(record) {
            Ok(assessment) => {
                let _ = tx.send(PredictionProgress::Complete(Box::new(assessment)));
            }
            Err(e) => {
                let _ = tx.send(PredictionProgress::Error(e.to_string()));
            }
        }
    }
}
