use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use crate::analysis::fingerprint::{analyze_cancellable, Fingerprint};
use crate::engine::Tuning;
use crate::error::{Error, Result};

/// A fingerprint analysis running off the interactive loop.
///
/// Analysis time grows with clip length, so the control loop must never
/// block on it. The task owns its copy of the clip, publishes exactly one
/// immutable [`Fingerprint`] result, and can be cancelled at any point —
/// the worker checks the flag between FFT frames and discards partial
/// state on its own stack, so no shared state can be left corrupted.
pub struct AnalysisTask {
    cancel: Arc<AtomicBool>,
    rx: Receiver<Result<Fingerprint>>,
    handle: Option<JoinHandle<()>>,
}

impl AnalysisTask {
    pub fn spawn(samples: Vec<f32>, sample_rate: u32, tuning: Tuning) -> Self {
        let cancel = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&cancel);
        let (tx, rx) = mpsc::channel();
        let handle = thread::spawn(move || {
            let result = analyze_cancellable(&samples, sample_rate, &tuning, Some(&flag));
            // The receiver may already be gone (task dropped); nothing to do.
            let _ = tx.send(result);
        });
        Self {
            cancel,
            rx,
            handle: Some(handle),
        }
    }

    /// Request cancellation. Takes effect at the next frame boundary.
    pub fn cancel(&self) {
        self.cancel.store(true, Ordering::Relaxed);
    }

    /// Non-blocking poll; `None` while the worker is still running.
    pub fn try_result(&self) -> Option<Result<Fingerprint>> {
        match self.rx.try_recv() {
            Ok(result) => Some(result),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => Some(Err(Error::Cancelled)),
        }
    }

    /// Block until the worker finishes and return its result.
    pub fn join(mut self) -> Result<Fingerprint> {
        let result = self.rx.recv().map_err(|_| Error::Cancelled)?;
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
        result
    }
}

impl Drop for AnalysisTask {
    fn drop(&mut self) {
        // Let an in-flight worker wind down instead of blocking the caller.
        self.cancel.store(true, Ordering::Relaxed);
    }
}
