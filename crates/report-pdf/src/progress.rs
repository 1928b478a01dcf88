//! Progress reporting
//!
//! Generation runs on the blocking pool; frontends observe it through a
//! channel-backed [`ProgressReporter`]. The reporter enforces the stage
//! contract: stages only move forward, so a consumer can treat the stream
//! as a monotonic state machine even if producers misbehave.

use std::sync::{Arc, Mutex};

use tokio::sync::mpsc;

/// Pipeline stages, in the order they are reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ProgressStage {
    /// Pipeline accepted the request
    Init,
    /// Photos are being normalized (decode, orient, downscale, re-encode)
    Compressing,
    /// Pages are being laid out and rendered
    Generating,
    /// Document bytes are being turned into a file
    Creating,
    /// Output is being handed to the destination
    Sharing,
    /// Finished successfully
    Complete,
}

impl ProgressStage {
    pub fn as_str(self) -> &'static str {
        match self {
            ProgressStage::Init => "init",
            ProgressStage::Compressing => "compressing",
            ProgressStage::Generating => "generating",
            ProgressStage::Creating => "creating",
            ProgressStage::Sharing => "sharing",
            ProgressStage::Complete => "complete",
        }
    }
}

/// One progress event sent from the pipeline to a frontend.
#[derive(Debug, Clone)]
pub struct ProgressUpdate {
    pub stage: ProgressStage,
    pub message: String,
    /// 0-100 where the stage has a measurable span
    pub percent: Option<u8>,
    /// Item counter within the stage, e.g. photo 3 of 7
    pub current: Option<usize>,
    pub total: Option<usize>,
}

/// Sends [`ProgressUpdate`]s to an optional consumer.
///
/// Cloned reporters share the stage clamp, so events stay ordered across
/// the async/blocking boundary. A closed or absent receiver is fine; sends
/// are fire-and-forget.
#[derive(Debug, Clone)]
pub struct ProgressReporter {
    sender: Option<mpsc::UnboundedSender<ProgressUpdate>>,
    stage: Arc<Mutex<ProgressStage>>,
}

impl ProgressReporter {
    /// Reporter plus the receiving end for a frontend to drain.
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<ProgressUpdate>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        let reporter = ProgressReporter {
            sender: Some(sender),
            stage: Arc::new(Mutex::new(ProgressStage::Init)),
        };
        (reporter, receiver)
    }

    /// Reporter that drops every update. For callers that don't care.
    pub fn disabled() -> Self {
        ProgressReporter {
            sender: None,
            stage: Arc::new(Mutex::new(ProgressStage::Init)),
        }
    }

    /// Report a stage transition with a message and no counters.
    pub fn report(&self, stage: ProgressStage, message: impl Into<String>) {
        self.send(ProgressUpdate {
            stage,
            message: message.into(),
            percent: None,
            current: None,
            total: None,
        });
    }

    /// Report within-stage progress (percent plus an item counter).
    pub fn report_count(
        &self,
        stage: ProgressStage,
        message: impl Into<String>,
        percent: u8,
        current: usize,
        total: usize,
    ) {
        self.send(ProgressUpdate {
            stage,
            message: message.into(),
            percent: Some(percent),
            current: Some(current),
            total: Some(total),
        });
    }

    fn send(&self, mut update: ProgressUpdate) {
        let Some(sender) = &self.sender else {
            return;
        };
        {
            let mut stage = match self.stage.lock() {
                Ok(guard) => guard,
                Err(poisoned) => poisoned.into_inner(),
            };
            if update.stage < *stage {
                // Out-of-order report: clamp to the stage already reached
                update.stage = *stage;
            } else {
                *stage = update.stage;
            }
        }
        // Receiver gone means the frontend stopped listening; not an error
        let _ = sender.send(update);
    }
}
