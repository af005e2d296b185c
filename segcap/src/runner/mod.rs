mod manager;
mod worker;

pub use manager::provision;

use std::sync::{mpsc::channel, Arc};

use thiserror::Error;

use crate::{
    camera::CaptureRequest,
    capture::{EmitError, EmitReport, Emitter},
    render::FrameRenderer,
    scene::Scene,
    segcap_error, segcap_info,
};

#[derive(Debug, Error)]
pub enum RunError {
    #[error(transparent)]
    Emit(#[from] EmitError),
    #[error("Failed to spawn capture thread: {0}")]
    Spawn(#[from] std::io::Error),
    #[error("Capture manager stopped before finishing")]
    Disconnected,
}

/// Totals of a finished run
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RunSummary {
    pub captures: usize,
    pub masks: usize,
    pub discarded: usize,
    /// Indices of captures that failed to write, never reused
    pub failed: Vec<u64>,
    pub elapsed_s: f32,
}

impl RunSummary {
    fn record(&mut self, report: &EmitReport) {
        self.captures += 1;
        self.masks += report.masks.len();
        self.discarded += report.discarded;
    }
}

/// Runs batches of captures over one scene on a pool of worker threads.
pub struct CaptureRunner {
    scene: Arc<Scene>,
    renderer: Arc<dyn FrameRenderer>,
    emitter: Emitter,
    thread_count: usize,
}

impl CaptureRunner {
    /// Creates a new `CaptureRunner`. A `thread_count` of 0 uses every logical core.
    pub fn new(
        scene: Arc<Scene>,
        renderer: Arc<dyn FrameRenderer>,
        emitter: Emitter,
        thread_count: usize,
    ) -> Self {
        let thread_count = if thread_count == 0 {
            num_cpus::get()
        } else {
            thread_count
        };

        Self {
            scene,
            renderer,
            emitter,
            thread_count,
        }
    }

    pub fn thread_count(&self) -> usize {
        self.thread_count
    }

    /// Captures every request, indices following the order of `requests`.
    ///
    /// Failed captures are logged and listed in the summary. Only index recovery and thread
    /// setup fail the whole run.
    pub fn run(&self, requests: Vec<CaptureRequest>) -> Result<RunSummary, RunError> {
        let (to_parent, from_manager) = channel();
        let handle = manager::launch(
            manager::Payload {
                scene: Arc::clone(&self.scene),
                renderer: Arc::clone(&self.renderer),
                emitter: self.emitter.clone(),
                requests,
                thread_count: self.thread_count,
            },
            to_parent,
        )?;

        let mut summary = None;
        while let Ok(msg) = from_manager.recv() {
            match msg {
                manager::Message::Progress {
                    captures_done,
                    captures_total,
                    report,
                    elapsed_s,
                } => {
                    segcap_info!(
                        "Cam_{} done in {:.2}s with {} masks ({} discarded), {}/{}",
                        report.index,
                        elapsed_s,
                        report.masks.len(),
                        report.discarded,
                        captures_done,
                        captures_total
                    );
                }
                manager::Message::Failed { index, reason } => {
                    segcap_error!("Cam_{} failed: {}", index, reason);
                }
                manager::Message::Finished(s) => {
                    summary = Some(s);
                    break;
                }
            }
        }

        if handle.join().is_err() {
            segcap_error!("Capture manager panicked");
        }

        summary.ok_or(RunError::Disconnected)
    }
}
