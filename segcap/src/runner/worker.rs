use std::{
    collections::VecDeque,
    sync::{mpsc::Sender, Arc, Mutex, PoisonError},
    time::Instant,
};

use crate::{
    capture::{Capture, EmitError, EmitReport, Emitter},
    render::FrameRenderer,
    scene::{DetectableSet, Scene},
    segcap_debug, segcap_error, segcap_trace,
};

pub enum Message {
    CaptureDone {
        thread_id: usize,
        report: EmitReport,
        elapsed_s: f32,
    },
    CaptureFailed {
        thread_id: usize,
        index: u64,
        error: EmitError,
    },
    Finished {
        thread_id: usize,
    },
}

/// Shared by every worker of a run
pub struct Payload {
    pub captures: Arc<Mutex<VecDeque<Capture>>>,
    pub scene: Arc<Scene>,
    pub detectable: DetectableSet,
    pub renderer: Arc<dyn FrameRenderer>,
    pub emitter: Emitter,
}

/// Runs captures from the shared queue until it is empty.
pub fn launch(thread_id: usize, payload: &Payload, to_parent: &Sender<Message>) {
    segcap_debug!("Capture thread {}: Begin", thread_id);

    while let Some(capture) = pop_capture(payload) {
        let index = capture.index;
        segcap_trace!("Capture thread {}: Cam_{}", thread_id, index);

        let capture_start = Instant::now();
        let msg = match run_capture(capture, payload) {
            Ok(report) => Message::CaptureDone {
                thread_id,
                report,
                elapsed_s: capture_start.elapsed().as_secs_f32(),
            },
            Err(error) => Message::CaptureFailed {
                thread_id,
                index,
                error,
            },
        };

        if let Err(why) = to_parent.send(msg) {
            segcap_error!(
                "Capture thread {}: Error reporting Cam_{}: {}",
                thread_id,
                index,
                why
            );
        }
    }

    segcap_trace!("Capture thread {}: Signal done", thread_id);
    if let Err(why) = to_parent.send(Message::Finished { thread_id }) {
        segcap_error!(
            "Capture thread {}: Error notifying parent on finish: {}",
            thread_id,
            why
        );
    }

    segcap_debug!("Capture thread {}: End", thread_id);
}

fn pop_capture(payload: &Payload) -> Option<Capture> {
    // A panicking worker can't leave the queue half-updated
    let mut captures = payload
        .captures
        .lock()
        .unwrap_or_else(PoisonError::into_inner);
    captures.pop_front()
}

fn run_capture(capture: Capture, payload: &Payload) -> Result<EmitReport, EmitError> {
    capture
        .render(payload.renderer.as_ref())
        .extract_masks(payload.scene.as_ref(), &payload.detectable)
        .emit(&payload.emitter, &payload.scene.objects)
}
