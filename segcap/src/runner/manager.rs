use std::{
    collections::VecDeque,
    sync::{
        mpsc::{channel, Sender},
        Arc, Mutex,
    },
    thread::JoinHandle,
    time::Instant,
};

use super::{worker, RunError, RunSummary};
use crate::{
    camera::CaptureRequest,
    capture::{Capture, EmitError, EmitReport, Emitter, IndexAllocator},
    render::FrameRenderer,
    scene::Scene,
    segcap_debug, segcap_error, segcap_trace,
};

pub enum Message {
    Progress {
        captures_done: usize,
        captures_total: usize,
        report: EmitReport,
        elapsed_s: f32,
    },
    Failed {
        index: u64,
        reason: String,
    },
    Finished(RunSummary),
}

pub struct Payload {
    pub scene: Arc<Scene>,
    pub renderer: Arc<dyn FrameRenderer>,
    pub emitter: Emitter,
    pub requests: Vec<CaptureRequest>,
    pub thread_count: usize,
}

/// Assigns indices in request order and queues the captures for the workers.
///
/// The allocator is the only source of indices within a run, so captures of one run never
/// share an index.
pub fn provision(
    requests: &[CaptureRequest],
    allocator: &mut IndexAllocator,
) -> Result<VecDeque<Capture>, EmitError> {
    requests
        .iter()
        .map(|&request| allocator.allocate().map(|index| Capture::new(index, request)))
        .collect()
}

pub fn launch(payload: Payload, to_parent: Sender<Message>) -> Result<JoinHandle<()>, RunError> {
    let mut allocator = IndexAllocator::recover(payload.emitter.layout())?;
    segcap_debug!(
        "Capture manager: First index is {} for {}",
        allocator.peek(),
        payload.emitter.layout().root().display()
    );
    let captures = provision(&payload.requests, &mut allocator)?;

    let handle = std::thread::Builder::new()
        .name("CaptureManager".into())
        .spawn(move || run(payload, captures, &to_parent))?;
    Ok(handle)
}

fn run(payload: Payload, captures: VecDeque<Capture>, to_parent: &Sender<Message>) {
    let run_start = Instant::now();
    let captures_total = captures.len();
    let thread_count = payload.thread_count.clamp(1, captures_total.max(1));

    let worker_payload = Arc::new(worker::Payload {
        captures: Arc::new(Mutex::new(captures)),
        detectable: payload.scene.detectable(),
        scene: payload.scene,
        renderer: payload.renderer,
        emitter: payload.emitter,
    });

    segcap_trace!("Capture manager: Launch {} threads", thread_count);
    let (worker_send, from_workers) = channel();
    let mut workers = Vec::with_capacity(thread_count);
    for thread_id in 0..thread_count {
        let worker_send = worker_send.clone();
        let worker_payload = Arc::clone(&worker_payload);
        match std::thread::Builder::new()
            .name("CaptureWorker".into())
            .spawn(move || worker::launch(thread_id, &worker_payload, &worker_send))
        {
            Ok(handle) => workers.push(handle),
            Err(why) => segcap_error!("Capture manager: Failed to spawn worker: {}", why),
        }
    }
    // Only the workers hold senders now so the loop ends if they all die
    drop(worker_send);

    let mut summary = RunSummary::default();
    let mut active_workers = workers.len();
    while active_workers > 0 {
        let msg = match from_workers.recv() {
            Ok(msg) => msg,
            Err(_) => {
                segcap_error!("Capture manager: Workers disconnected");
                break;
            }
        };

        let forward = match msg {
            worker::Message::CaptureDone {
                thread_id,
                report,
                elapsed_s,
            } => {
                segcap_trace!(
                    "Capture manager: Worker {} finished Cam_{}",
                    thread_id,
                    report.index
                );
                summary.record(&report);
                Some(Message::Progress {
                    captures_done: summary.captures,
                    captures_total,
                    report,
                    elapsed_s,
                })
            }
            worker::Message::CaptureFailed {
                thread_id,
                index,
                error,
            } => {
                segcap_trace!("Capture manager: Worker {} failed Cam_{}", thread_id, index);
                summary.failed.push(index);
                Some(Message::Failed {
                    index,
                    reason: error.to_string(),
                })
            }
            worker::Message::Finished { thread_id } => {
                segcap_trace!("Capture manager: Worker {} finished", thread_id);
                active_workers -= 1;
                None
            }
        };

        if let Some(msg) = forward {
            if let Err(why) = to_parent.send(msg) {
                segcap_error!("Capture manager: Error sending progress to parent: {}", why);
            }
        }
    }

    for handle in workers {
        if handle.join().is_err() {
            segcap_error!("Capture manager: A worker panicked");
        }
    }

    summary.failed.sort_unstable();
    summary.elapsed_s = run_start.elapsed().as_secs_f32();
    if let Err(why) = to_parent.send(Message::Finished(summary)) {
        segcap_error!("Capture manager: Error notifying parent on finish: {}", why);
    }

    segcap_debug!("Capture manager: End");
}
