//! Inference worker
//!
//! Runs recognition requests off the UI thread. Requests are handled one at
//! a time, so this process never writes the output slot concurrently.

use crossbeam_channel::{unbounded, Receiver, Sender, TryRecvError};
use parking_lot::RwLock;
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::Instant;
use tracing::{info, warn};

use crate::recognition::RecognitionAdapter;
use crate::shared::{InferenceRequest, RuntimeState, WorkerCommand, WorkerEvent};

/// Handle to the background inference thread
pub struct InferenceWorker {
    to_worker: Sender<WorkerCommand>,
    from_worker: Receiver<WorkerEvent>,
    handle: Option<JoinHandle<()>>,
}

impl InferenceWorker {
    /// Start the worker thread
    pub fn spawn(adapter: Arc<RecognitionAdapter>, runtime: Arc<RwLock<RuntimeState>>) -> Self {
        let (to_worker, commands) = unbounded();
        let (events, from_worker) = unbounded();

        let handle = std::thread::spawn(move || {
            info!("Inference worker starting...");
            run_worker(&adapter, &runtime, commands, events);
            info!("Inference worker exiting...");
        });

        Self {
            to_worker,
            from_worker,
            handle: Some(handle),
        }
    }

    /// Queue sample provisioning
    pub fn prepare_samples(&self) {
        let _ = self.to_worker.send(WorkerCommand::PrepareSamples);
    }

    /// Queue a recognition request
    pub fn submit(&self, request: InferenceRequest) {
        if self.to_worker.send(WorkerCommand::Run(request)).is_err() {
            warn!("Inference worker is gone; request dropped");
        }
    }

    /// Next finished event, if any
    pub fn try_recv(&self) -> Option<WorkerEvent> {
        match self.from_worker.try_recv() {
            Ok(event) => Some(event),
            Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => None,
        }
    }

    /// Check if the worker thread is alive
    pub fn is_running(&self) -> bool {
        self.handle
            .as_ref()
            .map(|h| !h.is_finished())
            .unwrap_or(false)
    }
}

impl Drop for InferenceWorker {
    fn drop(&mut self) {
        let _ = self.to_worker.send(WorkerCommand::Shutdown);

        // An in-flight engine call cannot be cancelled; wait for it
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

fn run_worker(
    adapter: &RecognitionAdapter,
    runtime: &RwLock<RuntimeState>,
    commands: Receiver<WorkerCommand>,
    events: Sender<WorkerEvent>,
) {
    for command in commands {
        let event = match command {
            WorkerCommand::Shutdown => break,
            WorkerCommand::PrepareSamples => {
                let result = adapter.provisioner().ensure_samples().map_err(|e| e.to_string());
                if let Err(message) = &result {
                    warn!("Sample provisioning failed: {}", message);
                }
                runtime
                    .write()
                    .set_samples(adapter.provisioner().all_present(), result.as_ref().err().cloned());
                WorkerEvent::SamplesPrepared(result)
            }
            WorkerCommand::Run(request) => run_request(adapter, runtime, request),
        };

        if events.send(event).is_err() {
            break;
        }
    }
}

fn run_request(
    adapter: &RecognitionAdapter,
    runtime: &RwLock<RuntimeState>,
    request: InferenceRequest,
) -> WorkerEvent {
    runtime.write().is_processing = true;
    let start = Instant::now();

    let outcome = adapter.inference_with(&request.image, &request.languages);
    let elapsed_ms = start.elapsed().as_millis() as u64;

    let mut state = runtime.write();
    state.is_processing = false;
    state.requests_completed += 1;
    state.last_processing_time_ms = elapsed_ms;
    state.set_samples(adapter.provisioner().all_present(), None);
    drop(state);

    match outcome {
        Ok(result) => {
            // Decode now: the slot may be overwritten by the next request
            let preview = match image::open(&result.image_path) {
                Ok(img) => Some(img.to_rgba8()),
                Err(e) => {
                    warn!("Could not reload result image {:?}: {}", result.image_path, e);
                    None
                }
            };
            WorkerEvent::Completed {
                id: request.id,
                result,
                preview,
                elapsed_ms,
            }
        }
        Err(e) => {
            warn!("Request {} failed: {}", request.id, e);
            WorkerEvent::Failed {
                id: request.id,
                message: e.to_string(),
                elapsed_ms,
            }
        }
    }
}
