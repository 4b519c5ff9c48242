//! Last-writer-wins preview rendering.
//!
//! A `watch` channel is the request slot: submitting overwrites whatever is
//! pending, so the worker only ever picks up the newest snapshot. Renders run
//! on the blocking pool. A finished frame is published only if no newer
//! snapshot was submitted while it rendered.
//!
//! ```text
//! submit(g=1) ─┐
//! submit(g=2) ─┼─► [slot: g=3] ─► worker ─► render ─► g == latest? ─► frames
//! submit(g=3) ─┘
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use mirrorlab_core::{Adjustments, PixelBuffer, render};
use parking_lot::RwLock;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, error, trace};

/// A rendered preview and the snapshot it was rendered from.
#[derive(Debug)]
pub struct RenderedFrame {
    pub generation: u64,
    pub adjustments: Arc<Adjustments>,
    pub image: PixelBuffer,
}

#[derive(Debug, Clone)]
struct RenderRequest {
    generation: u64,
    adjustments: Arc<Adjustments>,
}

type SharedSource = Arc<RwLock<Option<Arc<PixelBuffer>>>>;

/// Owns the render worker. Dropping the scheduler stops the worker once it
/// finishes any render in flight.
pub struct RenderScheduler {
    requests: watch::Sender<Option<RenderRequest>>,
    frames: watch::Receiver<Option<Arc<RenderedFrame>>>,
    latest: Arc<AtomicU64>,
    source: SharedSource,
    worker: JoinHandle<()>,
}

impl RenderScheduler {
    /// Start the worker on the current tokio runtime.
    ///
    /// Must be called from within a tokio runtime.
    pub fn spawn() -> Self {
        let (requests, request_rx) = watch::channel(None);
        let (frame_tx, frames) = watch::channel(None);
        let latest = Arc::new(AtomicU64::new(0));
        let source: SharedSource = Arc::new(RwLock::new(None));

        let worker = tokio::spawn(run_worker(
            request_rx,
            frame_tx,
            Arc::clone(&latest),
            Arc::clone(&source),
        ));

        Self {
            requests,
            frames,
            latest,
            source,
            worker,
        }
    }

    /// Replace the image previews are rendered from.
    pub fn set_source(&self, image: PixelBuffer) {
        debug!(
            width = image.width(),
            height = image.height(),
            "render source replaced"
        );
        *self.source.write() = Some(Arc::new(image));
    }

    pub fn source(&self) -> Option<Arc<PixelBuffer>> {
        self.source.read().clone()
    }

    /// Queue `adjustments` for rendering, replacing any pending request.
    /// Returns the request's generation.
    pub fn submit(&self, adjustments: Arc<Adjustments>) -> u64 {
        let mut generation = 0;
        // Bump under the slot's lock so the slot always holds the newest
        // generation, whatever order concurrent submitters finish in.
        self.requests.send_modify(|slot| {
            generation = self.latest.fetch_add(1, Ordering::AcqRel) + 1;
            *slot = Some(RenderRequest {
                generation,
                adjustments,
            });
        });
        trace!(generation, "render requested");
        generation
    }

    /// Generation of the most recent submission (0 before any).
    pub fn latest_generation(&self) -> u64 {
        self.latest.load(Ordering::Acquire)
    }

    /// Receiver that observes every published frame.
    pub fn subscribe(&self) -> watch::Receiver<Option<Arc<RenderedFrame>>> {
        self.frames.clone()
    }

    /// The newest published frame, if any.
    pub fn latest_frame(&self) -> Option<Arc<RenderedFrame>> {
        self.frames.borrow().clone()
    }

    /// Close the request slot and wait for the worker to exit.
    pub async fn shutdown(self) {
        let Self {
            requests, worker, ..
        } = self;
        drop(requests);
        if let Err(e) = worker.await {
            error!("render worker terminated abnormally: {e}");
        }
    }
}

async fn run_worker(
    mut requests: watch::Receiver<Option<RenderRequest>>,
    frames: watch::Sender<Option<Arc<RenderedFrame>>>,
    latest: Arc<AtomicU64>,
    source: SharedSource,
) {
    while requests.changed().await.is_ok() {
        let Some(request) = requests.borrow_and_update().clone() else {
            continue;
        };
        let Some(image) = source.read().clone() else {
            debug!(generation = request.generation, "no source image, skipping render");
            continue;
        };

        let adjustments = Arc::clone(&request.adjustments);
        let rendered = tokio::task::spawn_blocking(move || render(&image, &adjustments)).await;
        let image = match rendered {
            Ok(image) => image,
            Err(e) => {
                error!(generation = request.generation, "render task failed: {e}");
                continue;
            }
        };

        let newest = latest.load(Ordering::Acquire);
        if request.generation != newest {
            debug!(
                generation = request.generation,
                newest, "discarding stale frame"
            );
            continue;
        }

        frames.send_replace(Some(Arc::new(RenderedFrame {
            generation: request.generation,
            adjustments: request.adjustments,
            image,
        })));
    }
    debug!("render worker stopped");
}
