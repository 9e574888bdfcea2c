//! mushaf-view: progressive, cancellable page rendering.
//!
//! A per-page state machine (`Initial → Running ⇄ Paused → Finished`)
//! drives incremental rendering in cooperative ~16 ms slices; a bounded
//! LRU cache owns the page views; the viewer picks exactly one page to
//! drive forward per frame, pausing the previous one first, so at most
//! one page is ever `Running`.

pub mod cache;
pub mod state;
pub mod task;
pub mod viewer;

pub use cache::PageCache;
pub use state::{PageView, RenderingState};
pub use task::{Clock, FRAME_BUDGET_MS, RenderPage, SliceOutcome, WallClock};
pub use viewer::{ScrollDirection, Viewer, ViewportMetrics, VisiblePage, visible_pages};

use thiserror::Error;

/// Errors surfaced by the view layer.
#[derive(Debug, Error)]
pub enum ViewError {
    #[error("rendering page {page} line {line} failed: {message}")]
    Render {
        page: usize,
        line: usize,
        message: String,
    },
}
