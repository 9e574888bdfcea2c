//! Viewport math and the one-page-at-a-time scheduling discipline.

use tracing::debug;

use crate::cache::PageCache;
use crate::state::{PageView, RenderingState};
use crate::task::{Clock, RenderPage, SliceOutcome};

/// Scroll/viewport geometry for one frame.
#[derive(Debug, Clone, Copy)]
pub struct ViewportMetrics {
    pub scroll_y: f32,
    pub viewport_height: f32,
    pub page_height: f32,
    pub page_count: usize,
}

/// A page intersecting the viewport and how much of it shows.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisiblePage {
    pub page: usize,
    /// Fraction of the page's height inside the viewport, 0..=1.
    pub visibility: f32,
}

/// Pages intersecting the viewport, in page order, with intersection
/// percentages.
pub fn visible_pages(metrics: &ViewportMetrics) -> Vec<VisiblePage> {
    let mut result = Vec::new();
    if metrics.page_height <= 0.0 || metrics.page_count == 0 {
        return result;
    }
    let top = metrics.scroll_y;
    let bottom = metrics.scroll_y + metrics.viewport_height;
    let first = (top / metrics.page_height).floor().max(0.0) as usize;
    let last = (bottom / metrics.page_height).ceil().max(0.0) as usize;
    for page in first..last.min(metrics.page_count) {
        let page_top = page as f32 * metrics.page_height;
        let page_bottom = page_top + metrics.page_height;
        let overlap = bottom.min(page_bottom) - top.max(page_top);
        if overlap > 0.0 {
            result.push(VisiblePage {
                page,
                visibility: overlap / metrics.page_height,
            });
        }
    }
    result
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollDirection {
    Forward,
    Backward,
}

/// Drives progressive rendering across the viewport.
///
/// Per frame: recompute visibility, resize the cache to
/// `max(default, 2 * visible + 1)`, pick the highest-priority page, and
/// advance it by one slice — pausing whichever page ran before it, so
/// only one view is ever `Running`.
pub struct Viewer {
    cache: PageCache,
    default_capacity: usize,
    current: Option<usize>,
    last_scroll_y: f32,
}

impl Viewer {
    pub fn new(default_capacity: usize) -> Self {
        Self {
            cache: PageCache::new(default_capacity),
            default_capacity,
            current: None,
            last_scroll_y: 0.0,
        }
    }

    pub fn cache(&self) -> &PageCache {
        &self.cache
    }

    pub fn cache_mut(&mut self) -> &mut PageCache {
        &mut self.cache
    }

    /// Clear all page state (layout-affecting configuration changed).
    pub fn reset(&mut self) {
        self.cache.clear();
        self.current = None;
    }

    /// Advance rendering by one frame. Returns the outcome of the
    /// slice that ran, or `None` when nothing needs driving.
    pub fn drive_frame(
        &mut self,
        metrics: &ViewportMetrics,
        renderer: &mut dyn RenderPage,
        clock: &dyn Clock,
    ) -> Option<SliceOutcome> {
        let visible = visible_pages(metrics);
        let direction = if metrics.scroll_y >= self.last_scroll_y {
            ScrollDirection::Forward
        } else {
            ScrollDirection::Backward
        };
        self.last_scroll_y = metrics.scroll_y;

        let capacity = self.default_capacity.max(2 * visible.len() + 1);
        self.cache.resize(capacity);

        for vp in &visible {
            if !self.cache.contains(vp.page) {
                self.cache.push(PageView::new(vp.page));
            }
            self.cache.touch(vp.page);
        }

        let target = self.pick_target(&visible, direction, metrics.page_count)?;

        // Cooperative hand-off: park the previously driven page before
        // the new one runs.
        if let Some(previous) = self.current {
            if previous != target {
                if let Some(view) = self.cache.get_mut(previous) {
                    if view.state() == RenderingState::Running {
                        view.pause();
                        view.run_slice(renderer, clock);
                    }
                }
            }
        }

        if !self.cache.contains(target) {
            self.cache.push(PageView::new(target));
        }
        self.cache.touch(target);
        self.current = Some(target);

        let view = self.cache.get_mut(target)?;
        match view.state() {
            RenderingState::Initial => {
                view.begin();
            }
            RenderingState::Paused => {
                view.resume();
            }
            RenderingState::Running => {}
            RenderingState::Finished => return Some(SliceOutcome::Finished),
        }
        debug!(page = target, "driving page");
        Some(view.run_slice(renderer, clock))
    }

    /// First unfinished visible page by (visibility desc, id asc);
    /// when everything visible is done, speculate one page ahead in
    /// the scroll direction.
    fn pick_target(
        &self,
        visible: &[VisiblePage],
        direction: ScrollDirection,
        page_count: usize,
    ) -> Option<usize> {
        let mut ordered: Vec<VisiblePage> = visible.to_vec();
        ordered.sort_by(|a, b| {
            b.visibility
                .partial_cmp(&a.visibility)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then(a.page.cmp(&b.page))
        });

        for vp in &ordered {
            let finished = self
                .cache
                .get(vp.page)
                .is_some_and(|v| v.state() == RenderingState::Finished);
            if !finished {
                return Some(vp.page);
            }
        }

        match direction {
            ScrollDirection::Forward => {
                let next = visible.last()?.page + 1;
                (next < page_count).then_some(next)
            }
            ScrollDirection::Backward => {
                let first = visible.first()?.page;
                (first > 0).then(|| first - 1)
            }
        }
    }
}
