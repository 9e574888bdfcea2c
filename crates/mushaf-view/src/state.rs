//! Per-page rendering state machine.

use core::fmt;

use tracing::trace;

use crate::task::{Clock, FRAME_BUDGET_MS, RenderPage, SliceOutcome};

/// Rendering lifecycle of one page.
///
/// `Initial → Running → Finished`, with `Running ⇄ Paused` as a side
/// loop. Cancellation is not a distinct state: it is resuming a view
/// that is no longer `Running`, which the in-flight render observes at
/// its next yield point and abandons.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderingState {
    Initial,
    Running,
    Paused,
    Finished,
}

/// One page's view: state machine, resume progress, and teardown hook.
pub struct PageView {
    pub page: usize,
    state: RenderingState,
    /// Set by `pause()`; honored at the next yield point.
    pending_pause: bool,
    /// Next line index to render when the view runs again.
    next_line: usize,
    torn_down: bool,
    on_teardown: Option<Box<dyn FnMut(usize)>>,
}

impl fmt::Debug for PageView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PageView")
            .field("page", &self.page)
            .field("state", &self.state)
            .field("pending_pause", &self.pending_pause)
            .field("next_line", &self.next_line)
            .field("torn_down", &self.torn_down)
            .finish()
    }
}

impl PageView {
    pub fn new(page: usize) -> Self {
        Self {
            page,
            state: RenderingState::Initial,
            pending_pause: false,
            next_line: 0,
            torn_down: false,
            on_teardown: None,
        }
    }

    /// Attach a hook invoked exactly once when the view is torn down.
    pub fn with_teardown(page: usize, hook: Box<dyn FnMut(usize)>) -> Self {
        Self {
            on_teardown: Some(hook),
            ..Self::new(page)
        }
    }

    pub fn state(&self) -> RenderingState {
        self.state
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    /// Request a pause. No-op unless the view is currently `Running`;
    /// the in-flight render parks at its next yield point.
    pub fn pause(&mut self) {
        if self.state == RenderingState::Running {
            self.pending_pause = true;
        }
    }

    /// Resume a paused view. Returns false (and does nothing) in any
    /// other state.
    pub fn resume(&mut self) -> bool {
        if self.state == RenderingState::Paused {
            self.state = RenderingState::Running;
            true
        } else {
            false
        }
    }

    /// Move a fresh view into `Running`.
    pub fn begin(&mut self) -> bool {
        if self.state == RenderingState::Initial {
            self.state = RenderingState::Running;
            true
        } else {
            false
        }
    }

    /// Tear the view down: invoke the hook exactly once and pin the
    /// state to `Finished` so any in-flight render abandons.
    pub fn teardown(&mut self) {
        if self.torn_down {
            return;
        }
        self.torn_down = true;
        self.state = RenderingState::Finished;
        if let Some(mut hook) = self.on_teardown.take() {
            hook(self.page);
        }
    }

    /// Run one cooperative rendering slice.
    ///
    /// Yields when the frame budget expires, parks when a pause is
    /// pending at a yield point, and abandons when the view is not
    /// `Running` on entry (the cancellation signal).
    pub fn run_slice(&mut self, renderer: &mut dyn RenderPage, clock: &dyn Clock) -> SliceOutcome {
        if self.state != RenderingState::Running {
            trace!(page = self.page, state = ?self.state, "slice abandoned");
            return SliceOutcome::Abandoned;
        }
        if self.pending_pause {
            self.pending_pause = false;
            self.state = RenderingState::Paused;
            return SliceOutcome::Paused;
        }

        let total = renderer.line_count(self.page);
        let deadline = clock.now_ms() + FRAME_BUDGET_MS;
        loop {
            if self.next_line >= total {
                self.state = RenderingState::Finished;
                return SliceOutcome::Finished;
            }
            if let Err(err) = renderer.render_line(self.page, self.next_line) {
                // Park, don't wedge: the view stays resumable and the
                // error reaches the caller.
                self.pending_pause = false;
                self.state = RenderingState::Paused;
                return SliceOutcome::Failed(err);
            }
            self.next_line += 1;
            if clock.now_ms() >= deadline {
                if self.pending_pause {
                    self.pending_pause = false;
                    self.state = RenderingState::Paused;
                    return SliceOutcome::Paused;
                }
                return SliceOutcome::Yielded;
            }
        }
    }
}
