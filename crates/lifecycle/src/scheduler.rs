use tracing::trace;

/// Platform hook that delivers display-refresh ticks.
///
/// Implementations wrap whatever the host offers: a display link, a choreographer
/// callback, a view invalidation, or a window redraw request.
pub trait RefreshSource {
    /// Ask for exactly one more tick at the next refresh opportunity.
    fn request_tick(&mut self);

    /// Withdraw an outstanding request. Hosts that cannot withdraw keep the
    /// default and rely on the scheduler ignoring the stale tick.
    fn cancel(&mut self) {}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerState {
    /// No tick requested. Entered on creation and on surface teardown.
    Stopped,
    /// One tick requested and not yet delivered.
    Armed,
    /// A tick was claimed and its frame is being produced.
    InFlight,
}

/// Self-rescheduling frame driver.
///
/// While running, exactly one tick is outstanding: each delivered tick produces one
/// frame and then re-arms. Stopping between a request and its delivery turns that
/// delivery into a no-op.
#[derive(Debug)]
pub struct FrameScheduler {
    state: SchedulerState,
    frames: u64,
}

impl FrameScheduler {
    pub fn new() -> Self {
        Self {
            state: SchedulerState::Stopped,
            frames: 0,
        }
    }

    pub fn state(&self) -> SchedulerState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state != SchedulerState::Stopped
    }

    /// Frames produced since construction.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn start<R: RefreshSource + ?Sized>(&mut self, refresh: &mut R) {
        if self.state != SchedulerState::Stopped {
            return;
        }
        self.state = SchedulerState::Armed;
        refresh.request_tick();
        trace!("frame scheduler armed");
    }

    pub fn stop<R: RefreshSource + ?Sized>(&mut self, refresh: &mut R) {
        if self.state == SchedulerState::Stopped {
            return;
        }
        self.state = SchedulerState::Stopped;
        refresh.cancel();
        trace!(frames = self.frames, "frame scheduler stopped");
    }

    /// Claims the outstanding tick. Returns `false` for ticks that arrive while
    /// stopped or while a frame is already in flight.
    pub fn begin_tick(&mut self) -> bool {
        if self.state != SchedulerState::Armed {
            return false;
        }
        self.state = SchedulerState::InFlight;
        true
    }

    /// Completes a claimed tick and re-arms unless the scheduler was stopped
    /// while the frame was in flight.
    pub fn finish_tick<R: RefreshSource + ?Sized>(&mut self, refresh: &mut R) {
        if self.state != SchedulerState::InFlight {
            return;
        }
        self.frames += 1;
        self.state = SchedulerState::Armed;
        refresh.request_tick();
    }

    /// Runs `frame` for one delivered tick and re-arms. Returns whether a frame was
    /// produced.
    pub fn run_tick<R, F>(&mut self, refresh: &mut R, frame: F) -> bool
    where
        R: RefreshSource + ?Sized,
        F: FnOnce(),
    {
        if !self.begin_tick() {
            return false;
        }
        frame();
        self.finish_tick(refresh);
        true
    }
}

impl Default for FrameScheduler {
    fn default() -> Self {
        Self::new()
    }
}
