use std::time::{Duration, Instant};

/// Grace period under which a frame counts as due.
const PACER_SLACK: Duration = Duration::from_micros(250);

/// Caps how soon the next frame may be requested.
///
/// The pacer never drops ticks. It only tells the shell how long to hold a
/// re-armed request before handing it to the platform.
#[derive(Debug, Clone)]
pub struct FramePacer {
    target_interval: Option<Duration>,
    last_frame: Option<Instant>,
}

impl FramePacer {
    pub fn new(target_fps: Option<f32>) -> Self {
        let target_interval = target_fps.and_then(|fps| {
            if fps > 0.0 && fps.is_finite() {
                Some(Duration::from_secs_f32(1.0 / fps))
            } else {
                None
            }
        });
        Self {
            target_interval,
            last_frame: None,
        }
    }

    pub fn target_interval(&self) -> Option<Duration> {
        self.target_interval
    }

    pub fn reset(&mut self) {
        self.last_frame = None;
    }

    pub fn mark_frame(&mut self, now: Instant) {
        self.last_frame = Some(now);
    }

    /// When the next frame may be requested, or `None` if it is already due.
    pub fn next_deadline(&self, now: Instant) -> Option<Instant> {
        let interval = self.target_interval?;
        let deadline = self.last_frame? + interval;
        if now + PACER_SLACK >= deadline {
            None
        } else {
            Some(deadline)
        }
    }
}

/// Frame-rate bookkeeping reported at a fixed interval.
#[derive(Debug)]
pub struct RenderStats {
    interval: Option<Duration>,
    window_start: Instant,
    frames: u32,
    skipped: u32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StatsReport {
    pub fps: f32,
    pub frames: u32,
    pub skipped: u32,
}

impl RenderStats {
    pub fn new(interval: Option<Duration>, now: Instant) -> Self {
        Self {
            interval,
            window_start: now,
            frames: 0,
            skipped: 0,
        }
    }

    pub fn record_frame(&mut self) {
        self.frames = self.frames.saturating_add(1);
    }

    pub fn record_skip(&mut self) {
        self.skipped = self.skipped.saturating_add(1);
    }

    /// Returns a report once the interval has elapsed, then starts a new window.
    pub fn poll(&mut self, now: Instant) -> Option<StatsReport> {
        let interval = self.interval?;
        let elapsed = now.saturating_duration_since(self.window_start);
        if elapsed < interval {
            return None;
        }
        let report = StatsReport {
            fps: self.frames as f32 / elapsed.as_secs_f32(),
            frames: self.frames,
            skipped: self.skipped,
        };
        self.window_start = now;
        self.frames = 0;
        self.skipped = 0;
        Some(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uncapped_pacer_never_delays() {
        let now = Instant::now();
        let mut pacer = FramePacer::new(None);
        pacer.mark_frame(now);
        assert_eq!(pacer.next_deadline(now), None);
        assert_eq!(FramePacer::new(Some(0.0)).target_interval(), None);
    }

    #[test]
    fn capped_pacer_holds_until_interval_passes() {
        let start = Instant::now();
        let mut pacer = FramePacer::new(Some(10.0));
        assert_eq!(pacer.next_deadline(start), None, "first frame is due");

        pacer.mark_frame(start);
        let deadline = pacer.next_deadline(start + Duration::from_millis(20));
        let interval = pacer.target_interval().unwrap();
        assert!((interval.as_secs_f64() - 0.1).abs() < 1e-6);
        assert_eq!(deadline, Some(start + interval));
        assert_eq!(pacer.next_deadline(start + Duration::from_millis(100)), None);

        pacer.reset();
        assert_eq!(pacer.next_deadline(start), None);
    }

    #[test]
    fn stats_report_once_per_interval() {
        let start = Instant::now();
        let mut stats = RenderStats::new(Some(Duration::from_secs(1)), start);
        for _ in 0..30 {
            stats.record_frame();
        }
        stats.record_skip();
        assert_eq!(stats.poll(start + Duration::from_millis(500)), None);

        let report = stats.poll(start + Duration::from_secs(2)).unwrap();
        assert_eq!(report.frames, 30);
        assert_eq!(report.skipped, 1);
        assert!((report.fps - 15.0).abs() < 1e-3);
        assert_eq!(stats.poll(start + Duration::from_secs(2)), None);
    }

    #[test]
    fn disabled_stats_stay_silent() {
        let start = Instant::now();
        let mut stats = RenderStats::new(None, start);
        stats.record_frame();
        assert_eq!(stats.poll(start + Duration::from_secs(60)), None);
    }
}
