//! Frame rate statistics for the window title.

/// Seconds between two reports.
pub const REPORT_INTERVAL: f64 = 0.25;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameStats {
    pub fps: f64,
    pub ms_per_frame: f64,
}

impl FrameStats {
    pub fn title(&self, prefix: &str) -> String {
        format!(
            "{prefix} @ fps: {:.2}, ms/frame: {:.2}",
            self.fps, self.ms_per_frame
        )
    }
}

/// Averages the frame rate over [`REPORT_INTERVAL`] windows.
#[derive(Debug, Default)]
pub struct FpsCounter {
    previous: f64,
    frames: u32,
    latest: Option<FrameStats>,
}

impl FpsCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Call once per frame with the current time in seconds. Returns fresh
    /// statistics whenever a window closes.
    pub fn tick(&mut self, now: f64) -> Option<FrameStats> {
        let elapsed = now - self.previous;
        let mut report = None;

        if elapsed > REPORT_INTERVAL {
            self.previous = now;
            let fps = self.frames as f64 / elapsed;
            let stats = FrameStats {
                fps,
                ms_per_frame: if fps > 0.0 { 1000.0 / fps } else { 0.0 },
            };
            self.latest = Some(stats);
            self.frames = 0;
            report = Some(stats);
        }

        self.frames += 1;
        report
    }

    /// The most recent statistics, if a window has closed yet.
    pub fn latest(&self) -> Option<FrameStats> {
        self.latest
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reports_after_the_interval() {
        let mut counter = FpsCounter::new();
        // 60 frames spread over half a second, then one more tick past it.
        let mut reports = Vec::new();
        for i in 0..=30 {
            if let Some(stats) = counter.tick(i as f64 / 60.0) {
                reports.push(stats);
            }
        }
        assert_eq!(reports.len(), 1);
        // First report covers 16 frames over 16/60 s.
        let stats = reports[0];
        assert!((stats.fps - 60.0).abs() < 1e-6);
        assert!((stats.ms_per_frame - 1000.0 / 60.0).abs() < 1e-6);
        assert_eq!(counter.latest(), Some(stats));
    }

    #[test]
    fn no_report_within_the_interval() {
        let mut counter = FpsCounter::new();
        assert!(counter.tick(0.1).is_none());
        assert!(counter.tick(0.2).is_none());
        assert!(counter.latest().is_none());
    }

    #[test]
    fn title_format() {
        let stats = FrameStats {
            fps: 59.999,
            ms_per_frame: 16.6669,
        };
        assert_eq!(
            stats.title("Hello Shader"),
            "Hello Shader @ fps: 60.00, ms/frame: 16.67"
        );
    }
}
