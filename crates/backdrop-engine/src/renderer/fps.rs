/// Frames-per-second over one-second windows of the host clock
///
/// The host passes its animation timestamp (seconds) with each frame; the
/// reported value is the number of frames recorded in the last completed
/// window. Reads 0 until the first window closes.
#[derive(Clone, Copy, Debug, Default)]
pub struct FpsCounter {
    window_start: Option<f64>,
    frames: u32,
    fps: u32,
}

impl FpsCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one frame rendered at `time` seconds
    pub fn record_frame(&mut self, time: f64) {
        let start = *self.window_start.get_or_insert(time);

        // Clock went backwards (host restarted its timeline): start over
        if time < start {
            self.window_start = Some(time);
            self.frames = 1;
            return;
        }

        self.frames += 1;
        let elapsed = time - start;
        if elapsed >= 1.0 {
            self.fps = self.frames;
            self.frames = 0;
            self.window_start = Some(time);
        }
    }

    pub fn fps(&self) -> u32 {
        self.fps
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_before_first_window() {
        let mut fps = FpsCounter::new();
        for i in 0..30 {
            fps.record_frame(i as f64 / 60.0);
        }
        assert_eq!(fps.fps(), 0);
    }

    #[test]
    fn test_counts_frames_per_second() {
        let mut fps = FpsCounter::new();
        // Frames at 0, 1/60, ..., 60/60 -> the 61st frame closes the window
        for i in 0..=60 {
            fps.record_frame(i as f64 / 60.0);
        }
        assert_eq!(fps.fps(), 61);

        for i in 61..=120 {
            fps.record_frame(i as f64 / 60.0);
        }
        assert_eq!(fps.fps(), 60);
    }

    #[test]
    fn test_clock_reset_restarts_window() {
        let mut fps = FpsCounter::new();
        fps.record_frame(10.0);
        fps.record_frame(10.5);
        fps.record_frame(0.0);
        fps.record_frame(0.5);
        assert_eq!(fps.fps(), 0);
        fps.record_frame(1.0);
        assert_eq!(fps.fps(), 3);
    }
}
