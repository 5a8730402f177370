use crate::{Delta, Frame};

/// Collects the tick rate over one second windows.
#[derive(Default, Debug)]
pub struct FrameStats {
    pub frame: Frame,
    pub average_fps: f32,
    fps_cache: u64,
    fps_time: f64,
}

impl FrameStats {
    /// Records one tick. Returns the new average once a full second has been
    /// accumulated.
    pub fn tick(&mut self, delta: Delta) -> Option<f32> {
        self.frame.advance();
        self.fps_cache += 1;
        self.fps_time += *delta as f64;

        if self.fps_time < 1f64 {
            return None;
        }

        self.average_fps = (self.fps_cache as f64 / self.fps_time) as f32;
        log::info!(
            "FPS: {}, frames: {}, time: {}, lastDelta: {}",
            self.average_fps,
            self.fps_cache,
            self.fps_time,
            *delta
        );

        self.fps_cache = 0;
        self.fps_time = 0f64;

        Some(self.average_fps)
    }
}
