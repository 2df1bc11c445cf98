/// Wall-clock playback position.
///
/// Timestamps are seconds on the host's monotonic clock (egui input time).
/// While running, the position is the anchored position plus elapsed time.
#[derive(Clone, Debug, Default)]
pub struct PlaybackClock {
    /// Position at the last anchor, in seconds
    base: f64,
    /// Host time the clock was last resumed, `None` while paused
    resumed_at: Option<f64>,
}

impl PlaybackClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current playback position in seconds
    pub fn position(&self, now: f64) -> f64 {
        match self.resumed_at {
            Some(start) => self.base + (now - start).max(0.0),
            None => self.base,
        }
    }

    /// Jump to a position, keeping the running/paused state
    pub fn set_position(&mut self, seconds: f64, now: f64) {
        self.base = seconds.max(0.0);
        if self.resumed_at.is_some() {
            self.resumed_at = Some(now);
        }
    }

    pub fn is_paused(&self) -> bool {
        self.resumed_at.is_none()
    }

    pub fn pause(&mut self, now: f64) {
        self.base = self.position(now);
        self.resumed_at = None;
    }

    pub fn resume(&mut self, now: f64) {
        if self.resumed_at.is_none() {
            self.resumed_at = Some(now);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advances_only_while_running() {
        let mut clock = PlaybackClock::new();
        assert!(clock.is_paused());
        assert_eq!(clock.position(10.0), 0.0);

        clock.resume(10.0);
        assert_eq!(clock.position(12.5), 2.5);

        clock.pause(13.0);
        assert_eq!(clock.position(20.0), 3.0);
    }

    #[test]
    fn set_position_re_anchors_running_clock() {
        let mut clock = PlaybackClock::new();
        clock.resume(0.0);
        clock.set_position(40.0, 5.0);
        assert_eq!(clock.position(6.0), 41.0);
    }
}
