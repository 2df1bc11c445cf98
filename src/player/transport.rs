use super::{PlaybackClock, PlayerState, Progress};

/// Commands sent from the overlay callbacks to the transport
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TransportCommand {
    TogglePause,
    Replay,
    Seek(f64),
}

/// Stand-in for a real player: no media, just a clock that runs to `duration`.
///
/// Starts in `Loading` for `loading_secs`, then plays.
pub struct SimulatedTransport {
    state: PlayerState,
    clock: PlaybackClock,
    duration: f64,
    loading_until: Option<f64>,
}

impl SimulatedTransport {
    pub fn new(duration: f64, loading_secs: f64, now: f64) -> Self {
        let loading_until = (loading_secs > 0.0).then_some(now + loading_secs);
        let mut transport = Self {
            state: PlayerState::Loading,
            clock: PlaybackClock::new(),
            duration: duration.max(0.0),
            loading_until,
        };
        if transport.loading_until.is_none() {
            transport.play(now);
        }
        transport
    }

    /// Start or resume playback
    pub fn play(&mut self, now: f64) {
        if matches!(self.state, PlayerState::Paused | PlayerState::Loading) {
            self.state = PlayerState::Playing;
            self.clock.resume(now);
            log::info!("Playback started at {:.1}s", self.clock.position(now));
        }
    }

    /// Pause playback
    pub fn pause(&mut self, now: f64) {
        if self.state == PlayerState::Playing {
            self.state = PlayerState::Paused;
            self.clock.pause(now);
            log::info!("Playback paused at {:.1}s", self.clock.position(now));
        }
    }

    pub fn toggle_pause(&mut self, now: f64) {
        match self.state {
            PlayerState::Playing => self.pause(now),
            PlayerState::Paused => self.play(now),
            PlayerState::Ended => self.replay(now),
            PlayerState::Loading => {}
        }
    }

    /// Rewind to the start and play
    pub fn replay(&mut self, now: f64) {
        self.clock.pause(now);
        self.clock.set_position(0.0, now);
        self.state = PlayerState::Paused;
        self.play(now);
    }

    /// Seek to position in seconds
    pub fn seek(&mut self, position: f64, now: f64) {
        let position = position.clamp(0.0, self.duration);
        self.clock.set_position(position, now);
        if self.state == PlayerState::Ended && position < self.duration {
            self.state = PlayerState::Paused;
        }
        log::debug!("Seeked to {:.1}s", position);
    }

    pub fn apply(&mut self, command: TransportCommand, now: f64) {
        log::debug!("Transport command {:?}", command);
        match command {
            TransportCommand::TogglePause => self.toggle_pause(now),
            TransportCommand::Replay => self.replay(now),
            TransportCommand::Seek(position) => self.seek(position, now),
        }
    }

    /// Advance loading and end-of-media transitions (call each frame)
    pub fn update(&mut self, now: f64) {
        if let Some(until) = self.loading_until {
            if now >= until {
                self.loading_until = None;
                self.play(now);
            }
            return;
        }

        if self.state == PlayerState::Playing && self.clock.position(now) >= self.duration {
            self.clock.pause(now);
            self.clock.set_position(self.duration, now);
            self.state = PlayerState::Ended;
            log::info!("End of media reached");
        }
    }

    pub fn state(&self) -> PlayerState {
        self.state
    }

    pub fn is_loading(&self) -> bool {
        self.state == PlayerState::Loading
    }

    pub fn is_playing(&self) -> bool {
        self.state == PlayerState::Playing
    }

    pub fn duration(&self) -> f64 {
        self.duration
    }

    pub fn position(&self, now: f64) -> f64 {
        self.clock.position(now).min(self.duration)
    }

    pub fn progress(&self, now: f64) -> Progress {
        Progress::new(self.position(now), self.duration)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loads_then_plays_to_the_end() {
        let mut transport = SimulatedTransport::new(10.0, 1.0, 0.0);
        assert!(transport.is_loading());

        transport.update(0.5);
        assert_eq!(transport.state(), PlayerState::Loading);

        transport.update(1.0);
        assert!(transport.is_playing());

        transport.update(11.5);
        assert_eq!(transport.state(), PlayerState::Ended);
        assert_eq!(transport.position(20.0), 10.0);
    }

    #[test]
    fn zero_loading_time_plays_immediately() {
        let transport = SimulatedTransport::new(10.0, 0.0, 0.0);
        assert!(transport.is_playing());
    }

    #[test]
    fn toggle_pause_and_replay() {
        let mut transport = SimulatedTransport::new(10.0, 0.0, 0.0);
        transport.apply(TransportCommand::TogglePause, 2.0);
        assert_eq!(transport.state(), PlayerState::Paused);
        assert_eq!(transport.position(5.0), 2.0);

        transport.apply(TransportCommand::TogglePause, 5.0);
        transport.update(20.0);
        assert_eq!(transport.state(), PlayerState::Ended);

        transport.apply(TransportCommand::Replay, 21.0);
        assert!(transport.is_playing());
        assert_eq!(transport.position(22.0), 1.0);
    }

    #[test]
    fn seek_is_clamped_and_leaves_ended() {
        let mut transport = SimulatedTransport::new(10.0, 0.0, 0.0);
        transport.apply(TransportCommand::Seek(50.0), 1.0);
        assert_eq!(transport.position(1.0), 10.0);

        transport.update(1.0);
        assert_eq!(transport.state(), PlayerState::Ended);

        transport.apply(TransportCommand::Seek(3.0), 2.0);
        assert_eq!(transport.state(), PlayerState::Paused);
        assert_eq!(transport.position(4.0), 3.0);
    }
}
