mod clock;
mod transport;

use crate::error::Error;

pub use clock::PlaybackClock;
pub use transport::{SimulatedTransport, TransportCommand};

/// Player state as reported by the host player.
///
/// The numeric codes are the contract with the host and must not change.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum PlayerState {
    Playing = 0,
    Paused = 1,
    Ended = 2,
    Loading = 3,
}

impl PlayerState {
    pub fn code(self) -> u8 {
        self as u8
    }
}

impl TryFrom<i32> for PlayerState {
    type Error = Error;

    fn try_from(code: i32) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(Self::Playing),
            1 => Ok(Self::Paused),
            2 => Ok(Self::Ended),
            3 => Ok(Self::Loading),
            other => Err(Error::UnknownPlayerState(other)),
        }
    }
}

/// Playback position snapshot, in seconds.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Progress {
    pub progress: f64,
    pub duration: f64,
}

impl Progress {
    pub fn new(progress: f64, duration: f64) -> Self {
        Self { progress, duration }
    }

    /// Scrubber position: whole seconds, non-finite or negative read as 0
    pub fn slider_value(&self) -> f64 {
        whole_seconds(self.progress)
    }

    /// Scrubber range end
    pub fn slider_max(&self) -> f64 {
        whole_seconds(self.duration)
    }

    pub fn is_well_formed(&self) -> bool {
        self.progress.is_finite() && self.duration.is_finite()
    }
}

fn whole_seconds(seconds: f64) -> f64 {
    if seconds.is_finite() && seconds > 0.0 {
        seconds.floor()
    } else {
        0.0
    }
}
