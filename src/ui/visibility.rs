//! Show/hide state machine for the control overlay.
//!
//! The overlay owns a single opacity value driven by at most one tween at a
//! time. Starting a tween interrupts the previous one and drops it, so only
//! the tween still held when it reaches its end can run its finish action and
//! a preempted fade-out never commits "hidden" after a newer fade-in.
//!
//! All timestamps are host seconds (egui's `InputState::time`).

use egui::emath::easing;
use std::time::Duration;

use crate::config::ControlsConfig;

pub const DEFAULT_FADE_OUT_DELAY: Duration = Duration::from_millis(5000);
pub const DEFAULT_FADE_DURATION: Duration = Duration::from_millis(300);

/// Where the overlay is in its show/hide cycle
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// Shown; a fade-out may be pending behind its idle delay
    VisibleSteady,
    FadingOut,
    Hidden,
    FadingIn,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TweenId(u64);

/// What to do when a tween runs to its end
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FinishAction {
    /// Commit the hidden flag
    Hide,
    /// Chain the idle fade-out
    ScheduleFadeOut,
    Stay,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Completion {
    Finished(TweenId),
    Interrupted(TweenId),
}

/// A single opacity animation
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tween {
    pub id: TweenId,
    pub from: f32,
    pub to: f32,
    /// Host time the interpolation begins (after any delay)
    pub start: f64,
    pub duration: f64,
    pub on_finish: FinishAction,
}

impl Tween {
    pub fn end(&self) -> f64 {
        self.start + self.duration
    }

    /// Still waiting out its delay
    pub fn is_pending(&self, now: f64) -> bool {
        now < self.start
    }

    pub fn value_at(&self, now: f64) -> f32 {
        if now <= self.start {
            return self.from;
        }
        let t = ((now - self.start) / self.duration).min(1.0) as f32;
        self.from + (self.to - self.from) * easing::cubic_in_out(t)
    }
}

pub struct VisibilityController {
    opacity: f32,
    visible: bool,
    tween: Option<Tween>,
    next_id: u64,
    last_completion: Option<Completion>,
    /// Latest host time seen
    now: f64,
    fade_out_delay: f64,
    fade_duration: f64,
}

impl Default for VisibilityController {
    fn default() -> Self {
        Self::new(DEFAULT_FADE_OUT_DELAY, DEFAULT_FADE_DURATION)
    }
}

impl VisibilityController {
    pub fn new(fade_out_delay: Duration, fade_duration: Duration) -> Self {
        Self {
            opacity: 1.0,
            visible: true,
            tween: None,
            next_id: 0,
            last_completion: None,
            now: 0.0,
            fade_out_delay: fade_out_delay.as_secs_f64(),
            fade_duration: fade_duration.as_secs_f64().max(f64::EPSILON),
        }
    }

    pub fn from_config(config: &ControlsConfig) -> Self {
        Self::new(config.fade_out_delay(), config.fade_duration())
    }

    pub fn fade_out_delay(&self) -> Duration {
        Duration::from_secs_f64(self.fade_out_delay)
    }

    /// Start the idle countdown; called once when the overlay first appears
    pub fn mount(&mut self, now: f64) {
        log::debug!("Controls mounted, hiding in {:.1}s", self.fade_out_delay);
        self.schedule_fade_out(now, self.fade_out_delay);
    }

    /// Fade to 0 after `delay` seconds, then commit hidden.
    ///
    /// Restarts any pending or running tween.
    pub fn schedule_fade_out(&mut self, now: f64, delay: f64) {
        self.update(now);
        self.start_tween(now, delay.max(0.0), 0.0, FinishAction::Hide);
    }

    /// Show immediately and fade to 1; with `loop_after` the idle fade-out is
    /// scheduled once fully shown.
    pub fn fade_in(&mut self, now: f64, loop_after: bool) {
        self.update(now);
        self.visible = true;
        let on_finish = if loop_after {
            FinishAction::ScheduleFadeOut
        } else {
            FinishAction::Stay
        };
        self.start_tween(now, 0.0, 1.0, on_finish);
    }

    /// Tap anywhere on the overlay.
    pub fn toggle(&mut self, now: f64) {
        self.update(now);
        let was_fading_out = self.phase() == Phase::FadingOut;
        self.stop();

        if was_fading_out {
            log::debug!("Toggle during fade-out, showing controls");
            self.fade_in(now, true);
            return;
        }

        // Any opacity left counts as shown.
        let was_visible = self.opacity > 0.0;
        self.visible = was_visible;
        if was_visible {
            self.schedule_fade_out(now, 0.0);
        } else {
            self.fade_in(now, true);
        }
    }

    /// Freeze the opacity where it is and pin the controls shown until the
    /// next explicit trigger.
    pub fn cancel_animation(&mut self, now: f64) {
        self.update(now);
        self.stop();
        self.visible = true;
    }

    /// End of media: show and stay shown
    pub fn force_visible(&mut self, now: f64) {
        self.fade_in(now, false);
    }

    /// Advance the active tween to `now`, running finish actions in order.
    pub fn update(&mut self, now: f64) {
        self.now = self.now.max(now);
        let now = self.now;

        while let Some(tween) = self.tween {
            if now < tween.end() {
                self.opacity = tween.value_at(now);
                break;
            }
            self.opacity = tween.to;
            self.tween = None;
            self.finish(tween);
        }
    }

    fn finish(&mut self, tween: Tween) {
        self.last_completion = Some(Completion::Finished(tween.id));

        match tween.on_finish {
            FinishAction::Hide => {
                log::debug!("Controls hidden");
                self.visible = false;
            }
            FinishAction::ScheduleFadeOut => {
                // Chain from the completion instant so long frame gaps don't
                // stretch the cycle.
                self.start_tween(tween.end(), self.fade_out_delay, 0.0, FinishAction::Hide);
            }
            FinishAction::Stay => {}
        }
    }

    fn start_tween(&mut self, at: f64, delay: f64, to: f32, on_finish: FinishAction) {
        self.stop();
        let id = TweenId(self.next_id);
        self.next_id += 1;
        let tween = Tween {
            id,
            from: self.opacity,
            to,
            start: at + delay,
            duration: self.fade_duration,
            on_finish,
        };
        log::debug!(
            "Tween {:?}: {:.2} -> {:.2} at {:.3}s ({:?})",
            id,
            tween.from,
            to,
            tween.start,
            on_finish
        );
        self.tween = Some(tween);
    }

    fn stop(&mut self) {
        if let Some(tween) = self.tween.take() {
            log::debug!("Tween {:?} interrupted at opacity {:.2}", tween.id, self.opacity);
            self.last_completion = Some(Completion::Interrupted(tween.id));
        }
    }

    pub fn phase(&self) -> Phase {
        match self.tween {
            Some(tween) if tween.to <= 0.0 => {
                if tween.is_pending(self.now) {
                    Phase::VisibleSteady
                } else {
                    Phase::FadingOut
                }
            }
            Some(_) => Phase::FadingIn,
            None if self.visible => Phase::VisibleSteady,
            None => Phase::Hidden,
        }
    }

    pub fn opacity(&self) -> f32 {
        self.opacity
    }

    /// Whether the control surface should be drawn at all
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn active_tween(&self) -> Option<&Tween> {
        self.tween.as_ref()
    }

    pub fn last_completion(&self) -> Option<Completion> {
        self.last_completion
    }

    /// When the host should next repaint to keep the animation moving
    pub fn repaint_after(&self, now: f64) -> Option<Duration> {
        self.tween.map(|tween| {
            if tween.is_pending(now) {
                Duration::from_secs_f64(tween.start - now)
            } else {
                Duration::ZERO
            }
        })
    }
}
