//! Video player control overlay.
//!
//! Draws the toolbar slot, the play/pause/replay button (or a spinner while
//! loading), timer labels, the scrubber and the fullscreen button over a
//! rectangle of video, and fades them in and out with [`VisibilityController`].
//!
//! The widget never touches the player: gestures are reported through
//! [`ControlCallbacks`] and player state comes in fresh every frame as
//! [`ControlsProps`].

use egui::{
    Align, Button, Color32, Layout, Pos2, Rect, Response, RichText, Sense, Slider, Spinner, Ui,
    UiBuilder, Vec2,
};

use crate::config::ControlsConfig;
use crate::player::{PlayerState, Progress};

use super::format::humanize_video_duration;
use super::visibility::VisibilityController;

/// `rgba(12, 83, 175, 0.9)`
pub fn default_main_color() -> Color32 {
    Color32::from_rgba_unmultiplied(12, 83, 175, 230)
}

const OVERLAY_TINT: Color32 = Color32::from_rgba_premultiplied(18, 24, 25, 102);
const TOOLBAR_HEIGHT: f32 = 40.0;
const BOTTOM_HEIGHT: f32 = 60.0;
const PADDING: f32 = 12.0;
const PRIMARY_SIZE: f32 = 64.0;

/// Player state snapshot handed in by the host every frame
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ControlsProps {
    pub player_state: PlayerState,
    pub is_loading: bool,
    pub progress: Progress,
    pub main_color: Color32,
}

impl ControlsProps {
    pub fn new(player_state: PlayerState, progress: Progress) -> Self {
        Self {
            player_state,
            is_loading: false,
            progress,
            main_color: default_main_color(),
        }
    }

    pub fn with_loading(mut self, is_loading: bool) -> Self {
        self.is_loading = is_loading;
        self
    }

    pub fn with_main_color(mut self, main_color: Color32) -> Self {
        self.main_color = main_color;
        self
    }
}

/// User intent reported back to the host. Unset callbacks are no-ops.
#[derive(Default)]
pub struct ControlCallbacks<'a> {
    on_full_screen: Option<Box<dyn FnMut() + 'a>>,
    on_paused: Option<Box<dyn FnMut() + 'a>>,
    on_replay: Option<Box<dyn FnMut() + 'a>>,
    on_seek: Option<Box<dyn FnMut(f64) + 'a>>,
}

impl<'a> ControlCallbacks<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_full_screen(mut self, f: impl FnMut() + 'a) -> Self {
        self.on_full_screen = Some(Box::new(f));
        self
    }

    pub fn on_paused(mut self, f: impl FnMut() + 'a) -> Self {
        self.on_paused = Some(Box::new(f));
        self
    }

    pub fn on_replay(mut self, f: impl FnMut() + 'a) -> Self {
        self.on_replay = Some(Box::new(f));
        self
    }

    pub fn on_seek(mut self, f: impl FnMut(f64) + 'a) -> Self {
        self.on_seek = Some(Box::new(f));
        self
    }

    fn full_screen(&mut self) {
        match self.on_full_screen.as_mut() {
            Some(f) => f(),
            None => log::debug!("on_full_screen not set"),
        }
    }

    fn paused(&mut self) {
        match self.on_paused.as_mut() {
            Some(f) => f(),
            None => log::debug!("on_paused not set"),
        }
    }

    fn replay(&mut self) {
        match self.on_replay.as_mut() {
            Some(f) => f(),
            None => log::debug!("on_replay not set"),
        }
    }

    fn seek(&mut self, value: f64) {
        match self.on_seek.as_mut() {
            Some(f) => f(value),
            None => log::debug!("on_seek not set"),
        }
    }
}

/// Glyph on the primary button
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PrimaryIcon {
    Play,
    Pause,
    Replay,
}

impl PrimaryIcon {
    /// `None` for states that have no button (nothing is drawn in the slot)
    pub fn for_state(state: PlayerState) -> Option<Self> {
        match state {
            PlayerState::Paused => Some(Self::Play),
            PlayerState::Playing => Some(Self::Pause),
            PlayerState::Ended => Some(Self::Replay),
            PlayerState::Loading => None,
        }
    }

    pub fn glyph(self) -> &'static str {
        match self {
            Self::Play => "▶",
            Self::Pause => "⏸",
            Self::Replay => "🔄",
        }
    }
}

/// What occupies the centre slot this frame
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PrimarySlot {
    Busy,
    Button(PrimaryIcon),
    Empty,
}

impl PrimarySlot {
    pub fn for_props(props: &ControlsProps) -> Self {
        if props.is_loading {
            return Self::Busy;
        }
        PrimaryIcon::for_state(props.player_state).map_or(Self::Empty, Self::Button)
    }
}

/// Persistent overlay state; keep one per video surface across frames.
pub struct MediaControls {
    visibility: VisibilityController,
    mounted: bool,
    last_state: Option<PlayerState>,
    warned_malformed: bool,
}

impl Default for MediaControls {
    fn default() -> Self {
        Self::new(VisibilityController::default())
    }
}

impl MediaControls {
    pub fn new(visibility: VisibilityController) -> Self {
        Self {
            visibility,
            mounted: false,
            last_state: None,
            warned_malformed: false,
        }
    }

    pub fn from_config(config: &ControlsConfig) -> Self {
        Self::new(VisibilityController::from_config(config))
    }

    pub fn visibility(&self) -> &VisibilityController {
        &self.visibility
    }

    pub fn is_visible(&self) -> bool {
        self.visibility.is_visible()
    }

    pub fn opacity(&self) -> f32 {
        self.visibility.opacity()
    }

    fn idle_delay(&self) -> f64 {
        self.visibility.fade_out_delay().as_secs_f64()
    }

    /// Per-frame bookkeeping: first-frame mount, the end-of-media trigger and
    /// tween progress. [`Self::show`] calls this itself.
    pub fn sync(&mut self, now: f64, props: &ControlsProps) {
        if !self.mounted {
            self.mounted = true;
            self.visibility.mount(now);
        }

        let state = props.player_state;
        if state == PlayerState::Ended && self.last_state != Some(PlayerState::Ended) {
            log::debug!("Playback ended, pinning controls visible");
            self.visibility.force_visible(now);
        }
        self.last_state = Some(state);

        let well_formed = props.progress.is_well_formed();
        if !well_formed && !self.warned_malformed {
            log::warn!(
                "Non-finite progress/duration: {} / {}",
                props.progress.progress,
                props.progress.duration
            );
        }
        self.warned_malformed = !well_formed;

        self.visibility.update(now);
    }

    /// Tap anywhere on the overlay
    pub fn tap_overlay(&mut self, now: f64) {
        log::trace!("Overlay tapped");
        self.visibility.toggle(now);
    }

    /// Play/pause/replay button
    pub fn press_primary(
        &mut self,
        now: f64,
        props: &ControlsProps,
        callbacks: &mut ControlCallbacks<'_>,
    ) {
        log::trace!("Primary pressed in {:?}", props.player_state);
        if props.player_state == PlayerState::Ended {
            let delay = self.idle_delay();
            self.visibility.schedule_fade_out(now, delay);
            callbacks.replay();
        } else {
            self.handle_pause(now, props, callbacks);
        }
    }

    /// Scrubber value changed mid-drag
    pub fn drag_scrubber(
        &mut self,
        now: f64,
        props: &ControlsProps,
        callbacks: &mut ControlCallbacks<'_>,
    ) {
        if props.player_state == PlayerState::Paused {
            return;
        }
        self.handle_pause(now, props, callbacks);
    }

    /// Scrubber released at `value` seconds
    pub fn release_scrubber(
        &mut self,
        now: f64,
        value: f64,
        props: &ControlsProps,
        callbacks: &mut ControlCallbacks<'_>,
    ) {
        let target = if value.is_finite() { value.floor().max(0.0) } else { 0.0 };
        log::trace!("Seek released at {}", target);
        callbacks.seek(target);
        self.handle_pause(now, props, callbacks);
    }

    pub fn press_full_screen(&mut self, callbacks: &mut ControlCallbacks<'_>) {
        callbacks.full_screen();
    }

    /// Playing and Paused only drive visibility; `on_paused` is forwarded
    /// for every other state.
    fn handle_pause(&mut self, now: f64, props: &ControlsProps, callbacks: &mut ControlCallbacks<'_>) {
        match props.player_state {
            PlayerState::Playing => self.visibility.cancel_animation(now),
            PlayerState::Paused => {
                let delay = self.idle_delay();
                self.visibility.schedule_fade_out(now, delay);
            }
            PlayerState::Ended | PlayerState::Loading => callbacks.paused(),
        }
    }

    /// Draw the overlay over `rect`. The whole rect stays clickable even
    /// while the controls are hidden.
    pub fn show(
        &mut self,
        ui: &mut Ui,
        rect: Rect,
        props: &ControlsProps,
        callbacks: &mut ControlCallbacks<'_>,
        toolbar: impl FnOnce(&mut Ui),
    ) -> Response {
        let now = ui.input(|i| i.time);
        self.sync(now, props);

        let background = ui.interact(rect, ui.id().with("media_controls"), Sense::click());

        if self.visibility.is_visible() {
            let mut overlay = ui.new_child(UiBuilder::new().max_rect(rect));
            overlay.set_opacity(self.visibility.opacity());
            overlay.painter().rect_filled(rect, 0.0, OVERLAY_TINT);
            self.draw_surface(&mut overlay, rect, now, props, callbacks, toolbar);
        }

        if background.clicked() {
            self.tap_overlay(now);
        }

        match self.visibility.repaint_after(now) {
            Some(delay) if delay.is_zero() => ui.ctx().request_repaint(),
            Some(delay) => ui.ctx().request_repaint_after(delay),
            None => {}
        }

        background
    }

    fn draw_surface(
        &mut self,
        ui: &mut Ui,
        rect: Rect,
        now: f64,
        props: &ControlsProps,
        callbacks: &mut ControlCallbacks<'_>,
        toolbar: impl FnOnce(&mut Ui),
    ) {
        let inner = rect.shrink(PADDING);
        let toolbar_rect = Rect::from_min_size(inner.min, Vec2::new(inner.width(), TOOLBAR_HEIGHT));
        let bottom_rect = Rect::from_min_max(
            Pos2::new(inner.min.x, inner.max.y - BOTTOM_HEIGHT),
            inner.max,
        );
        let primary_rect = Rect::from_center_size(rect.center(), Vec2::splat(PRIMARY_SIZE));

        let mut toolbar_ui = ui.new_child(
            UiBuilder::new()
                .max_rect(toolbar_rect)
                .layout(Layout::left_to_right(Align::Center)),
        );
        toolbar(&mut toolbar_ui);

        let mut primary_ui = ui.new_child(
            UiBuilder::new()
                .max_rect(primary_rect)
                .layout(Layout::centered_and_justified(egui::Direction::TopDown)),
        );
        self.draw_primary(&mut primary_ui, now, props, callbacks);

        let mut bottom_ui = ui.new_child(
            UiBuilder::new()
                .max_rect(bottom_rect)
                .layout(Layout::top_down(Align::Min)),
        );
        self.draw_progress(&mut bottom_ui, now, props, callbacks);
    }

    fn draw_primary(
        &mut self,
        ui: &mut Ui,
        now: f64,
        props: &ControlsProps,
        callbacks: &mut ControlCallbacks<'_>,
    ) {
        match PrimarySlot::for_props(props) {
            PrimarySlot::Busy => {
                ui.add(Spinner::new().size(PRIMARY_SIZE * 0.75).color(Color32::WHITE));
            }
            PrimarySlot::Button(icon) => {
                let button = Button::new(
                    RichText::new(icon.glyph())
                        .size(PRIMARY_SIZE * 0.45)
                        .color(Color32::WHITE),
                )
                .fill(props.main_color)
                .rounding(PRIMARY_SIZE / 2.0)
                .min_size(Vec2::splat(PRIMARY_SIZE));
                if ui.add(button).clicked() {
                    self.press_primary(now, props, callbacks);
                }
            }
            PrimarySlot::Empty => {}
        }
    }

    fn draw_progress(
        &mut self,
        ui: &mut Ui,
        now: f64,
        props: &ControlsProps,
        callbacks: &mut ControlCallbacks<'_>,
    ) {
        ui.horizontal(|ui| {
            ui.label(timer_text(props.progress.progress));
            ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                ui.label(timer_text(props.progress.duration));
            });
        });

        ui.horizontal(|ui| {
            let full_screen_width = 32.0;
            let slider_width =
                (ui.available_width() - full_screen_width - ui.spacing().item_spacing.x).max(40.0);
            ui.spacing_mut().slider_width = slider_width;
            self.draw_scrubber(ui, now, props, callbacks);

            if ui
                .add(Button::new(RichText::new("⛶").color(Color32::WHITE)).frame(false))
                .on_hover_text("Fullscreen")
                .clicked()
            {
                self.press_full_screen(callbacks);
            }
        });
    }

    fn draw_scrubber(
        &mut self,
        ui: &mut Ui,
        now: f64,
        props: &ControlsProps,
        callbacks: &mut ControlCallbacks<'_>,
    ) {
        let max = props.progress.slider_max();

        // Hold the dragged value in memory until release so the host's
        // progress doesn't yank the thumb back mid-drag.
        let slider_id = ui.id().with("seek_slider");
        let mut value = ui
            .memory(|mem| mem.data.get_temp::<f64>(slider_id))
            .unwrap_or_else(|| props.progress.slider_value())
            .min(max);

        let response = ui
            .scope(|ui| {
                let visuals = ui.visuals_mut();
                visuals.selection.bg_fill = props.main_color;
                for widget in [
                    &mut visuals.widgets.inactive,
                    &mut visuals.widgets.hovered,
                    &mut visuals.widgets.active,
                ] {
                    widget.fg_stroke.color = props.main_color;
                }
                ui.add_enabled(
                    max > 0.0,
                    Slider::new(&mut value, 0.0..=max)
                        .show_value(false)
                        .trailing_fill(true)
                        .step_by(1.0),
                )
            })
            .inner;

        if response.dragged() {
            ui.memory_mut(|mem| mem.data.insert_temp(slider_id, value));
            if response.changed() {
                self.drag_scrubber(now, props, callbacks);
            }
        } else {
            ui.memory_mut(|mem| mem.data.remove::<f64>(slider_id));
        }

        if response.drag_stopped() {
            self.release_scrubber(now, value, props, callbacks);
        }
    }
}

fn timer_text(seconds: f64) -> RichText {
    RichText::new(humanize_video_duration(seconds))
        .color(Color32::WHITE)
        .monospace()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::visibility::Phase;
    use std::cell::RefCell;

    #[derive(Debug, PartialEq)]
    enum Call {
        FullScreen,
        Paused,
        Replay,
        Seek(f64),
    }

    fn recording(calls: &RefCell<Vec<Call>>) -> ControlCallbacks<'_> {
        ControlCallbacks::new()
            .on_full_screen(move || calls.borrow_mut().push(Call::FullScreen))
            .on_paused(move || calls.borrow_mut().push(Call::Paused))
            .on_replay(move || calls.borrow_mut().push(Call::Replay))
            .on_seek(move |v| calls.borrow_mut().push(Call::Seek(v)))
    }

    fn props(state: PlayerState) -> ControlsProps {
        ControlsProps::new(state, Progress::new(12.7, 95.2))
    }

    fn mounted(state: PlayerState) -> MediaControls {
        let mut controls = MediaControls::default();
        controls.sync(0.0, &props(state));
        controls
    }

    #[test]
    fn default_main_color_matches_config_default() {
        assert_eq!(
            default_main_color(),
            ControlsConfig::default().main_color32().unwrap()
        );
    }

    #[test]
    fn icon_follows_player_state() {
        assert_eq!(PrimaryIcon::for_state(PlayerState::Paused), Some(PrimaryIcon::Play));
        assert_eq!(PrimaryIcon::for_state(PlayerState::Playing), Some(PrimaryIcon::Pause));
        assert_eq!(PrimaryIcon::for_state(PlayerState::Ended), Some(PrimaryIcon::Replay));
        assert_eq!(PrimaryIcon::for_state(PlayerState::Loading), None);
    }

    #[test]
    fn loading_always_shows_spinner() {
        for state in [
            PlayerState::Paused,
            PlayerState::Playing,
            PlayerState::Ended,
            PlayerState::Loading,
        ] {
            assert_eq!(
                PrimarySlot::for_props(&props(state).with_loading(true)),
                PrimarySlot::Busy
            );
        }
        assert_eq!(
            PrimarySlot::for_props(&props(PlayerState::Loading)),
            PrimarySlot::Empty
        );
    }

    #[test]
    fn pause_press_while_playing_pins_controls() {
        let calls = RefCell::new(Vec::new());
        let mut callbacks = recording(&calls);
        let mut controls = mounted(PlayerState::Playing);

        controls.press_primary(2.0, &props(PlayerState::Playing), &mut callbacks);
        controls.sync(60.0, &props(PlayerState::Playing));

        assert!(controls.is_visible());
        assert!(controls.visibility().active_tween().is_none());
        drop(callbacks);
        assert!(calls.borrow().is_empty());
    }

    #[test]
    fn press_while_paused_restarts_idle_timer_without_on_paused() {
        let calls = RefCell::new(Vec::new());
        let mut callbacks = recording(&calls);
        let mut controls = mounted(PlayerState::Paused);

        controls.press_primary(4.0, &props(PlayerState::Paused), &mut callbacks);
        controls.sync(8.0, &props(PlayerState::Paused));
        assert!(controls.is_visible());
        controls.sync(9.4, &props(PlayerState::Paused));
        assert!(!controls.is_visible());

        drop(callbacks);
        assert!(calls.borrow().is_empty());
    }

    #[test]
    fn on_paused_only_forwarded_outside_playing_and_paused() {
        let calls = RefCell::new(Vec::new());
        let mut callbacks = recording(&calls);
        let mut controls = mounted(PlayerState::Loading);

        controls.press_primary(1.0, &props(PlayerState::Loading), &mut callbacks);
        drop(callbacks);
        assert_eq!(*calls.borrow(), vec![Call::Paused]);
    }

    #[test]
    fn replay_press_restarts_timer_and_calls_on_replay() {
        let calls = RefCell::new(Vec::new());
        let mut callbacks = recording(&calls);
        let mut controls = mounted(PlayerState::Ended);
        assert_eq!(controls.visibility().active_tween().map(|t| t.to), Some(1.0));

        controls.press_primary(1.0, &props(PlayerState::Ended), &mut callbacks);
        controls.sync(6.4, &props(PlayerState::Ended));
        assert!(!controls.is_visible());

        drop(callbacks);
        assert_eq!(*calls.borrow(), vec![Call::Replay]);
    }

    #[test]
    fn ended_forces_visible_without_auto_hide() {
        let mut controls = mounted(PlayerState::Playing);
        controls.sync(6.0, &props(PlayerState::Playing));
        assert!(!controls.is_visible());

        controls.sync(7.0, &props(PlayerState::Ended));
        assert!(controls.is_visible());
        assert_eq!(controls.visibility().phase(), Phase::FadingIn);

        controls.sync(100.0, &props(PlayerState::Ended));
        assert!(controls.is_visible());
        assert_eq!(controls.opacity(), 1.0);
        assert_eq!(controls.visibility().phase(), Phase::VisibleSteady);
    }

    #[test]
    fn ended_trigger_fires_once_per_entry() {
        let mut controls = mounted(PlayerState::Ended);
        controls.sync(1.0, &props(PlayerState::Ended));
        controls.tap_overlay(1.0);
        controls.sync(1.5, &props(PlayerState::Ended));
        assert!(!controls.is_visible());

        controls.sync(2.0, &props(PlayerState::Paused));
        controls.sync(3.0, &props(PlayerState::Ended));
        assert!(controls.is_visible());
    }

    #[test]
    fn scrubber_release_seeks_once_then_pauses() {
        let calls = RefCell::new(Vec::new());
        let mut callbacks = recording(&calls);
        let mut controls = mounted(PlayerState::Playing);

        controls.drag_scrubber(1.0, &props(PlayerState::Playing), &mut callbacks);
        controls.release_scrubber(1.2, 42.8, &props(PlayerState::Playing), &mut callbacks);
        controls.sync(30.0, &props(PlayerState::Playing));
        assert!(controls.is_visible());

        drop(callbacks);
        assert_eq!(*calls.borrow(), vec![Call::Seek(42.0)]);
    }

    #[test]
    fn scrubber_release_in_loading_state_reaches_on_paused() {
        let calls = RefCell::new(Vec::new());
        let mut callbacks = recording(&calls);
        let mut controls = mounted(PlayerState::Loading);

        controls.drag_scrubber(1.0, &props(PlayerState::Loading), &mut callbacks);
        controls.release_scrubber(1.2, 10.0, &props(PlayerState::Loading), &mut callbacks);

        drop(callbacks);
        assert_eq!(
            *calls.borrow(),
            vec![Call::Paused, Call::Seek(10.0), Call::Paused]
        );
    }

    #[test]
    fn drag_while_paused_does_nothing() {
        let calls = RefCell::new(Vec::new());
        let mut callbacks = recording(&calls);
        let mut controls = mounted(PlayerState::Paused);
        let before = controls.visibility().active_tween().copied();

        controls.drag_scrubber(1.0, &props(PlayerState::Paused), &mut callbacks);
        assert_eq!(controls.visibility().active_tween().copied(), before);

        drop(callbacks);
        assert!(calls.borrow().is_empty());
    }

    #[test]
    fn full_screen_always_forwarded() {
        let calls = RefCell::new(Vec::new());
        let mut callbacks = recording(&calls);
        let mut controls = mounted(PlayerState::Playing);
        controls.press_full_screen(&mut callbacks);
        drop(callbacks);
        assert_eq!(*calls.borrow(), vec![Call::FullScreen]);
    }

    #[test]
    fn missing_callbacks_are_no_ops() {
        let mut callbacks = ControlCallbacks::new();
        let mut controls = mounted(PlayerState::Ended);
        controls.press_primary(1.0, &props(PlayerState::Ended), &mut callbacks);
        controls.release_scrubber(1.0, 3.0, &props(PlayerState::Loading), &mut callbacks);
        controls.press_full_screen(&mut callbacks);
    }

    #[test]
    fn tap_toggles_visibility() {
        let mut controls = mounted(PlayerState::Playing);
        controls.tap_overlay(1.0);
        controls.sync(1.31, &props(PlayerState::Playing));
        assert!(!controls.is_visible());

        controls.tap_overlay(2.0);
        assert!(controls.is_visible());
    }
}
