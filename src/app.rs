use crossbeam_channel::{bounded, Receiver, Sender};
use egui::{Align2, CentralPanel, Color32, FontId, Frame, Key, Vec2};
use egui_media_controls::player::{SimulatedTransport, TransportCommand};
use egui_media_controls::{ControlCallbacks, ControlsConfig, ControlsProps, MediaControls};

/// Something the overlay asked the host to do
#[derive(Clone, Copy, Debug, PartialEq)]
enum Intent {
    Transport(TransportCommand),
    ToggleFullScreen,
}

pub struct DemoApp {
    transport: SimulatedTransport,
    controls: MediaControls,
    main_color: Color32,
    fullscreen: bool,
    last_intent: Option<Intent>,
    intent_sender: Sender<Intent>,
    intent_receiver: Receiver<Intent>,
}

impl DemoApp {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        config: &ControlsConfig,
        main_color: Color32,
        duration: f64,
        loading_secs: f64,
    ) -> Self {
        let now = cc.egui_ctx.input(|i| i.time);
        let (intent_sender, intent_receiver) = bounded(16);
        Self {
            transport: SimulatedTransport::new(duration, loading_secs, now),
            controls: MediaControls::from_config(config),
            main_color,
            fullscreen: false,
            last_intent: None,
            intent_sender,
            intent_receiver,
        }
    }

    fn callbacks(&self) -> ControlCallbacks<'static> {
        let send = |sender: &Sender<Intent>, intent: Intent| {
            let sender = sender.clone();
            move || {
                if sender.try_send(intent).is_err() {
                    log::warn!("Dropped {:?}, intent queue full", intent);
                }
            }
        };
        let seek_sender = self.intent_sender.clone();

        ControlCallbacks::new()
            .on_paused(send(
                &self.intent_sender,
                Intent::Transport(TransportCommand::TogglePause),
            ))
            .on_replay(send(
                &self.intent_sender,
                Intent::Transport(TransportCommand::Replay),
            ))
            .on_full_screen(send(&self.intent_sender, Intent::ToggleFullScreen))
            .on_seek(move |position| {
                let intent = Intent::Transport(TransportCommand::Seek(position));
                if seek_sender.try_send(intent).is_err() {
                    log::warn!("Dropped {:?}, intent queue full", intent);
                }
            })
    }

    fn drain_intents(&mut self, ctx: &egui::Context, now: f64) {
        while let Ok(intent) = self.intent_receiver.try_recv() {
            log::info!("Overlay intent: {:?}", intent);
            match intent {
                Intent::Transport(command) => self.transport.apply(command, now),
                Intent::ToggleFullScreen => {
                    self.fullscreen = !self.fullscreen;
                    ctx.send_viewport_cmd(egui::ViewportCommand::Fullscreen(self.fullscreen));
                }
            }
            self.last_intent = Some(intent);
        }
    }
}

impl eframe::App for DemoApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = ctx.input(|i| i.time);

        self.drain_intents(ctx, now);

        // Host-side shortcut; the overlay's button only toggles visibility
        // while playing or paused.
        if ctx.input(|i| i.key_pressed(Key::Space)) {
            self.transport.toggle_pause(now);
        }
        self.transport.update(now);

        let props = ControlsProps::new(self.transport.state(), self.transport.progress(now))
            .with_loading(self.transport.is_loading())
            .with_main_color(self.main_color);
        let mut callbacks = self.callbacks();
        let last_intent = self.last_intent;
        let position = self.transport.position(now);

        CentralPanel::default()
            .frame(Frame::none().fill(Color32::BLACK))
            .show(ctx, |ui| {
                let rect = ui.max_rect();

                // Stand-in for the video surface
                let painter = ui.painter();
                painter.rect_filled(rect.shrink(24.0), 8.0, Color32::from_rgb(28, 36, 48));
                painter.text(
                    rect.center() - Vec2::new(0.0, 120.0),
                    Align2::CENTER_CENTER,
                    format!("simulated video @ {:.1}s", position),
                    FontId::proportional(20.0),
                    Color32::from_gray(140),
                );

                self.controls
                    .show(ui, rect, &props, &mut callbacks, |ui| {
                        ui.label(
                            egui::RichText::new("Media Controls Demo")
                                .strong()
                                .color(Color32::WHITE),
                        );
                        ui.separator();
                        let text = match last_intent {
                            Some(intent) => format!("last intent: {:?}", intent),
                            None => "space toggles playback".to_owned(),
                        };
                        ui.label(egui::RichText::new(text).color(Color32::LIGHT_GRAY));
                    });
            });

        // Keep the timer labels moving during playback
        if self.transport.is_playing() || self.transport.is_loading() {
            ctx.request_repaint();
        }
    }
}
