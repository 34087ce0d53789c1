use eframe::egui;
use std::path::PathBuf;
use std::time::Instant;

use chrono::Utc;

use crate::config::Config;
use crate::engine::analytics::{HttpViewRecorder, NoopViewRecorder, ViewLatch, ViewRecorder};
use crate::engine::shell::{Deck, Shell, State};
use crate::engine::transition::{Direction, Phase};
use crate::loader::{self, ProposalSource};
use crate::render::image_cache::ImageCache;
use crate::render::{self, Reveal};
use crate::theme::Theme;

struct Toast {
    message: String,
    start: Instant,
}

impl Toast {
    fn new(message: String) -> Self {
        Self {
            message,
            start: Instant::now(),
        }
    }

    fn opacity(&self) -> f32 {
        let elapsed = self.start.elapsed().as_secs_f32();
        let duration = 1.5;
        let fade_start = 1.0;
        if elapsed < fade_start {
            1.0
        } else if elapsed < duration {
            1.0 - (elapsed - fade_start) / (duration - fade_start)
        } else {
            0.0
        }
    }

    fn is_expired(&self) -> bool {
        self.start.elapsed().as_secs_f32() >= 1.5
    }
}

struct ProposalApp {
    shell: Shell,
    theme: Theme,
    image_cache: ImageCache,
    show_hud: bool,
    toast: Option<Toast>,
    last_esc: Option<Instant>,
    drag_origin: Option<egui::Pos2>,
}

impl ProposalApp {
    fn new(shell: Shell, theme: Theme, base_path: PathBuf) -> Self {
        Self {
            shell,
            theme,
            image_cache: ImageCache::new(base_path),
            show_hud: false,
            toast: None,
            last_esc: None,
            drag_origin: None,
        }
    }

    fn toggle_theme(&mut self) {
        self.theme = self.theme.toggled();
        self.toast = Some(Toast::new(format!("Tema: {}", self.theme.name)));
    }

    fn compute_scale(rect: egui::Rect) -> f32 {
        let ref_w = 1920.0;
        let ref_h = 1080.0;
        (rect.width() / ref_w).min(rect.height() / ref_h)
    }

    fn handle_deck_input(deck: &mut Deck, i: &egui::InputState, now: Instant) {
        if i.key_pressed(egui::Key::ArrowRight)
            || i.key_pressed(egui::Key::N)
            || i.key_pressed(egui::Key::Space)
        {
            deck.request_next(now);
        }
        if i.key_pressed(egui::Key::ArrowLeft) || i.key_pressed(egui::Key::P) {
            deck.request_previous(now);
        }
        if i.key_pressed(egui::Key::Home) {
            deck.request_go_to(0, now);
        }
        if i.key_pressed(egui::Key::End) {
            deck.request_go_to(deck.nav.total().saturating_sub(1), now);
        }

        // Digit keys jump straight to a slide (1-indexed).
        let digits = [
            egui::Key::Num1,
            egui::Key::Num2,
            egui::Key::Num3,
            egui::Key::Num4,
            egui::Key::Num5,
            egui::Key::Num6,
            egui::Key::Num7,
            egui::Key::Num8,
            egui::Key::Num9,
        ];
        for (n, key) in digits.iter().enumerate() {
            if i.key_pressed(*key) {
                deck.request_go_to(n, now);
            }
        }

        // Wheel: scroll down advances, scroll up goes back.
        let scroll = i.smooth_scroll_delta.y;
        if scroll < -8.0 {
            deck.request_next(now);
        } else if scroll > 8.0 {
            deck.request_previous(now);
        }
    }

    fn draw_deck(&self, ui: &egui::Ui, ctx: &egui::Context, rect: egui::Rect, now: Instant) {
        let State::Ready(deck) = self.shell.state() else {
            return;
        };
        let scale = Self::compute_scale(rect);

        match deck.orchestrator.phase() {
            Phase::Exiting {
                from, direction, ..
            } => {
                let progress = deck.orchestrator.exit_progress(now).unwrap_or(1.0);
                let sign = match direction {
                    Direction::Forward => -1.0,
                    Direction::Backward => 1.0,
                };
                let slide_rect =
                    rect.translate(egui::vec2(sign * progress * rect.width() * 0.15, 0.0));
                let reveal = Reveal::new(&deck.orchestrator, now, 1.0 - progress);
                self.draw_slide(ui, deck, from, slide_rect, &reveal, scale);
                ctx.request_repaint();
            }
            Phase::Entering { index, .. } => {
                let reveal = Reveal::new(&deck.orchestrator, now, 1.0);
                self.draw_slide(ui, deck, index, rect, &reveal, scale);
                ctx.request_repaint();
            }
            Phase::Idle => {
                let reveal = Reveal::new(&deck.orchestrator, now, 1.0);
                self.draw_slide(ui, deck, deck.nav.current(), rect, &reveal, scale);
            }
        }

        self.draw_chrome(ui, deck, rect, scale);
    }

    fn draw_slide(
        &self,
        ui: &egui::Ui,
        deck: &Deck,
        index: usize,
        rect: egui::Rect,
        reveal: &Reveal,
        scale: f32,
    ) {
        if let Some(slide) = deck.proposal.slides.get(index) {
            render::render_slide(
                ui,
                slide,
                &deck.proposal.consultants,
                &self.theme,
                rect,
                &self.image_cache,
                reveal,
                scale,
            );
        }
    }

    fn draw_chrome(&self, ui: &egui::Ui, deck: &Deck, rect: egui::Rect, scale: f32) {
        let footer = format!(
            "{} · {}",
            deck.proposal.client_name, deck.proposal.project_title
        );
        let footer_color = Theme::with_opacity(self.theme.foreground, 0.4);
        let footer_galley = ui.painter().layout_no_wrap(
            footer,
            egui::FontId::proportional(14.0 * scale),
            footer_color,
        );
        ui.painter().galley(
            egui::pos2(rect.left() + 16.0 * scale, rect.bottom() - 30.0 * scale),
            footer_galley,
            footer_color,
        );

        let counter_text = format!("{} / {}", deck.nav.current() + 1, deck.nav.total());
        let counter_color = Theme::with_opacity(self.theme.foreground, 0.3);
        let counter_galley = ui.painter().layout_no_wrap(
            counter_text,
            egui::FontId::monospace(14.0 * scale),
            counter_color,
        );
        ui.painter().galley(
            egui::pos2(
                rect.right() - counter_galley.rect.width() - 16.0 * scale,
                rect.bottom() - 30.0 * scale,
            ),
            counter_galley,
            counter_color,
        );
    }

    /// Full-screen notice used by the Loading, Error and Expired states.
    fn draw_notice(&self, ui: &egui::Ui, rect: egui::Rect, heading: &str, detail: &str) {
        let scale = Self::compute_scale(rect);
        let heading_color = self.theme.heading_color;
        let heading_galley = ui.painter().layout(
            heading.to_string(),
            egui::FontId::proportional(48.0 * scale),
            heading_color,
            rect.width() * 0.7,
        );
        let heading_pos = egui::pos2(
            rect.center().x - heading_galley.rect.width() / 2.0,
            rect.center().y - heading_galley.rect.height(),
        );
        let heading_bottom = heading_pos.y + heading_galley.rect.height();
        ui.painter().galley(heading_pos, heading_galley, heading_color);

        let detail_color = Theme::with_opacity(self.theme.foreground, 0.7);
        let detail_galley = ui.painter().layout(
            detail.to_string(),
            egui::FontId::proportional(22.0 * scale),
            detail_color,
            rect.width() * 0.6,
        );
        let detail_pos = egui::pos2(
            rect.center().x - detail_galley.rect.width() / 2.0,
            heading_bottom + 30.0 * scale,
        );
        ui.painter().galley(detail_pos, detail_galley, detail_color);
    }

    fn draw_toast(&self, ui: &egui::Ui, ctx: &egui::Context, rect: egui::Rect) {
        let Some(ref toast) = self.toast else { return };
        let scale = Self::compute_scale(rect);
        let opacity = toast.opacity();
        if opacity <= 0.0 {
            return;
        }
        let toast_color = Theme::with_opacity(self.theme.foreground, opacity * 0.9);
        let toast_bg = Theme::with_opacity(self.theme.surface, opacity * 0.9);
        let galley = ui.painter().layout_no_wrap(
            toast.message.clone(),
            egui::FontId::proportional(20.0 * scale),
            toast_color,
        );
        let padding = 16.0 * scale;
        let toast_rect = egui::Rect::from_min_size(
            egui::pos2(
                rect.center().x - galley.rect.width() / 2.0 - padding,
                rect.bottom() - 80.0 * scale,
            ),
            egui::vec2(
                galley.rect.width() + padding * 2.0,
                galley.rect.height() + padding * 2.0,
            ),
        );
        ui.painter().rect_filled(toast_rect, 8.0 * scale, toast_bg);
        ui.painter().galley(
            egui::pos2(toast_rect.left() + padding, toast_rect.top() + padding),
            galley,
            toast_color,
        );
        ctx.request_repaint();
    }

    fn draw_hud(&self, ui: &egui::Ui, rect: egui::Rect) {
        let scale = Self::compute_scale(rect);
        let shortcuts = [
            ("Space / N / \u{2192}", "Nästa sida"),
            ("P / \u{2190}", "Föregående sida"),
            ("1–9", "Hoppa till sida"),
            ("Home / End", "Första / sista sidan"),
            ("Scrollhjul", "Bläddra"),
            ("D", "Växla tema"),
            ("F", "Helskärm"),
            ("H", "Visa/dölj denna hjälp"),
            ("Q / Esc \u{00d7}2", "Avsluta"),
        ];

        let bg = Theme::with_opacity(self.theme.surface, 0.95);
        let text_color = Theme::with_opacity(self.theme.foreground, 0.9);
        let key_color = Theme::with_opacity(self.theme.accent, 0.9);

        let padding = 24.0 * scale;
        let line_height = 32.0 * scale;
        let hud_height = shortcuts.len() as f32 * line_height + padding * 2.0 + 40.0 * scale;
        let hud_width = 380.0 * scale;
        let hud_rect =
            egui::Rect::from_center_size(rect.center(), egui::vec2(hud_width, hud_height));

        ui.painter().rect_filled(hud_rect, 12.0 * scale, bg);

        let title_galley = ui.painter().layout_no_wrap(
            "Tangentbord".to_string(),
            egui::FontId::proportional(20.0 * scale),
            Theme::with_opacity(self.theme.heading_color, 0.9),
        );
        ui.painter().galley(
            egui::pos2(hud_rect.left() + padding, hud_rect.top() + padding),
            title_galley,
            text_color,
        );

        let mut y = hud_rect.top() + padding + 40.0 * scale;
        for (key, desc) in &shortcuts {
            let key_galley = ui.painter().layout_no_wrap(
                key.to_string(),
                egui::FontId::monospace(15.0 * scale),
                key_color,
            );
            ui.painter().galley(
                egui::pos2(hud_rect.left() + padding, y),
                key_galley,
                key_color,
            );
            let desc_galley = ui.painter().layout_no_wrap(
                desc.to_string(),
                egui::FontId::proportional(15.0 * scale),
                text_color,
            );
            ui.painter().galley(
                egui::pos2(hud_rect.left() + padding + 170.0 * scale, y),
                desc_galley,
                text_color,
            );
            y += line_height;
        }
    }
}

impl eframe::App for ProposalApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = Instant::now();
        self.shell.poll(now, Utc::now());

        let mut viewport_cmds: Vec<egui::ViewportCommand> = Vec::new();

        ctx.input(|i| {
            if i.key_pressed(egui::Key::Q) {
                viewport_cmds.push(egui::ViewportCommand::Close);
                return;
            }

            // Double-tap Esc to quit.
            if i.key_pressed(egui::Key::Escape) {
                if let Some(last) = self.last_esc {
                    if last.elapsed().as_secs_f32() < 1.0 {
                        viewport_cmds.push(egui::ViewportCommand::Close);
                        return;
                    }
                }
                self.last_esc = Some(Instant::now());
                self.toast = Some(Toast::new("Tryck Esc igen för att avsluta".to_string()));
                return;
            }

            if i.key_pressed(egui::Key::F) {
                viewport_cmds.push(egui::ViewportCommand::Fullscreen(
                    !i.viewport().fullscreen.unwrap_or(false),
                ));
                return;
            }

            if i.key_pressed(egui::Key::D) {
                self.toggle_theme();
                return;
            }

            if i.key_pressed(egui::Key::H) {
                self.show_hud = !self.show_hud;
                return;
            }

            if let State::Ready(deck) = self.shell.state_mut() {
                Self::handle_deck_input(deck, i, now);

                // Swipe: a horizontal drag released past the threshold.
                if i.pointer.button_pressed(egui::PointerButton::Primary) {
                    self.drag_origin = i.pointer.press_origin();
                }
                if i.pointer.button_released(egui::PointerButton::Primary) {
                    if let (Some(origin), Some(pos)) =
                        (self.drag_origin.take(), i.pointer.latest_pos())
                    {
                        let delta = pos - origin;
                        if delta.x.abs() > 80.0 && delta.x.abs() > delta.y.abs() {
                            if delta.x < 0.0 {
                                deck.request_next(now);
                            } else {
                                deck.request_previous(now);
                            }
                        }
                    }
                }
            }
        });

        for cmd in viewport_cmds {
            ctx.send_viewport_cmd(cmd);
        }

        if self.toast.as_ref().is_some_and(|t| t.is_expired()) {
            self.toast = None;
        }

        let bg = self.theme.background;
        egui::CentralPanel::default()
            .frame(egui::Frame::new().fill(bg).inner_margin(0.0))
            .show(ctx, |ui| {
                let rect = ui.max_rect();
                ui.painter().rect_filled(rect, 0.0, bg);

                match self.shell.state() {
                    State::Loading(_) => {
                        self.draw_notice(ui, rect, "Hämtar förslaget\u{2026}", "");
                        ctx.request_repaint();
                    }
                    State::Error { message } => {
                        self.draw_notice(
                            ui,
                            rect,
                            message,
                            "Kontrollera länken, eller kontakta er kontaktperson. \
                             Tryck Q för att stänga.",
                        );
                    }
                    State::Expired { client_name, valid_until } => {
                        let detail = match valid_until {
                            Some(until) => format!(
                                "Förslaget till {} var giltigt till {}. \
                                 Kontakta oss så tar vi fram ett uppdaterat förslag. \
                                 Tryck Q för att stänga.",
                                client_name,
                                until.format("%Y-%m-%d")
                            ),
                            None => "Kontakta oss så tar vi fram ett uppdaterat förslag. \
                                     Tryck Q för att stänga."
                                .to_string(),
                        };
                        self.draw_notice(ui, rect, "Förslaget har gått ut", &detail);
                    }
                    State::Ready(_) => {
                        self.draw_deck(ui, ctx, rect, now);
                    }
                }

                self.draw_toast(ui, ctx, rect);

                if self.show_hud {
                    self.draw_hud(ui, rect);
                }
            });
    }
}

pub fn run(
    source: ProposalSource,
    windowed: bool,
    start_slide: Option<usize>,
    config: &Config,
) -> anyhow::Result<()> {
    let base_path = match &source {
        ProposalSource::File(path) => path
            .parent()
            .unwrap_or(std::path::Path::new("."))
            .to_path_buf(),
        ProposalSource::Slug { .. } => PathBuf::from("."),
    };

    let recorder: Box<dyn ViewRecorder> = match &source {
        ProposalSource::Slug { base_url, .. } => Box::new(HttpViewRecorder::new(base_url.clone())),
        ProposalSource::File(_) => Box::new(NoopViewRecorder),
    };

    let animate = config
        .defaults
        .as_ref()
        .and_then(|d| d.transition.as_deref())
        != Some("none");
    let rx = loader::spawn_load(source);
    let start = start_slide.map(|s| s.saturating_sub(1)).unwrap_or(0);
    let shell = Shell::new(rx, ViewLatch::new(recorder), start, animate);

    let theme_name = config
        .defaults
        .as_ref()
        .and_then(|d| d.theme.as_deref())
        .unwrap_or("light");
    let theme = Theme::from_name(theme_name);

    let viewport = if windowed {
        egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 720.0])
            .with_title("Propdeck")
    } else {
        egui::ViewportBuilder::default()
            .with_fullscreen(true)
            .with_title("Propdeck")
    };

    let options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };

    eframe::run_native(
        "Propdeck",
        options,
        Box::new(move |_cc| Ok(Box::new(ProposalApp::new(shell, theme, base_path)))),
    )
    .map_err(|e| anyhow::anyhow!("{e}"))
}
