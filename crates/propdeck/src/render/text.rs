use eframe::egui::{self, Color32, FontFamily, FontId, Pos2};

use crate::theme::Theme;

/// Layout and paint wrapped text, returning the height used.
pub fn draw_wrapped(
    ui: &egui::Ui,
    text: &str,
    pos: Pos2,
    font: FontId,
    color: Color32,
    max_width: f32,
) -> f32 {
    let galley = ui
        .painter()
        .layout(text.to_string(), font, color, max_width);
    let height = galley.rect.height();
    ui.painter().galley(pos, galley, color);
    height
}

/// Small uppercase accent label above a headline. Returns height used.
pub fn draw_kicker(
    ui: &egui::Ui,
    theme: &Theme,
    text: &str,
    pos: Pos2,
    opacity: f32,
    scale: f32,
) -> f32 {
    let color = Theme::with_opacity(theme.accent, opacity);
    let mut job = egui::text::LayoutJob::default();
    job.append(
        &text.to_uppercase(),
        0.0,
        egui::text::TextFormat {
            font_id: FontId::new(theme.kicker_size * scale, FontFamily::Proportional),
            color,
            extra_letter_spacing: 3.0 * scale,
            ..Default::default()
        },
    );
    let galley = ui.painter().layout_job(job);
    let height = galley.rect.height();
    ui.painter().galley(pos, galley, color);
    height
}

/// Centered variant of [`draw_kicker`]. Returns height used.
pub fn draw_kicker_centered(
    ui: &egui::Ui,
    theme: &Theme,
    text: &str,
    center_x: f32,
    y: f32,
    opacity: f32,
    scale: f32,
) -> f32 {
    let color = Theme::with_opacity(theme.accent, opacity);
    let mut job = egui::text::LayoutJob::default();
    job.append(
        &text.to_uppercase(),
        0.0,
        egui::text::TextFormat {
            font_id: FontId::new(theme.kicker_size * scale, FontFamily::Proportional),
            color,
            extra_letter_spacing: 3.0 * scale,
            ..Default::default()
        },
    );
    let galley = ui.painter().layout_job(job);
    let height = galley.rect.height();
    let pos = Pos2::new(center_x - galley.rect.width() / 2.0, y);
    ui.painter().galley(pos, galley, color);
    height
}

/// Returns height used.
pub fn draw_headline(
    ui: &egui::Ui,
    theme: &Theme,
    text: &str,
    pos: Pos2,
    max_width: f32,
    opacity: f32,
    scale: f32,
) -> f32 {
    let color = Theme::with_opacity(theme.heading_color, opacity);
    draw_wrapped(
        ui,
        text,
        pos,
        FontId::proportional(theme.headline_size * scale),
        color,
        max_width,
    )
}

/// Returns height used.
pub fn draw_body(
    ui: &egui::Ui,
    theme: &Theme,
    text: &str,
    pos: Pos2,
    max_width: f32,
    opacity: f32,
    scale: f32,
) -> f32 {
    let color = Theme::with_opacity(theme.foreground, opacity);
    draw_wrapped(
        ui,
        text,
        pos,
        FontId::proportional(theme.body_size * scale),
        color,
        max_width,
    )
}

/// A list entry with an accent marker dot. Returns height used.
pub fn draw_bullet(
    ui: &egui::Ui,
    theme: &Theme,
    text: &str,
    pos: Pos2,
    max_width: f32,
    opacity: f32,
    scale: f32,
) -> f32 {
    let dot_radius = 6.0 * scale;
    let indent = 28.0 * scale;
    let color = Theme::with_opacity(theme.foreground, opacity);
    let accent = Theme::with_opacity(theme.accent, opacity);

    let galley = ui.painter().layout(
        text.to_string(),
        FontId::proportional(theme.body_size * scale),
        color,
        max_width - indent,
    );
    let line_center = pos.y + theme.body_size * scale * 0.55;
    ui.painter()
        .circle_filled(Pos2::new(pos.x + dot_radius, line_center), dot_radius, accent);
    let height = galley.rect.height();
    ui.painter()
        .galley(Pos2::new(pos.x + indent, pos.y), galley, color);
    height
}
