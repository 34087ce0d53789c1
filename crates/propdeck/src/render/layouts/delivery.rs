use eframe::egui::{self, FontId, Pos2, Stroke};

use crate::engine::transition::Slot;
use crate::proposal::registry::DeliveryContent;
use crate::render::text;
use crate::render::Reveal;
use crate::theme::Theme;

/// Delivery plan as a horizontal timeline: numbered phase markers on a
/// connecting line, details beneath each marker.
pub fn render(
    ui: &egui::Ui,
    content: &DeliveryContent,
    theme: &Theme,
    rect: egui::Rect,
    reveal: &Reveal,
    scale: f32,
) {
    let padding = 120.0 * scale;
    let content_rect = rect.shrink(padding);

    let mut y = content_rect.top() + 20.0 * scale;
    let kicker_h = text::draw_kicker(
        ui,
        theme,
        &content.kicker,
        Pos2::new(content_rect.left(), y),
        reveal.opacity(Slot::Kicker),
        scale,
    );
    y += kicker_h + 24.0 * scale;

    let headline_h = text::draw_headline(
        ui,
        theme,
        &content.headline,
        Pos2::new(content_rect.left(), y),
        content_rect.width(),
        reveal.opacity(Slot::Headline),
        scale,
    );
    y += headline_h + 90.0 * scale;

    let count = content.phases.len().max(1);
    let column_width = content_rect.width() / count as f32;
    let marker_radius = 28.0 * scale;
    let line_y = y + marker_radius;

    // Connecting line behind the markers, gated on the container slot.
    let line_color = Theme::with_opacity(theme.muted, reveal.opacity(Slot::Container) * 0.5);
    ui.painter().line_segment(
        [
            Pos2::new(content_rect.left() + column_width / 2.0, line_y),
            Pos2::new(content_rect.right() - column_width / 2.0, line_y),
        ],
        Stroke::new(3.0 * scale, line_color),
    );

    for (i, phase) in content.phases.iter().enumerate() {
        let opacity = reveal.item(i);
        let center_x = content_rect.left() + column_width * (i as f32 + 0.5);

        ui.painter().circle_filled(
            Pos2::new(center_x, line_y),
            marker_radius,
            Theme::with_opacity(theme.accent, opacity),
        );
        let number_color = Theme::with_opacity(theme.background, opacity);
        let number_galley = ui.painter().layout_no_wrap(
            (i + 1).to_string(),
            FontId::proportional(marker_radius),
            number_color,
        );
        ui.painter().galley(
            Pos2::new(
                center_x - number_galley.rect.width() / 2.0,
                line_y - number_galley.rect.height() / 2.0,
            ),
            number_galley,
            number_color,
        );

        let text_width = column_width - 40.0 * scale;
        let text_left = center_x - text_width / 2.0;
        let mut ty = line_y + marker_radius + 30.0 * scale;

        let name_color = Theme::with_opacity(theme.heading_color, opacity);
        let name_h = text::draw_wrapped(
            ui,
            &phase.name,
            Pos2::new(text_left, ty),
            FontId::proportional(theme.subtitle_size * 0.85 * scale),
            name_color,
            text_width,
        );
        ty += name_h + 8.0 * scale;

        if !phase.duration.is_empty() {
            let duration_color = Theme::with_opacity(theme.accent, opacity);
            let duration_h = text::draw_wrapped(
                ui,
                &phase.duration,
                Pos2::new(text_left, ty),
                FontId::proportional(theme.caption_size * 1.1 * scale),
                duration_color,
                text_width,
            );
            ty += duration_h + 14.0 * scale;
        }

        if !phase.description.is_empty() {
            let desc_color = Theme::with_opacity(theme.foreground, opacity * 0.9);
            text::draw_wrapped(
                ui,
                &phase.description,
                Pos2::new(text_left, ty),
                FontId::proportional(theme.body_size * 0.8 * scale),
                desc_color,
                text_width,
            );
        }
    }
}
