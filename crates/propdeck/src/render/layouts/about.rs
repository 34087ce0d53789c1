use eframe::egui::{self, FontId, Pos2};

use crate::engine::transition::Slot;
use crate::proposal::registry::AboutContent;
use crate::render::text;
use crate::render::Reveal;
use crate::theme::Theme;

/// Agency introduction: headline stack with a row of key figures beneath.
pub fn render(
    ui: &egui::Ui,
    content: &AboutContent,
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
        content_rect.width() * 0.8,
        reveal.opacity(Slot::Headline),
        scale,
    );
    y += headline_h + 30.0 * scale;

    text::draw_body(
        ui,
        theme,
        &content.body,
        Pos2::new(content_rect.left(), y),
        content_rect.width() * 0.65,
        reveal.opacity(Slot::Body),
        scale,
    );

    // Stat row along the bottom.
    let count = content.stats.len().max(1);
    let gap = 40.0 * scale;
    let cell_width = (content_rect.width() - gap * (count as f32 - 1.0)) / count as f32;
    let stats_top = content_rect.bottom() - 220.0 * scale;

    for (i, stat) in content.stats.iter().enumerate() {
        let opacity = reveal.item(i);
        let left = content_rect.left() + i as f32 * (cell_width + gap);

        let divider = egui::Rect::from_min_size(
            Pos2::new(left, stats_top),
            egui::vec2(60.0 * scale, 4.0 * scale),
        );
        ui.painter().rect_filled(
            divider,
            2.0 * scale,
            Theme::with_opacity(theme.accent, opacity),
        );

        let value_color = Theme::with_opacity(theme.heading_color, opacity);
        let value_h = text::draw_wrapped(
            ui,
            &stat.value,
            Pos2::new(left, stats_top + 24.0 * scale),
            FontId::proportional(theme.headline_size * 0.8 * scale),
            value_color,
            cell_width,
        );

        let label_color = Theme::with_opacity(theme.muted, opacity);
        text::draw_wrapped(
            ui,
            &stat.label,
            Pos2::new(left, stats_top + 24.0 * scale + value_h + 8.0 * scale),
            FontId::proportional(theme.caption_size * 1.2 * scale),
            label_color,
            cell_width,
        );
    }
}
