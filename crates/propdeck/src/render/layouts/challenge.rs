use eframe::egui::{self, Pos2};

use crate::engine::transition::Slot;
use crate::proposal::registry::ChallengeContent;
use crate::render::text;
use crate::render::Reveal;
use crate::theme::Theme;

/// Problem statement: headline stack on the left, pain points listed on the
/// right.
pub fn render(
    ui: &egui::Ui,
    content: &ChallengeContent,
    theme: &Theme,
    rect: egui::Rect,
    reveal: &Reveal,
    scale: f32,
) {
    let padding = 120.0 * scale;
    let content_rect = rect.shrink(padding);
    let gap = 80.0 * scale;
    let left_width = content_rect.width() * 0.45;
    let right_left = content_rect.left() + left_width + gap;
    let right_width = content_rect.width() - left_width - gap;

    // Accent edge along the left column.
    let edge_rect = egui::Rect::from_min_size(
        Pos2::new(content_rect.left() - 24.0 * scale, content_rect.top() + 10.0 * scale),
        egui::vec2(6.0 * scale, content_rect.height() * 0.5),
    );
    ui.painter().rect_filled(
        edge_rect,
        3.0 * scale,
        Theme::with_opacity(theme.accent, reveal.opacity(Slot::Container) * 0.8),
    );

    let mut y = content_rect.top() + 40.0 * scale;
    let kicker_h = text::draw_kicker(
        ui,
        theme,
        &content.kicker,
        Pos2::new(content_rect.left(), y),
        reveal.opacity(Slot::Kicker),
        scale,
    );
    y += kicker_h + 30.0 * scale;

    let headline_h = text::draw_headline(
        ui,
        theme,
        &content.headline,
        Pos2::new(content_rect.left(), y),
        left_width,
        reveal.opacity(Slot::Headline),
        scale,
    );
    y += headline_h + 36.0 * scale;

    text::draw_body(
        ui,
        theme,
        &content.body,
        Pos2::new(content_rect.left(), y),
        left_width,
        reveal.opacity(Slot::Body),
        scale,
    );

    // Pain points, revealed one after another.
    let mut item_y = content_rect.top() + 120.0 * scale;
    for (i, point) in content.pain_points.iter().enumerate() {
        let opacity = reveal.item(i);
        let h = text::draw_bullet(
            ui,
            theme,
            point,
            Pos2::new(right_left, item_y),
            right_width,
            opacity,
            scale,
        );
        item_y += h + 36.0 * scale;
    }
}
