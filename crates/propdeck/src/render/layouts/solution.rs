use eframe::egui::{self, FontId, Pos2};

use crate::engine::transition::Slot;
use crate::proposal::registry::SolutionContent;
use crate::render::text;
use crate::render::Reveal;
use crate::theme::Theme;

/// Solution slide: headline stack on top, pillar cards in a row beneath.
pub fn render(
    ui: &egui::Ui,
    content: &SolutionContent,
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
    y += headline_h + 24.0 * scale;

    let body_h = text::draw_body(
        ui,
        theme,
        &content.body,
        Pos2::new(content_rect.left(), y),
        content_rect.width() * 0.7,
        reveal.opacity(Slot::Body),
        scale,
    );
    y += body_h + 60.0 * scale;

    draw_pillar_cards(ui, content, theme, content_rect, y, reveal, scale);
}

fn draw_pillar_cards(
    ui: &egui::Ui,
    content: &SolutionContent,
    theme: &Theme,
    content_rect: egui::Rect,
    top: f32,
    reveal: &Reveal,
    scale: f32,
) {
    let count = content.pillars.len().max(1);
    let gap = 32.0 * scale;
    let card_width = (content_rect.width() - gap * (count as f32 - 1.0)) / count as f32;
    let card_height = (content_rect.bottom() - top).max(180.0 * scale);
    let inner = 36.0 * scale;

    for (i, pillar) in content.pillars.iter().enumerate() {
        let opacity = reveal.item(i);
        let card_rect = egui::Rect::from_min_size(
            Pos2::new(content_rect.left() + i as f32 * (card_width + gap), top),
            egui::vec2(card_width, card_height),
        );
        ui.painter().rect_filled(
            card_rect,
            10.0 * scale,
            Theme::with_opacity(theme.surface, opacity),
        );
        ui.painter().rect_filled(
            egui::Rect::from_min_size(card_rect.min, egui::vec2(card_width, 6.0 * scale)),
            3.0 * scale,
            Theme::with_opacity(theme.accent, opacity),
        );

        let title_color = Theme::with_opacity(theme.heading_color, opacity);
        let title_h = text::draw_wrapped(
            ui,
            &pillar.title,
            Pos2::new(card_rect.left() + inner, card_rect.top() + inner),
            FontId::proportional(theme.subtitle_size * 0.9 * scale),
            title_color,
            card_width - inner * 2.0,
        );

        let desc_color = Theme::with_opacity(theme.foreground, opacity * 0.9);
        text::draw_wrapped(
            ui,
            &pillar.description,
            Pos2::new(
                card_rect.left() + inner,
                card_rect.top() + inner + title_h + 20.0 * scale,
            ),
            FontId::proportional(theme.body_size * 0.85 * scale),
            desc_color,
            card_width - inner * 2.0,
        );
    }
}
