use eframe::egui::{self, FontId, Pos2};

use crate::engine::transition::Slot;
use crate::proposal::registry::InvestmentContent;
use crate::render::text;
use crate::render::Reveal;
use crate::theme::Theme;

/// Investment slide: the price line carries the slide, inclusions listed
/// beneath it.
pub fn render(
    ui: &egui::Ui,
    content: &InvestmentContent,
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
    y += headline_h + 60.0 * scale;

    // Price panel.
    let panel_opacity = reveal.opacity(Slot::Body);
    let panel_height = 180.0 * scale;
    let panel_rect = egui::Rect::from_min_size(
        Pos2::new(content_rect.left(), y),
        egui::vec2(content_rect.width(), panel_height),
    );
    ui.painter().rect_filled(
        panel_rect,
        12.0 * scale,
        Theme::with_opacity(theme.surface, panel_opacity),
    );
    ui.painter().rect_filled(
        egui::Rect::from_min_size(panel_rect.min, egui::vec2(6.0 * scale, panel_height)),
        3.0 * scale,
        Theme::with_opacity(theme.accent, panel_opacity),
    );

    let inner = 40.0 * scale;
    let price_color = Theme::with_opacity(theme.heading_color, panel_opacity);
    let price_h = text::draw_wrapped(
        ui,
        &content.price_line,
        Pos2::new(panel_rect.left() + inner, panel_rect.top() + inner),
        FontId::proportional(theme.headline_size * 0.6 * scale),
        price_color,
        panel_rect.width() - inner * 2.0,
    );
    let note_color = Theme::with_opacity(theme.muted, panel_opacity);
    text::draw_wrapped(
        ui,
        &content.price_note,
        Pos2::new(
            panel_rect.left() + inner,
            panel_rect.top() + inner + price_h + 12.0 * scale,
        ),
        FontId::proportional(theme.caption_size * 1.1 * scale),
        note_color,
        panel_rect.width() - inner * 2.0,
    );
    y = panel_rect.bottom() + 50.0 * scale;

    for (i, item) in content.includes.iter().enumerate() {
        let opacity = reveal.item(i);
        let h = text::draw_bullet(
            ui,
            theme,
            item,
            Pos2::new(content_rect.left(), y),
            content_rect.width() * 0.7,
            opacity,
            scale,
        );
        y += h + 28.0 * scale;
    }
}
