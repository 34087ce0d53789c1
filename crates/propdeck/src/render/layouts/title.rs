use eframe::egui::{self, FontId, Pos2};

use crate::engine::transition::Slot;
use crate::proposal::registry::TitleContent;
use crate::render::text;
use crate::render::Reveal;
use crate::theme::Theme;

/// Opening slide: centered headline stack with an accent rule.
pub fn render(
    ui: &egui::Ui,
    content: &TitleContent,
    theme: &Theme,
    rect: egui::Rect,
    reveal: &Reveal,
    scale: f32,
) {
    let padding = 140.0 * scale;
    let content_rect = rect.shrink(padding);
    let max_width = content_rect.width() * 0.85;
    let left = content_rect.left() + (content_rect.width() - max_width) / 2.0;

    // Accent rule above the stack.
    let rule_opacity = reveal.opacity(Slot::Container);
    let rule_width = 120.0 * scale;
    let rule_rect = egui::Rect::from_min_size(
        Pos2::new(rect.center().x - rule_width / 2.0, content_rect.top() + 60.0 * scale),
        egui::vec2(rule_width, 6.0 * scale),
    );
    ui.painter().rect_filled(
        rule_rect,
        3.0 * scale,
        Theme::with_opacity(theme.accent, rule_opacity),
    );

    let mut y = rule_rect.bottom() + 50.0 * scale;

    let kicker_galley_h = text::draw_kicker_centered(
        ui,
        theme,
        &content.kicker,
        rect.center().x,
        y,
        reveal.opacity(Slot::Kicker),
        scale,
    );
    y += kicker_galley_h + 40.0 * scale;

    let headline_color = Theme::with_opacity(theme.heading_color, reveal.opacity(Slot::Headline));
    let headline_galley = ui.painter().layout(
        content.headline.clone(),
        FontId::proportional(theme.headline_size * 1.1 * scale),
        headline_color,
        max_width,
    );
    let headline_x = left + (max_width - headline_galley.rect.width()) / 2.0;
    let headline_h = headline_galley.rect.height();
    ui.painter()
        .galley(Pos2::new(headline_x, y), headline_galley, headline_color);
    y += headline_h + 40.0 * scale;

    let subtitle_color = Theme::with_opacity(theme.foreground, reveal.opacity(Slot::Body));
    let subtitle_galley = ui.painter().layout(
        content.subtitle.clone(),
        FontId::proportional(theme.subtitle_size * scale),
        subtitle_color,
        max_width,
    );
    let subtitle_x = left + (max_width - subtitle_galley.rect.width()) / 2.0;
    ui.painter()
        .galley(Pos2::new(subtitle_x, y), subtitle_galley, subtitle_color);

    // Presenter line anchored near the bottom.
    let presenter_opacity = reveal.item(0);
    let presenter_color = Theme::with_opacity(theme.muted, presenter_opacity);
    let presenter_galley = ui.painter().layout_no_wrap(
        content.presented_by.clone(),
        FontId::proportional(theme.caption_size * 1.2 * scale),
        presenter_color,
    );
    let presenter_pos = Pos2::new(
        rect.center().x - presenter_galley.rect.width() / 2.0,
        content_rect.bottom() - 40.0 * scale,
    );
    ui.painter()
        .galley(presenter_pos, presenter_galley, presenter_color);
}
