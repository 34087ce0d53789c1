use eframe::egui::{self, FontId, Pos2};

use crate::engine::transition::Slot;
use crate::proposal::registry::CtaContent;
use crate::render::text;
use crate::render::Reveal;
use crate::theme::Theme;

/// Closing slide: centered call to action, numbered next steps, contact line.
pub fn render(
    ui: &egui::Ui,
    content: &CtaContent,
    theme: &Theme,
    rect: egui::Rect,
    reveal: &Reveal,
    scale: f32,
) {
    let padding = 140.0 * scale;
    let content_rect = rect.shrink(padding);
    let center_x = rect.center().x;

    let mut y = content_rect.top() + 30.0 * scale;
    let kicker_h = text::draw_kicker_centered(
        ui,
        theme,
        &content.kicker,
        center_x,
        y,
        reveal.opacity(Slot::Kicker),
        scale,
    );
    y += kicker_h + 30.0 * scale;

    let headline_color = Theme::with_opacity(theme.heading_color, reveal.opacity(Slot::Headline));
    let headline_galley = ui.painter().layout(
        content.headline.clone(),
        FontId::proportional(theme.headline_size * scale),
        headline_color,
        content_rect.width() * 0.85,
    );
    let headline_h = headline_galley.rect.height();
    ui.painter().galley(
        Pos2::new(center_x - headline_galley.rect.width() / 2.0, y),
        headline_galley,
        headline_color,
    );
    y += headline_h + 30.0 * scale;

    let body_color = Theme::with_opacity(theme.foreground, reveal.opacity(Slot::Body));
    let body_galley = ui.painter().layout(
        content.body.clone(),
        FontId::proportional(theme.body_size * scale),
        body_color,
        content_rect.width() * 0.6,
    );
    let body_h = body_galley.rect.height();
    ui.painter().galley(
        Pos2::new(center_x - body_galley.rect.width() / 2.0, y),
        body_galley,
        body_color,
    );
    y += body_h + 60.0 * scale;

    // Numbered steps, centered as a block.
    let steps_width = content_rect.width() * 0.5;
    let steps_left = center_x - steps_width / 2.0;
    for (i, step) in content.next_steps.iter().enumerate() {
        let opacity = reveal.item(i);
        let number_color = Theme::with_opacity(theme.accent, opacity);
        let number_galley = ui.painter().layout_no_wrap(
            format!("{}.", i + 1),
            FontId::proportional(theme.body_size * scale),
            number_color,
        );
        ui.painter().galley(
            Pos2::new(steps_left, y),
            number_galley,
            number_color,
        );

        let step_color = Theme::with_opacity(theme.foreground, opacity);
        let h = text::draw_wrapped(
            ui,
            step,
            Pos2::new(steps_left + 56.0 * scale, y),
            FontId::proportional(theme.body_size * scale),
            step_color,
            steps_width - 56.0 * scale,
        );
        y += h + 24.0 * scale;
    }

    // Contact line anchored at the bottom.
    let contact_opacity = reveal.item(content.next_steps.len());
    let contact_color = Theme::with_opacity(theme.muted, contact_opacity);
    let contact = format!("{}  ·  {}", content.contact_name, content.contact_email);
    let contact_galley = ui.painter().layout_no_wrap(
        contact,
        FontId::proportional(theme.caption_size * 1.2 * scale),
        contact_color,
    );
    ui.painter().galley(
        Pos2::new(
            center_x - contact_galley.rect.width() / 2.0,
            content_rect.bottom() - 40.0 * scale,
        ),
        contact_galley,
        contact_color,
    );
}
