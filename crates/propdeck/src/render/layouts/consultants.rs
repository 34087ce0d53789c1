use eframe::egui::{self, FontId, Pos2};

use crate::engine::transition::Slot;
use crate::proposal::registry::ConsultantsContent;
use crate::proposal::Consultant;
use crate::render::image_cache::ImageCache;
use crate::render::text;
use crate::render::Reveal;
use crate::theme::Theme;

/// Consultant cards in a row (up to 3 across, then a second row). The card
/// list always has at least one entry: a proposal without consultants gets a
/// placeholder at resolve time.
#[allow(clippy::too_many_arguments)]
pub fn render(
    ui: &egui::Ui,
    content: &ConsultantsContent,
    consultants: &[Consultant],
    theme: &Theme,
    rect: egui::Rect,
    image_cache: &ImageCache,
    reveal: &Reveal,
    scale: f32,
) {
    let padding = 100.0 * scale;
    let content_rect = rect.shrink(padding);

    let mut y = content_rect.top();
    let kicker_h = text::draw_kicker(
        ui,
        theme,
        &content.kicker,
        Pos2::new(content_rect.left(), y),
        reveal.opacity(Slot::Kicker),
        scale,
    );
    y += kicker_h + 20.0 * scale;

    let headline_h = text::draw_headline(
        ui,
        theme,
        &content.headline,
        Pos2::new(content_rect.left(), y),
        content_rect.width(),
        reveal.opacity(Slot::Headline),
        scale,
    );
    y += headline_h + 16.0 * scale;

    let intro_h = text::draw_body(
        ui,
        theme,
        &content.intro,
        Pos2::new(content_rect.left(), y),
        content_rect.width() * 0.7,
        reveal.opacity(Slot::Body),
        scale,
    );
    y += intro_h + 50.0 * scale;

    let cols = consultants.len().clamp(1, 3);
    let rows = consultants.len().div_ceil(cols);
    let gap = 32.0 * scale;
    let card_width = (content_rect.width() - gap * (cols as f32 - 1.0)) / cols as f32;
    let card_height =
        ((content_rect.bottom() - y - gap * (rows as f32 - 1.0)) / rows as f32).max(240.0 * scale);

    for (i, consultant) in consultants.iter().enumerate() {
        let col = i % cols;
        let row = i / cols;
        let card_rect = egui::Rect::from_min_size(
            Pos2::new(
                content_rect.left() + col as f32 * (card_width + gap),
                y + row as f32 * (card_height + gap),
            ),
            egui::vec2(card_width, card_height),
        );
        draw_card(
            ui,
            consultant,
            theme,
            card_rect,
            image_cache,
            reveal.item(i),
            scale,
        );
    }
}

fn draw_card(
    ui: &egui::Ui,
    consultant: &Consultant,
    theme: &Theme,
    card_rect: egui::Rect,
    image_cache: &ImageCache,
    opacity: f32,
    scale: f32,
) {
    let inner = 28.0 * scale;
    ui.painter().rect_filled(
        card_rect,
        12.0 * scale,
        Theme::with_opacity(theme.surface, opacity),
    );

    // Photo, or an initials monogram when no photo is set.
    let photo_radius = 44.0 * scale;
    let photo_center = Pos2::new(
        card_rect.left() + inner + photo_radius,
        card_rect.top() + inner + photo_radius,
    );
    let texture = consultant
        .photo
        .as_deref()
        .and_then(|path| image_cache.get(ui.ctx(), path));
    match texture {
        Some(texture) => {
            let photo_rect = egui::Rect::from_center_size(
                photo_center,
                egui::vec2(photo_radius * 2.0, photo_radius * 2.0),
            );
            ui.painter().image(
                texture.id(),
                photo_rect,
                egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
                Theme::with_opacity(egui::Color32::WHITE, opacity),
            );
        }
        None => {
            ui.painter().circle_filled(
                photo_center,
                photo_radius,
                Theme::with_opacity(theme.accent, opacity * 0.25),
            );
            let monogram_color = Theme::with_opacity(theme.accent, opacity);
            let galley = ui.painter().layout_no_wrap(
                initials(&consultant.name),
                FontId::proportional(photo_radius * 0.8),
                monogram_color,
            );
            let pos = Pos2::new(
                photo_center.x - galley.rect.width() / 2.0,
                photo_center.y - galley.rect.height() / 2.0,
            );
            ui.painter().galley(pos, galley, monogram_color);
        }
    }

    let text_left = photo_center.x + photo_radius + 24.0 * scale;
    let text_width = card_rect.right() - inner - text_left;
    let name_color = Theme::with_opacity(theme.heading_color, opacity);
    let name_h = text::draw_wrapped(
        ui,
        &consultant.name,
        Pos2::new(text_left, card_rect.top() + inner + 8.0 * scale),
        FontId::proportional(theme.subtitle_size * 0.8 * scale),
        name_color,
        text_width,
    );
    let role_color = Theme::with_opacity(theme.muted, opacity);
    text::draw_wrapped(
        ui,
        &consultant.role,
        Pos2::new(
            text_left,
            card_rect.top() + inner + 8.0 * scale + name_h + 6.0 * scale,
        ),
        FontId::proportional(theme.caption_size * 1.1 * scale),
        role_color,
        text_width,
    );

    let mut y = photo_center.y + photo_radius + 28.0 * scale;
    let body_width = card_rect.width() - inner * 2.0;

    if let Some(bio) = &consultant.bio {
        let bio_color = Theme::with_opacity(theme.foreground, opacity * 0.9);
        let bio_h = text::draw_wrapped(
            ui,
            bio,
            Pos2::new(card_rect.left() + inner, y),
            FontId::proportional(theme.body_size * 0.7 * scale),
            bio_color,
            body_width,
        );
        y += bio_h + 20.0 * scale;
    }

    y += draw_expertise_tags(ui, consultant, theme, card_rect, y, inner, opacity, scale);

    if let Some(availability) = &consultant.availability {
        let avail_color = Theme::with_opacity(theme.accent, opacity);
        text::draw_wrapped(
            ui,
            availability,
            Pos2::new(card_rect.left() + inner, y + 16.0 * scale),
            FontId::proportional(theme.caption_size * scale),
            avail_color,
            body_width,
        );
    }
}

/// Pill-shaped expertise tags, wrapping onto new lines as needed. Returns
/// the height consumed.
#[allow(clippy::too_many_arguments)]
fn draw_expertise_tags(
    ui: &egui::Ui,
    consultant: &Consultant,
    theme: &Theme,
    card_rect: egui::Rect,
    top: f32,
    inner: f32,
    opacity: f32,
    scale: f32,
) -> f32 {
    let font = FontId::proportional(theme.caption_size * 0.9 * scale);
    let pad_x = 14.0 * scale;
    let pad_y = 6.0 * scale;
    let gap = 10.0 * scale;
    let max_right = card_rect.right() - inner;

    let mut x = card_rect.left() + inner;
    let mut y = top;
    let mut row_height = 0.0f32;

    for tag in &consultant.expertise {
        let color = Theme::with_opacity(theme.foreground, opacity * 0.9);
        let galley = ui.painter().layout_no_wrap(tag.clone(), font.clone(), color);
        let pill_width = galley.rect.width() + pad_x * 2.0;
        let pill_height = galley.rect.height() + pad_y * 2.0;

        if x + pill_width > max_right && x > card_rect.left() + inner {
            x = card_rect.left() + inner;
            y += pill_height + gap;
        }

        let pill_rect =
            egui::Rect::from_min_size(Pos2::new(x, y), egui::vec2(pill_width, pill_height));
        ui.painter().rect_filled(
            pill_rect,
            pill_height / 2.0,
            Theme::with_opacity(theme.accent, opacity * 0.15),
        );
        ui.painter()
            .galley(Pos2::new(x + pad_x, y + pad_y), galley, color);

        x += pill_width + gap;
        row_height = pill_height;
    }

    y + row_height - top
}

fn initials(name: &str) -> String {
    name.split_whitespace()
        .take(2)
        .filter_map(|word| word.chars().next())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initials_take_first_two_words() {
        assert_eq!(initials("Maria Lund"), "ML");
        assert_eq!(initials("Johan"), "J");
        assert_eq!(initials("Anna Maria Svensson"), "AM");
    }
}
