pub mod image_cache;
pub mod layouts;
pub mod text;

use std::time::Instant;

use eframe::egui;

use crate::engine::transition::{Orchestrator, Slot};
use crate::proposal::{Consultant, Slide};
use crate::proposal::registry::SlideContent;
use crate::theme::Theme;

use image_cache::ImageCache;

/// Per-frame opacity lookup for the entrance cascade, combined with the
/// whole-slide opacity used while a slide exits.
pub struct Reveal<'a> {
    orchestrator: &'a Orchestrator,
    now: Instant,
    base: f32,
}

impl<'a> Reveal<'a> {
    pub fn new(orchestrator: &'a Orchestrator, now: Instant, base: f32) -> Self {
        Self {
            orchestrator,
            now,
            base,
        }
    }

    pub fn opacity(&self, slot: Slot) -> f32 {
        self.orchestrator.slot_opacity(slot, self.now) * self.base
    }

    pub fn item(&self, index: usize) -> f32 {
        self.opacity(Slot::Item(index))
    }
}

/// Render a single slide using the layout for its type.
#[allow(clippy::too_many_arguments)]
pub fn render_slide(
    ui: &egui::Ui,
    slide: &Slide,
    consultants: &[Consultant],
    theme: &Theme,
    rect: egui::Rect,
    image_cache: &ImageCache,
    reveal: &Reveal,
    scale: f32,
) {
    match &slide.content {
        SlideContent::Title(c) => layouts::title::render(ui, c, theme, rect, reveal, scale),
        SlideContent::Challenge(c) => layouts::challenge::render(ui, c, theme, rect, reveal, scale),
        SlideContent::Solution(c) => layouts::solution::render(ui, c, theme, rect, reveal, scale),
        SlideContent::About(c) => layouts::about::render(ui, c, theme, rect, reveal, scale),
        SlideContent::Consultants(c) => layouts::consultants::render(
            ui,
            c,
            consultants,
            theme,
            rect,
            image_cache,
            reveal,
            scale,
        ),
        SlideContent::Delivery(c) => layouts::delivery::render(ui, c, theme, rect, reveal, scale),
        SlideContent::Investment(c) => {
            layouts::investment::render(ui, c, theme, rect, reveal, scale)
        }
        SlideContent::Cta(c) => layouts::cta::render(ui, c, theme, rect, reveal, scale),
    }
}
