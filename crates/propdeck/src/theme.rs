use eframe::egui::Color32;

/// Brand palette and type ramp for the proposal deck, sized against the
/// 1920x1080 reference frame.
#[derive(Debug, Clone)]
pub struct Theme {
    pub name: String,
    pub background: Color32,
    pub surface: Color32,
    pub foreground: Color32,
    pub heading_color: Color32,
    pub accent: Color32,
    pub muted: Color32,
    pub kicker_size: f32,
    pub headline_size: f32,
    pub subtitle_size: f32,
    pub body_size: f32,
    pub caption_size: f32,
}

impl Theme {
    pub fn dark() -> Self {
        Self {
            name: "dark".to_string(),
            background: Color32::from_rgb(0x12, 0x16, 0x1E),
            surface: Color32::from_rgb(0x1C, 0x23, 0x2F),
            foreground: Color32::from_rgb(0xC9, 0xD1, 0xD9),
            heading_color: Color32::WHITE,
            accent: Color32::from_rgb(0x4C, 0x9F, 0x70),
            muted: Color32::from_rgb(0x7A, 0x85, 0x94),
            kicker_size: 26.0,
            headline_size: 88.0,
            subtitle_size: 40.0,
            body_size: 32.0,
            caption_size: 22.0,
        }
    }

    pub fn light() -> Self {
        Self {
            name: "light".to_string(),
            background: Color32::from_rgb(0xFA, 0xF9, 0xF6),
            surface: Color32::WHITE,
            foreground: Color32::from_rgb(0x2B, 0x33, 0x3E),
            heading_color: Color32::from_rgb(0x16, 0x21, 0x2B),
            accent: Color32::from_rgb(0x2E, 0x7D, 0x4F),
            muted: Color32::from_rgb(0x8A, 0x93, 0x9E),
            kicker_size: 26.0,
            headline_size: 88.0,
            subtitle_size: 40.0,
            body_size: 32.0,
            caption_size: 22.0,
        }
    }

    pub fn from_name(name: &str) -> Self {
        match name {
            "dark" => Self::dark(),
            _ => Self::light(),
        }
    }

    pub fn toggled(&self) -> Self {
        if self.name == "dark" {
            Self::light()
        } else {
            Self::dark()
        }
    }

    /// Apply opacity to a color
    pub fn with_opacity(color: Color32, opacity: f32) -> Color32 {
        Color32::from_rgba_unmultiplied(color.r(), color.g(), color.b(), (opacity * 255.0) as u8)
    }
}
