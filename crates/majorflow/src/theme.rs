use eframe::egui::Color32;

#[derive(Debug, Clone)]
pub struct Theme {
    pub name: String,
    pub background: Color32,
    pub foreground: Color32,
    pub muted: Color32,
    pub accent: Color32,
    pub panel_background: Color32,
    pub node_outline: Color32,
    /// Opacity of dimmed nodes and edges while something is in focus.
    pub dim_opacity: f32,
    /// Opacity of edges when nothing is in focus.
    pub edge_opacity: f32,
    pub label_size: f32,
    pub node_label_size: f32,
    pub body_size: f32,
}

impl Theme {
    pub fn dark() -> Self {
        Self {
            name: "dark".to_string(),
            background: Color32::from_rgb(0x1E, 0x1E, 0x1E),
            foreground: Color32::from_rgb(0xC8, 0xC8, 0xC8),
            muted: Color32::from_rgb(0x80, 0x80, 0x80),
            accent: Color32::from_rgb(0x52, 0x94, 0xE2),
            panel_background: Color32::from_rgb(0x2D, 0x2D, 0x2D),
            node_outline: Color32::from_rgb(0x1E, 0x1E, 0x1E),
            dim_opacity: 0.12,
            edge_opacity: 0.55,
            label_size: 18.0,
            node_label_size: 11.0,
            body_size: 14.0,
        }
    }

    pub fn light() -> Self {
        Self {
            name: "light".to_string(),
            background: Color32::WHITE,
            foreground: Color32::from_rgb(0x1A, 0x1A, 0x2E),
            muted: Color32::from_rgb(0x70, 0x70, 0x70),
            accent: Color32::from_rgb(0x0F, 0x34, 0x60),
            panel_background: Color32::from_rgb(0xF5, 0xF5, 0xF5),
            node_outline: Color32::WHITE,
            dim_opacity: 0.1,
            edge_opacity: 0.45,
            label_size: 18.0,
            node_label_size: 11.0,
            body_size: 14.0,
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

    /// Parse a `#RRGGBB` category color, falling back to the muted color.
    pub fn category_color(&self, hex: &str) -> Color32 {
        Color32::from_hex(hex).unwrap_or(self.muted)
    }
}
