use crate::api::models::{Analysis, PALETTE_SIZE};
use crate::color::parse_color;
use image::Rgba;

/// One rendered colour block.
#[derive(Debug, Clone, PartialEq)]
pub struct Swatch {
    /// Colour string exactly as the service sent it.
    pub value: String,
    /// `None` when the value is not a colour we understand.
    pub rgba: Option<Rgba<u8>>,
}

impl Swatch {
    pub fn new(value: impl Into<String>) -> Self {
        let value = value.into();
        let rgba = parse_color(&value);
        Self { value, rgba }
    }
}

pub fn swatches<S: AsRef<str>>(colors: &[S]) -> Vec<Swatch> {
    colors.iter().map(|c| Swatch::new(c.as_ref())).collect()
}

/// Contents of the palette panel. Replaced wholesale on every generation.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum PalettePanel {
    #[default]
    Empty,
    Loading,
    Ready {
        swatches: Vec<Swatch>,
        summary: Option<String>,
        source_text: String,
    },
    Error(String),
}

impl PalettePanel {
    /// Builds the panel for a successful `/analyze` response. Anything other
    /// than a full five-colour palette is shown as an error.
    pub fn from_analysis(source_text: &str, analysis: &Analysis) -> Self {
        if analysis.colors.len() != PALETTE_SIZE {
            return PalettePanel::Error(format!(
                "Expected {PALETTE_SIZE} colours, got {}",
                analysis.colors.len()
            ));
        }
        PalettePanel::Ready {
            swatches: swatches(&analysis.colors),
            summary: analysis.summary(),
            source_text: source_text.to_string(),
        }
    }

    pub fn swatches(&self) -> &[Swatch] {
        match self {
            PalettePanel::Ready { swatches, .. } => swatches,
            _ => &[],
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, PalettePanel::Loading)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn analysis(colors: &[&str]) -> Analysis {
        Analysis {
            colors: colors.iter().map(|c| c.to_string()).collect(),
            ..Analysis::default()
        }
    }

    #[test]
    fn test_five_colors_render_in_order() {
        let panel = PalettePanel::from_analysis(
            "hello",
            &analysis(&["#111", "#222", "#333", "#444", "#555"]),
        );
        let values: Vec<_> = panel.swatches().iter().map(|s| s.value.as_str()).collect();
        assert_eq!(values, ["#111", "#222", "#333", "#444", "#555"]);
        assert_eq!(panel.swatches()[0].rgba, Some(Rgba([0x11, 0x11, 0x11, 255])));
        assert_eq!(panel.swatches()[4].rgba, Some(Rgba([0x55, 0x55, 0x55, 255])));
    }

    #[test]
    fn test_wrong_count_is_error() {
        let panel = PalettePanel::from_analysis("hello", &analysis(&["#111", "#222"]));
        assert_eq!(panel, PalettePanel::Error("Expected 5 colours, got 2".into()));
        assert!(panel.swatches().is_empty());
    }

    #[test]
    fn test_unparseable_value_kept_raw() {
        let s = Swatch::new("mystery");
        assert_eq!(s.value, "mystery");
        assert!(s.rgba.is_none());
    }
}
