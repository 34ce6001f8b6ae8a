use ratatui::style::Color;

use crate::model::UiConfig;

/// Colors used by the checklist screen, keyed in `[ui.colors]` by field name
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    pub background: Color,
    /// Unselected rows
    pub text: Color,
    /// List heading
    pub title: Color,
    /// Selected row and its `>` marker
    pub highlight: Color,
    /// Progress counts, key hints, borders
    pub hint: Color,
    /// Status messages for failed saves
    pub error: Color,
    /// Done entries and finished categories
    pub complete: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Theme {
            background: Color::Reset,
            text: Color::Reset,
            title: Color::Rgb(0xFF, 0xFF, 0xFF),
            highlight: Color::Indexed(170),
            hint: Color::Indexed(241),
            error: Color::Rgb(0xFF, 0x44, 0x44),
            complete: Color::Rgb(0x44, 0xFF, 0x88),
        }
    }
}

impl Theme {
    /// Defaults with any valid `[ui.colors]` overrides applied. Unknown keys
    /// and unparsable values are skipped.
    pub fn from_config(ui: &UiConfig) -> Self {
        let mut theme = Theme::default();
        for (key, value) in &ui.colors {
            let Some(color) = parse_color(value) else {
                continue;
            };
            if let Some(slot) = theme.slot_mut(key) {
                *slot = color;
            }
        }
        theme
    }

    fn slot_mut(&mut self, key: &str) -> Option<&mut Color> {
        match key {
            "background" => Some(&mut self.background),
            "text" => Some(&mut self.text),
            "title" => Some(&mut self.title),
            "highlight" => Some(&mut self.highlight),
            "hint" => Some(&mut self.hint),
            "error" => Some(&mut self.error),
            "complete" => Some(&mut self.complete),
            _ => None,
        }
    }
}

/// `"#RRGGBB"` as RGB, or a bare `0..=255` terminal palette index
fn parse_color(value: &str) -> Option<Color> {
    let value = value.trim();
    if let Some(hex) = value.strip_prefix('#') {
        if hex.len() != 6 {
            return None;
        }
        let rgb = u32::from_str_radix(hex, 16).ok()?;
        let [_, r, g, b] = rgb.to_be_bytes();
        return Some(Color::Rgb(r, g, b));
    }
    value.parse::<u8>().ok().map(Color::Indexed)
}
