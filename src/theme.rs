//! Theme system

use ratatui::style::Color;

/// Two-stop color ramp used for card and detail backgrounds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Gradient {
    pub start: Color,
    pub end: Color,
}

impl Gradient {
    pub const fn new(start: Color, end: Color) -> Self {
        Self { start, end }
    }

    /// Color at position `t` in `[0, 1]`. Non-RGB stops snap to the nearer end.
    pub fn at(&self, t: f32) -> Color {
        let t = t.clamp(0.0, 1.0);
        match (self.start, self.end) {
            (Color::Rgb(r1, g1, b1), Color::Rgb(r2, g2, b2)) => {
                let mix = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * t).round() as u8;
                Color::Rgb(mix(r1, r2), mix(g1, g2), mix(b1, b2))
            }
            _ if t < 0.5 => self.start,
            _ => self.end,
        }
    }

    /// Color for row `row` of a block `rows` tall
    pub fn row(&self, row: u16, rows: u16) -> Color {
        if rows <= 1 {
            return self.start;
        }
        self.at(row as f32 / (rows - 1) as f32)
    }
}

/// Complete color palette for TUI rendering
#[derive(Debug, Clone, Copy)]
pub struct ThemeColors {
    // Backgrounds
    pub bg_primary: Color,
    pub bg_panel: Color,
    pub bg_tooltip: Color,

    // Borders
    pub border_default: Color,
    pub border_focus: Color,
    pub border_muted: Color,

    // Text
    pub text_primary: Color,
    pub text_secondary: Color,
    pub text_muted: Color,

    // Accents
    pub accent_blue: Color,
    pub accent_green: Color,
}

impl ThemeColors {
    /// Default theme
    pub const DEFAULT: Self = Self {
        // Backgrounds
        bg_primary: Color::Rgb(40, 36, 92),
        bg_panel: Color::Rgb(62, 58, 120),
        bg_tooltip: Color::Rgb(12, 12, 18),

        // Borders
        border_default: Color::Rgb(150, 145, 200),
        border_focus: Color::Rgb(120, 220, 170),
        border_muted: Color::Rgb(100, 95, 150),

        // Text
        text_primary: Color::Rgb(245, 245, 250),
        text_secondary: Color::Rgb(215, 212, 235),
        text_muted: Color::Rgb(160, 156, 190),

        // Accents
        accent_blue: Color::Rgb(90, 140, 245),
        accent_green: Color::Rgb(90, 210, 140),
    };

    /// Bar fill, matching the blue to green ramp of the chart
    #[inline]
    pub const fn bar_gradient(&self) -> Gradient {
        Gradient::new(self.accent_blue, self.accent_green)
    }
}

/// Theme container providing access to color palette
#[derive(Debug, Clone, Copy, Default)]
pub struct Theme;

impl Theme {
    #[inline]
    pub const fn colors(&self) -> ThemeColors {
        ThemeColors::DEFAULT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_background() {
        let colors = ThemeColors::DEFAULT;
        assert_eq!(colors.bg_primary, Color::Rgb(40, 36, 92));
    }

    #[test]
    fn test_gradient_endpoints_and_midpoint() {
        let g = Gradient::new(Color::Rgb(0, 0, 0), Color::Rgb(200, 100, 50));
        assert_eq!(g.at(0.0), Color::Rgb(0, 0, 0));
        assert_eq!(g.at(1.0), Color::Rgb(200, 100, 50));
        assert_eq!(g.at(0.5), Color::Rgb(100, 50, 25));
        assert_eq!(g.at(7.0), Color::Rgb(200, 100, 50));
        assert_eq!(g.row(0, 1), Color::Rgb(0, 0, 0));
        assert_eq!(g.row(4, 5), Color::Rgb(200, 100, 50));
    }

    #[test]
    fn test_named_stops_snap() {
        let g = Gradient::new(Color::Green, Color::Blue);
        assert_eq!(g.at(0.2), Color::Green);
        assert_eq!(g.at(0.8), Color::Blue);
    }
}
