//! Static font-metric tables for the standard PDF Helvetica faces.
//!
//! Character widths are in em units (AFM widths / 1000). The tables are exact
//! for the core Helvetica faces, so text measured here lines up with what a PDF
//! viewer draws. Helvetica-Oblique shares the regular widths.
//! All tables cover ASCII 0x20..=0x7E (95 printable characters).
//! Index = (char as usize) - 32.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};

/// Millimetres per PostScript point.
pub const MM_PER_PT: f32 = 25.4 / 72.0;

// ────────────────────────────────────────────────────────────────────────────
// Faces and styles
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FontFace {
    Regular,
    Bold,
    Italic,
}

impl FontFace {
    pub const ALL: [FontFace; 3] = [FontFace::Regular, FontFace::Bold, FontFace::Italic];

    /// PostScript name of the standard Type1 font.
    pub fn base_font(self) -> &'static str {
        match self {
            FontFace::Regular => "Helvetica",
            FontFace::Bold => "Helvetica-Bold",
            FontFace::Italic => "Helvetica-Oblique",
        }
    }

    /// Resource name used inside page content streams.
    pub fn resource_name(self) -> &'static str {
        match self {
            FontFace::Regular => "F1",
            FontFace::Bold => "F2",
            FontFace::Italic => "F3",
        }
    }
}

/// Replaces characters the standard Type1 faces cannot show with the
/// stand-in that is actually drawn. Text must pass through this before it is
/// measured or wrapped so line widths match the page.
pub fn transliterate(text: &str) -> Cow<'_, str> {
    if text.contains('₹') {
        Cow::Owned(text.replace('₹', "Rs."))
    } else {
        Cow::Borrowed(text)
    }
}

/// Size, face and fill gray (0.0 = black, 1.0 = white) of a text run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TextStyle {
    pub size_pt: f32,
    pub face: FontFace,
    pub gray: f32,
}

impl TextStyle {
    pub const fn regular(size_pt: f32) -> Self {
        Self {
            size_pt,
            face: FontFace::Regular,
            gray: 0.0,
        }
    }

    pub const fn bold(size_pt: f32) -> Self {
        Self {
            size_pt,
            face: FontFace::Bold,
            gray: 0.0,
        }
    }

    pub const fn muted_italic(size_pt: f32) -> Self {
        Self {
            size_pt,
            face: FontFace::Italic,
            gray: 0.5,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Page geometry
// ────────────────────────────────────────────────────────────────────────────

/// Fixed page layout in millimetres, origin at the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PageGeometry {
    pub width_mm: f32,
    pub height_mm: f32,
    /// Content margin on all four sides.
    pub margin_mm: f32,
    /// Inset of the decorative border rectangle from the page edge.
    pub border_inset_mm: f32,
    pub line_height_mm: f32,
}

impl PageGeometry {
    /// Usable text width between the left and right margins.
    pub fn content_width(&self) -> f32 {
        self.width_mm - 2.0 * self.margin_mm
    }

    pub fn top(&self) -> f32 {
        self.margin_mm
    }

    /// Lowest y a line may occupy before a page break is forced.
    pub fn bottom(&self) -> f32 {
        self.height_mm - self.margin_mm
    }

    pub fn center_x(&self) -> f32 {
        self.width_mm / 2.0
    }
}

/// A4 (210 x 297 mm), 20 mm margins, border 10 mm in, 7 mm line height.
pub fn a4_page() -> PageGeometry {
    PageGeometry {
        width_mm: 210.0,
        height_mm: 297.0,
        margin_mm: 20.0,
        border_inset_mm: 10.0,
        line_height_mm: 7.0,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Text layout capability
// ────────────────────────────────────────────────────────────────────────────

/// Measuring and wrapping text, the only thing the paginator and the PDF writer
/// need to know about fonts.
pub trait TextLayout: Send + Sync {
    /// Rendered width of `text` in millimetres.
    fn text_width(&self, text: &str, style: &TextStyle) -> f32;

    /// Greedy word-wrap to `max_width_mm`. Whitespace-only text yields no lines.
    fn wrap(&self, text: &str, max_width_mm: f32, style: &TextStyle) -> Vec<String>;
}

/// `TextLayout` backed by the static Helvetica tables below.
#[derive(Debug, Clone, Copy, Default)]
pub struct HelveticaLayout;

impl TextLayout for HelveticaLayout {
    fn text_width(&self, text: &str, style: &TextStyle) -> f32 {
        get_metrics(style.face).measure_str(text) * style.size_pt * MM_PER_PT
    }

    fn wrap(&self, text: &str, max_width_mm: f32, style: &TextStyle) -> Vec<String> {
        let metrics = get_metrics(style.face);
        let em_to_mm = style.size_pt * MM_PER_PT;
        let max_width = max_width_mm / em_to_mm;
        let space_w = metrics.space_width;

        let mut lines: Vec<String> = Vec::new();
        let mut current = String::new();
        let mut current_width = 0.0_f32;

        for word in text.split_whitespace() {
            let word_w = metrics.measure_str(word);
            if current.is_empty() {
                current.push_str(word);
                current_width = word_w;
            } else if current_width + space_w + word_w > max_width {
                // Line is full; an over-long word still gets a line of its own.
                lines.push(std::mem::take(&mut current));
                current.push_str(word);
                current_width = word_w;
            } else {
                current.push(' ');
                current.push_str(word);
                current_width += space_w + word_w;
            }
        }
        if !current.is_empty() {
            lines.push(current);
        }
        lines
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Font metric table
// ────────────────────────────────────────────────────────────────────────────

/// Static character-width table for a font face.
///
/// `widths[i]` = width of ASCII character `(i + 32)` in em, covering 0x20
/// (space) through 0x7E (~).
pub struct FontMetricTable {
    widths: [f32; 95],
    /// Fallback width for non-ASCII characters (codepoints > 0x7E).
    pub average_char_width: f32,
    pub space_width: f32,
}

impl FontMetricTable {
    /// Measures the rendered width of a string in em units.
    ///
    /// Non-ASCII characters fall back to `average_char_width`.
    pub fn measure_str(&self, s: &str) -> f32 {
        s.chars()
            .map(|c| {
                let code = c as usize;
                if (32..=126).contains(&code) {
                    self.widths[code - 32]
                } else {
                    self.average_char_width
                }
            })
            .sum()
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Static width tables  (95 ASCII printable characters each)
// ────────────────────────────────────────────────────────────────────────────

/// Helvetica (also used for Helvetica-Oblique).
static HELVETICA_TABLE: FontMetricTable = FontMetricTable {
    #[rustfmt::skip]
    widths: [
        // sp     !      "      #      $      %      &      '      (      )      *      +      ,      -      .      /
        0.278, 0.278, 0.355, 0.556, 0.556, 0.889, 0.667, 0.191, 0.333, 0.333, 0.389, 0.584, 0.278, 0.333, 0.278, 0.278,
        // 0      1      2      3      4      5      6      7      8      9
        0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556,
        // :      ;      <      =      >      ?      @
        0.278, 0.278, 0.584, 0.584, 0.584, 0.556, 1.015,
        // A      B      C      D      E      F      G      H      I      J      K      L      M
        0.667, 0.667, 0.722, 0.722, 0.667, 0.611, 0.778, 0.722, 0.278, 0.500, 0.667, 0.556, 0.833,
        // N      O      P      Q      R      S      T      U      V      W      X      Y      Z
        0.722, 0.778, 0.667, 0.778, 0.722, 0.667, 0.611, 0.722, 0.667, 0.944, 0.667, 0.667, 0.611,
        // [      \      ]      ^      _      `
        0.278, 0.278, 0.278, 0.469, 0.556, 0.333,
        // a      b      c      d      e      f      g      h      i      j      k      l      m
        0.556, 0.556, 0.500, 0.556, 0.556, 0.278, 0.556, 0.556, 0.222, 0.222, 0.500, 0.222, 0.833,
        // n      o      p      q      r      s      t      u      v      w      x      y      z
        0.556, 0.556, 0.556, 0.556, 0.333, 0.500, 0.278, 0.556, 0.500, 0.722, 0.500, 0.500, 0.500,
        // {      |      }      ~
        0.334, 0.260, 0.334, 0.584,
    ],
    average_char_width: 0.52,
    space_width: 0.278,
};

/// Helvetica-Bold.
static HELVETICA_BOLD_TABLE: FontMetricTable = FontMetricTable {
    #[rustfmt::skip]
    widths: [
        // sp     !      "      #      $      %      &      '      (      )      *      +      ,      -      .      /
        0.278, 0.333, 0.474, 0.556, 0.556, 0.889, 0.722, 0.238, 0.333, 0.333, 0.389, 0.584, 0.278, 0.333, 0.278, 0.278,
        // 0      1      2      3      4      5      6      7      8      9
        0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556,
        // :      ;      <      =      >      ?      @
        0.333, 0.333, 0.584, 0.584, 0.584, 0.611, 0.975,
        // A      B      C      D      E      F      G      H      I      J      K      L      M
        0.722, 0.722, 0.722, 0.722, 0.667, 0.611, 0.778, 0.722, 0.278, 0.556, 0.722, 0.611, 0.833,
        // N      O      P      Q      R      S      T      U      V      W      X      Y      Z
        0.722, 0.778, 0.667, 0.778, 0.722, 0.667, 0.611, 0.722, 0.667, 0.944, 0.667, 0.667, 0.611,
        // [      \      ]      ^      _      `
        0.333, 0.278, 0.333, 0.584, 0.556, 0.333,
        // a      b      c      d      e      f      g      h      i      j      k      l      m
        0.556, 0.611, 0.556, 0.611, 0.556, 0.333, 0.611, 0.611, 0.278, 0.278, 0.556, 0.278, 0.889,
        // n      o      p      q      r      s      t      u      v      w      x      y      z
        0.611, 0.611, 0.611, 0.611, 0.389, 0.556, 0.333, 0.611, 0.556, 0.778, 0.556, 0.556, 0.500,
        // {      |      }      ~
        0.389, 0.280, 0.389, 0.584,
    ],
    average_char_width: 0.56,
    space_width: 0.278,
};

/// Returns the static metric table for a face.
pub fn get_metrics(face: FontFace) -> &'static FontMetricTable {
    match face {
        FontFace::Regular | FontFace::Italic => &HELVETICA_TABLE,
        FontFace::Bold => &HELVETICA_BOLD_TABLE,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_measure_str_empty_returns_zero() {
        assert_eq!(get_metrics(FontFace::Regular).measure_str(""), 0.0);
    }

    #[test]
    fn test_measure_str_ascii_characters() {
        // H(0.722) e(0.556) l(0.222) l(0.222) o(0.556)
        let width = get_metrics(FontFace::Regular).measure_str("Hello");
        assert!((width - 2.278).abs() < 1e-3, "Hello width should be ~2.278, got {width}");
    }

    #[test]
    fn test_measure_str_non_ascii_falls_back() {
        let metrics = get_metrics(FontFace::Regular);
        let width = metrics.measure_str("日");
        assert!((width - metrics.average_char_width).abs() < 1e-4);
    }

    #[test]
    fn test_transliterate_rupee() {
        assert_eq!(transliterate("₹5,000"), "Rs.5,000");
        assert!(matches!(transliterate("5,000"), Cow::Borrowed(_)));
    }

    #[test]
    fn test_bold_is_wider_than_regular() {
        let text = "Employment Details";
        assert!(
            get_metrics(FontFace::Bold).measure_str(text)
                > get_metrics(FontFace::Regular).measure_str(text)
        );
    }

    #[test]
    fn test_italic_shares_regular_widths() {
        let text = "computer generated";
        assert_eq!(
            get_metrics(FontFace::Italic).measure_str(text),
            get_metrics(FontFace::Regular).measure_str(text)
        );
    }

    #[test]
    fn test_text_width_scales_with_font_size() {
        let layout = HelveticaLayout;
        let small = layout.text_width("Acme", &TextStyle::regular(10.0));
        let large = layout.text_width("Acme", &TextStyle::regular(20.0));
        assert!((large - 2.0 * small).abs() < 1e-4);
    }

    #[test]
    fn test_wrap_short_text_is_one_line() {
        let lines = HelveticaLayout.wrap("Dear Jane,", 170.0, &TextStyle::regular(11.0));
        assert_eq!(lines, vec!["Dear Jane,"]);
    }

    #[test]
    fn test_wrap_long_text_stays_within_width() {
        let style = TextStyle::regular(11.0);
        let text = "word ".repeat(120);
        let lines = HelveticaLayout.wrap(&text, 170.0, &style);
        assert!(lines.len() > 1);
        for line in &lines {
            assert!(HelveticaLayout.text_width(line, &style) <= 170.0 + 1e-3);
        }
        let rejoined = lines.join(" ");
        assert_eq!(rejoined, text.trim_end());
    }

    #[test]
    fn test_wrap_blank_text_has_no_lines() {
        assert!(HelveticaLayout
            .wrap("   ", 170.0, &TextStyle::regular(11.0))
            .is_empty());
    }

    #[test]
    fn test_wrap_overlong_word_gets_own_line() {
        let style = TextStyle::regular(11.0);
        let long = "x".repeat(200);
        let lines = HelveticaLayout.wrap(&format!("a {long} b"), 50.0, &style);
        assert_eq!(lines, vec!["a".to_string(), long, "b".to_string()]);
    }

    #[test]
    fn test_a4_page_sanity() {
        let page = a4_page();
        assert_eq!(page.content_width(), 170.0);
        assert_eq!(page.top(), 20.0);
        assert_eq!(page.bottom(), 277.0);
        assert_eq!(page.center_x(), 105.0);
    }
}
