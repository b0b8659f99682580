//! Static width tables for the two standard PDF fonts the resume uses.
//!
//! Widths come from the Adobe core-14 AFM files, stored in em units
//! (AFM value / 1000). Tables cover ASCII 0x20..=0x7E, index = (char as usize) - 32.
//! Standard fonts are not embedded, so these tables are the only metrics the
//! renderer has for wrapping and centering.

/// The standard Type 1 fonts referenced by the resume.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StandardFont {
    /// Section bodies.
    Helvetica,
    /// Title banner and section headings.
    HelveticaBold,
}

impl StandardFont {
    /// PostScript name written into the font dictionary.
    pub fn base_font(&self) -> &'static [u8] {
        match self {
            StandardFont::Helvetica => b"Helvetica",
            StandardFont::HelveticaBold => b"Helvetica-Bold",
        }
    }

    /// Resource name used in content streams.
    pub fn resource_name(&self) -> &'static [u8] {
        match self {
            StandardFont::Helvetica => b"F1",
            StandardFont::HelveticaBold => b"F2",
        }
    }

    pub fn metrics(&self) -> &'static FontMetricTable {
        match self {
            StandardFont::Helvetica => &HELVETICA_TABLE,
            StandardFont::HelveticaBold => &HELVETICA_BOLD_TABLE,
        }
    }
}

/// Static character-width table for a font.
///
/// `widths[i]` = width of ASCII character `(i + 32)` at 1em.
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
        s.chars().map(|c| self.char_width(c)).sum()
    }

    /// Width of `s` in points at `size_pt`.
    pub fn width_pt(&self, s: &str, size_pt: f32) -> f32 {
        self.measure_str(s) * size_pt
    }

    fn char_width(&self, c: char) -> f32 {
        let code = c as usize;
        if (32..=126).contains(&code) {
            self.widths[code - 32]
        } else {
            self.average_char_width
        }
    }

    /// Breaks `text` into lines no wider than `max_width_pt` at `size_pt`.
    ///
    /// Explicit newlines always break. Within a paragraph lines break at
    /// single spaces, so a paragraph that fits comes back byte-for-byte.
    /// A word wider than the line is split between characters.
    /// Empty input yields one empty line.
    pub fn wrap(&self, text: &str, size_pt: f32, max_width_pt: f32) -> Vec<String> {
        let max_em = max_width_pt / size_pt;
        text.split('\n')
            .flat_map(|para| self.wrap_paragraph(para.strip_suffix('\r').unwrap_or(para), max_em))
            .collect()
    }

    fn wrap_paragraph(&self, para: &str, max_em: f32) -> Vec<String> {
        let mut lines = Vec::new();
        let mut current: Option<(String, f32)> = None;

        for word in para.split(' ') {
            let word_w = self.measure_str(word);
            match current.take() {
                Some((mut line, width)) if width + self.space_width + word_w <= max_em => {
                    line.push(' ');
                    line.push_str(word);
                    current = Some((line, width + self.space_width + word_w));
                }
                Some((line, _)) => {
                    lines.push(line);
                    // A run of spaces at the break point is swallowed.
                    if !word.is_empty() {
                        current = Some(self.start_line(word, max_em, &mut lines));
                    }
                }
                None => current = Some(self.start_line(word, max_em, &mut lines)),
            }
        }

        match current {
            Some((line, _)) => lines.push(line),
            None if lines.is_empty() => lines.push(String::new()),
            None => {}
        }
        lines
    }

    /// Opens a line with `word`, hard-splitting it into `lines` when it
    /// cannot fit on a line of its own. Returns the open remainder.
    fn start_line(&self, word: &str, max_em: f32, lines: &mut Vec<String>) -> (String, f32) {
        let mut chunk = String::new();
        let mut width = 0.0_f32;
        for c in word.chars() {
            let w = self.char_width(c);
            if !chunk.is_empty() && width + w > max_em {
                lines.push(std::mem::take(&mut chunk));
                width = 0.0;
            }
            chunk.push(c);
            width += w;
        }
        (chunk, width)
    }
}

/// Helvetica (regular).
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
    average_char_width: 0.556,
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
    average_char_width: 0.611,
    space_width: 0.278,
};

#[cfg(test)]
mod tests {
    use super::*;

    fn helvetica() -> &'static FontMetricTable {
        StandardFont::Helvetica.metrics()
    }

    #[test]
    fn test_measure_str_empty_returns_zero() {
        assert_eq!(helvetica().measure_str(""), 0.0);
    }

    #[test]
    fn test_bold_title_width() {
        // "Resume" = R(0.722) + e(0.556) + s(0.556) + u(0.611) + m(0.889) + e(0.556) = 3.890
        let width = StandardFont::HelveticaBold.metrics().measure_str("Resume");
        assert!((width - 3.890).abs() < 1e-3, "got {width}");
    }

    #[test]
    fn test_non_ascii_falls_back_to_average() {
        let metrics = helvetica();
        assert!((metrics.measure_str("é") - metrics.average_char_width).abs() < 1e-4);
    }

    #[test]
    fn test_short_text_is_returned_verbatim() {
        let lines = helvetica().wrap("Python, C++,  Go", 12.0, 500.0);
        assert_eq!(lines, vec!["Python, C++,  Go"]);
    }

    #[test]
    fn test_empty_text_is_one_blank_line() {
        assert_eq!(helvetica().wrap("", 12.0, 500.0), vec![String::new()]);
    }

    #[test]
    fn test_explicit_newlines_break() {
        let lines = helvetica().wrap(
            "Name: Ada\r\nEmail: ada@example.com\n\nPhone: 1",
            12.0,
            500.0,
        );
        assert_eq!(
            lines,
            vec!["Name: Ada", "Email: ada@example.com", "", "Phone: 1"]
        );
    }

    #[test]
    fn test_long_paragraph_wraps_within_width() {
        let metrics = helvetica();
        let text =
            "Led the migration of a monolithic billing system to event driven services ".repeat(6);
        let lines = metrics.wrap(text.trim_end(), 12.0, 200.0);
        assert!(lines.len() > 1);
        for line in &lines {
            assert!(
                metrics.width_pt(line, 12.0) <= 200.0 + 1e-3,
                "line too wide: {line:?}"
            );
        }
        assert_eq!(lines.join(" "), text.trim_end());
    }

    #[test]
    fn test_oversized_word_is_split_by_character() {
        let metrics = helvetica();
        let word = "x".repeat(200);
        let lines = metrics.wrap(&word, 12.0, 100.0);
        assert!(lines.len() > 1);
        assert_eq!(lines.concat(), word);
        for line in &lines {
            assert!(metrics.width_pt(line, 12.0) <= 100.0 + 1e-3);
        }
    }

    #[test]
    fn test_resource_names_are_distinct() {
        assert_ne!(
            StandardFont::Helvetica.resource_name(),
            StandardFont::HelveticaBold.resource_name()
        );
    }
}
