// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/// String-level rules used to sniff references and colors.
///
/// All of them are simple substring checks. They are collected here,
/// so new spellings can be added without touching the classification code.
#[derive(Clone, Debug)]
pub struct Heuristics {
    /// Color spellings that mark an image as likely invisible on a light background.
    ///
    /// Matched case-sensitively against the serialized markup.
    ///
    /// Default: `#FFF`, `#fff`, `#FFFFFF`, `#ffffff`, `white`
    pub white_fills: Vec<String>,

    /// Substrings of a source URL that mark it as an SVG file.
    ///
    /// Matched case-insensitively.
    ///
    /// Default: `.svg`
    pub svg_file_markers: Vec<String>,

    /// Substrings of a source URL that mark it as a base64 encoded SVG data URI.
    ///
    /// Matched case-insensitively.
    ///
    /// Default: `data:image/svg+xml;base64`
    pub base64_markers: Vec<String>,

    /// Substrings of a source URL that mark it as a plain text SVG data URI,
    /// with the markup embedded directly.
    ///
    /// Matched case-insensitively.
    ///
    /// Default: `data:image/svg+xml;utf8`, `data:image/svg+xml;charset=utf-8`, `data:image/svg+xml,`
    pub utf8_markers: Vec<String>,
}

impl Default for Heuristics {
    fn default() -> Heuristics {
        Heuristics {
            white_fills: to_strings(&["#FFF", "#fff", "#FFFFFF", "#ffffff", "white"]),
            svg_file_markers: to_strings(&[".svg"]),
            base64_markers: to_strings(&["data:image/svg+xml;base64"]),
            utf8_markers: to_strings(&[
                "data:image/svg+xml;utf8",
                "data:image/svg+xml;charset=utf-8",
                "data:image/svg+xml,",
            ]),
        }
    }
}

impl Heuristics {
    /// Checks that a source points to an SVG, either a file or a base64 data URI.
    pub fn is_svg_reference(&self, src: &str) -> bool {
        contains_any(src, &self.svg_file_markers) || contains_any(src, &self.base64_markers)
    }

    /// Checks that a source is a data URI with a plain text SVG.
    pub fn is_utf8_data_uri(&self, src: &str) -> bool {
        contains_any(src, &self.utf8_markers)
    }

    /// Checks that a markup mentions a white color.
    pub fn has_white_fill(&self, markup: &str) -> bool {
        self.white_fills.iter().any(|fill| markup.contains(fill.as_str()))
    }
}

fn contains_any(text: &str, markers: &[String]) -> bool {
    let text = text.to_ascii_lowercase();
    markers
        .iter()
        .any(|marker| text.contains(&marker.to_ascii_lowercase()))
}

fn to_strings(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn svg_reference() {
        let h = Heuristics::default();
        assert!(h.is_svg_reference("/assets/logo.svg"));
        assert!(h.is_svg_reference("https://cdn.example.com/Logo.SVG?v=2"));
        assert!(h.is_svg_reference("data:image/svg+xml;base64,PHN2Zy8+"));
        assert!(!h.is_svg_reference("photo.png"));
        assert!(!h.is_svg_reference("data:image/svg+xml;utf8,<svg/>"));
    }

    #[test]
    fn utf8_data_uri() {
        let h = Heuristics::default();
        assert!(h.is_utf8_data_uri("data:image/svg+xml;utf8,<svg/>"));
        assert!(h.is_utf8_data_uri("data:image/svg+xml,%3Csvg/%3E"));
        assert!(h.is_utf8_data_uri("data:image/svg+xml;charset=UTF-8,%3Csvg/%3E"));
        assert!(!h.is_utf8_data_uri("data:image/svg+xml;base64,PHN2Zy8+"));
    }

    #[test]
    fn white_fill() {
        let h = Heuristics::default();
        assert!(h.has_white_fill("<path fill=\"#ffffff\"/>"));
        assert!(h.has_white_fill("<path fill=\"white\"/>"));
        assert!(!h.has_white_fill("<path fill=\"#000\"/>"));
    }

    #[test]
    fn custom_white_fill() {
        let mut h = Heuristics::default();
        h.white_fills.push("rgb(255,255,255)".to_string());
        assert!(h.has_white_fill("<path fill=\"rgb(255,255,255)\"/>"));
    }
}
