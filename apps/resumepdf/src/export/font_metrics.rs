//! Static glyph-width tables for the two standard PDF fonts the exporter draws with.
//!
//! Widths come from the Adobe Helvetica / Helvetica-Bold AFM files and are in
//! 1/1000 em. Tables cover ASCII 0x20..=0x7E (95 printable characters);
//! index = (char as usize) - 32. Anything else falls back to `average_char_width`.

use serde::{Deserialize, Serialize};

// ────────────────────────────────────────────────────────────────────────────
// Font faces
// ────────────────────────────────────────────────────────────────────────────

/// The standard Type1 faces used by the document. Neither needs embedding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FontFace {
    Helvetica,
    HelveticaBold,
}

impl FontFace {
    /// PostScript base font name, as written into the font dictionary.
    pub fn base_font(self) -> &'static str {
        match self {
            FontFace::Helvetica => "Helvetica",
            FontFace::HelveticaBold => "Helvetica-Bold",
        }
    }

    /// Resource name the content stream refers to.
    pub fn resource_name(self) -> &'static str {
        match self {
            FontFace::Helvetica => "F1",
            FontFace::HelveticaBold => "F2",
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Metric table
// ────────────────────────────────────────────────────────────────────────────

/// Width slot layout:
/// ```text
/// [0]=sp  [1]=!   [2]="   [3]=#   [4]=$   [5]=%   [6]=&   [7]='
/// [8]=(   [9]=)   [10]=*  [11]=+  [12]=,  [13]=-  [14]=.  [15]=/
/// [16..25]=0-9
/// [26]=:  [27]=;  [28]=<  [29]==  [30]=>  [31]=?  [32]=@
/// [33..58]=A-Z
/// [59]=[  [60]=\  [61]=]  [62]=^  [63]=_  [64]=`
/// [65..90]=a-z
/// [91]={  [92]=|  [93]=}  [94]=~
/// ```
pub struct FontMetricTable {
    widths: [u16; 95],
    pub average_char_width: u16,
}

impl FontMetricTable {
    fn char_units(&self, c: char) -> u16 {
        let code = c as usize;
        if (32..=126).contains(&code) {
            self.widths[code - 32]
        } else {
            self.average_char_width
        }
    }

    /// Rendered width of `s` in points at `size_pt`.
    pub fn measure(&self, s: &str, size_pt: f32) -> f32 {
        let units: u32 = s.chars().map(|c| u32::from(self.char_units(c))).sum();
        units as f32 * size_pt / 1000.0
    }

    /// Splits `text` into lines no wider than `max_width` points.
    ///
    /// Explicit newlines always start a new line. Within a paragraph words are
    /// packed greedily, and a single word wider than the line is broken
    /// between characters. An empty paragraph still yields one (empty) line.
    pub fn split_to_width(&self, text: &str, size_pt: f32, max_width: f32) -> Vec<String> {
        let space_w = self.measure(" ", size_pt);
        let mut lines = Vec::new();

        for paragraph in text.split('\n') {
            let paragraph = paragraph.trim_end_matches('\r');
            let mut current = String::new();
            let mut current_w = 0.0_f32;

            for word in paragraph.split_whitespace() {
                let word_w = self.measure(word, size_pt);

                if current.is_empty() {
                    if word_w <= max_width {
                        current.push_str(word);
                        current_w = word_w;
                    } else {
                        let (mut pieces, tail) = self.break_word(word, size_pt, max_width);
                        lines.append(&mut pieces);
                        current_w = self.measure(&tail, size_pt);
                        current = tail;
                    }
                } else if current_w + space_w + word_w <= max_width {
                    current.push(' ');
                    current.push_str(word);
                    current_w += space_w + word_w;
                } else {
                    lines.push(std::mem::take(&mut current));
                    if word_w <= max_width {
                        current.push_str(word);
                        current_w = word_w;
                    } else {
                        let (mut pieces, tail) = self.break_word(word, size_pt, max_width);
                        lines.append(&mut pieces);
                        current_w = self.measure(&tail, size_pt);
                        current = tail;
                    }
                }
            }
            lines.push(current);
        }
        lines
    }

    /// Hard-breaks an over-long word. Returns the full-width pieces and the
    /// remainder that stays open for the next word.
    fn break_word(&self, word: &str, size_pt: f32, max_width: f32) -> (Vec<String>, String) {
        let mut pieces = Vec::new();
        let mut current = String::new();
        let mut current_w = 0.0_f32;

        for c in word.chars() {
            let c_w = self.measure(c.encode_utf8(&mut [0u8; 4]), size_pt);
            // A line always takes at least one character.
            if !current.is_empty() && current_w + c_w > max_width {
                pieces.push(std::mem::take(&mut current));
                current_w = 0.0;
            }
            current.push(c);
            current_w += c_w;
        }
        (pieces, current)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Static width tables
// ────────────────────────────────────────────────────────────────────────────

static HELVETICA_TABLE: FontMetricTable = FontMetricTable {
    #[rustfmt::skip]
    widths: [
        // sp   !    "    #    $    %    &    '    (    )    *    +    ,    -    .    /
        278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
        // 0    1    2    3    4    5    6    7    8    9
        556, 556, 556, 556, 556, 556, 556, 556, 556, 556,
        // :    ;    <    =    >    ?    @
        278, 278, 584, 584, 584, 556, 1015,
        // A    B    C    D    E    F    G    H    I    J    K    L    M
        667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833,
        // N    O    P    Q    R    S    T    U    V    W    X    Y    Z
        722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611,
        // [    \    ]    ^    _    `
        278, 278, 278, 469, 556, 333,
        // a    b    c    d    e    f    g    h    i    j    k    l    m
        556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833,
        // n    o    p    q    r    s    t    u    v    w    x    y    z
        556, 556, 556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500,
        // {    |    }    ~
        334, 260, 334, 584,
    ],
    average_char_width: 556,
};

static HELVETICA_BOLD_TABLE: FontMetricTable = FontMetricTable {
    #[rustfmt::skip]
    widths: [
        // sp   !    "    #    $    %    &    '    (    )    *    +    ,    -    .    /
        278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
        // 0    1    2    3    4    5    6    7    8    9
        556, 556, 556, 556, 556, 556, 556, 556, 556, 556,
        // :    ;    <    =    >    ?    @
        333, 333, 584, 584, 584, 611, 975,
        // A    B    C    D    E    F    G    H    I    J    K    L    M
        722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833,
        // N    O    P    Q    R    S    T    U    V    W    X    Y    Z
        722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611,
        // [    \    ]    ^    _    `
        333, 278, 333, 584, 556, 333,
        // a    b    c    d    e    f    g    h    i    j    k    l    m
        556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889,
        // n    o    p    q    r    s    t    u    v    w    x    y    z
        611, 611, 611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500,
        // {    |    }    ~
        389, 280, 389, 584,
    ],
    average_char_width: 611,
};

pub fn get_metrics(face: FontFace) -> &'static FontMetricTable {
    match face {
        FontFace::Helvetica => &HELVETICA_TABLE,
        FontFace::HelveticaBold => &HELVETICA_BOLD_TABLE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn regular() -> &'static FontMetricTable {
        get_metrics(FontFace::Helvetica)
    }

    #[test]
    fn test_measure_empty_is_zero() {
        assert_eq!(regular().measure("", 14.0), 0.0);
    }

    #[test]
    fn test_measure_scales_with_size() {
        // "Rust" = R(722) + u(556) + s(500) + t(278) = 2056 units
        let w = regular().measure("Rust", 10.0);
        assert!((w - 20.56).abs() < 1e-3, "got {w}");
        let w = regular().measure("Rust", 20.0);
        assert!((w - 41.12).abs() < 1e-3, "got {w}");
    }

    #[test]
    fn test_bold_is_wider_than_regular() {
        let text = "Resume Details";
        assert!(
            get_metrics(FontFace::HelveticaBold).measure(text, 24.0)
                > regular().measure(text, 24.0)
        );
    }

    #[test]
    fn test_non_ascii_uses_average_width() {
        let w = regular().measure("é", 1000.0);
        assert!((w - 556.0).abs() < 1e-3);
    }

    #[test]
    fn test_short_text_stays_on_one_line() {
        assert_eq!(
            regular().split_to_width("Built things", 14.0, 395.28),
            vec!["Built things".to_string()]
        );
    }

    #[test]
    fn test_empty_text_is_one_empty_line() {
        assert_eq!(regular().split_to_width("", 14.0, 100.0), vec![String::new()]);
    }

    #[test]
    fn test_long_text_wraps_and_lines_fit() {
        let text = "Frontend Developer with 3 years of experience in creating responsive \
                    and user-friendly web interfaces using HTML, CSS, and JavaScript.";
        let lines = regular().split_to_width(text, 14.0, 200.0);
        assert!(lines.len() > 1, "expected wrapping, got {lines:?}");
        for line in &lines {
            assert!(regular().measure(line, 14.0) <= 200.0, "line too wide: {line}");
        }
        assert_eq!(lines.join(" "), text.split_whitespace().collect::<Vec<_>>().join(" "));
    }

    #[test]
    fn test_newlines_force_breaks() {
        let lines = regular().split_to_width("one\ntwo\n\nthree", 14.0, 400.0);
        assert_eq!(lines, vec!["one", "two", "", "three"]);
    }

    #[test]
    fn test_overlong_word_is_broken_between_characters() {
        let word = "x".repeat(100);
        let lines = regular().split_to_width(&word, 10.0, 50.0);
        assert!(lines.len() > 1);
        assert_eq!(lines.concat(), word);
        for line in &lines {
            assert!(regular().measure(line, 10.0) <= 50.0);
        }
    }

    #[test]
    fn test_overlong_word_tail_shares_line_with_next_word() {
        // x = 500 units; at 10pt each x is 5pt wide; 12 x's = 60pt > 50pt.
        let lines = regular().split_to_width("xxxxxxxxxxxx a", 10.0, 50.0);
        assert_eq!(lines, vec!["xxxxxxxxxx", "xx a"]);
    }
}
