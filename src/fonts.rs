/// Standard 14 fonts used by the summary. Neither is embedded; viewers supply them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Font {
    Helvetica,
    HelveticaBold,
}

impl Font {
    pub const ALL: [Font; 2] = [Font::Helvetica, Font::HelveticaBold];

    /// Resource name used in content streams.
    pub fn pdf_name(self) -> &'static str {
        match self {
            Font::Helvetica => "F1",
            Font::HelveticaBold => "F2",
        }
    }

    pub fn base_font(self) -> &'static str {
        match self {
            Font::Helvetica => "Helvetica",
            Font::HelveticaBold => "Helvetica-Bold",
        }
    }

    /// Advance width in 1000-units of a WinAnsi byte.
    fn width_1000(self, byte: u8) -> f32 {
        let table = match self {
            Font::Helvetica => &HELVETICA_ASCII,
            Font::HelveticaBold => &HELVETICA_BOLD_ASCII,
        };
        match byte {
            32..=126 => table[(byte - 32) as usize] as f32,
            0x95 => 350.0, // bullet
            0x96 => 556.0,
            0x97 => 1000.0,
            0x85 => 1000.0,
            0x91 | 0x92 => match self {
                Font::Helvetica => 222.0,
                Font::HelveticaBold => 278.0,
            },
            0x93 | 0x94 => match self {
                Font::Helvetica => 333.0,
                Font::HelveticaBold => 500.0,
            },
            _ => 556.0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FontSpec {
    pub font: Font,
    pub size: f32,
}

impl FontSpec {
    pub fn new(font: Font, size: f32) -> Self {
        FontSpec { font, size }
    }
}

/// Helvetica AFM widths for ASCII 32..=126.
#[rustfmt::skip]
const HELVETICA_ASCII: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556,
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556,
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556,
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584,
];

/// Helvetica-Bold AFM widths for ASCII 32..=126.
#[rustfmt::skip]
const HELVETICA_BOLD_ASCII: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611,
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556,
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611,
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584,
];

/// Map a single Unicode char to its WinAnsi byte, or 0 if unmappable.
pub(crate) fn char_to_winansi(c: char) -> u8 {
    match c as u32 {
        0x0020..=0x007E => c as u8,
        0x00A0..=0x00FF => c as u8,
        0x20AC => 0x80,
        0x201A => 0x82,
        0x0192 => 0x83,
        0x201E => 0x84,
        0x2026 => 0x85,
        0x2020 => 0x86,
        0x2021 => 0x87,
        0x02C6 => 0x88,
        0x2030 => 0x89,
        0x0160 => 0x8A,
        0x2039 => 0x8B,
        0x0152 => 0x8C,
        0x017D => 0x8E,
        0x2018 => 0x91,
        0x2019 => 0x92,
        0x201C => 0x93,
        0x201D => 0x94,
        0x2022 => 0x95,
        0x2013 => 0x96,
        0x2014 => 0x97,
        0x02DC => 0x98,
        0x2122 => 0x99,
        0x0161 => 0x9A,
        0x203A => 0x9B,
        0x0153 => 0x9C,
        0x017E => 0x9E,
        0x0178 => 0x9F,
        _ => 0,
    }
}

/// Convert a UTF-8 string to WinAnsi (Windows-1252) bytes for PDF Str encoding.
/// Unmappable characters are dropped, matching what `text_width` measures.
pub(crate) fn to_winansi_bytes(s: &str) -> Vec<u8> {
    s.chars()
        .map(char_to_winansi)
        .filter(|&b| b != 0)
        .collect()
}

pub fn text_width(text: &str, spec: FontSpec) -> f32 {
    text.chars()
        .map(char_to_winansi)
        .filter(|&b| b != 0)
        .map(|b| spec.font.width_1000(b) * spec.size / 1000.0)
        .sum()
}

/// One wrapped line and its measured width in points.
#[derive(Clone, Debug, PartialEq)]
pub struct Line {
    pub text: String,
    pub width: f32,
}

/// Wrap `text` into lines no wider than `max_width`.
///
/// Breaks at whitespace; explicit newlines always break. A word that cannot
/// fit on a line by itself is split at character boundaries, keeping at least
/// one character per line so the loop always advances. Empty text produces a
/// single empty line.
pub fn wrap(text: &str, max_width: f32, spec: FontSpec) -> Vec<Line> {
    let space_w = text_width(" ", spec);
    let mut lines: Vec<Line> = Vec::new();

    for paragraph in text.split('\n') {
        let paragraph = paragraph.trim_end_matches('\r');
        let mut current = String::new();
        let mut current_w: f32 = 0.0;

        for word in paragraph.split_whitespace() {
            let word_w = text_width(word, spec);
            let proposed = if current.is_empty() {
                word_w
            } else {
                current_w + space_w + word_w
            };

            if proposed <= max_width {
                if !current.is_empty() {
                    current.push(' ');
                }
                current.push_str(word);
                current_w = proposed;
                continue;
            }

            if !current.is_empty() {
                lines.push(Line {
                    text: std::mem::take(&mut current),
                    width: current_w,
                });
                current_w = 0.0;
            }

            if word_w <= max_width {
                current.push_str(word);
                current_w = word_w;
            } else {
                let mut pieces = hard_break(word, max_width, spec);
                // The last piece stays open so following words can join it.
                if let Some(last) = pieces.pop() {
                    lines.extend(pieces);
                    current_w = last.width;
                    current = last.text;
                }
            }
        }

        lines.push(Line {
            text: current,
            width: current_w,
        });
    }

    lines
}

fn hard_break(word: &str, max_width: f32, spec: FontSpec) -> Vec<Line> {
    let mut pieces = Vec::new();
    let mut piece = String::new();
    let mut piece_w: f32 = 0.0;
    for ch in word.chars() {
        let ch_w = text_width(ch.encode_utf8(&mut [0; 4]), spec);
        if !piece.is_empty() && piece_w + ch_w > max_width {
            pieces.push(Line {
                text: std::mem::take(&mut piece),
                width: piece_w,
            });
            piece_w = 0.0;
        }
        piece.push(ch);
        piece_w += ch_w;
    }
    if !piece.is_empty() {
        pieces.push(Line {
            text: piece,
            width: piece_w,
        });
    }
    pieces
}
