//! Text measurement against the Helvetica metrics built into every PDF viewer.

use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Glyph space units per em
const UNITS_PER_EM: f64 = 1000.0;

/// Width used for any character missing from the table
pub const DEFAULT_WIDTH: u16 = 556;

/// Bullet glyph drawn in front of list items
pub const BULLET: char = '\u{2022}';

/// Helvetica advance widths for printable ASCII, starting at the space (32).
#[rustfmt::skip]
const ASCII_WIDTHS: [u16; 95] = [
    // space ! " # $ % & ' ( ) * + , - . /
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    // 0 - 9
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556,
    // : ; < = > ? @
    278, 278, 584, 584, 584, 556, 1015,
    // A - Z
    667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833,
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611,
    // [ \ ] ^ _ `
    278, 278, 278, 469, 556, 333,
    // a - z
    556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833,
    556, 556, 556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500,
    // { | } ~
    334, 260, 334, 584,
];

/// Helvetica widths for 0xA0..=0xFF, where WinAnsi agrees with Latin-1.
#[rustfmt::skip]
const LATIN1_WIDTHS: [u16; 96] = [
    // nbsp ¡ ¢ £ ¤ ¥ ¦ § ¨ © ª « ¬ shy ® ¯
    278, 333, 556, 556, 556, 556, 260, 556, 333, 737, 370, 556, 584, 333, 737, 333,
    // ° ± ² ³ ´ µ ¶ · ¸ ¹ º » ¼ ½ ¾ ¿
    400, 584, 333, 333, 333, 556, 537, 278, 333, 333, 365, 556, 834, 834, 834, 611,
    // À - Ï
    667, 667, 667, 667, 667, 667, 1000, 722, 667, 667, 667, 667, 278, 278, 278, 278,
    // Ð - ß
    722, 722, 778, 778, 778, 778, 778, 584, 778, 722, 722, 722, 722, 667, 667, 611,
    // à - ï
    556, 556, 556, 556, 556, 556, 889, 500, 556, 556, 556, 556, 278, 278, 278, 278,
    // ð - ÿ
    556, 556, 556, 556, 556, 556, 556, 584, 611, 556, 556, 556, 556, 500, 556, 500,
];

/// WinAnsi codes 0x80..=0x9F: character, code, Helvetica width.
#[rustfmt::skip]
const WIN_ANSI_SPECIALS: [(char, u8, u16); 27] = [
    ('\u{20ac}', 0x80, 556),  // €
    ('\u{201a}', 0x82, 222),  // ‚
    ('\u{0192}', 0x83, 556),  // ƒ
    ('\u{201e}', 0x84, 333),  // „
    ('\u{2026}', 0x85, 1000), // …
    ('\u{2020}', 0x86, 556),  // †
    ('\u{2021}', 0x87, 556),  // ‡
    ('\u{02c6}', 0x88, 333),  // ˆ
    ('\u{2030}', 0x89, 1000), // ‰
    ('\u{0160}', 0x8a, 667),  // Š
    ('\u{2039}', 0x8b, 333),  // ‹
    ('\u{0152}', 0x8c, 1000), // Œ
    ('\u{017d}', 0x8e, 611),  // Ž
    ('\u{2018}', 0x91, 222),  // ‘
    ('\u{2019}', 0x92, 222),  // ’
    ('\u{201c}', 0x93, 333),  // “
    ('\u{201d}', 0x94, 333),  // ”
    (BULLET,      0x95, 350),  // •
    ('\u{2013}', 0x96, 556),  // –
    ('\u{2014}', 0x97, 1000), // —
    ('\u{02dc}', 0x98, 333),  // ˜
    ('\u{2122}', 0x99, 1000), // ™
    ('\u{0161}', 0x9a, 500),  // š
    ('\u{203a}', 0x9b, 333),  // ›
    ('\u{0153}', 0x9c, 944),  // œ
    ('\u{017e}', 0x9e, 500),  // ž
    ('\u{0178}', 0x9f, 667),  // Ÿ
];

fn special(c: char) -> Option<&'static (char, u8, u16)> {
    WIN_ANSI_SPECIALS.iter().find(|(ch, ..)| *ch == c)
}

/// Byte `c` is written as under WinAnsiEncoding, if the encoding has it.
pub fn win_ansi_code(c: char) -> Option<u8> {
    match c {
        ' '..='~' | '\u{a0}'..='\u{ff}' => Some(c as u8),
        _ => special(c).map(|(_, code, _)| *code),
    }
}

/// Advance width of `c` in glyph space units. Never fails.
pub fn glyph_width(c: char) -> u16 {
    match c {
        ' '..='~' => ASCII_WIDTHS[c as usize - ' ' as usize],
        '\u{a0}'..='\u{ff}' => LATIN1_WIDTHS[c as usize - 0xa0],
        _ => special(c).map_or(DEFAULT_WIDTH, |(_, _, width)| *width),
    }
}

fn units(s: &str) -> u64 {
    s.chars().map(|c| u64::from(glyph_width(c))).sum()
}

fn to_points(units: u64, font_size: f64) -> f64 {
    units as f64 * font_size / UNITS_PER_EM
}

/// Rendered width of `s` in points at `font_size`.
pub fn measure(s: &str, font_size: f64) -> f64 {
    to_points(units(s), font_size)
}

/// Greedily break `s` at whitespace into lines no wider than `max_width`.
///
/// Whitespace runs collapse to single spaces. A word that does not fit on a
/// line by itself gets a line of its own rather than being split or dropped.
pub fn wrap(s: &str, max_width: f64, font_size: f64) -> Vec<String> {
    let space = u64::from(glyph_width(' '));
    let mut lines = Vec::new();
    let mut line = String::new();
    let mut line_units = 0;

    for word in s.split_whitespace() {
        let word_units = units(word);
        if line.is_empty() {
            line.push_str(word);
            line_units = word_units;
            continue;
        }

        let candidate = line_units + space + word_units;
        if to_points(candidate, font_size) <= max_width {
            line.push(' ');
            line.push_str(word);
            line_units = candidate;
        } else {
            lines.push(std::mem::take(&mut line));
            line.push_str(word);
            line_units = word_units;
        }
    }

    if !line.is_empty() {
        lines.push(line);
    }
    lines
}

/// Compatibility-decompose `s` and strip combining marks, folding accented
/// Latin letters and ligatures onto their base characters.
pub fn normalize(s: &str) -> String {
    s.nfkd().filter(|c| !is_combining_mark(*c)).collect()
}
