//! Static glyph-width tables for the standard PDF fonts the layout uses.
//!
//! Widths come from the Adobe core-14 AFM files, in thousandths of an em.
//! They are only needed for two things: centring title lines and sizing link
//! hit-boxes to the drawn URL. Body wrapping is column-based and never
//! consults these tables.
//!
//! Tables cover ASCII 0x20..=0x7E (95 printable characters).
//! Index = (char as usize) - 32.

use crate::output::Font;
use crate::pipeline::normalize::RATING_STAR;

/// Width of the ZapfDingbats black star (glyph `a35`).
const DINGBAT_STAR_WIDTH: u16 = 816;

/// Fallback for characters outside the table.
const AVERAGE_WIDTH: u16 = 556;

#[rustfmt::skip]
static HELVETICA: [u16; 95] = [
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
];

#[rustfmt::skip]
static HELVETICA_BOLD: [u16; 95] = [
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
];

/// Width of `text` in points when set in `font` at `size`.
pub fn text_width(text: &str, font: Font, size: f32) -> f32 {
    let units: u32 = text.chars().map(|c| glyph_width(c, font) as u32).sum();
    units as f32 * size / 1000.0
}

fn glyph_width(c: char, font: Font) -> u16 {
    let table = match font {
        Font::Helvetica | Font::HelveticaOblique => &HELVETICA,
        Font::HelveticaBold => &HELVETICA_BOLD,
        Font::ZapfDingbats => {
            return if c == RATING_STAR {
                DINGBAT_STAR_WIDTH
            } else {
                // Spaces between stars.
                278
            };
        }
    };
    let code = c as usize;
    if (32..=126).contains(&code) {
        table[code - 32]
    } else {
        AVERAGE_WIDTH
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_widths() {
        // "Hi" = H(722) + i(222) in Helvetica.
        assert!((text_width("Hi", Font::Helvetica, 10.0) - 9.44).abs() < 1e-4);
        // Bold is wider.
        assert!(
            text_width("Travel Plan", Font::HelveticaBold, 24.0)
                > text_width("Travel Plan", Font::Helvetica, 24.0)
        );
    }

    #[test]
    fn oblique_shares_regular_metrics() {
        assert_eq!(
            text_width("Italian", Font::HelveticaOblique, 12.0),
            text_width("Italian", Font::Helvetica, 12.0)
        );
    }

    #[test]
    fn stars_use_dingbat_width() {
        let w = text_width("★★★", Font::ZapfDingbats, 12.0);
        assert!((w - 3.0 * 0.816 * 12.0).abs() < 1e-3);
    }

    #[test]
    fn empty_is_zero() {
        assert_eq!(text_width("", Font::HelveticaBold, 20.0), 0.0);
    }
}
