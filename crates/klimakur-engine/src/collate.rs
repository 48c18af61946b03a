//! Norwegian string collation for title and category sorting
//!
//! Three levels, compared in turn:
//! 1. base letters: separators < digits < a-z < æ < ø < å, with ä/ö sorting
//!    as æ/ø and other diacritics folded onto their base letter
//! 2. accents: unaccented before accented
//! 3. case: lowercase before uppercase
//!
//! Strings equal on all three levels fall back to code-point order so the
//! comparison is total.

use std::cmp::Ordering;

const SEPARATOR: u8 = 0;
const DIGIT: u8 = 1;
const LETTER: u8 = 2;

/// Primary weight: (class, position within class)
type Primary = (u8, u32);

/// Compare two strings in Norwegian (bokmål) order
#[must_use]
pub fn compare_nb(a: &str, b: &str) -> Ordering {
    primary_keys(a)
        .cmp(primary_keys(b))
        .then_with(|| accent_keys(a).cmp(accent_keys(b)))
        .then_with(|| case_keys(a).cmp(case_keys(b)))
        .then_with(|| a.cmp(b))
}

fn primary_keys(s: &str) -> impl Iterator<Item = Primary> + '_ {
    s.chars().map(|c| weigh(c).0)
}

fn accent_keys(s: &str) -> impl Iterator<Item = bool> + '_ {
    s.chars().map(|c| weigh(c).1)
}

fn case_keys(s: &str) -> impl Iterator<Item = bool> + '_ {
    s.chars().map(char::is_uppercase)
}

/// Primary weight and whether the character carries an accent
fn weigh(c: char) -> (Primary, bool) {
    let lower = c.to_lowercase().next().unwrap_or(c);
    let (base, accented) = match lower {
        'ä' => ('æ', true),
        'ö' => ('ø', true),
        'à' | 'á' | 'â' | 'ã' => ('a', true),
        'è' | 'é' | 'ê' | 'ë' => ('e', true),
        'ì' | 'í' | 'î' | 'ï' => ('i', true),
        'ò' | 'ó' | 'ô' | 'õ' => ('o', true),
        'ù' | 'ú' | 'û' | 'ü' => ('u', true),
        'ç' => ('c', true),
        'ñ' => ('n', true),
        'ý' | 'ÿ' => ('y', true),
        other => (other, false),
    };

    let primary = match base {
        'a'..='z' => (LETTER, base as u32 - 'a' as u32),
        'æ' => (LETTER, 26),
        'ø' => (LETTER, 27),
        'å' => (LETTER, 28),
        '0'..='9' => (DIGIT, base as u32 - '0' as u32),
        c if c.is_whitespace() => (SEPARATOR, 0),
        c if c.is_alphabetic() => (LETTER, 29 + c as u32),
        c => (SEPARATOR, 1 + c as u32),
    };

    (primary, accented)
}
