//! External reference-document addresses
//!
//! Each coded measure maps to a page in the published Klimakur material.
//! The address is a pure string transform of code, category and title; the
//! target document is not under our control.

use crate::measure::{Category, MeasureRecord};

/// Default base address for measure documents
pub const DEFAULT_DOCUMENT_BASE: &str = "https://www.miljodirektoratet.no/klimakur/tiltak";

/// Lowercase ASCII slug: Norwegian letters transliterated, other
/// diacritics stripped, runs of anything else collapsed to a single `-`.
#[must_use]
pub fn slugify(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut pending_dash = false;

    for c in text.chars().flat_map(char::to_lowercase) {
        let Some(folded) = fold_char(c) else {
            pending_dash = !out.is_empty();
            continue;
        };
        if pending_dash {
            out.push('-');
            pending_dash = false;
        }
        match folded {
            Folded::Char(ch) => out.push(ch),
            Folded::Str(s) => out.push_str(s),
        }
    }

    out
}

enum Folded {
    Char(char),
    Str(&'static str),
}

/// ASCII replacement for a lowercase character; `None` for separators
fn fold_char(c: char) -> Option<Folded> {
    let folded = match c {
        'a'..='z' | '0'..='9' => Folded::Char(c),
        'æ' => Folded::Str("ae"),
        'ß' => Folded::Str("ss"),
        'ø' | 'ò' | 'ó' | 'ô' | 'õ' | 'ö' => Folded::Char('o'),
        'å' | 'à' | 'á' | 'â' | 'ã' | 'ä' => Folded::Char('a'),
        'è' | 'é' | 'ê' | 'ë' => Folded::Char('e'),
        'ì' | 'í' | 'î' | 'ï' => Folded::Char('i'),
        'ù' | 'ú' | 'û' | 'ü' => Folded::Char('u'),
        'ç' => Folded::Char('c'),
        'ñ' => Folded::Char('n'),
        'ý' | 'ÿ' => Folded::Char('y'),
        '₂' => Folded::Char('2'),
        _ => return None,
    };
    Some(folded)
}

/// Path segment for a category
#[must_use]
pub fn category_slug(category: Category) -> String {
    slugify(category.label())
}

/// Document address for a measure, `None` for rows without a code
///
/// Format: `{base}/{category}/{code}-{title-slug}`, code lowercased.
#[must_use]
pub fn document_url(base: &str, measure: &MeasureRecord) -> Option<String> {
    let id = measure.id()?;
    let name = slugify(measure.name());
    let code = id.as_str().to_ascii_lowercase();
    let page = if name.is_empty() { code } else { format!("{code}-{name}") };

    Some(format!(
        "{}/{}/{}",
        base.trim_end_matches('/'),
        category_slug(measure.category()),
        page
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::measure::UnitCost;
    use proptest::prelude::*;

    #[test]
    fn slug_transliterates_norwegian_letters() {
        assert_eq!(slugify("Sjøfart/fiske/havbruk"), "sjofart-fiske-havbruk");
        assert_eq!(slugify("Økt gjenvinning på land"), "okt-gjenvinning-pa-land");
        assert_eq!(slugify("Særavgift"), "saeravgift");
    }

    #[test]
    fn slug_collapses_and_trims_separators() {
        assert_eq!(slugify("  100% av nye  -- busser!  "), "100-av-nye-busser");
        assert_eq!(slugify("(Hydrogen/Plug-in)"), "hydrogen-plug-in");
        assert_eq!(slugify("Café"), "cafe");
        assert_eq!(slugify("CO₂"), "co2");
    }

    #[test]
    fn document_url_for_coded_measure() {
        let m = MeasureRecord::new("S04 Landstrøm", Category::Maritime, 830.0, UnitCost::Known(1500.0)).unwrap();
        assert_eq!(
            document_url("https://example.org/docs/", &m).as_deref(),
            Some("https://example.org/docs/sjofart-fiske-havbruk/s04-landstrom")
        );
    }

    #[test]
    fn document_url_is_deterministic() {
        let m = MeasureRecord::new("T01 Nullvekstmål", Category::RoadTransport, 760.0, UnitCost::Known(1500.0)).unwrap();
        assert_eq!(document_url(DEFAULT_DOCUMENT_BASE, &m), document_url(DEFAULT_DOCUMENT_BASE, &m));
    }

    #[test]
    fn no_document_without_code() {
        let m = MeasureRecord::new("Diverse nulltiltak", Category::Other, 3900.0, UnitCost::Known(0.0)).unwrap();
        assert!(document_url(DEFAULT_DOCUMENT_BASE, &m).is_none());
    }

    #[test]
    fn document_url_with_padded_title() {
        let m = MeasureRecord::new("\u{a0}S04 Landstrøm", Category::Maritime, 830.0, UnitCost::Known(1500.0)).unwrap();
        assert_eq!(
            document_url("https://example.org/docs", &m).as_deref(),
            Some("https://example.org/docs/sjofart-fiske-havbruk/s04-landstrom")
        );
    }

    proptest! {
        #[test]
        fn slug_is_lowercase_ascii_without_edge_dashes(text in "\\PC{0,40}") {
            let slug = slugify(&text);
            prop_assert!(slug.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-'));
            prop_assert!(!slug.starts_with('-'));
            prop_assert!(!slug.ends_with('-'));
            prop_assert!(!slug.contains("--"));
        }
    }
}
