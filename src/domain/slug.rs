//! Slug derivation for event titles.
//!
//! A slug is the URL-safe, lowercase, hyphenated identifier derived from an
//! event title. Derivation is pure and deterministic: the same title always
//! produces the same slug, and slug uniqueness across events is enforced by
//! the store, not here.

/// Derives a slug from an event title.
///
/// Folds common Latin diacritics to their base letter, lowercases, and
/// collapses every run of non-alphanumeric characters into a single hyphen.
/// Leading and trailing separators are dropped.
#[must_use]
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut pending_hyphen = false;

    for ch in title.chars().map(fold_diacritic) {
        let ch = ch.to_ascii_lowercase();
        if ch.is_ascii_alphanumeric() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.push(ch);
        } else {
            pending_hyphen = true;
        }
    }

    slug
}

/// Maps accented Latin letters to their unaccented base letter.
///
/// Characters outside the table pass through unchanged; anything that is
/// still not ASCII-alphanumeric afterwards is treated as a separator by
/// [`slugify`].
const fn fold_diacritic(ch: char) -> char {
    match ch {
        'à'..='å' | 'À'..='Å' => 'a',
        'è'..='ë' | 'È'..='Ë' => 'e',
        'ì'..='ï' | 'Ì'..='Ï' => 'i',
        'ò'..='ö' | 'Ò'..='Ö' => 'o',
        'ù'..='ü' | 'Ù'..='Ü' => 'u',
        'ç' | 'Ç' => 'c',
        'ñ' | 'Ñ' => 'n',
        'ý' | 'ÿ' | 'Ý' => 'y',
        _ => ch,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lowercases_and_hyphenates() {
        assert_eq!(slugify("Rust Meetup Lisbon"), "rust-meetup-lisbon");
    }

    #[test]
    fn folds_diacritics() {
        assert_eq!(slugify("Reunião Técnica"), "reuniao-tecnica");
        assert_eq!(slugify("Çà et là"), "ca-et-la");
    }

    #[test]
    fn collapses_punctuation_runs() {
        assert_eq!(slugify("Rust -- & --- Friends!"), "rust-friends");
    }

    #[test]
    fn trims_leading_and_trailing_separators() {
        assert_eq!(slugify("  spaced out  "), "spaced-out");
        assert_eq!(slugify("...dots..."), "dots");
    }

    #[test]
    fn keeps_digits() {
        assert_eq!(slugify("RustConf 2024"), "rustconf-2024");
    }

    #[test]
    fn is_deterministic() {
        assert_eq!(slugify("Unite Summit"), slugify("Unite Summit"));
    }

    #[test]
    fn symbol_only_title_yields_empty_slug() {
        assert_eq!(slugify("!!!!"), "");
    }
}
