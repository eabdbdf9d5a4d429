use itertools::Itertools;

use crate::constants::CITY_ALIASES;

/// Canonical comparison form of a free-text city name: the first comma
/// segment (everything after it is a country/region qualifier), trimmed,
/// lowercased, internal whitespace runs collapsed to single spaces.
pub fn normalize(input: &str) -> String {
    trim_qualifiers(input)
        .to_lowercase()
        .split_whitespace()
        .join(" ")
}

/// Whether two free-text city names refer to the same city.
pub fn equal(a: &str, b: &str) -> bool {
    normalize(a) == normalize(b)
}

/// The canonical display form of a city name. Known spellings and
/// transliterations resolve through the alias table, unknown cities pass
/// through unchanged apart from the dropped qualifier.
pub fn standardize(input: &str) -> String {
    match CITY_ALIASES.get(normalize(input).as_str()) {
        Some(canonical) => (*canonical).to_owned(),
        None => trim_qualifiers(input).to_owned(),
    }
}

fn trim_qualifiers(input: &str) -> &str {
    input.split(',').next().unwrap_or_default().trim()
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_normalize_drops_qualifiers_case_and_whitespace() {
        assert_eq!(normalize("Ташкент, Узбекистан"), normalize("ташкент"));
        assert_eq!(normalize("  Нукус  "), "нукус");
        assert_eq!(normalize("Yangi   Bozor"), "yangi bozor");
        assert_eq!(normalize(""), "");
    }

    #[test]
    fn test_equal_is_insensitive_to_qualifiers_and_case() {
        assert!(equal("Самарканд, Узбекистан", "самарканд"));
        assert!(equal("ТАШКЕНТ", "ташкент"));
        assert!(!equal("Ташкент", "Самарканд"));
    }

    #[test]
    fn test_standardize_resolves_aliases() {
        assert_eq!(standardize("tashkent"), "Ташкент");
        assert_eq!(standardize("Toshkent, O'zbekiston"), "Ташкент");
        assert_eq!(standardize("БУХАРА"), "Бухара");
    }

    #[test]
    fn test_standardize_passes_unknown_cities_through() {
        assert_eq!(standardize("Unknown City"), "Unknown City");
        assert_eq!(standardize("Unknown City, Uzbekistan"), "Unknown City");
        assert_eq!(standardize(""), "");
    }
}
