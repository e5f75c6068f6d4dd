//! Text normalisation helpers.
//!
//! `sanitize()` output doubles as a map key and a CSV field so it has to stay
//! free of commas and quotes.  `slugify()` output is used for filenames and
//! event identifiers.
//!

/// Remove every comma and double quote, trim surrounding whitespace.
///
/// Idempotent: `sanitize(sanitize(x)) == sanitize(x)`.
///
pub fn sanitize(text: &str) -> String {
    text.chars()
        .filter(|c| *c != ',' && *c != '"')
        .collect::<String>()
        .trim()
        .to_string()
}

/// Polish diacritics and their ASCII equivalents, both cases.
///
const DIACRITICS: [(char, char); 18] = [
    ('ą', 'a'),
    ('ć', 'c'),
    ('ę', 'e'),
    ('ł', 'l'),
    ('ń', 'n'),
    ('ó', 'o'),
    ('ś', 's'),
    ('ź', 'z'),
    ('ż', 'z'),
    ('Ą', 'A'),
    ('Ć', 'C'),
    ('Ę', 'E'),
    ('Ł', 'L'),
    ('Ń', 'N'),
    ('Ó', 'O'),
    ('Ś', 'S'),
    ('Ź', 'Z'),
    ('Ż', 'Z'),
];

/// Turn a free-form name into a filesystem/URL-safe token.
///
/// Transliterate the Polish diacritics, lowercase, then collapse every
/// maximal run of characters outside `[a-z0-9]` into a single underscore and
/// trim the ends.  Returns an empty string only when nothing alphanumeric
/// survives transliteration.
///
pub fn slugify(text: &str) -> String {
    let ascii: String = text
        .chars()
        .map(|c| {
            DIACRITICS
                .iter()
                .find(|(from, _)| *from == c)
                .map(|(_, to)| *to)
                .unwrap_or(c)
        })
        .collect();

    let mut slug = String::with_capacity(ascii.len());
    let mut pending_sep = false;
    for c in ascii.to_lowercase().chars() {
        if c.is_ascii_alphanumeric() {
            if pending_sep && !slug.is_empty() {
                slug.push('_');
            }
            pending_sep = false;
            slug.push(c);
        } else {
            pending_sep = true;
        }
    }
    slug
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("Poznań, ul. \"Lwowska\" 4", "Poznań ul. Lwowska 4")]
    #[case("  padded  ", "padded")]
    #[case("", "")]
    #[case("no change", "no change")]
    fn test_sanitize(#[case] inp: &str, #[case] out: &str) {
        assert_eq!(out, sanitize(inp));
    }

    #[rstest]
    #[case("Poznań, ul. Lwowska 4")]
    #[case("\"quoted\", twice,, \"\"")]
    #[case("plain")]
    fn test_sanitize_idempotent(#[case] inp: &str) {
        let once = sanitize(inp);
        assert_eq!(once, sanitize(&once));
    }

    #[rstest]
    #[case("KS Grunwald Poznań", "ks_grunwald_poznan")]
    #[case("Żagań -- Śrem", "zagan_srem")]
    #[case("ŁKS ŁÓDŹ", "lks_lodz")]
    #[case("  --  ", "")]
    #[case("Puchar Wiosny 2026", "puchar_wiosny_2026")]
    fn test_slugify(#[case] inp: &str, #[case] out: &str) {
        assert_eq!(out, slugify(inp));
    }

    #[rstest]
    #[case("Świnoujście (strzelnica) — hala nr 2")]
    #[case("already_a_slug")]
    #[case("***")]
    fn test_slugify_shape(#[case] inp: &str) {
        let re = regex::Regex::new(r"^[a-z0-9]*(_[a-z0-9]+)*$").unwrap();
        let slug = slugify(inp);
        assert!(re.is_match(&slug), "bad slug: {slug}");
        assert!(!slug.contains(|c: char| "ąćęłńóśźż".contains(c)));
    }
}
