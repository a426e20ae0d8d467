//! URL-safe slugs derived from human readable names.

/// Derive a slug from `name`.
///
/// The result is lowercase ASCII with runs of whitespace and punctuation
/// collapsed into a single `-`. Applying it to its own output yields the same
/// value. Slugs are not unique: two names may map onto the same slug.
pub fn slugify(name: &str) -> String {
    ::slug::slugify(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lowercases_and_joins_words() {
        assert_eq!(slugify("Rust Tips"), "rust-tips");
    }

    #[test]
    fn collapses_whitespace_and_punctuation() {
        assert_eq!(slugify("  Hello,   World!  "), "hello-world");
    }

    #[test]
    fn transliterates_to_ascii() {
        assert_eq!(slugify("Café Crème"), "cafe-creme");
    }

    #[test]
    fn is_deterministic() {
        let name = "Tea & Coffee";
        assert_eq!(slugify(name), slugify(name));
    }

    #[test]
    fn is_idempotent() {
        for name in ["Apple", "Mango Season", "Zebra / Stripes", "Café Crème"] {
            let once = slugify(name);
            assert_eq!(slugify(&once), once);
        }
    }

    #[test]
    fn output_is_url_safe() {
        let slug = slugify("Ünïcödé   -- Name?!");
        assert!(
            slug.chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
        );
        assert!(!slug.starts_with('-'));
        assert!(!slug.ends_with('-'));
    }
}
