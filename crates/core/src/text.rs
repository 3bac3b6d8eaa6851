//! Text helpers for content entities.
//!
//! Slug derivation and reading-time estimation live here so both storage
//! engines and the CLI seeder produce identical values.

/// Derive a URL slug from a title or headline.
///
/// Lowercases, maps runs of non-alphanumeric characters to single hyphens,
/// and trims leading/trailing hyphens. Non-ASCII characters are dropped
/// rather than transliterated.
///
/// # Examples
///
/// ```
/// use stonebridge_core::text::slugify;
///
/// assert_eq!(slugify("Hello World!"), "hello-world");
/// assert_eq!(slugify("  Steel & Glass -- Phase 2  "), "steel-glass-phase-2");
/// ```
#[must_use]
pub fn slugify(input: &str) -> String {
    let mut slug = String::with_capacity(input.len());
    let mut last_was_hyphen = true; // suppress leading hyphen

    for c in input.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
            last_was_hyphen = false;
        } else if !last_was_hyphen {
            slug.push('-');
            last_was_hyphen = true;
        }
    }

    while slug.ends_with('-') {
        slug.pop();
    }

    slug
}

/// Estimate reading time in whole minutes from a body of text.
///
/// Uses the common 200 words-per-minute figure and never reports less
/// than one minute for a non-trivial body.
#[must_use]
pub fn reading_time_minutes(body: &str) -> i32 {
    let words = body.split_whitespace().count();
    let minutes = words.div_ceil(200);
    i32::try_from(minutes.max(1)).unwrap_or(i32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify_basic() {
        assert_eq!(slugify("Hello World!"), "hello-world");
    }

    #[test]
    fn test_slugify_collapses_separators() {
        assert_eq!(slugify("A  --  B"), "a-b");
        assert_eq!(slugify("Concrete, Steel & Timber"), "concrete-steel-timber");
    }

    #[test]
    fn test_slugify_trims_hyphens() {
        assert_eq!(slugify("...edge case..."), "edge-case");
        assert_eq!(slugify("---"), "");
    }

    #[test]
    fn test_slugify_drops_non_ascii() {
        assert_eq!(slugify("café build"), "caf-build");
    }

    #[test]
    fn test_reading_time_minimum_one() {
        assert_eq!(reading_time_minutes(""), 1);
        assert_eq!(reading_time_minutes("short note"), 1);
    }

    #[test]
    fn test_reading_time_rounds_up() {
        let two_hundred_one = "word ".repeat(201);
        assert_eq!(reading_time_minutes(&two_hundred_one), 2);

        let four_hundred = "word ".repeat(400);
        assert_eq!(reading_time_minutes(&four_hundred), 2);
    }
}
