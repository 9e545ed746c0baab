use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// Trailing segment of an IRI-like identifier, e.g. `oro:Animal` -> `Animal`.
pub fn short_name(id: &str) -> &str {
    let trimmed = id.trim_end_matches(['#', '/', ':']);
    trimmed
        .rsplit_once(['#', '/', ':'])
        .map(|(_, rest)| rest)
        .filter(|rest| !rest.is_empty())
        .unwrap_or(trimmed)
}

pub fn sanitize_id(id: &str) -> String {
    let mut sanitized = id
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect::<String>();

    if sanitized.is_empty() || sanitized.starts_with(|c: char| c.is_ascii_digit()) {
        sanitized.insert(0, '_');
    }
    sanitized
}

/// Non-zero tag derived from the id. Zero means "nothing picked".
pub fn stable_tag(id: &str) -> u32 {
    let mut hasher = DefaultHasher::new();
    id.hash(&mut hasher);
    let hash = hasher.finish();

    let folded = ((hash >> 32) ^ (hash & 0xffff_ffff)) as u32;
    folded.max(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_name_strips_namespaces() {
        assert_eq!(short_name("oro:Animal"), "Animal");
        assert_eq!(short_name("http://example.org/onto#Dog"), "Dog");
        assert_eq!(short_name("http://example.org/onto/"), "onto");
        assert_eq!(short_name("plain"), "plain");
    }

    #[test]
    fn sanitize_id_replaces_punctuation() {
        assert_eq!(sanitize_id("oro:Animal"), "oro_Animal");
        assert_eq!(sanitize_id("a-b c"), "a_b_c");
        assert_eq!(sanitize_id("42nd"), "_42nd");
        assert_eq!(sanitize_id(""), "_");
    }

    #[test]
    fn stable_tag_is_deterministic_and_non_zero() {
        assert_eq!(stable_tag("baboon"), stable_tag("baboon"));
        assert_ne!(stable_tag("baboon"), 0);
        assert_ne!(stable_tag(""), 0);
    }
}
