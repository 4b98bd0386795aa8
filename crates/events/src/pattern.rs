//! Glob-style matcher for subscription keys.

/// Pattern over event names: literal text with `*` wildcards.
///
/// `*` matches any run of characters (including none), so `cart:*` matches
/// every cart event, `*:changed` every change announcement, and `*` alone
/// matches everything. Two patterns are equal iff their source text is equal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventPattern {
    source: String,
}

impl EventPattern {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
        }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// Whether `name` matches this pattern.
    pub fn matches(&self, name: &str) -> bool {
        let chunks: Vec<&str> = self.source.split('*').collect();
        if chunks.len() == 1 {
            // No wildcard: degenerate exact match.
            return name == self.source;
        }

        let first = chunks[0];
        let last = chunks[chunks.len() - 1];
        if !name.starts_with(first) || !name.ends_with(last) {
            return false;
        }
        if name.len() < first.len() + last.len() {
            return false;
        }

        // Middle chunks must appear in order between prefix and suffix.
        let mut rest = &name[first.len()..name.len() - last.len()];
        for chunk in &chunks[1..chunks.len() - 1] {
            if chunk.is_empty() {
                continue;
            }
            match rest.find(chunk) {
                Some(at) => rest = &rest[at + chunk.len()..],
                None => return false,
            }
        }
        true
    }
}

impl From<&str> for EventPattern {
    fn from(source: &str) -> Self {
        Self::new(source)
    }
}

impl core::fmt::Display for EventPattern {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.source, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefix_wildcard_matches_namespace() {
        let p = EventPattern::new("cart:*");
        assert!(p.matches("cart:add"));
        assert!(p.matches("cart:changed"));
        assert!(p.matches("cart:"));
        assert!(!p.matches("order:open"));
    }

    #[test]
    fn suffix_wildcard_matches_by_suffix() {
        let p = EventPattern::new("*:changed");
        assert!(p.matches("cart:changed"));
        assert!(p.matches("products:changed"));
        assert!(!p.matches("cart:changed-later"));
        assert!(!p.matches("changed"));
    }

    #[test]
    fn bare_star_matches_everything() {
        let p = EventPattern::new("*");
        assert!(p.matches("cart:add"));
        assert!(p.matches(""));
    }

    #[test]
    fn wildcard_free_pattern_is_exact() {
        let p = EventPattern::new("cart:add");
        assert!(p.matches("cart:add"));
        assert!(!p.matches("cart:added"));
    }

    #[test]
    fn middle_chunks_must_appear_in_order() {
        let p = EventPattern::new("order:*submit*");
        assert!(p.matches("order:submit"));
        assert!(!p.matches("order:open"));
    }

    #[test]
    fn overlapping_prefix_and_suffix_do_not_match() {
        // "cart" is 4 chars; prefix and suffix may not share characters.
        let p = EventPattern::new("cart*art");
        assert!(!p.matches("cart"));
        assert!(p.matches("cartart"));
    }
}
