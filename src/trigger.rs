//! Trigger table: which opening sequences start a directive and how each
//! one is interpreted.

use std::collections::HashMap;

use crate::segment::MarkerKind;

/// How a matched trigger prefix is interpreted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TriggerAction {
    /// The prefix opens content terminated by a balanced `}`.
    Fixed(MarkerKind),
    /// The prefix alone is the whole directive; no content follows.
    Literal(MarkerKind),
    /// `{{marker:content}}`: marker name read up to `:`, content
    /// terminated by a balanced `}}`.
    NamedMarker,
}

/// A single trigger: an opening sequence and how to interpret it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TriggerSpec {
    pub prefix: String,
    pub action: TriggerAction,
}

impl TriggerSpec {
    #[must_use]
    pub fn new(prefix: impl Into<String>, action: TriggerAction) -> Self {
        Self {
            prefix: prefix.into(),
            action,
        }
    }

    /// Prefix length in characters.
    #[must_use]
    pub fn prefix_len(&self) -> usize {
        self.prefix.chars().count()
    }
}

/// Ordered trigger table plus the known-marker lookup used by the
/// `{{marker:content}}` form.
///
/// At a given position the longest matching prefix wins; declaration
/// order breaks remaining ties, so the first registered trigger is
/// preferred. Marker validity is data-driven: registering a new marker
/// name extends the scanner without touching the scanning algorithm.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TriggerSet {
    triggers: Vec<TriggerSpec>,
    markers: HashMap<String, MarkerKind>,
}

impl TriggerSet {
    /// Table with no triggers; every input scans as a single literal.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            triggers: Vec::new(),
            markers: HashMap::new(),
        }
    }

    /// Add a trigger. Order matters: earlier triggers win ties among
    /// equal-length prefixes.
    #[must_use]
    pub fn with_trigger(mut self, prefix: impl Into<String>, action: TriggerAction) -> Self {
        self.triggers.push(TriggerSpec::new(prefix, action));
        self
    }

    /// Register a marker name for the `{{marker:content}}` form.
    #[must_use]
    pub fn with_marker(mut self, name: impl Into<String>, kind: MarkerKind) -> Self {
        self.markers.insert(name.into(), kind);
        self
    }

    #[must_use]
    pub fn triggers(&self) -> &[TriggerSpec] {
        &self.triggers
    }

    /// Look up a marker name seen in the `{{marker:content}}` form.
    #[must_use]
    pub fn marker(&self, name: &str) -> Option<&MarkerKind> {
        self.markers.get(name)
    }

    /// Find the lowest position `>= from` at which a trigger prefix
    /// occurs, scanning left to right.
    ///
    /// Returns the match position and the winning trigger, or `None`
    /// when no trigger occurs before the end of the source.
    pub(crate) fn find_next(&self, chars: &[char], from: usize) -> Option<(usize, &TriggerSpec)> {
        for at in from..chars.len() {
            let mut best: Option<&TriggerSpec> = None;
            for spec in &self.triggers {
                if matches_at(chars, at, &spec.prefix)
                    && best.is_none_or(|b| spec.prefix_len() > b.prefix_len())
                {
                    best = Some(spec);
                }
            }
            if let Some(spec) = best {
                return Some((at, spec));
            }
        }
        None
    }
}

impl Default for TriggerSet {
    /// The stock table: `@{path}`, `!{command}`, `{{args}}`, and
    /// `{{marker:content}}` with known markers `file` and `shell`.
    fn default() -> Self {
        Self::empty()
            .with_trigger("@{", TriggerAction::Fixed(MarkerKind::File))
            .with_trigger("!{", TriggerAction::Fixed(MarkerKind::Shell))
            .with_trigger("{{args}}", TriggerAction::Literal(MarkerKind::Args))
            .with_trigger("{{", TriggerAction::NamedMarker)
            .with_marker("file", MarkerKind::File)
            .with_marker("shell", MarkerKind::Shell)
    }
}

fn matches_at(chars: &[char], at: usize, prefix: &str) -> bool {
    let mut i = at;
    for expected in prefix.chars() {
        if chars.get(i) != Some(&expected) {
            return false;
        }
        i += 1;
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chars(input: &str) -> Vec<char> {
        input.chars().collect()
    }

    #[test]
    fn finds_lowest_position() {
        let set = TriggerSet::default();
        let input = chars("a @{x} then !{y}");
        let (at, spec) = set.find_next(&input, 0).expect("should match");
        assert_eq!(at, 2);
        assert_eq!(spec.prefix, "@{");
    }

    #[test]
    fn resumes_from_given_position() {
        let set = TriggerSet::default();
        let input = chars("a @{x} then !{y}");
        let (at, spec) = set.find_next(&input, 3).expect("should match");
        assert_eq!(at, 12);
        assert_eq!(spec.prefix, "!{");
    }

    #[test]
    fn no_match_returns_none() {
        let set = TriggerSet::default();
        assert!(set.find_next(&chars("plain text"), 0).is_none());
        assert!(set.find_next(&chars(""), 0).is_none());
    }

    #[test]
    fn longest_prefix_wins_at_same_position() {
        let set = TriggerSet::default();
        let input = chars("{{args}}");
        let (at, spec) = set.find_next(&input, 0).expect("should match");
        assert_eq!(at, 0);
        assert_eq!(spec.prefix, "{{args}}");
    }

    #[test]
    fn declaration_order_breaks_ties() {
        let set = TriggerSet::empty()
            .with_trigger("@{", TriggerAction::Fixed(MarkerKind::File))
            .with_trigger("@{", TriggerAction::Fixed(MarkerKind::Shell));
        let input = chars("@{x}");
        let (_, spec) = set.find_next(&input, 0).expect("should match");
        assert_eq!(spec.action, TriggerAction::Fixed(MarkerKind::File));
    }

    #[test]
    fn prefix_at_end_of_input_is_still_found() {
        let set = TriggerSet::default();
        let input = chars("tail @{");
        let (at, spec) = set.find_next(&input, 0).expect("should match");
        assert_eq!(at, 5);
        assert_eq!(spec.prefix, "@{");
    }

    #[test]
    fn partial_prefix_does_not_match() {
        let set = TriggerSet::default();
        // a lone `@` or `{` is not a trigger
        assert!(set.find_next(&chars("a @ b { c }"), 0).is_none());
    }

    #[test]
    fn marker_lookup_is_data_driven() {
        let set = TriggerSet::default().with_marker("snippet", MarkerKind::Named("snippet".into()));
        assert_eq!(set.marker("file"), Some(&MarkerKind::File));
        assert_eq!(
            set.marker("snippet"),
            Some(&MarkerKind::Named("snippet".into()))
        );
        assert_eq!(set.marker("bogus"), None);
    }
}
