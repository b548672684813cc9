//! Entry name deduplication
//!
//! ZIP itself allows two entries with the same name, but extraction tools
//! overwrite or refuse them. A [`NameRegistry`] lives for exactly one archive
//! build and hands out a unique name for every entry, in entry order.
//!
//! ## Policy
//!
//! - The first occurrence of a name is kept unchanged.
//! - The Nth occurrence (N >= 2) becomes `base_N.ext`, where the name is split
//!   at its last `.`; names without an extension, or whose only `.` is the
//!   leading one, become `name_N`.
//! - A missing or empty name becomes `image.jpg`.
//! - A generated name never reuses one already handed out; N is bumped until
//!   the candidate is free.

use std::collections::{HashMap, HashSet};

/// Name used when an image has no file name
pub const DEFAULT_ENTRY_NAME: &str = "image.jpg";

#[derive(Debug, Default)]
pub struct NameRegistry {
    /// Occurrence counter per desired name
    occurrences: HashMap<String, usize>,
    /// Every name handed out so far
    taken: HashSet<String>,
}

impl NameRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve the final entry name for the next entry
    ///
    /// # Arguments
    ///
    /// * `desired` - The file name the entry would like to use, if any
    pub fn resolve(&mut self, desired: Option<&str>) -> String {
        let desired = match desired {
            Some(name) if !name.is_empty() => name,
            _ => DEFAULT_ENTRY_NAME,
        };

        let count = self.occurrences.entry(desired.to_string()).or_insert(0);
        *count += 1;

        let mut occurrence = *count;
        let mut candidate = if occurrence == 1 {
            desired.to_string()
        } else {
            numbered(desired, occurrence)
        };

        while self.taken.contains(&candidate) {
            occurrence += 1;
            candidate = numbered(desired, occurrence);
        }

        *count = occurrence;
        self.taken.insert(candidate.clone());

        candidate
    }
}

fn numbered(name: &str, occurrence: usize) -> String {
    match name.rfind('.') {
        Some(dot) if dot > 0 => {
            let (base, extension) = name.split_at(dot);
            format!("{base}_{occurrence}{extension}")
        }
        _ => format!("{name}_{occurrence}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;
    use rstest::rstest;

    fn resolve_all(names: &[Option<&str>]) -> Vec<String> {
        let mut registry = NameRegistry::new();
        names.iter().map(|name| registry.resolve(*name)).collect()
    }

    #[rstest]
    #[case::repeated_with_extension(
        &[Some("a.jpg"), Some("a.jpg"), Some("a.jpg")],
        &["a.jpg", "a_2.jpg", "a_3.jpg"]
    )]
    #[case::repeated_without_extension(&[Some("x"), Some("x")], &["x", "x_2"])]
    #[case::distinct_names(&[Some("a.jpg"), Some("b.jpg")], &["a.jpg", "b.jpg"])]
    #[case::last_dot_splits(&[Some("a.b.png"), Some("a.b.png")], &["a.b.png", "a.b_2.png"])]
    #[case::leading_dot_only(&[Some(".hidden"), Some(".hidden")], &[".hidden", ".hidden_2"])]
    #[case::missing_names(&[None, Some(""), None], &["image.jpg", "image_2.jpg", "image_3.jpg"])]
    #[case::interleaved(
        &[Some("a.jpg"), Some("b.jpg"), Some("a.jpg"), Some("b.jpg")],
        &["a.jpg", "b.jpg", "a_2.jpg", "b_2.jpg"]
    )]
    fn resolves_names_in_order(#[case] input: &[Option<&str>], #[case] expected: &[&str]) {
        assert_eq!(resolve_all(input), expected);
    }

    #[test]
    fn generated_name_skips_a_literal_name_seen_earlier() {
        let names = resolve_all(&[Some("a_2.jpg"), Some("a.jpg"), Some("a.jpg"), Some("a.jpg")]);

        assert_eq!(names, vec!["a_2.jpg", "a.jpg", "a_3.jpg", "a_4.jpg"]);
    }

    #[test]
    fn literal_name_skips_a_generated_name_seen_earlier() {
        let names = resolve_all(&[Some("a.jpg"), Some("a.jpg"), Some("a_2.jpg")]);

        assert_eq!(names, vec!["a.jpg", "a_2.jpg", "a_2_2.jpg"]);
    }

    proptest! {
        #[test]
        fn resolved_names_are_unique(
            names in prop::collection::vec(
                prop::option::of(prop::sample::select(vec!["a.jpg", "a_2.jpg", "a", "a_2", "b.png", ""])),
                0..40,
            )
        ) {
            let resolved = resolve_all(&names);
            let unique = resolved.iter().collect::<HashSet<_>>();

            prop_assert_eq!(unique.len(), resolved.len());
            prop_assert!(resolved.iter().all(|name| !name.is_empty()));
        }
    }
}
