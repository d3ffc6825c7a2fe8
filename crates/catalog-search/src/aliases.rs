use std::sync::LazyLock;

use regex::Regex;

use crate::normalize::{normalize, roman_to_arabic};
use crate::SearchableEntity;

static FRANCHISE_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\s*star\s+wars[: ]?").expect("franchise prefix regex is valid")
});

/// Normalized alternate spellings of one entity.
///
/// Keeps insertion order so that ties between equally scoring aliases always
/// resolve to the same field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Aliases(Vec<String>);

impl Aliases {
    /// Adds an already-normalized alias. Empty strings and duplicates are ignored.
    fn insert(&mut self, alias: String) {
        if alias.is_empty() || self.0.contains(&alias) {
            return;
        }
        self.0.push(alias);
    }

    fn insert_raw(&mut self, raw: &str) {
        self.insert(normalize(raw));
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn contains(&self, alias: &str) -> bool {
        self.0.iter().any(|a| a == alias)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

pub fn build_aliases<E: SearchableEntity + ?Sized>(entity: &E) -> Aliases {
    let title = entity.title();
    let mut aliases = Aliases::default();

    aliases.insert_raw(title);

    if let Some(number) = entity.episode_number() {
        aliases.insert_raw(&format!("episode {number}"));
    }
    if let Some(roman) = entity.episode_roman() {
        aliases.insert_raw(&format!("episode {roman}"));
        aliases.insert_raw(&format!("episode {}", roman_to_arabic(roman)));
    }

    for field in [entity.era(), entity.synopsis(), entity.notes()]
        .into_iter()
        .flatten()
    {
        aliases.insert_raw(field);
    }

    // "Star Wars: Episode V - The Empire Strikes Back" -> each piece on its own.
    for piece in title.split([':', '-']) {
        aliases.insert_raw(piece);
    }

    let without_prefix = FRANCHISE_PREFIX.replace(title, "");
    aliases.insert_raw(&without_prefix);

    aliases
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Entry {
        title: &'static str,
        episode_number: Option<u32>,
        episode_roman: Option<&'static str>,
        era: Option<&'static str>,
    }

    impl SearchableEntity for Entry {
        fn title(&self) -> &str {
            self.title
        }

        fn episode_number(&self) -> Option<u32> {
            self.episode_number
        }

        fn episode_roman(&self) -> Option<&str> {
            self.episode_roman
        }

        fn era(&self) -> Option<&str> {
            self.era
        }
    }

    #[test]
    fn compound_title_yields_pieces_and_episode_forms() {
        let entry = Entry {
            title: "Star Wars: Episode V - The Empire Strikes Back",
            episode_number: Some(5),
            episode_roman: Some("V"),
            era: Some("Rebellion Era"),
        };
        let aliases = build_aliases(&entry);

        assert_eq!(
            aliases.iter().next(),
            Some("star wars episode 5 the empire strikes back")
        );
        assert!(aliases.contains("episode 5"));
        assert!(aliases.contains("rebellion era"));
        assert!(aliases.contains("star wars"));
        assert!(aliases.contains("the empire strikes back"));
        assert!(aliases.contains("episode 5 the empire strikes back"));
        assert!(aliases.iter().all(|a| !a.is_empty()));
    }

    #[test]
    fn duplicates_collapse() {
        let entry = Entry {
            title: "Rogue One",
            episode_number: None,
            episode_roman: None,
            era: None,
        };
        let aliases = build_aliases(&entry);
        assert_eq!(aliases.iter().collect::<Vec<_>>(), vec!["rogue one"]);
    }

    #[test]
    fn unknown_roman_passes_through() {
        let entry = Entry {
            title: "Fan Edit",
            episode_number: None,
            episode_roman: Some("X"),
            era: None,
        };
        let aliases = build_aliases(&entry);
        assert!(aliases.contains("episode x"));
        assert_eq!(aliases.len(), 2);
    }

    #[test]
    fn franchise_prefix_is_only_stripped_when_leading() {
        let entry = Entry {
            title: "LEGO Star Wars Holiday Special",
            episode_number: None,
            episode_roman: None,
            era: None,
        };
        let aliases = build_aliases(&entry);
        assert_eq!(aliases.len(), 1);

        let entry = Entry {
            title: "Star Wars Holiday Special",
            episode_number: None,
            episode_roman: None,
            era: None,
        };
        let aliases = build_aliases(&entry);
        assert!(aliases.contains("holiday special"));
    }
}
