use crate::error::ListError;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

const LIST1_EXAMPLES: &[&str] = &[
    "Project", "Document", "Image", "Video", "Audio", "Archive", "Backup", "Report", "Data",
    "Asset",
];

const LIST2_EXAMPLES: &[&str] = &[
    "file", "item", "doc", "img", "vid", "aud", "pkg", "bak", "tmp", "new",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListKind {
    Words,
    Prefixes,
}

impl ListKind {
    fn examples(self) -> &'static [&'static str] {
        match self {
            Self::Words => LIST1_EXAMPLES,
            Self::Prefixes => LIST2_EXAMPLES,
        }
    }
}

/// Insertion-ordered word list without duplicates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CustomList {
    items: Vec<String>,
}

impl CustomList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a list from arbitrary input, dropping blanks and repeats.
    pub fn from_items<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut list = Self::new();
        for item in items {
            let _ = list.add(item.as_ref());
        }
        list
    }

    pub fn add(&mut self, item: &str) -> Result<&[String], ListError> {
        let item = item.trim();
        if item.is_empty() {
            return Err(ListError::Empty);
        }
        if self.contains(item) {
            return Err(ListError::Duplicate(item.to_string()));
        }
        self.items.push(item.to_string());
        Ok(&self.items)
    }

    pub fn remove(&mut self, item: &str) -> Result<&[String], ListError> {
        let item = item.trim();
        let index = self
            .items
            .iter()
            .position(|existing| existing == item)
            .ok_or_else(|| ListError::NotFound(item.to_string()))?;
        self.items.remove(index);
        Ok(&self.items)
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn load_examples(&mut self, kind: ListKind) -> usize {
        kind.examples()
            .iter()
            .filter(|example| self.add(example).is_ok())
            .count()
    }

    pub fn choose<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&str> {
        self.items.choose(rng).map(String::as_str)
    }

    pub fn contains(&self, item: &str) -> bool {
        self.items.iter().any(|existing| existing == item)
    }

    pub fn items(&self) -> &[String] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn add_trims_and_rejects_duplicates() {
        let mut list = CustomList::new();
        list.add("  Report ").expect("first add");
        let err = list.add("Report").expect_err("duplicate must fail");
        assert_eq!(err, ListError::Duplicate("Report".to_string()));
        assert_eq!(list.items(), ["Report".to_string()]);
    }

    #[test]
    fn add_rejects_blank_input() {
        let mut list = CustomList::new();
        assert_eq!(list.add("   "), Err(ListError::Empty));
        assert!(list.is_empty());
    }

    #[test]
    fn remove_reports_missing_item() {
        let mut list = CustomList::from_items(["a", "b", "c"]);
        list.remove("b").expect("remove existing");
        assert_eq!(list.items(), ["a".to_string(), "c".to_string()]);
        assert_eq!(list.remove("zzz"), Err(ListError::NotFound("zzz".to_string())));
    }

    #[test]
    fn load_examples_skips_existing_entries() {
        let mut list = CustomList::from_items(["Report", "Mine"]);
        let added = list.load_examples(ListKind::Words);
        assert_eq!(added, 9);
        assert_eq!(list.len(), 11);
        assert_eq!(list.items()[0], "Report");
        assert_eq!(list.load_examples(ListKind::Words), 0);
    }

    #[test]
    fn from_items_keeps_first_occurrence_order() {
        let list = CustomList::from_items(["b", "a", "b", "", "c"]);
        assert_eq!(
            list.items(),
            ["b".to_string(), "a".to_string(), "c".to_string()]
        );
    }

    #[test]
    fn choose_returns_none_for_empty_list() {
        let mut rng = StdRng::seed_from_u64(7);
        assert!(CustomList::new().choose(&mut rng).is_none());

        let mut prefixes = CustomList::new();
        prefixes.load_examples(ListKind::Prefixes);
        let picked = prefixes.choose(&mut rng).expect("non-empty list");
        assert!(prefixes.contains(picked));
    }
}
