use indexmap::IndexMap;

use crate::model::entry::ChecklistEntry;

/// Display form of one entry. `name` is the identity, `text` is what gets drawn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Label {
    pub name: String,
    pub done: bool,
    pub text: String,
}

/// Completion counts for a category (or the whole checklist)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Progress {
    pub done: usize,
    pub total: usize,
}

impl Progress {
    pub fn is_complete(&self) -> bool {
        self.total > 0 && self.done == self.total
    }

    fn add(&mut self, done: bool) {
        self.total += 1;
        if done {
            self.done += 1;
        }
    }
}

/// Entries grouped by category, in order of first appearance.
///
/// Always derived from a collection via [`CategoryIndex::rebuild`]; nothing
/// else mutates it.
#[derive(Debug, Clone, Default)]
pub struct CategoryIndex {
    groups: IndexMap<String, Vec<Label>>,
}

impl CategoryIndex {
    /// Group `entries` by category. Completed entries get `done_marker`
    /// appended to their label text.
    pub fn rebuild(entries: &[ChecklistEntry], done_marker: &str) -> Self {
        let mut groups: IndexMap<String, Vec<Label>> = IndexMap::new();
        for entry in entries {
            groups
                .entry(entry.category.clone())
                .or_default()
                .push(Label {
                    name: entry.name.clone(),
                    done: entry.done,
                    text: label_text(&entry.name, entry.done, done_marker),
                });
        }
        CategoryIndex { groups }
    }

    /// Category names, in order of first appearance
    pub fn categories(&self) -> Vec<&str> {
        self.groups.keys().map(|k| k.as_str()).collect()
    }

    /// Labels of one category; empty when the category does not exist
    pub fn items_of(&self, category: &str) -> &[Label] {
        self.groups
            .get(category)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn contains(&self, category: &str) -> bool {
        self.groups.contains_key(category)
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn progress_of(&self, category: &str) -> Progress {
        let mut progress = Progress::default();
        for label in self.items_of(category) {
            progress.add(label.done);
        }
        progress
    }

    /// Progress across every category
    pub fn total_progress(&self) -> Progress {
        let mut progress = Progress::default();
        for label in self.groups.values().flatten() {
            progress.add(label.done);
        }
        progress
    }
}

/// Label text for an entry: the name, plus the marker when done
pub fn label_text(name: &str, done: bool, done_marker: &str) -> String {
    if done && !done_marker.is_empty() {
        format!("{} {}", name, done_marker)
    } else {
        name.to_string()
    }
}
