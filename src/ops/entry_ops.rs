use std::collections::HashSet;

use crate::model::entry::ChecklistEntry;

/// Error type for entry lookups that must resolve to something
#[derive(Debug, thiserror::Error)]
pub enum EntryError {
    #[error("no entry named {0}")]
    NotFound(String),
    #[error("no entry named {name} in category {category}")]
    NotFoundInCategory { category: String, name: String },
}

/// Find the first entry with this name, in any category
pub fn find_by_name<'a>(entries: &'a [ChecklistEntry], name: &str) -> Option<&'a ChecklistEntry> {
    entries.iter().find(|e| e.name == name)
}

/// Find the entry identified by `(category, name)`
pub fn find_entry<'a>(
    entries: &'a [ChecklistEntry],
    category: &str,
    name: &str,
) -> Option<&'a ChecklistEntry> {
    entries.iter().find(|e| e.is(category, name))
}

/// Flip the done flag of the first entry named `name`.
/// Returns the new flag, or None when nothing matched.
pub fn toggle_by_name(entries: &mut [ChecklistEntry], name: &str) -> Option<bool> {
    let entry = entries.iter_mut().find(|e| e.name == name)?;
    entry.done = !entry.done;
    Some(entry.done)
}

/// Flip the done flag of the entry identified by `(category, name)`.
pub fn toggle_entry(entries: &mut [ChecklistEntry], category: &str, name: &str) -> Option<bool> {
    let entry = entries.iter_mut().find(|e| e.is(category, name))?;
    entry.done = !entry.done;
    Some(entry.done)
}

/// Names that appear in more than one entry, in order of their second appearance.
/// Name-only toggles resolve these to the first match.
pub fn ambiguous_names(entries: &[ChecklistEntry]) -> Vec<&str> {
    let mut seen = HashSet::new();
    let mut reported = HashSet::new();
    let mut out = Vec::new();
    for entry in entries {
        let name = entry.name.as_str();
        if !seen.insert(name) && reported.insert(name) {
            out.push(name);
        }
    }
    out
}
