use serde::{Deserialize, Serialize};

/// A single checklist line: one item inside a category, plus its completion flag.
///
/// Field order here is the field order on disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChecklistEntry {
    pub name: String,
    pub category: String,
    /// Absent in seed data and in files written before toggling existed
    #[serde(default)]
    pub done: bool,
}

impl ChecklistEntry {
    pub fn new(name: impl Into<String>, category: impl Into<String>) -> Self {
        ChecklistEntry {
            name: name.into(),
            category: category.into(),
            done: false,
        }
    }

    /// Builder-style setter, mostly for tests and seeding
    pub fn with_done(mut self, done: bool) -> Self {
        self.done = done;
        self
    }

    /// Whether this entry is the one identified by `(category, name)`
    pub fn is(&self, category: &str, name: &str) -> bool {
        self.category == category && self.name == name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn done_defaults_to_false() {
        let entry: ChecklistEntry =
            serde_json::from_str(r#"{"name":"AK47","category":"Rifles"}"#).unwrap();
        assert_eq!(entry, ChecklistEntry::new("AK47", "Rifles"));
    }

    #[test]
    fn name_and_category_are_required() {
        assert!(serde_json::from_str::<ChecklistEntry>(r#"{"name":"AK47"}"#).is_err());
        assert!(serde_json::from_str::<ChecklistEntry>(r#"{"category":"Rifles"}"#).is_err());
    }

    #[test]
    fn serializes_in_stable_field_order() {
        let entry = ChecklistEntry::new("M4", "Rifles").with_done(true);
        let json = serde_json::to_string(&entry).unwrap();
        assert_eq!(json, r#"{"name":"M4","category":"Rifles","done":true}"#);
    }

    #[test]
    fn identity_is_category_and_name() {
        let entry = ChecklistEntry::new("Knife", "Melee");
        assert!(entry.is("Melee", "Knife"));
        assert!(!entry.is("Pistols", "Knife"));
        assert!(!entry.is("Melee", "knife"));
    }
}
