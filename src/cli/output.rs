use serde::Serialize;

use crate::ops::index::{CategoryIndex, Progress};

// ---------------------------------------------------------------------------
// JSON output structs
// ---------------------------------------------------------------------------

#[derive(Serialize)]
pub struct ProgressJson {
    pub done: usize,
    pub total: usize,
}

impl From<Progress> for ProgressJson {
    fn from(p: Progress) -> Self {
        ProgressJson {
            done: p.done,
            total: p.total,
        }
    }
}

#[derive(Serialize)]
pub struct CategoryJson {
    pub name: String,
    pub progress: ProgressJson,
}

#[derive(Serialize)]
pub struct CategoryListJson {
    pub title: String,
    pub progress: ProgressJson,
    pub categories: Vec<CategoryJson>,
}

#[derive(Serialize)]
pub struct EntryJson {
    pub name: String,
    pub done: bool,
}

#[derive(Serialize)]
pub struct EntryListJson {
    pub category: String,
    pub progress: ProgressJson,
    pub entries: Vec<EntryJson>,
}

#[derive(Serialize)]
pub struct ToggleJson {
    pub name: String,
    pub category: String,
    pub done: bool,
}

// ---------------------------------------------------------------------------
// Conversions
// ---------------------------------------------------------------------------

pub fn category_list_json(title: &str, index: &CategoryIndex) -> CategoryListJson {
    CategoryListJson {
        title: title.to_string(),
        progress: index.total_progress().into(),
        categories: index
            .categories()
            .into_iter()
            .map(|name| CategoryJson {
                name: name.to_string(),
                progress: index.progress_of(name).into(),
            })
            .collect(),
    }
}

pub fn entry_list_json(category: &str, index: &CategoryIndex) -> EntryListJson {
    EntryListJson {
        category: category.to_string(),
        progress: index.progress_of(category).into(),
        entries: index
            .items_of(category)
            .iter()
            .map(|label| EntryJson {
                name: label.name.clone(),
                done: label.done,
            })
            .collect(),
    }
}

// ---------------------------------------------------------------------------
// Text formatting
// ---------------------------------------------------------------------------

/// `"  1. Pistols  3/5"` per category
pub fn format_category_lines(index: &CategoryIndex) -> Vec<String> {
    index
        .categories()
        .into_iter()
        .enumerate()
        .map(|(i, name)| {
            let p = index.progress_of(name);
            format!("{:>3}. {}  {}/{}", i + 1, name, p.done, p.total)
        })
        .collect()
}

/// `"  1. XM4 ✅"` per entry
pub fn format_entry_lines(category: &str, index: &CategoryIndex) -> Vec<String> {
    index
        .items_of(category)
        .iter()
        .enumerate()
        .map(|(i, label)| format!("{:>3}. {}", i + 1, label.text))
        .collect()
}
