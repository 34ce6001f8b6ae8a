//! The two-level navigation state machine.
//!
//! The navigator owns the item store and the category index derived from it.
//! The presentation layer feeds it [`Action`]s (selection by position in the
//! list currently on screen) and draws whatever [`Navigator::rows`] returns.

use crate::io::store::{ItemStore, StoreError, ToggleOutcome};
use crate::ops::entry_ops;
use crate::ops::index::{CategoryIndex, Label, Progress};

/// Width used until the terminal reports its size
pub const DEFAULT_WIDTH: u16 = 20;

/// Which list is on screen
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavState {
    /// Category names
    Root,
    /// Items of one category
    InCategory(String),
}

/// Abstract user actions, already decoded from keys
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Activate the entry at this position of the displayed list
    Select(usize),
    Back,
    Quit,
    Resize(u16),
}

/// What an action did
#[derive(Debug)]
pub enum Outcome {
    /// Nothing changed
    Ignored,
    Entered {
        category: String,
    },
    Toggled {
        category: String,
        name: String,
        done: bool,
    },
    /// The flag flipped in memory but the save failed
    Unsaved {
        category: String,
        name: String,
        done: bool,
        error: StoreError,
    },
    /// Back at the root list, coming from this category
    Returned {
        category: String,
    },
    Resized(u16),
    Quit,
}

/// One displayed row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Row<'a> {
    Category { name: &'a str, progress: Progress },
    Item(&'a Label),
}

impl<'a> Row<'a> {
    pub fn text(&self) -> &'a str {
        match *self {
            Row::Category { name, .. } => name,
            Row::Item(label) => &label.text,
        }
    }
}

pub struct Navigator {
    store: ItemStore,
    index: CategoryIndex,
    state: NavState,
    root_title: String,
    done_marker: String,
    width: u16,
    quit: bool,
}

impl Navigator {
    /// Build a navigator over an already-loaded store, starting at the root.
    pub fn new(store: ItemStore, root_title: &str, done_marker: &str) -> Self {
        let index = CategoryIndex::rebuild(store.entries(), done_marker);
        Navigator {
            store,
            index,
            state: NavState::Root,
            root_title: root_title.to_string(),
            done_marker: done_marker.to_string(),
            width: DEFAULT_WIDTH,
            quit: false,
        }
    }

    pub fn state(&self) -> &NavState {
        &self.state
    }

    pub fn store(&self) -> &ItemStore {
        &self.store
    }

    pub fn index(&self) -> &CategoryIndex {
        &self.index
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn is_quit(&self) -> bool {
        self.quit
    }

    pub fn current_category(&self) -> Option<&str> {
        match &self.state {
            NavState::Root => None,
            NavState::InCategory(name) => Some(name.as_str()),
        }
    }

    /// List title: the root title, or the open category's name
    pub fn title(&self) -> &str {
        self.current_category().unwrap_or(&self.root_title)
    }

    pub fn rows(&self) -> Vec<Row<'_>> {
        match &self.state {
            NavState::Root => self
                .index
                .categories()
                .into_iter()
                .map(|name| Row::Category {
                    name,
                    progress: self.index.progress_of(name),
                })
                .collect(),
            NavState::InCategory(category) => {
                self.index.items_of(category).iter().map(Row::Item).collect()
            }
        }
    }

    /// The display strings of the current list
    #[cfg(test)]
    pub fn display(&self) -> Vec<&str> {
        self.rows().into_iter().map(|row| row.text()).collect()
    }

    pub fn len(&self) -> usize {
        match &self.state {
            NavState::Root => self.index.len(),
            NavState::InCategory(category) => self.index.items_of(category).len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Process one action to completion.
    pub fn apply(&mut self, action: Action) -> Outcome {
        if self.quit {
            return match action {
                Action::Quit => Outcome::Quit,
                _ => Outcome::Ignored,
            };
        }

        match action {
            Action::Quit => {
                self.quit = true;
                Outcome::Quit
            }
            Action::Resize(width) => {
                self.width = width;
                Outcome::Resized(width)
            }
            Action::Back => match std::mem::replace(&mut self.state, NavState::Root) {
                NavState::Root => Outcome::Ignored,
                NavState::InCategory(category) => Outcome::Returned { category },
            },
            Action::Select(position) => match self.state.clone() {
                NavState::Root => self.enter(position),
                NavState::InCategory(category) => self.toggle_at(category, position),
            },
        }
    }

    fn enter(&mut self, position: usize) -> Outcome {
        let Some(category) = self.index.categories().get(position).map(|c| c.to_string()) else {
            return Outcome::Ignored;
        };
        self.state = NavState::InCategory(category.clone());
        Outcome::Entered { category }
    }

    fn toggle_at(&mut self, category: String, position: usize) -> Outcome {
        let Some(name) = self
            .index
            .items_of(&category)
            .get(position)
            .map(|label| label.name.clone())
        else {
            return Outcome::Ignored;
        };

        let result = self.store.toggle_in(&category, &name);
        self.index = CategoryIndex::rebuild(self.store.entries(), &self.done_marker);

        match result {
            Ok(ToggleOutcome::Toggled { done }) => Outcome::Toggled {
                category,
                name,
                done,
            },
            Ok(ToggleOutcome::NoMatch) => Outcome::Ignored,
            Err(error) => {
                let done = entry_ops::find_entry(self.store.entries(), &category, &name)
                    .is_some_and(|e| e.done);
                Outcome::Unsaved {
                    category,
                    name,
                    done,
                    error,
                }
            }
        }
    }
}
