//! In-memory repositories for the feature pages.
//!
//! One [`Repository`] per entity type, all sharing list/filter/create/update
//! and a typed [`Query`] per page.

mod pagination;
mod queries;

pub use pagination::*;
pub use queries::*;

use thiserror::Error;

/// Repository errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RepositoryError {
    #[error("{kind} not found: {id}")]
    NotFound { kind: &'static str, id: String },

    #[error("{kind} already exists: {id}")]
    Duplicate { kind: &'static str, id: String },

    #[error("Missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),

    #[error("Invalid value: {0}")]
    Invalid(String),
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// An entity stored in a repository.
pub trait Record: Clone {
    /// Name used in error messages
    const KIND: &'static str;

    fn id(&self) -> &str;
}

/// Filter and ordering for one page's list.
pub trait Query<T> {
    fn matches(&self, item: &T) -> bool;

    /// Reorder matching items. Default keeps insertion order.
    fn sort(&self, _items: &mut [&T]) {}
}

/// Every item matches.
#[derive(Debug, Clone, Copy, Default)]
pub struct All;

impl<T> Query<T> for All {
    fn matches(&self, _item: &T) -> bool {
        true
    }
}

/// Insertion-ordered store with sequential ids (`PT001`, `LJ002`, ...).
#[derive(Debug, Clone)]
pub struct Repository<T: Record> {
    items: Vec<T>,
    prefix: &'static str,
    width: usize,
}

impl<T: Record> Repository<T> {
    /// Empty repository minting ids as `prefix` plus a zero-padded number.
    pub fn new(prefix: &'static str, width: usize) -> Self {
        Self {
            items: Vec::new(),
            prefix,
            width,
        }
    }

    pub fn with_items(prefix: &'static str, width: usize, items: Vec<T>) -> Self {
        Self {
            items,
            prefix,
            width,
        }
    }

    pub fn list(&self) -> &[T] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&T> {
        self.items.iter().find(|item| item.id() == id)
    }

    pub fn filter<Q: Query<T>>(&self, query: &Q) -> Vec<&T> {
        let mut matched: Vec<&T> = self.items.iter().filter(|i| query.matches(i)).collect();
        query.sort(&mut matched);
        matched
    }

    pub fn count<Q: Query<T>>(&self, query: &Q) -> usize {
        self.items.iter().filter(|i| query.matches(i)).count()
    }

    /// Next id after the highest numbered one in use.
    pub fn next_id(&self) -> String {
        let next = self
            .items
            .iter()
            .filter_map(|item| item.id().strip_prefix(self.prefix))
            .filter_map(|digits| digits.parse::<u32>().ok())
            .max()
            .unwrap_or(0)
            + 1;
        format!("{}{:0width$}", self.prefix, next, width = self.width)
    }

    /// Build an item around a fresh id and append it.
    pub fn create(&mut self, build: impl FnOnce(String) -> T) -> RepositoryResult<&T> {
        let item = build(self.next_id());
        self.insert(item)
    }

    pub fn insert(&mut self, item: T) -> RepositoryResult<&T> {
        if self.get(item.id()).is_some() {
            return Err(RepositoryError::Duplicate {
                kind: T::KIND,
                id: item.id().to_string(),
            });
        }
        self.items.push(item);
        Ok(&self.items[self.items.len() - 1])
    }

    /// Apply `change` to the item in place. The id cannot change.
    pub fn update<F>(&mut self, id: &str, change: F) -> RepositoryResult<&T>
    where
        F: FnOnce(&mut T) -> RepositoryResult<()>,
    {
        let item = self
            .items
            .iter_mut()
            .find(|item| item.id() == id)
            .ok_or_else(|| RepositoryError::NotFound {
                kind: T::KIND,
                id: id.to_string(),
            })?;

        let mut updated = item.clone();
        change(&mut updated)?;
        if updated.id() != id {
            return Err(RepositoryError::Invalid(format!("{} id cannot change", T::KIND)));
        }
        *item = updated;
        Ok(&*item)
    }

    pub fn remove(&mut self, id: &str) -> RepositoryResult<T> {
        let index = self
            .items
            .iter()
            .position(|item| item.id() == id)
            .ok_or_else(|| RepositoryError::NotFound {
                kind: T::KIND,
                id: id.to_string(),
            })?;
        Ok(self.items.remove(index))
    }
}
