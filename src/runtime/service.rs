//! In-memory CRUD service with injected sort and search policies.
//!
//! This is the executable form of the contract the generated C# services
//! follow: a persistence gateway composed with a sort policy and a search
//! policy. Instead of overriding service methods, callers swap the policies.
//!
//! ```rust
//! use std::time::SystemTime;
//! use minionsuite::runtime::{ContainsSearch, CrudService, Entity, FieldSort};
//!
//! #[derive(Debug, Clone)]
//! struct Post {
//!     id: u32,
//!     title: String,
//! }
//!
//! impl Entity for Post {
//!     type Key = u32;
//!     fn key(&self) -> u32 {
//!         self.id
//!     }
//! }
//!
//! let mut posts = CrudService::new(
//!     FieldSort::new().by("Title", |p: &Post| p.title.clone()),
//!     ContainsSearch::new().field(|p: &Post| p.title.as_str()),
//! );
//! posts.create(Post { id: 1, title: "Hello".into() });
//! posts.create(Post { id: 2, title: "World".into() });
//!
//! let page = posts.search_page("o", 1, 1, "Title", false);
//! assert_eq!(page.total_items(), 2);
//! assert_eq!(page.items()[0].title, "World");
//! ```

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;
use std::time::SystemTime;

use tracing::debug;

use super::page::PageModel;
use super::result::ResultModel;

/// Message of the failure returned when updating a missing entity
pub const NOT_FOUND_MESSAGE: &str = "The entity was not found.";

/// Message of the failure returned when creating an entity whose key is taken
pub const DUPLICATE_KEY_MESSAGE: &str = "An entity with the same key already exists.";

/// A persistable record with a unique key
pub trait Entity: Clone {
    /// Key type; entities are stored and default-ordered by it
    type Key: Ord + Clone + fmt::Debug;

    /// The entity's key
    fn key(&self) -> Self::Key;

    /// Called before a new entity is stored, e.g. to stamp `CreatedAt`/`UpdatedAt`
    fn on_create(&mut self, _now: SystemTime) {}

    /// Called before an update replaces `previous`, e.g. to keep `CreatedAt` and stamp `UpdatedAt`
    fn on_update(&mut self, _previous: &Self, _now: SystemTime) {}
}

/// Orders a result set by a named field
pub trait SortPolicy<E> {
    /// Sort `items` in place by `field`
    ///
    /// Unknown or empty field names fall back to key order in the requested
    /// direction.
    fn sort(&self, items: &mut [E], field: &str, ascending: bool);
}

/// Decides whether an entity matches a search term
pub trait SearchPolicy<E> {
    /// True when `entity` matches `term`
    fn matches(&self, entity: &E, term: &str) -> bool;
}

type Comparator<E> = Box<dyn Fn(&E, &E) -> Ordering>;

/// Sort policy with one comparator per field name
///
/// A known field orders by that field in the requested direction, then by key
/// ascending. Anything else orders by key alone.
pub struct FieldSort<E> {
    fields: Vec<(String, Comparator<E>)>,
}

impl<E> FieldSort<E> {
    /// A policy that only knows the key order
    pub fn new() -> Self {
        FieldSort { fields: Vec::new() }
    }

    /// Register `name`, ordered by the value `accessor` extracts
    pub fn by<K, A>(mut self, name: impl Into<String>, accessor: A) -> Self
    where
        K: Ord,
        A: Fn(&E) -> K + 'static,
    {
        self.fields
            .push((name.into(), Box::new(move |a, b| accessor(a).cmp(&accessor(b)))));
        self
    }

    /// Registered field names in registration order
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(name, _)| name.as_str())
    }
}

impl<E> Default for FieldSort<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Entity> SortPolicy<E> for FieldSort<E> {
    fn sort(&self, items: &mut [E], field: &str, ascending: bool) {
        let direction = |ordering: Ordering| {
            if ascending {
                ordering
            } else {
                ordering.reverse()
            }
        };
        match self.fields.iter().find(|(name, _)| name == field) {
            Some((_, compare)) => items.sort_by(|a, b| {
                direction(compare(a, b)).then_with(|| a.key().cmp(&b.key()))
            }),
            None => items.sort_by(|a, b| direction(a.key().cmp(&b.key()))),
        }
    }
}

type TextAccessor<E> = Box<dyn Fn(&E) -> &str>;

/// Search policy matching when any registered text field contains the term
pub struct ContainsSearch<E> {
    fields: Vec<TextAccessor<E>>,
}

impl<E> ContainsSearch<E> {
    /// A policy with no searchable fields; nothing matches
    pub fn new() -> Self {
        ContainsSearch { fields: Vec::new() }
    }

    /// Add a searchable text field
    pub fn field<A>(mut self, accessor: A) -> Self
    where
        A: Fn(&E) -> &str + 'static,
    {
        self.fields.push(Box::new(accessor));
        self
    }
}

impl<E> Default for ContainsSearch<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> SearchPolicy<E> for ContainsSearch<E> {
    fn matches(&self, entity: &E, term: &str) -> bool {
        self.fields.iter().any(|field| field(entity).contains(term))
    }
}

/// CRUD operations over an in-memory store
///
/// Each call is independent; the service holds no state besides the store.
pub struct CrudService<E: Entity, S, F> {
    store: BTreeMap<E::Key, E>,
    sort: S,
    search: F,
}

impl<E, S, F> CrudService<E, S, F>
where
    E: Entity,
    S: SortPolicy<E>,
    F: SearchPolicy<E>,
{
    /// An empty service using the given policies
    pub fn new(sort: S, search: F) -> Self {
        CrudService {
            store: BTreeMap::new(),
            sort,
            search,
        }
    }

    /// Store a new entity after its create hook ran
    ///
    /// Fails when the key is already taken.
    pub fn create(&mut self, mut entity: E) -> ResultModel<E> {
        let key = entity.key();
        if self.store.contains_key(&key) {
            return ResultModel::failure(DUPLICATE_KEY_MESSAGE);
        }
        entity.on_create(SystemTime::now());
        debug!(key = ?key, "entity created");
        self.store.insert(key, entity.clone());
        ResultModel::success(entity)
    }

    /// Remove the entity with `key`; false when there was none
    pub fn delete(&mut self, key: &E::Key) -> bool {
        let removed = self.store.remove(key).is_some();
        debug!(key = ?key, removed, "entity delete");
        removed
    }

    /// The entity with `key`, if any
    pub fn get(&self, key: &E::Key) -> Option<E> {
        self.store.get(key).cloned()
    }

    /// Every entity in key order
    pub fn get_all(&self) -> Vec<E> {
        self.store.values().cloned().collect()
    }

    /// One sorted page of all entities
    pub fn get_page(
        &self,
        page: i64,
        page_size: usize,
        sort_field: &str,
        ascending: bool,
    ) -> PageModel<E> {
        let mut items = self.get_all();
        self.sort.sort(&mut items, sort_field, ascending);
        PageModel::create(&items, page, page_size, sort_field, ascending)
    }

    /// Every entity matching `term`, in key order
    pub fn search(&self, term: &str) -> Vec<E> {
        self.store
            .values()
            .filter(|entity| self.search.matches(entity, term))
            .cloned()
            .collect()
    }

    /// One sorted page of the entities matching `term`
    pub fn search_page(
        &self,
        term: &str,
        page: i64,
        page_size: usize,
        sort_field: &str,
        ascending: bool,
    ) -> PageModel<E> {
        let mut items = self.search(term);
        self.sort.sort(&mut items, sort_field, ascending);
        PageModel::create(&items, page, page_size, sort_field, ascending)
    }

    /// Replace the stored entity with the same key after its update hook ran
    ///
    /// A missing key is reported as a failed result, not a panic.
    pub fn update(&mut self, mut entity: E) -> ResultModel<E> {
        let key = entity.key();
        let Some(previous) = self.store.get(&key) else {
            return ResultModel::failure(NOT_FOUND_MESSAGE);
        };
        entity.on_update(previous, SystemTime::now());
        debug!(key = ?key, "entity updated");
        self.store.insert(key, entity.clone());
        ResultModel::success(entity)
    }

    /// Number of stored entities
    pub fn len(&self) -> usize {
        self.store.len()
    }

    /// True when nothing is stored
    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }
}
