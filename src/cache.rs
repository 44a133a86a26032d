//! Client-side cache for remote query results.
//!
//! Each logical query (the session user, the testimonial list) owns one
//! [`Query`] slot. Mutations never edit a cached value in place; they
//! invalidate the slot after the server confirms the mutation, and the
//! next read-through refetches.

/// Cached state of a single remote query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Query<T> {
    /// Never fetched (or explicitly cleared).
    Empty,
    /// Last fetch succeeded and no mutation has invalidated it since.
    Fresh(T),
    /// A mutation invalidated the slot; the last value is retained for
    /// display until the next refetch.
    Stale(T),
}

impl<T> Query<T> {
    /// The cached value, fresh or stale.
    pub fn value(&self) -> Option<&T> {
        match self {
            Query::Empty => None,
            Query::Fresh(v) | Query::Stale(v) => Some(v),
        }
    }

    /// True only when a refetch is unnecessary.
    pub fn is_fresh(&self) -> bool {
        matches!(self, Query::Fresh(_))
    }

    /// Record a freshly fetched value.
    pub fn prime(&mut self, value: T) {
        *self = Query::Fresh(value);
    }

    /// Mark the slot stale. A slot with no value stays empty.
    pub fn invalidate(&mut self) {
        let old = std::mem::replace(self, Query::Empty);
        *self = match old {
            Query::Fresh(v) | Query::Stale(v) => Query::Stale(v),
            Query::Empty => Query::Empty,
        };
    }

    /// Drop the cached value entirely.
    pub fn clear(&mut self) {
        *self = Query::Empty;
    }
}

impl<T> Default for Query<T> {
    fn default() -> Self {
        Query::Empty
    }
}
