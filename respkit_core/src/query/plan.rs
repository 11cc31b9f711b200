//! Query shaping: search filter, count, dynamic ordering, pagination.

use std::fmt;

use super::filter::{ListFilter, SortDirection};
use super::schema::{Accessor, Schema, Sortable};
use super::source::QuerySource;
use crate::types::{CodeDomain, ListEnvelope};
use crate::Error;

/// Skip/take window derived from a 1-based page index and a page size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub page_index: i64,
    pub page_size: i64,
    pub skip: usize,
    pub take: usize,
}

impl PageWindow {
    /// A non-positive index or size yields an empty window.
    pub fn new(page_index: i64, page_size: i64) -> Self {
        if page_index <= 0 || page_size <= 0 {
            tracing::warn!(
                "page index {} / size {} out of range, returning an empty page",
                page_index,
                page_size
            );
            return Self {
                page_index,
                page_size,
                skip: 0,
                take: 0,
            };
        }
        let skip = (page_index - 1).saturating_mul(page_size);
        Self {
            page_index,
            page_size,
            skip: usize::try_from(skip).unwrap_or(usize::MAX),
            take: usize::try_from(page_size).unwrap_or(usize::MAX),
        }
    }
}

struct SortOrder<T> {
    path: String,
    key: Accessor<T>,
    direction: SortDirection,
}

/// A resolved filter, ready to apply to any [`QuerySource`] of `T`.
///
/// Resolution happens up front, so an unknown sort path fails before the
/// source is touched.
pub struct QueryPlan<T> {
    search: Option<String>,
    order: Option<SortOrder<T>>,
    window: Option<PageWindow>,
}

impl<T: Sortable> QueryPlan<T> {
    pub fn from_filter(filter: &ListFilter) -> Result<Self, Error> {
        Self::with_schema(filter, T::schema())
    }
}

impl<T: 'static> QueryPlan<T> {
    /// Resolves `filter` against an explicit schema.
    pub fn with_schema(filter: &ListFilter, schema: &Schema<T>) -> Result<Self, Error> {
        let order = match filter.sort_by_column() {
            Some(path) => Some(SortOrder {
                path: path.to_string(),
                key: schema.resolve(path)?,
                direction: filter.direction(),
            }),
            None => None,
        };
        let window = filter
            .pagination()
            .map(|(page_index, page_size)| PageWindow::new(page_index, page_size));
        let plan = Self {
            search: filter.search().map(str::to_lowercase),
            order,
            window,
        };
        tracing::debug!("resolved query plan for {}: {:?}", schema.type_name(), plan);
        Ok(plan)
    }
}

impl<T> QueryPlan<T> {
    pub fn window(&self) -> Option<PageWindow> {
        self.window
    }

    pub fn sort_path(&self) -> Option<&str> {
        self.order.as_ref().map(|o| o.path.as_str())
    }

    /// Runs the plan: search, count, order, paginate.
    ///
    /// `search_by` projects the text the search term is matched against,
    /// case-insensitively.
    pub fn apply<S, F>(&self, source: S, search_by: F) -> Shaped<S>
    where
        S: QuerySource<Item = T>,
        F: Fn(&T) -> &str,
    {
        let mut source = source;
        if let Some(term) = &self.search {
            source = source.filter(|item| search_by(item).to_lowercase().contains(term.as_str()));
        }
        let total = source.count();
        if let Some(order) = &self.order {
            source = source.order_by(&order.key, order.direction);
        }
        if let Some(window) = self.window {
            source = source.skip(window.skip).take(window.take);
        }
        Shaped {
            source,
            total,
            window: self.window,
        }
    }
}

impl<T> fmt::Debug for QueryPlan<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QueryPlan")
            .field("search", &self.search)
            .field(
                "order",
                &self.order.as_ref().map(|o| (o.path.as_str(), o.direction)),
            )
            .field("window", &self.window)
            .finish()
    }
}

/// A shaped source plus the match count taken before pagination.
pub struct Shaped<S> {
    pub source: S,
    pub total: usize,
    pub window: Option<PageWindow>,
}

impl<S: QuerySource> Shaped<S> {
    /// Materializes the source into a list envelope echoing the page window.
    pub fn into_list<C: CodeDomain>(self) -> ListEnvelope<S::Item, C> {
        let items = self.source.to_list();
        let total = i64::try_from(self.total).unwrap_or(i64::MAX);
        match self.window {
            Some(w) => ListEnvelope::paginated(items, total, w.page_index, w.page_size),
            None => ListEnvelope::with_total(items, total),
        }
    }
}

/// Resolves `filter` for `S::Item` and applies it to `source`.
pub fn shape<S, F>(source: S, filter: &ListFilter, search_by: F) -> Result<Shaped<S>, Error>
where
    S: QuerySource,
    S::Item: Sortable,
    F: Fn(&S::Item) -> &str,
{
    let plan = QueryPlan::<S::Item>::from_filter(filter)?;
    Ok(plan.apply(source, search_by))
}

/// [`shape`] followed by materialization into a [`ListEnvelope`].
pub fn shape_list<S, F, C>(
    source: S,
    filter: &ListFilter,
    search_by: F,
) -> Result<ListEnvelope<S::Item, C>, Error>
where
    S: QuerySource,
    S::Item: Sortable,
    F: Fn(&S::Item) -> &str,
    C: CodeDomain,
{
    Ok(shape(source, filter, search_by)?.into_list())
}
