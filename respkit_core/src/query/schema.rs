//! Per-type registries mapping sort paths to typed accessors.
//!
//! A record type opts into dynamic ordering by implementing [`Sortable`] and
//! returning a [`Schema`] built once at startup. Resolving `"address.city"`
//! walks the schema of each type reached along the path and composes the
//! registered getters into a single [`Accessor`]. Paths that are not in the
//! registry fail with [`Error::UnknownSortField`]; there is no reflection.

use std::sync::Arc;

use super::key::SortKey;
use crate::Error;

/// Reads an ordering key out of a record.
pub type Accessor<T> = Arc<dyn Fn(&T) -> SortKey + Send + Sync>;

type NestedResolver<T> = Box<dyn Fn(&str, &[&str]) -> Result<Accessor<T>, Error> + Send + Sync>;

enum Field<T> {
    Value(Accessor<T>),
    Nested(NestedResolver<T>),
}

/// A record type with a registered sort schema.
pub trait Sortable: Sized + 'static {
    fn schema() -> &'static Schema<Self>;
}

/// The closed set of sortable fields of `T`.
pub struct Schema<T> {
    type_name: &'static str,
    fields: Vec<(&'static str, Field<T>)>,
}

impl<T: 'static> Schema<T> {
    pub fn builder(type_name: &'static str) -> SchemaBuilder<T> {
        SchemaBuilder {
            schema: Schema {
                type_name,
                fields: Vec::new(),
            },
        }
    }

    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Registered top-level field names, in registration order.
    pub fn field_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields.iter().map(|(name, _)| *name)
    }

    /// Resolves a dot-separated path to an accessor.
    pub fn resolve(&self, path: &str) -> Result<Accessor<T>, Error> {
        let segments: Vec<&str> = path.split('.').collect();
        self.resolve_segments(path, &segments)
    }

    fn resolve_segments(&self, path: &str, segments: &[&str]) -> Result<Accessor<T>, Error> {
        let unknown = |segment: &str| Error::UnknownSortField {
            path: path.to_string(),
            segment: segment.to_string(),
            type_name: self.type_name,
        };

        let Some((head, rest)) = segments.split_first() else {
            return Err(unknown(""));
        };
        let head = head.trim();
        let field = self
            .fields
            .iter()
            .find(|(name, _)| same_name(name, head))
            .map(|(_, field)| field)
            .ok_or_else(|| unknown(head))?;

        match field {
            Field::Value(accessor) => match rest.first() {
                None => Ok(Arc::clone(accessor)),
                // a plain value has no fields to descend into
                Some(next) => Err(unknown(next.trim())),
            },
            // a nested record is not itself an ordering key
            Field::Nested(_) if rest.is_empty() => Err(unknown(head)),
            Field::Nested(resolve) => resolve(path, rest),
        }
    }
}

/// Builds a [`Schema`] field by field.
pub struct SchemaBuilder<T> {
    schema: Schema<T>,
}

impl<T: 'static> SchemaBuilder<T> {
    fn push(mut self, name: &'static str, field: Field<T>) -> Self {
        debug_assert!(
            !self.schema.fields.iter().any(|(n, _)| same_name(n, name)),
            "duplicate sort field {} on {}",
            name,
            self.schema.type_name
        );
        self.schema.fields.push((name, field));
        self
    }

    /// Registers a field whose value converts into a [`SortKey`].
    pub fn field<K, F>(self, name: &'static str, get: F) -> Self
    where
        K: Into<SortKey>,
        F: Fn(&T) -> K + Send + Sync + 'static,
    {
        self.push(
            name,
            Field::Value(Arc::new(move |record: &T| get(record).into())),
        )
    }

    /// Registers a borrowed text field.
    pub fn text<F>(self, name: &'static str, get: F) -> Self
    where
        F: Fn(&T) -> &str + Send + Sync + 'static,
    {
        self.push(
            name,
            Field::Value(Arc::new(move |record: &T| {
                SortKey::Text(get(record).to_string())
            })),
        )
    }

    /// Registers a nested record; paths continue into `U`'s schema.
    pub fn nested<U, F>(self, name: &'static str, get: F) -> Self
    where
        U: Sortable,
        F: Fn(&T) -> &U + Send + Sync + 'static,
    {
        let get = Arc::new(get);
        self.push(
            name,
            Field::Nested(Box::new(move |path: &str, rest: &[&str]| {
                let inner = U::schema().resolve_segments(path, rest)?;
                let get = Arc::clone(&get);
                let accessor: Accessor<T> = Arc::new(move |record: &T| inner(get(record)));
                Ok(accessor)
            })),
        )
    }

    /// Registers an optional nested record; a missing record sorts as null.
    pub fn nested_opt<U, F>(self, name: &'static str, get: F) -> Self
    where
        U: Sortable,
        F: Fn(&T) -> Option<&U> + Send + Sync + 'static,
    {
        let get = Arc::new(get);
        self.push(
            name,
            Field::Nested(Box::new(move |path: &str, rest: &[&str]| {
                let inner = U::schema().resolve_segments(path, rest)?;
                let get = Arc::clone(&get);
                let accessor: Accessor<T> =
                    Arc::new(move |record: &T| get(record).map_or(SortKey::Null, |u| inner(u)));
                Ok(accessor)
            })),
        )
    }

    pub fn build(self) -> Schema<T> {
        self.schema
    }
}

/// Segment comparison ignoring ASCII case and underscores, so `yearFounded`,
/// `YearFounded` and `year_founded` name the same field.
fn same_name(registered: &str, requested: &str) -> bool {
    let fold = |s: &str| {
        s.chars()
            .filter(|c| *c != '_')
            .map(|c| c.to_ascii_lowercase())
            .collect::<String>()
    };
    !requested.is_empty() && fold(registered) == fold(requested)
}
