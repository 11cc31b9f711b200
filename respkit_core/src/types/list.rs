use serde::{Deserialize, Serialize};

use super::code::CodeDomain;
use super::envelope::Envelope;
use super::validation::ValidationErrors;
use crate::Error;

/// A page of items plus the metadata a client needs to page further.
///
/// Serializes flat: the envelope fields followed by `items`, `total`,
/// `pageIndex` and `pageSize`. Page metadata is echoed as given, never
/// validated; only `total` is raised to at least `items.len()`. The same
/// holds for deserialized lists, and a failure list never carries items.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[serde(bound(serialize = "T: Serialize", deserialize = "T: Deserialize<'de>"))]
#[serde(from = "RawListEnvelope<T, C>")]
pub struct ListEnvelope<T, C: CodeDomain = i32> {
    #[serde(flatten)]
    envelope: Envelope<(), C>,
    #[serde(default)]
    items: Vec<T>,
    total: i64,
    page_index: i64,
    page_size: i64,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
struct RawListEnvelope<T, C: CodeDomain> {
    #[serde(flatten)]
    envelope: Envelope<(), C>,
    #[serde(default)]
    items: Vec<T>,
    total: i64,
    page_index: i64,
    page_size: i64,
}

impl<T, C: CodeDomain> From<RawListEnvelope<T, C>> for ListEnvelope<T, C> {
    fn from(raw: RawListEnvelope<T, C>) -> Self {
        let items = if raw.envelope.is_success() {
            raw.items
        } else {
            Vec::new()
        };
        Self {
            envelope: raw.envelope,
            total: raise_total(raw.total, items.len()),
            items,
            page_index: raw.page_index,
            page_size: raw.page_size,
        }
    }
}

fn raise_total(total: i64, count: usize) -> i64 {
    let count = i64::try_from(count).unwrap_or(i64::MAX);
    if total < count {
        tracing::warn!("list total {} below item count {}, raising", total, count);
        count
    } else {
        total
    }
}

impl<T, C: CodeDomain> ListEnvelope<T, C> {
    /// Unpaginated result: `total` and `pageSize` echo the item count.
    pub fn new(items: Vec<T>) -> Self {
        let total = items.len() as i64;
        Self::with_total(items, total)
    }

    /// Unpaginated result with an explicit pre-pagination total.
    pub fn with_total(items: Vec<T>, total: i64) -> Self {
        let page_size = items.len() as i64;
        Self::paginated(items, total, 1, page_size)
    }

    /// A real page: `page_index` is 1-based.
    pub fn paginated(items: Vec<T>, total: i64, page_index: i64, page_size: i64) -> Self {
        Self {
            envelope: Envelope::ok(),
            total: raise_total(total, items.len()),
            items,
            page_index,
            page_size,
        }
    }

    /// A failure list: no items, zero total.
    pub fn failure<U>(envelope: Envelope<U, C>) -> Self {
        Self {
            envelope: envelope.without_data(),
            items: Vec::new(),
            total: 0,
            page_index: 1,
            page_size: 0,
        }
    }

    pub fn envelope(&self) -> &Envelope<(), C> {
        &self.envelope
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn into_items(self) -> Vec<T> {
        self.items
    }

    pub fn total(&self) -> i64 {
        self.total
    }

    pub fn page_index(&self) -> i64 {
        self.page_index
    }

    pub fn page_size(&self) -> i64 {
        self.page_size
    }

    /// Number of pages at the current page size; 0 when the size is not positive.
    pub fn total_pages(&self) -> i64 {
        if self.page_size <= 0 {
            return 0;
        }
        (self.total + self.page_size - 1) / self.page_size
    }

    pub fn has_next_page(&self) -> bool {
        self.page_size > 0 && self.page_index.saturating_mul(self.page_size) < self.total
    }

    pub fn is_success(&self) -> bool {
        self.envelope.is_success()
    }

    pub fn code(&self) -> &C {
        self.envelope.code()
    }

    pub fn message(&self) -> Option<&str> {
        self.envelope.message()
    }

    pub fn trace_id(&self) -> Option<&str> {
        self.envelope.trace_id()
    }

    pub fn ensure_success(&self) -> Result<(), Error> {
        self.envelope.ensure_success()
    }
}

impl<T: Clone, C: CodeDomain> ListEnvelope<T, C> {
    pub fn with_message(&self, message: impl Into<String>) -> Self {
        Self {
            envelope: self.envelope.with_message(message),
            ..self.clone()
        }
    }

    pub fn with_trace_id(&self, trace_id: impl Into<String>) -> Self {
        Self {
            envelope: self.envelope.with_trace_id(trace_id),
            ..self.clone()
        }
    }

    pub fn with_validation_errors(&self, errors: ValidationErrors) -> Self {
        Self {
            envelope: self.envelope.with_validation_errors(errors),
            ..self.clone()
        }
    }
}

impl<T, C: CodeDomain> From<Error> for ListEnvelope<T, C> {
    fn from(err: Error) -> Self {
        Self::failure(Envelope::<(), C>::from(err))
    }
}
