//! Result envelopes and dynamic query shaping.
//!
//! The [`types`] module holds the outcome vocabulary ([`Envelope`],
//! [`ListEnvelope`] and the code domains they are generic over). The
//! [`query`] module turns a [`ListFilter`] into a filter / order / paginate
//! plan over any [`QuerySource`].

mod errors;
pub mod http;
pub mod query;
pub mod types;
pub use self::errors::Error;
pub use self::http::IntoHttpResponse;
pub use self::query::{
    shape, shape_list, Accessor, ListFilter, PageWindow, QueryPlan, QuerySource, Schema,
    SchemaBuilder, Shaped, SortDirection, SortKey, Sortable,
};
pub use self::types::{
    CodeDomain, Envelope, HttpStatus, ListEnvelope, Response, StatusResponse, SymbolicCode,
    SymbolicResponse, ValidationErrors,
};
