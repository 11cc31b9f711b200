mod filter;
pub use self::filter::{ListFilter, SortDirection};

mod key;
pub use self::key::SortKey;

mod schema;
pub use self::schema::{Accessor, Schema, SchemaBuilder, Sortable};

mod source;
pub use self::source::QuerySource;

mod plan;
pub use self::plan::{shape, shape_list, PageWindow, QueryPlan, Shaped};
