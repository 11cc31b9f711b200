mod code;
pub use self::code::{CodeDomain, HttpStatus, SymbolicCode};

mod envelope;
pub use self::envelope::{Envelope, Response, StatusResponse, SymbolicResponse};

mod list;
pub use self::list::ListEnvelope;

mod validation;
pub use self::validation::ValidationErrors;
