//! Response envelope building blocks.
//!
//! Normalizes handler outputs (error codes, bare messages, success payloads)
//! into the `{ code, message, data[, pagination] }` envelope and computes the
//! pagination block attached to list results. Everything here is pure; the
//! transport side lives in `envelope-api`.

pub mod codes;
pub mod coerce;
pub mod envelope;
pub mod error;
pub mod pagination;

pub use codes::{CodeKind, ErrorCodeTable};
pub use envelope::{Input, Pagination, ResponseBuilder, ResponseEnvelope};
pub use error::CoreError;
pub use pagination::{PaginationBlock, Paginator, DEFAULT_PAGE_SIZE};
