//! Request/response records and the handlers that answer them.
pub mod handlers;
pub mod requests;
pub mod responses;

pub use handlers::{OddsService, DEFAULT_SEED};
pub use requests::*;
pub use responses::*;
