mod error;
mod log;
pub mod midware;
pub mod origin;
pub mod routes;
pub mod types;

pub use error::{ClientError, Error, ErrorBody, WebResult};
pub use origin::OriginFilter;

pub const REQUEST_ID_HEADER: &str = "x-request-id";
