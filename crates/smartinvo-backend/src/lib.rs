//! REST client for the smartinvo prediction service.
//!
//! The [`Backend`] trait is the seam every coordinator talks through;
//! [`HttpBackend`] is the production implementation over `reqwest`.

pub mod error;
pub mod http;
pub mod operation;
pub mod traits;

pub use error::{Result, ServiceError, upstream_message};
pub use http::{DEFAULT_TIMEOUT, HttpBackend, normalize_base_url};
pub use operation::{Method, Operation};
pub use traits::{Backend, decode_body};
