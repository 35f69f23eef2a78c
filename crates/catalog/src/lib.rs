//! Client for the remote Product catalog service.
//!
//! Products are validated in a single batched request/response call. Any
//! transport or remote failure collapses into [`CatalogError::Unavailable`];
//! the caller cannot distinguish "product not found" from "service
//! unreachable".

pub mod error;
pub mod http;
pub mod memory;
pub mod rpc;
pub mod validator;

pub use error::{CatalogError, Result};
pub use http::HttpTransport;
pub use memory::InMemoryCatalog;
pub use rpc::{RequestTransport, RpcProductValidator, TransportError, VALIDATE_PRODUCTS};
pub use validator::{Product, ProductValidator};
