//! HTTP Client Shim
//!
//! Everything that talks to the remote campus API.
//!
//! ## Architecture
//!
//! - **Transport**: trait seam carrying one request to the remote API
//! - **HttpTransport**: reqwest implementation (native builds)
//! - **ApiClient**: typed operations for every endpoint
//! - **paths**: endpoint path builders, shared with the browser front end

mod client;
mod error;
#[cfg(feature = "native")]
mod http;
pub mod paths;
mod transport;

pub use client::ApiClient;
pub use error::{error_detail, ClientError, ClientResult};
#[cfg(feature = "native")]
pub use http::{HttpTransport, REQUEST_ID_HEADER};
pub use transport::{ApiRequest, ApiResponse, Method, Transport};
