//! API access from the browser

pub mod client;

pub use client::{provide_api_client, use_api, BrowserTransport};
