//! REST client for the CloudBees feature management API

pub mod client;
#[cfg(test)]
pub(crate) mod stub;
pub mod transport;

pub use client::ApiClient;
pub use transport::{ApiRequest, HttpTransport, Transport, DEFAULT_API_URL};
