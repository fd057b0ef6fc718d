//! HTTP networking module
//!
//! Provides the client used to reach the console's REST API.

mod client;
mod error;
mod request;

pub use client::ApiClient;
pub use error::ApiError;
pub use request::{ApiRequest, ApiResponse, HttpMethod, TOTAL_COUNT_HEADER};
