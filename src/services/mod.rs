//! Thin wrappers over the console's REST resources
//!
//! Each wrapper maps one resource path to typed listing and create calls.

pub mod entities;
pub mod work_orders;

use crate::network::{ApiClient, ApiError};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// One page of a remote listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    /// Rows of the page
    pub data: Vec<T>,
    /// Total row count reported by the API
    pub total_count: u64,
}

impl<T> Page<T> {
    pub fn new(data: Vec<T>, total_count: u64) -> Self {
        Self { data, total_count }
    }

    /// Map the rows, keeping the total
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            data: self.data.into_iter().map(f).collect(),
            total_count: self.total_count,
        }
    }
}

/// Reply of a create call
#[derive(Debug, Deserialize)]
struct Created {
    id: Option<u64>,
}

/// Fetch one page of `path`, filtered by `filter`
pub(crate) async fn fetch_page<T: DeserializeOwned>(
    client: &ApiClient,
    path: &str,
    page: u32,
    filter: &str,
    page_size: u32,
) -> Result<Page<T>, ApiError> {
    let params = vec![
        ("filter".to_string(), filter.to_string()),
        ("page".to_string(), page.max(1).to_string()),
    ];
    let response = client.get_with_params(path, params).await?.ensure_success()?;
    let data: Vec<T> = response.json()?;
    let total_count = response.total_count(u64::from(page_size));
    Ok(Page::new(data, total_count))
}

/// POST `body` to `path` and return the id of the created record
pub(crate) async fn create_record<B: Serialize + ?Sized>(
    client: &ApiClient,
    path: &str,
    body: &B,
) -> Result<u64, ApiError> {
    let response = client.post_json(path, body).await?.ensure_success()?;
    let created: Created = response.json()?;
    created
        .id
        .ok_or_else(|| ApiError::MissingBody(path.to_string()))
}
