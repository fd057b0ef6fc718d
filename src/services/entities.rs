//! Prospect entities (`/entities`)

use super::{create_record, fetch_page, Page};
use crate::network::{ApiClient, ApiError};
use serde::{Deserialize, Serialize};

/// Resource path of the entities endpoint
pub const PATH: &str = "/entities";

/// Entity row as listed by the API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityListing {
    #[serde(default)]
    pub id: u64,
    #[serde(rename = "Codigo")]
    pub code: String,
    #[serde(rename = "Nome")]
    pub name: String,
}

/// Payload of a new entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewEntity {
    #[serde(rename = "Nome")]
    pub name: String,
    #[serde(rename = "CodigoRegiao")]
    pub region_code: String,
}

/// List entities
pub async fn list(
    client: &ApiClient,
    page: u32,
    filter: &str,
    page_size: u32,
) -> Result<Page<EntityListing>, ApiError> {
    fetch_page(client, PATH, page, filter, page_size).await
}

/// Create an entity, returning its id
pub async fn create(client: &ApiClient, entity: &NewEntity) -> Result<u64, ApiError> {
    create_record(client, PATH, entity).await
}
