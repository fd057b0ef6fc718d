//! Lookup source implementations

use super::{LookupRecord, LookupSource};
use crate::network::{ApiClient, ApiError};
use crate::services::{entities, fetch_page, Page};
use async_trait::async_trait;

/// Trait for remote lookup resources
#[async_trait]
pub trait LookupService: Send + Sync {
    /// Source this service answers for
    fn source(&self) -> LookupSource;

    /// Resource path of the listing
    fn path(&self) -> &'static str;

    /// Fetch one page of records matching `filter`
    async fn search(
        &self,
        client: &ApiClient,
        page: u32,
        filter: &str,
        page_size: u32,
    ) -> Result<Page<LookupRecord>, ApiError> {
        fetch_page(client, self.path(), page, filter, page_size).await
    }
}

/// Get the service behind a source
pub fn resolve(source: LookupSource) -> &'static dyn LookupService {
    match source {
        LookupSource::Regions => &Regions,
        LookupSource::Categories => &Categories,
        LookupSource::Entities => &Entities,
        LookupSource::ServiceOrderTypes => &ServiceOrderTypes,
        LookupSource::AssistanceTypes => &AssistanceTypes,
        LookupSource::Products => &Products,
    }
}

/// Regions (`api/regioes`)
pub struct Regions;

#[async_trait]
impl LookupService for Regions {
    fn source(&self) -> LookupSource {
        LookupSource::Regions
    }

    fn path(&self) -> &'static str {
        "api/regioes"
    }
}

/// Entity categories
pub struct Categories;

#[async_trait]
impl LookupService for Categories {
    fn source(&self) -> LookupSource {
        LookupSource::Categories
    }

    fn path(&self) -> &'static str {
        "api/categorias"
    }
}

/// Prospect entities, reusing the entities listing
pub struct Entities;

#[async_trait]
impl LookupService for Entities {
    fn source(&self) -> LookupSource {
        LookupSource::Entities
    }

    fn path(&self) -> &'static str {
        entities::PATH
    }

    async fn search(
        &self,
        client: &ApiClient,
        page: u32,
        filter: &str,
        page_size: u32,
    ) -> Result<Page<LookupRecord>, ApiError> {
        let page = entities::list(client, page, filter, page_size).await?;
        Ok(page.map(|entity| LookupRecord {
            code: entity.code,
            name: entity.name,
        }))
    }
}

/// Work order types
pub struct ServiceOrderTypes;

#[async_trait]
impl LookupService for ServiceOrderTypes {
    fn source(&self) -> LookupSource {
        LookupSource::ServiceOrderTypes
    }

    fn path(&self) -> &'static str {
        "types-service-order"
    }
}

/// Contract assistance types
pub struct AssistanceTypes;

#[async_trait]
impl LookupService for AssistanceTypes {
    fn source(&self) -> LookupSource {
        LookupSource::AssistanceTypes
    }

    fn path(&self) -> &'static str {
        "types-assistance"
    }
}

/// Products
pub struct Products;

#[async_trait]
impl LookupService for Products {
    fn source(&self) -> LookupSource {
        LookupSource::Products
    }

    fn path(&self) -> &'static str {
        "products"
    }
}
