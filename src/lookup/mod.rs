//! Remote lookups behind autocomplete fields
//!
//! Every lookup resource is a [`LookupSource`] variant, resolved to its service
//! by an exhaustive match. Sources given as text are parsed and rejected when
//! unknown.

mod sources;

pub use sources::{resolve, LookupService};

use crate::network::{ApiClient, ApiError};
use crate::services::Page;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use tracing::debug;

/// Lookup resources an autocomplete field can query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LookupSource {
    Regions,
    Categories,
    Entities,
    ServiceOrderTypes,
    AssistanceTypes,
    Products,
}

impl LookupSource {
    pub const ALL: [LookupSource; 6] = [
        LookupSource::Regions,
        LookupSource::Categories,
        LookupSource::Entities,
        LookupSource::ServiceOrderTypes,
        LookupSource::AssistanceTypes,
        LookupSource::Products,
    ];

    /// Name used in URLs and configuration
    pub fn as_str(&self) -> &'static str {
        match self {
            LookupSource::Regions => "regions",
            LookupSource::Categories => "categories",
            LookupSource::Entities => "entities",
            LookupSource::ServiceOrderTypes => "service-order-types",
            LookupSource::AssistanceTypes => "assistance-types",
            LookupSource::Products => "products",
        }
    }
}

impl fmt::Display for LookupSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LookupSource {
    type Err = LookupError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LookupSource::ALL
            .into_iter()
            .find(|source| source.as_str() == s)
            .ok_or_else(|| LookupError::UnknownSource(s.to_string()))
    }
}

/// Lookup errors
#[derive(Debug, Error)]
pub enum LookupError {
    #[error("unknown lookup source: {0}")]
    UnknownSource(String),

    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Record returned by a lookup resource
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LookupRecord {
    #[serde(rename = "Codigo")]
    pub code: String,
    #[serde(rename = "Nome")]
    pub name: String,
}

/// Display-ready projection of a lookup record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutocompleteOption {
    pub id: String,
    pub label: String,
}

impl From<LookupRecord> for AutocompleteOption {
    fn from(record: LookupRecord) -> Self {
        Self {
            label: format!("{} - {}", record.code, record.name),
            id: record.code,
        }
    }
}

/// Something that can answer lookups for any source
#[async_trait]
pub trait Lookup: Send + Sync {
    async fn lookup(
        &self,
        source: LookupSource,
        page: u32,
        filter: &str,
    ) -> Result<Page<LookupRecord>, LookupError>;
}

/// Lookups served by the REST API
#[derive(Clone)]
pub struct RemoteLookup {
    client: ApiClient,
    page_size: u32,
}

impl RemoteLookup {
    pub fn new(client: ApiClient, page_size: u32) -> Self {
        Self { client, page_size }
    }
}

#[async_trait]
impl Lookup for RemoteLookup {
    async fn lookup(
        &self,
        source: LookupSource,
        page: u32,
        filter: &str,
    ) -> Result<Page<LookupRecord>, LookupError> {
        debug!("Lookup {} page {} filter {:?}", source, page, filter);
        let page = resolve(source)
            .search(&self.client, page, filter, self.page_size)
            .await?;
        Ok(page)
    }
}

/// Fetch one page of options for `source`
pub async fn fetch_options(
    lookup: &dyn Lookup,
    source: LookupSource,
    page: u32,
    filter: &str,
) -> Result<Page<AutocompleteOption>, LookupError> {
    let page = lookup.lookup(source, page, filter).await?;
    Ok(page.map(AutocompleteOption::from))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_sources() {
        for source in LookupSource::ALL {
            assert_eq!(source.as_str().parse::<LookupSource>().unwrap(), source);
        }
    }

    #[test]
    fn test_unknown_source_is_rejected() {
        let err = "RegioesService".parse::<LookupSource>().unwrap_err();
        assert!(matches!(err, LookupError::UnknownSource(ref s) if s == "RegioesService"));
        assert!("".parse::<LookupSource>().is_err());
    }

    #[test]
    fn test_serde_names_match_as_str() {
        for source in LookupSource::ALL {
            let json = serde_json::to_string(&source).unwrap();
            assert_eq!(json, format!("\"{}\"", source.as_str()));
        }
    }

    #[test]
    fn test_option_label() {
        let record: LookupRecord =
            serde_json::from_str(r#"{"Codigo": "SP01", "Nome": "São Paulo Capital"}"#).unwrap();
        let option = AutocompleteOption::from(record);
        assert_eq!(option.id, "SP01");
        assert_eq!(option.label, "SP01 - São Paulo Capital");
    }
}
