//! Application state shared across handlers

use crate::autocomplete::FieldContext;
use crate::config::Settings;
use crate::lookup::{Lookup, RemoteLookup};
use crate::network::ApiClient;
use crate::notify::Notifier;
use std::sync::Arc;
use std::time::Duration;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Global settings
    pub settings: Arc<Settings>,
    /// REST API client
    pub client: ApiClient,
    /// Lookups behind the autocomplete inputs
    pub lookup: Arc<dyn Lookup>,
    /// Template renderer
    pub templates: Arc<super::Templates>,
}

impl AppState {
    /// Create new application state
    pub fn new(settings: Settings, client: ApiClient) -> anyhow::Result<Self> {
        let lookup = Arc::new(RemoteLookup::new(client.clone(), settings.ui.page_size));
        Self::with_lookup(settings, client, lookup)
    }

    /// Create state around a custom lookup
    pub fn with_lookup(
        settings: Settings,
        client: ApiClient,
        lookup: Arc<dyn Lookup>,
    ) -> anyhow::Result<Self> {
        Ok(Self {
            settings: Arc::new(settings),
            client,
            lookup,
            templates: Arc::new(super::Templates::new()?),
        })
    }

    /// Get instance name
    pub fn instance_name(&self) -> &str {
        &self.settings.general.instance_name
    }

    pub fn page_size(&self) -> u32 {
        self.settings.ui.page_size.max(1)
    }

    /// Context for mounting autocomplete fields against this state's lookups
    pub fn field_context(&self, notifier: Arc<dyn Notifier>) -> FieldContext {
        FieldContext::new(
            self.lookup.clone(),
            notifier,
            Duration::from_millis(self.settings.ui.debounce_ms),
        )
    }
}
