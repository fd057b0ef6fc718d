//! Form-bound autocomplete field backed by a remote lookup

use crate::debounce::Debouncer;
use crate::forms::{FieldBinding, FormState};
use crate::lookup::{AutocompleteOption, Lookup, LookupError, LookupRecord, LookupSource};
use crate::notify::Notifier;
use crate::services::Page;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

/// Static description of a field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldConfig {
    /// Form field the selection is written to
    pub name: String,
    /// Text shown next to the input
    pub label: String,
    /// Lookup queried while typing
    pub source: LookupSource,
}

impl FieldConfig {
    pub fn new(name: impl Into<String>, label: impl Into<String>, source: LookupSource) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            source,
        }
    }
}

/// Collaborators shared by every field of a screen
#[derive(Clone)]
pub struct FieldContext {
    pub lookup: Arc<dyn Lookup>,
    pub notifier: Arc<dyn Notifier>,
    pub debounce: Duration,
}

impl FieldContext {
    pub fn new(lookup: Arc<dyn Lookup>, notifier: Arc<dyn Notifier>, debounce: Duration) -> Self {
        Self {
            lookup,
            notifier,
            debounce,
        }
    }
}

/// Lifecycle state of a field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldStatus {
    /// No lookup in flight
    Idle,
    /// The latest lookup has not answered yet
    Querying,
    /// The field was removed; nothing is applied anymore
    Unmounted,
}

/// Render snapshot of a field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldView {
    pub name: String,
    pub label: String,
    pub query: String,
    pub options: Vec<AutocompleteOption>,
    pub selected: Option<AutocompleteOption>,
    pub loading: bool,
    pub disabled: bool,
    pub error: Option<String>,
}

#[derive(Debug, Default)]
struct FieldState {
    query: String,
    options: Vec<AutocompleteOption>,
    loading: bool,
    external_loading: bool,
}

struct FieldShared {
    config: FieldConfig,
    binding: FieldBinding,
    lookup: Arc<dyn Lookup>,
    notifier: Arc<dyn Notifier>,
    state: Mutex<FieldState>,
    /// Generation of the most recently issued lookup
    latest: AtomicU64,
    /// Cancelled when the field is unmounted
    mounted: CancellationToken,
}

impl FieldShared {
    fn state(&self) -> MutexGuard<'_, FieldState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn is_current(&self, generation: u64) -> bool {
        !self.mounted.is_cancelled() && self.latest.load(Ordering::SeqCst) == generation
    }

    async fn run_query(self: Arc<Self>, text: String) {
        if self.mounted.is_cancelled() {
            return;
        }

        let generation = self.begin();
        let _loading = LoadingGuard {
            shared: &self,
            generation,
        };

        debug!(
            "Field {} lookup #{} on {} for {:?}",
            self.config.name, generation, self.config.source, text
        );

        let result = tokio::select! {
            biased;
            _ = self.mounted.cancelled() => {
                debug!("Field {} unmounted, dropping lookup #{}", self.config.name, generation);
                return;
            }
            result = self.lookup.lookup(self.config.source, 1, &text) => result,
        };

        if !self.apply(generation, result) {
            debug!("Field {} discarding stale lookup #{}", self.config.name, generation);
        }
    }

    /// Issue a new generation; bumps happen under the state lock
    fn begin(&self) -> u64 {
        let mut state = self.state();
        state.loading = true;
        self.latest.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Apply the outcome of lookup `generation`, returning false when it is stale
    fn apply(&self, generation: u64, result: Result<Page<LookupRecord>, LookupError>) -> bool {
        let mut state = self.state();
        if !self.is_current(generation) {
            return false;
        }
        match result {
            Ok(page) => {
                state.options = page.data.into_iter().map(AutocompleteOption::from).collect();
            }
            Err(e) => {
                drop(state);
                warn!("Lookup {} failed for field {}: {}", self.config.source, self.config.name, e);
                self.notifier.alert(&e.to_string());
            }
        }
        true
    }
}

/// Clears the loading flag when the lookup that set it ends, however it ends
struct LoadingGuard<'a> {
    shared: &'a FieldShared,
    generation: u64,
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        let mut state = self.shared.state();
        if self.shared.is_current(self.generation) {
            state.loading = false;
        }
    }
}

/// Autocomplete input whose options come from a remote lookup.
///
/// The committed selection lives in the owning form; the field only keeps the
/// search text and the options of the latest answered lookup. Dropping the
/// field unmounts it.
pub struct AutocompleteField {
    shared: Arc<FieldShared>,
    debouncer: Debouncer,
}

impl AutocompleteField {
    /// Mount a field bound to `form` and schedule the initial lookup.
    ///
    /// Must be called from within a tokio runtime.
    pub fn mount(config: FieldConfig, form: &FormState, ctx: &FieldContext) -> Self {
        let binding = form.binding(config.name.clone());
        let field = Self {
            shared: Arc::new(FieldShared {
                config,
                binding,
                lookup: ctx.lookup.clone(),
                notifier: ctx.notifier.clone(),
                state: Mutex::new(FieldState::default()),
                latest: AtomicU64::new(0),
                mounted: CancellationToken::new(),
            }),
            debouncer: Debouncer::new(ctx.debounce),
        };
        field.schedule(String::new());
        field
    }

    pub fn name(&self) -> &str {
        &self.shared.config.name
    }

    pub fn label(&self) -> &str {
        &self.shared.config.label
    }

    pub fn source(&self) -> LookupSource {
        self.shared.config.source
    }

    /// Update the search text and re-arm the lookup
    pub fn set_query(&self, text: impl Into<String>) {
        if self.shared.mounted.is_cancelled() {
            return;
        }
        let text = text.into();
        self.shared.state().query = text.clone();
        self.schedule(text);
    }

    /// Commit a selection (or clear it) into the owning form
    pub fn select(&self, id: Option<&str>) {
        if self.shared.mounted.is_cancelled() {
            return;
        }
        self.shared.binding.on_change(id.map(str::to_string));
    }

    /// Force the loading/disabled look, e.g. while the form is saving
    pub fn set_external_loading(&self, loading: bool) {
        self.shared.state().external_loading = loading;
    }

    /// Current search text
    pub fn query(&self) -> String {
        self.shared.state().query.clone()
    }

    /// Options of the latest answered lookup
    pub fn options(&self) -> Vec<AutocompleteOption> {
        self.shared.state().options.clone()
    }

    /// The committed selection, if it is among the current options
    pub fn selected_option(&self) -> Option<AutocompleteOption> {
        let id = self.shared.binding.value()?;
        self.shared
            .state()
            .options
            .iter()
            .find(|option| option.id == id)
            .cloned()
    }

    /// Whether a lookup is in flight or the caller forced the loading look
    pub fn is_loading(&self) -> bool {
        let state = self.shared.state();
        state.loading || state.external_loading
    }

    pub fn status(&self) -> FieldStatus {
        if self.shared.mounted.is_cancelled() {
            FieldStatus::Unmounted
        } else if self.shared.state().loading {
            FieldStatus::Querying
        } else {
            FieldStatus::Idle
        }
    }

    /// Snapshot for rendering
    pub fn view(&self) -> FieldView {
        let selected = self.selected_option();
        let error = self.shared.binding.error();
        let state = self.shared.state();
        FieldView {
            name: self.shared.config.name.clone(),
            label: self.shared.config.label.clone(),
            query: state.query.clone(),
            options: state.options.clone(),
            selected,
            loading: state.loading || state.external_loading,
            disabled: state.external_loading,
            error,
        }
    }

    /// Stop the field: pending and in-flight lookups are discarded
    pub fn unmount(&self) {
        self.debouncer.cancel();
        self.shared.mounted.cancel();
        self.shared.state().loading = false;
    }

    fn schedule(&self, text: String) {
        let shared = self.shared.clone();
        self.debouncer.call(move || shared.run_query(text));
    }
}

impl Drop for AutocompleteField {
    fn drop(&mut self) {
        self.unmount();
    }
}
