//! Prospect entity detail form

use super::{take_value, FormState, Rule, Saving, Schema, SubmitError};
use crate::autocomplete::{AutocompleteField, FieldConfig, FieldContext};
use crate::lookup::LookupSource;
use crate::network::ApiClient;
use crate::notify::Notifier;
use crate::services::entities::{self, NewEntity};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{info, warn};

pub const NAME: &str = "Nome";
pub const REGION: &str = "CodigoRegiao";

/// Validation rules of the entity form
pub fn schema() -> Schema {
    Schema::new()
        .field(
            NAME,
            [
                Rule::Required("Nome é obrigatório"),
                Rule::MinLength(3, "Mínimo de 3 caracteres"),
            ],
        )
        .field(REGION, [Rule::Required("Código da região é obrigatório.")])
}

/// Build the create payload from validated values
pub fn payload(mut values: BTreeMap<String, String>) -> NewEntity {
    NewEntity {
        name: take_value(&mut values, NAME),
        region_code: take_value(&mut values, REGION),
    }
}

/// Region picker
pub fn region_field() -> FieldConfig {
    FieldConfig::new(REGION, "Região", LookupSource::Regions)
}

/// Autocomplete fields of the form
pub fn fields() -> Vec<FieldConfig> {
    vec![region_field()]
}

/// "Nova Entidade Prospect" screen
pub struct EntityDetail {
    form: FormState,
    region: AutocompleteField,
    client: ApiClient,
    notifier: Arc<dyn Notifier>,
}

impl EntityDetail {
    /// Open an empty form; the region picker starts loading right away
    pub fn new(client: ApiClient, ctx: &FieldContext) -> Self {
        let form = FormState::new();
        let region = AutocompleteField::mount(region_field(), &form, ctx);
        Self {
            form,
            region,
            client,
            notifier: ctx.notifier.clone(),
        }
    }

    pub fn form(&self) -> &FormState {
        &self.form
    }

    pub fn region(&self) -> &AutocompleteField {
        &self.region
    }

    pub fn set_name(&self, name: impl Into<String>) {
        self.form.set_value(NAME, Some(name.into()));
    }

    /// Validate and create the entity, returning its id
    pub async fn submit(&self) -> Result<u64, SubmitError> {
        let values = self.form.validate(&schema())?;
        let entity = payload(values);

        let result = {
            let _saving = Saving::start([&self.region]);
            entities::create(&self.client, &entity).await
        };

        match result {
            Ok(id) => {
                info!("Created entity {} ({})", id, entity.name);
                Ok(id)
            }
            Err(e) => {
                warn!("Could not create entity {}: {}", entity.name, e);
                self.notifier.alert(&e.to_string());
                Err(e.into())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::autocomplete::FakeLookup;
    use crate::config::ApiSettings;
    use crate::notify::RecordingNotifier;
    use std::time::Duration;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn detail(server: &MockServer) -> (EntityDetail, Arc<RecordingNotifier>) {
        let client = ApiClient::with_settings(&ApiSettings {
            base_url: server.uri(),
            ..Default::default()
        })
        .unwrap();
        let notifier = Arc::new(RecordingNotifier::new());
        let lookup = Arc::new(FakeLookup::with_records(&[("SP01", "São Paulo Capital")]));
        let ctx = FieldContext::new(lookup, notifier.clone(), Duration::from_millis(10));
        (EntityDetail::new(client, &ctx), notifier)
    }

    #[test]
    fn test_payload() {
        let values = BTreeMap::from([
            (NAME.to_string(), " Acme ".to_string()),
            (REGION.to_string(), "SP01".to_string()),
        ]);
        assert_eq!(
            payload(values),
            NewEntity {
                name: "Acme".to_string(),
                region_code: "SP01".to_string(),
            }
        );
    }

    #[tokio::test]
    async fn test_invalid_form_is_not_sent() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(201))
            .expect(0)
            .mount(&server)
            .await;

        let (detail, _) = detail(&server);
        detail.set_name("Jo");

        let err = detail.submit().await.unwrap_err();
        let SubmitError::Validation(errors) = err else {
            panic!("expected validation error");
        };
        assert_eq!(errors.get(NAME), Some("Mínimo de 3 caracteres"));
        assert_eq!(
            detail.region().view().error.as_deref(),
            Some("Código da região é obrigatório.")
        );
    }

    #[tokio::test]
    async fn test_submit_creates_entity() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/entities"))
            .and(body_json(serde_json::json!({"Nome": "Acme", "CodigoRegiao": "SP01"})))
            .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({"id": 12})))
            .expect(1)
            .mount(&server)
            .await;

        let (detail, notifier) = detail(&server);
        detail.set_name("Acme");
        detail.region().select(Some("SP01"));

        assert_eq!(detail.submit().await.unwrap(), 12);
        assert!(!detail.region().view().disabled);
        assert!(notifier.messages().is_empty());
    }

    #[tokio::test]
    async fn test_api_failure_alerts() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/entities"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let (detail, notifier) = detail(&server);
        detail.set_name("Acme");
        detail.region().select(Some("SP01"));

        assert!(matches!(detail.submit().await, Err(SubmitError::Api(_))));
        assert!(!detail.region().view().disabled);
        assert_eq!(notifier.messages().len(), 1);
    }
}
