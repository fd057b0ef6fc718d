//! Work order detail form

use super::{take_value, FormState, Rule, Saving, Schema, SubmitError};
use crate::autocomplete::{AutocompleteField, FieldConfig, FieldContext};
use crate::lookup::LookupSource;
use crate::network::ApiClient;
use crate::notify::Notifier;
use crate::services::work_orders::{self, NewWorkOrder};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{info, warn};

pub const ENTITY: &str = "CodigoEntidade";
pub const ORDER_TYPE: &str = "CodigoTipoOrdServ";
pub const ASSISTANCE_TYPE: &str = "CodigoTipoAtendContrato";
pub const PRODUCT: &str = "CodigoProduto";

/// Alert shown once a work order is saved
pub const CREATED_MESSAGE: &str = "Ordem de Serviço cadastrada com sucesso.";

/// Validation rules of the work order form
pub fn schema() -> Schema {
    Schema::new()
        .field(ENTITY, [Rule::Required("Entidade é obrigatório.")])
        .field(ORDER_TYPE, [Rule::Required("Tipo da Ordem de Serviço é obrigatório.")])
        .field(ASSISTANCE_TYPE, [Rule::Required("Tipo de atendimento é obrigatório.")])
        .field(PRODUCT, [Rule::Required("Produto é obrigatório.")])
}

/// Build the create payload from validated values
pub fn payload(mut values: BTreeMap<String, String>) -> NewWorkOrder {
    NewWorkOrder {
        entity_code: take_value(&mut values, ENTITY),
        order_type_code: take_value(&mut values, ORDER_TYPE),
        assistance_type_code: take_value(&mut values, ASSISTANCE_TYPE),
        product_code: take_value(&mut values, PRODUCT),
    }
}

/// Autocomplete fields of the form, in screen order
pub fn fields() -> Vec<FieldConfig> {
    vec![
        FieldConfig::new(ENTITY, "Entidade", LookupSource::Entities),
        FieldConfig::new(ORDER_TYPE, "Tipo Ordem de Serviço", LookupSource::ServiceOrderTypes),
        FieldConfig::new(ASSISTANCE_TYPE, "Tipo de Atendimento", LookupSource::AssistanceTypes),
        FieldConfig::new(PRODUCT, "Produto", LookupSource::Products),
    ]
}

/// "Nova Ordem de Serviço" screen
pub struct WorkOrderDetail {
    form: FormState,
    fields: Vec<AutocompleteField>,
    client: ApiClient,
    notifier: Arc<dyn Notifier>,
}

impl WorkOrderDetail {
    /// Open an empty form; every picker starts loading right away
    pub fn new(client: ApiClient, ctx: &FieldContext) -> Self {
        let form = FormState::new();
        let fields = fields()
            .into_iter()
            .map(|config| AutocompleteField::mount(config, &form, ctx))
            .collect();
        Self {
            form,
            fields,
            client,
            notifier: ctx.notifier.clone(),
        }
    }

    pub fn form(&self) -> &FormState {
        &self.form
    }

    /// Picker bound to the form field `name`
    pub fn field(&self, name: &str) -> Option<&AutocompleteField> {
        self.fields.iter().find(|field| field.name() == name)
    }

    pub fn fields(&self) -> &[AutocompleteField] {
        &self.fields
    }

    /// Validate and create the work order, returning its id
    pub async fn submit(&self) -> Result<u64, SubmitError> {
        let values = self.form.validate(&schema())?;
        let order = payload(values);

        let result = {
            let _saving = Saving::start(&self.fields);
            work_orders::create(&self.client, &order).await
        };

        match result {
            Ok(id) => {
                info!("Created work order {} for entity {}", id, order.entity_code);
                self.notifier.alert(CREATED_MESSAGE);
                Ok(id)
            }
            Err(e) => {
                warn!("Could not create work order: {}", e);
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
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_schema_covers_every_picker() {
        let names: Vec<_> = schema().field_names().collect();
        let pickers: Vec<_> = fields().into_iter().map(|f| f.name).collect();
        assert_eq!(names, pickers);
    }

    #[test]
    fn test_missing_fields_report_messages() {
        let errors = schema()
            .validate(&BTreeMap::from([(ENTITY.to_string(), "E001".to_string())]))
            .unwrap_err();
        assert_eq!(errors.len(), 3);
        assert_eq!(errors.get(PRODUCT), Some("Produto é obrigatório."));
        assert_eq!(errors.get(ENTITY), None);
    }

    #[tokio::test]
    async fn test_submit_posts_to_work_orders() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/work-orders"))
            .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({"id": 31})))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/entities"))
            .respond_with(ResponseTemplate::new(201))
            .expect(0)
            .mount(&server)
            .await;

        let client = ApiClient::with_settings(&ApiSettings {
            base_url: server.uri(),
            ..Default::default()
        })
        .unwrap();
        let notifier = Arc::new(RecordingNotifier::new());
        let lookup = Arc::new(FakeLookup::default());
        let ctx = FieldContext::new(lookup, notifier.clone(), Duration::from_millis(10));
        let detail = WorkOrderDetail::new(client, &ctx);

        assert_eq!(detail.fields().len(), 4);
        for (name, value) in [
            (ENTITY, "E001"),
            (ORDER_TYPE, "T1"),
            (ASSISTANCE_TYPE, "A1"),
            (PRODUCT, "P1"),
        ] {
            detail.field(name).unwrap().select(Some(value));
        }

        assert_eq!(detail.submit().await.unwrap(), 31);
        assert_eq!(notifier.messages(), vec![CREATED_MESSAGE.to_string()]);
        assert!(detail.fields().iter().all(|f| !f.view().disabled));
    }
}
