//! The console's two resource screens

use crate::autocomplete::{FieldConfig, FieldContext};
use crate::forms::{entity, work_order, EntityDetail, FormState, SubmitError, WorkOrderDetail};
use crate::network::{ApiClient, ApiError};
use crate::services::{entities, work_orders, Page};
use std::collections::BTreeMap;

/// A list screen plus its "new record" form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Entities,
    WorkOrders,
}

/// Plain text input of a detail form
pub struct TextInput {
    pub name: &'static str,
    pub label: &'static str,
}

impl Screen {
    pub fn title(self) -> &'static str {
        match self {
            Screen::Entities => "Entidades Prospects",
            Screen::WorkOrders => "Ordens de Serviço",
        }
    }

    pub fn detail_title(self) -> &'static str {
        match self {
            Screen::Entities => "Nova Entidade Prospect",
            Screen::WorkOrders => "Nova Ordem de Serviço",
        }
    }

    pub fn list_path(self) -> &'static str {
        match self {
            Screen::Entities => "/entidades",
            Screen::WorkOrders => "/ordens-de-servico",
        }
    }

    pub fn new_path(self) -> String {
        format!("{}/detalhe/nova", self.list_path())
    }

    pub fn columns(self) -> &'static [&'static str] {
        match self {
            Screen::Entities => &["Código", "Nome"],
            Screen::WorkOrders => &["Número", "Nome", "Entidade", "Produto", "Tipo"],
        }
    }

    /// Notice shown on the list after a record was created
    pub fn created_message(self) -> Option<&'static str> {
        match self {
            Screen::Entities => None,
            Screen::WorkOrders => Some(work_order::CREATED_MESSAGE),
        }
    }

    pub fn text_inputs(self) -> &'static [TextInput] {
        match self {
            Screen::Entities => &[TextInput {
                name: entity::NAME,
                label: "Nome",
            }],
            Screen::WorkOrders => &[],
        }
    }

    pub fn pickers(self) -> Vec<FieldConfig> {
        match self {
            Screen::Entities => entity::fields(),
            Screen::WorkOrders => work_order::fields(),
        }
    }

    /// One page of table rows, cells in column order
    pub async fn rows(
        self,
        client: &ApiClient,
        page: u32,
        filter: &str,
        page_size: u32,
    ) -> Result<Page<Vec<String>>, ApiError> {
        match self {
            Screen::Entities => {
                let page = entities::list(client, page, filter, page_size).await?;
                Ok(page.map(|row| vec![row.code, row.name]))
            }
            Screen::WorkOrders => {
                let page = work_orders::list(client, page, filter, page_size).await?;
                Ok(page.map(|row| {
                    vec![
                        row.number,
                        row.name,
                        row.entity_code,
                        row.product_code,
                        row.order_type_code,
                    ]
                }))
            }
        }
    }

    /// Open the screen's form with the posted values and submit it
    pub async fn submit(
        self,
        client: &ApiClient,
        ctx: &FieldContext,
        values: &BTreeMap<String, String>,
    ) -> Result<u64, SubmitError> {
        match self {
            Screen::Entities => {
                let detail = EntityDetail::new(client.clone(), ctx);
                fill(detail.form(), values);
                detail.submit().await
            }
            Screen::WorkOrders => {
                let detail = WorkOrderDetail::new(client.clone(), ctx);
                fill(detail.form(), values);
                detail.submit().await
            }
        }
    }
}

fn fill(form: &FormState, values: &BTreeMap<String, String>) {
    for (name, value) in values {
        form.set_value(name, Some(value.clone()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::autocomplete::FakeLookup;
    use crate::config::ApiSettings;
    use crate::notify::RecordingNotifier;
    use std::sync::Arc;
    use std::time::Duration;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_paths() {
        assert_eq!(Screen::Entities.new_path(), "/entidades/detalhe/nova");
        assert_eq!(Screen::WorkOrders.new_path(), "/ordens-de-servico/detalhe/nova");
    }

    #[test]
    fn test_every_input_is_validated() {
        for (screen, schema) in [
            (Screen::Entities, entity::schema()),
            (Screen::WorkOrders, work_order::schema()),
        ] {
            let validated: Vec<_> = schema.field_names().collect();
            let inputs = screen
                .text_inputs()
                .iter()
                .map(|input| input.name.to_string())
                .chain(screen.pickers().into_iter().map(|p| p.name));
            for name in inputs {
                assert!(validated.contains(&name.as_str()), "{} is not validated", name);
            }
        }
    }

    #[tokio::test]
    async fn test_submit_goes_through_the_form() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/work-orders"))
            .and(body_json(serde_json::json!({
                "CodigoEntidade": "E1",
                "CodigoTipoOrdServ": "T1",
                "CodigoTipoAtendContrato": "A1",
                "CodigoProduto": "P1"
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({"id": 8})))
            .expect(1)
            .mount(&server)
            .await;

        let client = ApiClient::with_settings(&ApiSettings {
            base_url: server.uri(),
            ..Default::default()
        })
        .unwrap();
        let notifier = Arc::new(RecordingNotifier::new());
        let ctx = FieldContext::new(
            Arc::new(FakeLookup::default()),
            notifier.clone(),
            Duration::from_millis(300),
        );
        let values = BTreeMap::from([
            ("CodigoEntidade".to_string(), "E1".to_string()),
            ("CodigoTipoOrdServ".to_string(), "T1".to_string()),
            ("CodigoTipoAtendContrato".to_string(), "A1".to_string()),
            ("CodigoProduto".to_string(), " P1 ".to_string()),
        ]);

        let id = Screen::WorkOrders.submit(&client, &ctx, &values).await.unwrap();
        assert_eq!(id, 8);
        assert_eq!(notifier.messages(), vec![work_order::CREATED_MESSAGE.to_string()]);

        let err = Screen::Entities
            .submit(&client, &ctx, &BTreeMap::new())
            .await
            .unwrap_err();
        assert!(matches!(err, SubmitError::Validation(ref e) if e.len() == 2));
    }
}
