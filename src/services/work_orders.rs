//! Work orders (`/work-orders`)

use super::{create_record, fetch_page, Page};
use crate::network::{ApiClient, ApiError};
use serde::{Deserialize, Serialize};

/// Resource path of the work orders endpoint
pub const PATH: &str = "/work-orders";

/// Work order row as listed by the API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkOrderListing {
    #[serde(default)]
    pub id: u64,
    #[serde(rename = "Numero", default)]
    pub number: String,
    #[serde(rename = "Nome", default)]
    pub name: String,
    #[serde(rename = "CodigoEntidade", default)]
    pub entity_code: String,
    #[serde(rename = "CodigoProduto", default)]
    pub product_code: String,
    #[serde(rename = "CodigoTipoOrdServ", default)]
    pub order_type_code: String,
}

/// Payload of a new work order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewWorkOrder {
    #[serde(rename = "CodigoEntidade")]
    pub entity_code: String,
    #[serde(rename = "CodigoTipoOrdServ")]
    pub order_type_code: String,
    #[serde(rename = "CodigoTipoAtendContrato")]
    pub assistance_type_code: String,
    #[serde(rename = "CodigoProduto")]
    pub product_code: String,
}

/// List work orders
pub async fn list(
    client: &ApiClient,
    page: u32,
    filter: &str,
    page_size: u32,
) -> Result<Page<WorkOrderListing>, ApiError> {
    fetch_page(client, PATH, page, filter, page_size).await
}

/// Create a work order, returning its id
pub async fn create(client: &ApiClient, order: &NewWorkOrder) -> Result<u64, ApiError> {
    create_record(client, PATH, order).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ApiSettings;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_create_posts_to_work_orders() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/work-orders"))
            .and(body_json(serde_json::json!({
                "CodigoEntidade": "E001",
                "CodigoTipoOrdServ": "T1",
                "CodigoTipoAtendContrato": "A1",
                "CodigoProduto": "P1"
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({"id": 77})))
            .expect(1)
            .mount(&server)
            .await;

        let client = ApiClient::with_settings(&ApiSettings {
            base_url: server.uri(),
            ..Default::default()
        })
        .unwrap();
        let order = NewWorkOrder {
            entity_code: "E001".to_string(),
            order_type_code: "T1".to_string(),
            assistance_type_code: "A1".to_string(),
            product_code: "P1".to_string(),
        };

        assert_eq!(create(&client, &order).await.unwrap(), 77);
    }

    #[test]
    fn test_listing_tolerates_missing_fields() {
        let row: WorkOrderListing =
            serde_json::from_str(r#"{"id": 4, "Numero": "OS-4"}"#).unwrap();
        assert_eq!(row.number, "OS-4");
        assert!(row.entity_code.is_empty());
    }
}
