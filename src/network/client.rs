//! HTTP client for the console's REST API

use super::{ApiError, ApiRequest, ApiResponse, HttpMethod};
use crate::config::ApiSettings;
use reqwest::{Client, Response};
use serde::Serialize;
use std::collections::HashMap;
use std::time::Duration;
use tracing::debug;
use url::Url;

/// HTTP client wrapper bound to one API base URL
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: Url,
    default_timeout: Duration,
    default_headers: HashMap<String, String>,
}

impl ApiClient {
    /// Create a new API client with default settings
    pub fn new() -> Result<Self, ApiError> {
        Self::with_settings(&ApiSettings::default())
    }

    /// Create a new API client with custom settings
    pub fn with_settings(settings: &ApiSettings) -> Result<Self, ApiError> {
        let timeout = request_timeout(settings.request_timeout)?;
        let mut builder = Client::builder()
            .timeout(timeout)
            .pool_max_idle_per_host(settings.pool_maxsize)
            .gzip(true)
            .brotli(true);

        if !settings.verify_ssl {
            builder = builder.danger_accept_invalid_certs(true);
        }

        if let Some(ref proxy_url) = settings.proxies.all {
            builder = builder.proxy(reqwest::Proxy::all(proxy_url)?);
        } else {
            if let Some(ref http) = settings.proxies.http {
                builder = builder.proxy(reqwest::Proxy::http(http)?);
            }
            if let Some(ref https) = settings.proxies.https {
                builder = builder.proxy(reqwest::Proxy::https(https)?);
            }
        }

        let client = builder.build()?;

        // A base without a trailing slash would have its last segment replaced on join
        let mut base = settings.base_url.clone();
        if !base.ends_with('/') {
            base.push('/');
        }

        let mut default_headers = settings.extra_headers.clone();
        default_headers.insert("Content-Type".to_string(), "application/json".to_string());
        if let Some(ref token) = settings.token {
            default_headers.insert(settings.token_header.clone(), token.clone());
        }

        Ok(Self {
            client,
            base_url: Url::parse(&base)?,
            default_timeout: timeout,
            default_headers,
        })
    }

    /// Base URL resource paths are resolved against
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Resolve a resource path against the base URL
    pub fn url_for(&self, path: &str) -> Result<Url, ApiError> {
        Ok(self.base_url.join(path.trim_start_matches('/'))?)
    }

    /// Execute an API request
    pub async fn execute(&self, request: ApiRequest) -> Result<ApiResponse, ApiError> {
        self.execute_with_timeout(request, self.default_timeout).await
    }

    /// Execute an API request with custom timeout
    pub async fn execute_with_timeout(
        &self,
        request: ApiRequest,
        timeout: Duration,
    ) -> Result<ApiResponse, ApiError> {
        let url = self.url_for(&request.path)?;
        debug!("{:?} {}", request.method, url);

        let mut req_builder = match request.method {
            HttpMethod::Get => self.client.get(url),
            HttpMethod::Post => self.client.post(url),
        };

        req_builder = req_builder
            .timeout(timeout)
            .header("Accept", "application/json");

        for (key, value) in &self.default_headers {
            req_builder = req_builder.header(key, value);
        }

        if !request.params.is_empty() {
            req_builder = req_builder.query(&request.params);
        }

        if let Some(body) = request.body {
            req_builder = req_builder.json(&body);
        }

        let response = req_builder.send().await?;

        Self::parse_response(response).await
    }

    /// GET request with query parameters
    pub async fn get_with_params(
        &self,
        path: &str,
        params: Vec<(String, String)>,
    ) -> Result<ApiResponse, ApiError> {
        let request = params
            .into_iter()
            .fold(ApiRequest::get(path), |request, (key, value)| request.param(key, value));
        self.execute(request).await
    }

    /// POST with JSON body
    pub async fn post_json<T: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &T,
    ) -> Result<ApiResponse, ApiError> {
        let request = ApiRequest::post(path).json(serde_json::to_value(body)?);
        self.execute(request).await
    }

    async fn parse_response(response: Response) -> Result<ApiResponse, ApiError> {
        let status = response.status().as_u16();
        let url = response.url().to_string();

        let mut headers = HashMap::new();
        for (key, value) in response.headers() {
            if let Ok(v) = value.to_str() {
                headers.insert(key.as_str().to_ascii_lowercase(), v.to_string());
            }
        }

        let text = response.text().await?;

        Ok(ApiResponse {
            status,
            headers,
            text,
            url,
        })
    }
}

/// Request timeout in seconds; must be a positive, finite number
fn request_timeout(seconds: f64) -> Result<Duration, ApiError> {
    if seconds.is_finite() && seconds > 0.0 {
        Duration::try_from_secs_f64(seconds)
            .map_err(|e| ApiError::InvalidSetting(format!("request_timeout {}: {}", seconds, e)))
    } else {
        Err(ApiError::InvalidSetting(format!(
            "request_timeout must be a positive number of seconds, got {}",
            seconds
        )))
    }
}
