use crate::config::BackendConfig;
use crate::utils::error::{SiteError, Result};
use crate::utils::validation::{validate_namespace_part, validate_range, Validate};
use reqwest::{Client, Method, RequestBuilder};
use std::sync::OnceLock;
use url::Url;

const REST_PREFIX: &str = "rest/v1";

/// 後端服務的連線把手；建構時不做任何網路 I/O
#[derive(Debug, Clone)]
pub struct BackendClient {
    base_url: Url,
    anon_key: String,
    client: Client,
}

impl BackendClient {
    pub fn new(config: BackendConfig) -> Result<Self> {
        config.validate()?;

        // 確保結尾有 `/`，join 時才不會吃掉最後一段路徑
        let mut raw = config.url.clone();
        if !raw.ends_with('/') {
            raw.push('/');
        }
        let base_url = Url::parse(&raw).map_err(|e| SiteError::InvalidConfigValueError {
            field: "backend.url".to_string(),
            value: config.url.clone(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            base_url,
            anon_key: config.anon_key,
            client: Client::new(),
        })
    }

    pub fn from_env() -> Result<Self> {
        Self::new(BackendConfig::from_env())
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn anon_key(&self) -> &str {
        &self.anon_key
    }

    /// 除錯輸出用，最多露出前 4 個字元且不超過金鑰長度的一半
    pub fn masked_key(&self) -> String {
        let shown = (self.anon_key.chars().count() / 2).min(4);
        let visible: String = self.anon_key.chars().take(shown).collect();
        format!("{}****", visible)
    }

    /// 帶上預發金鑰的請求；不處理登入或換發
    pub fn request(&self, method: Method, path: &str) -> Result<RequestBuilder> {
        let url = self
            .base_url
            .join(path.trim_start_matches('/'))
            .map_err(|e| SiteError::ConfigError {
                message: format!("Invalid backend path '{}': {}", path, e),
            })?;

        Ok(self
            .client
            .request(method, url)
            .header("apikey", &self.anon_key)
            .bearer_auth(&self.anon_key))
    }

    /// `GET /rest/v1/<table>?select=*&limit=<n>`
    pub async fn select(&self, table: &str, limit: usize) -> Result<Vec<serde_json::Value>> {
        validate_namespace_part("table", table)?;
        validate_range("limit", limit, 1, 1000)?;

        tracing::debug!("Selecting up to {} rows from {}", limit, table);
        let response = self
            .request(Method::GET, &format!("{}/{}", REST_PREFIX, table))?
            .query(&[("select", "*".to_string()), ("limit", limit.to_string())])
            .send()
            .await?
            .error_for_status()?;

        let rows: Vec<serde_json::Value> = response.json().await?;
        tracing::debug!("Backend returned {} rows", rows.len());
        Ok(rows)
    }
}

static SHARED: OnceLock<BackendClient> = OnceLock::new();

/// 行程共用的把手，第一次使用時以環境變數建立
///
/// 環境變數不合法時退回內建預設值，確保一定拿得到把手。
pub fn shared() -> &'static BackendClient {
    SHARED.get_or_init(|| build_shared(BackendConfig::from_env()))
}

fn build_shared(config: BackendConfig) -> BackendClient {
    BackendClient::new(config).unwrap_or_else(|e| {
        tracing::warn!("Invalid backend configuration ({}); using fallback values", e);
        fallback_client()
    })
}

fn fallback_client() -> BackendClient {
    let base_url = Url::parse(&format!("{}/", crate::config::env::DEFAULT_BACKEND_URL))
        .expect("fallback backend URL is a valid literal");
    BackendClient {
        base_url,
        anon_key: crate::config::env::DEFAULT_BACKEND_KEY.to_string(),
        client: Client::new(),
    }
}
