use crate::utils::error::Result;
use crate::utils::validation::{validate_namespace_part, validate_url, Validate};
use std::env;

pub const MONGODB_URI_VAR: &str = "MONGODB_URI";
pub const PROBE_DATABASE_VAR: &str = "PROBE_DATABASE";
pub const PROBE_COLLECTION_VAR: &str = "PROBE_COLLECTION";
pub const BACKEND_URL_VAR: &str = "SUPABASE_URL";
pub const BACKEND_KEY_VAR: &str = "SUPABASE_ANON_KEY";

pub const DEFAULT_DATABASE: &str = "sample_db";
pub const DEFAULT_COLLECTION: &str = "documents";
pub const DEFAULT_BACKEND_URL: &str = "http://localhost:54321";
pub const DEFAULT_BACKEND_KEY: &str = "public-anon-key";

fn process_env(name: &str) -> Option<String> {
    env::var(name).ok()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeConfig {
    /// `None` 時探測會直接略過
    pub connection_uri: Option<String>,
    pub database: String,
    pub collection: String,
}

impl ProbeConfig {
    pub fn new(
        connection_uri: Option<String>,
        database: impl Into<String>,
        collection: impl Into<String>,
    ) -> Self {
        Self {
            connection_uri,
            database: database.into(),
            collection: collection.into(),
        }
    }

    pub fn from_env() -> Self {
        Self::from_lookup(process_env)
    }

    /// 以任意查找函式讀取設定，測試時不必動到行程環境變數
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            // 空字串視同未設定
            connection_uri: lookup(MONGODB_URI_VAR).filter(|uri| !uri.trim().is_empty()),
            database: lookup(PROBE_DATABASE_VAR).unwrap_or_else(|| DEFAULT_DATABASE.to_string()),
            collection: lookup(PROBE_COLLECTION_VAR)
                .unwrap_or_else(|| DEFAULT_COLLECTION.to_string()),
        }
    }

    pub fn with_database(mut self, database: impl Into<String>) -> Self {
        self.database = database.into();
        self
    }

    pub fn with_collection(mut self, collection: impl Into<String>) -> Self {
        self.collection = collection.into();
        self
    }
}

impl Validate for ProbeConfig {
    fn validate(&self) -> Result<()> {
        validate_namespace_part("database", &self.database)?;
        validate_namespace_part("collection", &self.collection)?;
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendConfig {
    pub url: String,
    pub anon_key: String,
}

impl BackendConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(process_env)
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            url: lookup(BACKEND_URL_VAR).unwrap_or_else(|| DEFAULT_BACKEND_URL.to_string()),
            anon_key: lookup(BACKEND_KEY_VAR).unwrap_or_else(|| DEFAULT_BACKEND_KEY.to_string()),
        }
    }
}

impl Validate for BackendConfig {
    fn validate(&self) -> Result<()> {
        validate_url(BACKEND_URL_VAR, &self.url)?;
        crate::utils::validation::validate_non_empty_string(BACKEND_KEY_VAR, &self.anon_key)?;
        Ok(())
    }
}
