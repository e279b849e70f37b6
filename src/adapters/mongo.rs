use crate::core::{DocumentConnector, DocumentSession, Record};
use crate::utils::error::Result;
use async_trait::async_trait;
use mongodb::bson::{doc, Bson, Document};
use mongodb::options::ClientOptions;
use mongodb::Client;

/// MongoDB 連線工廠
#[derive(Debug, Clone, Default)]
pub struct MongoConnector {
    app_name: Option<String>,
}

impl MongoConnector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_app_name(mut self, app_name: impl Into<String>) -> Self {
        self.app_name = Some(app_name.into());
        self
    }
}

#[async_trait]
impl DocumentConnector for MongoConnector {
    type Session = MongoSession;

    async fn connect(&self, uri: &str) -> Result<MongoSession> {
        let mut options = ClientOptions::parse(uri).await?;
        if self.app_name.is_some() {
            options.app_name = self.app_name.clone();
        }
        let client = Client::with_options(options)?;

        // 驅動程式是延遲連線的，用 ping 確認伺服器真的連得上
        if let Err(e) = client.database("admin").run_command(doc! { "ping": 1 }).await {
            client.shutdown().await;
            return Err(e.into());
        }

        Ok(MongoSession {
            client: Some(client),
        })
    }
}

pub struct MongoSession {
    client: Option<Client>,
}

#[async_trait]
impl DocumentSession for MongoSession {
    async fn find_one(&mut self, database: &str, collection: &str) -> Result<Option<Record>> {
        let Some(client) = self.client.as_ref() else {
            return Err(crate::utils::error::SiteError::ConfigError {
                message: "connection already closed".to_string(),
            });
        };

        let document = client
            .database(database)
            .collection::<Document>(collection)
            .find_one(doc! {})
            .await?;

        Ok(document.map(|document| Record::new(Bson::Document(document).into_relaxed_extjson())))
    }

    async fn close(&mut self) -> Result<()> {
        if let Some(client) = self.client.take() {
            client.shutdown().await;
        }
        Ok(())
    }
}
