use crate::config::ProbeConfig;
use crate::core::{DocumentConnector, DocumentSession, ProbeOutcome};
use crate::utils::error::Result;
use crate::utils::validation::Validate;
use std::io::Write;

pub const MISSING_URI_NOTICE: &str = "MONGODB_URI is not set; skipping database probe";

/// 單次探測：連線、取一筆、印出、關閉
pub struct Probe<C: DocumentConnector> {
    connector: C,
    config: ProbeConfig,
}

impl<C: DocumentConnector> Probe<C> {
    pub fn new(connector: C, config: ProbeConfig) -> Self {
        Self { connector, config }
    }

    pub fn config(&self) -> &ProbeConfig {
        &self.config
    }

    /// 錯誤只記錄不往外丟，呼叫端永遠拿到一個結果
    pub async fn run<W: Write>(&self, out: &mut W) -> ProbeOutcome {
        let Some(uri) = self.config.connection_uri.as_deref() else {
            tracing::warn!("{}", MISSING_URI_NOTICE);
            if let Err(e) = writeln!(out, "{}", MISSING_URI_NOTICE) {
                tracing::error!("❌ Failed to write notice: {}", e);
            }
            return ProbeOutcome::Skipped;
        };

        // 名稱不合法視同探測失敗，不開連線
        if let Err(e) = self.config.validate() {
            tracing::error!("❌ Invalid probe configuration: {}", e);
            return ProbeOutcome::Failed(e.to_string());
        }

        tracing::info!(
            "🔍 Probing {}.{}",
            self.config.database,
            self.config.collection
        );

        let mut session = match self.connector.connect(uri).await {
            Ok(session) => session,
            Err(e) => {
                // 連線失敗：沒有開啟的連線需要關閉
                tracing::error!("❌ Failed to connect to database: {}", e);
                return ProbeOutcome::Failed(e.to_string());
            }
        };
        tracing::debug!("Connected");

        let outcome = match self.read_and_render(&mut session, out).await {
            Ok(outcome) => outcome,
            Err(e) => {
                tracing::error!("❌ Database probe failed: {}", e);
                ProbeOutcome::Failed(e.to_string())
            }
        };

        // 不論成功與否都要釋放連線
        match session.close().await {
            Ok(()) => tracing::debug!("Connection closed"),
            Err(e) => tracing::warn!("Failed to close connection cleanly: {}", e),
        }

        outcome
    }

    async fn read_and_render<W: Write>(
        &self,
        session: &mut C::Session,
        out: &mut W,
    ) -> Result<ProbeOutcome> {
        let record = session
            .find_one(&self.config.database, &self.config.collection)
            .await?;

        match record {
            Some(record) => {
                let rendered = serde_json::to_string_pretty(&record)?;
                writeln!(out, "{}", rendered)?;
                tracing::info!("✅ Printed one record");
                Ok(ProbeOutcome::Printed(record))
            }
            None => {
                // 空集合與不存在的集合同樣處理
                writeln!(out, "null")?;
                tracing::info!("Collection returned no record");
                Ok(ProbeOutcome::Empty)
            }
        }
    }
}
