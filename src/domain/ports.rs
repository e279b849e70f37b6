use crate::domain::model::Record;
use crate::utils::error::Result;
use async_trait::async_trait;

/// 建立到文件資料庫的連線
#[async_trait]
pub trait DocumentConnector: Send + Sync {
    type Session: DocumentSession;

    async fn connect(&self, uri: &str) -> Result<Self::Session>;
}

/// 一條已開啟的連線，用完必須 `close`
#[async_trait]
pub trait DocumentSession: Send {
    /// 不帶篩選條件取一筆，順序不保證
    async fn find_one(&mut self, database: &str, collection: &str) -> Result<Option<Record>>;

    async fn close(&mut self) -> Result<()>;
}
