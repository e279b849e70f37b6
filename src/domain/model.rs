use serde::{Deserialize, Serialize};

/// 外部資料庫回傳的一筆文件，只讀不改
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record {
    pub data: serde_json::Value,
}

impl Record {
    pub fn new(data: serde_json::Value) -> Self {
        Self { data }
    }
}

/// 單次探測的結果
#[derive(Debug, Clone, PartialEq)]
pub enum ProbeOutcome {
    /// 沒有連線字串，未連線
    Skipped,
    Printed(Record),
    /// 集合為空或不存在
    Empty,
    Failed(String),
}

/// TOML 用 `user_agent`，輸出 JSON 用 `userAgent`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RobotsRule {
    #[serde(rename = "userAgent", alias = "user_agent", default = "default_user_agent")]
    pub user_agent: String,
    #[serde(default)]
    pub allow: Vec<String>,
    #[serde(default)]
    pub disallow: Vec<String>,
}

fn default_user_agent() -> String {
    "*".to_string()
}

/// 交給 web 框架 robots 路由的描述物件
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RobotsDescriptor {
    pub rules: Vec<RobotsRule>,
    pub sitemap: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
}
