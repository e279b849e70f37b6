use async_trait::async_trait;
use site_glue::core::probe::MISSING_URI_NOTICE;
use site_glue::domain::ports::{DocumentConnector, DocumentSession};
use site_glue::{MongoConnector, Probe, ProbeConfig, ProbeOutcome, Record, Result, SiteError};
use std::sync::{Arc, Mutex};

/// 記錄每次呼叫的測試替身
#[derive(Clone, Default)]
struct CallLog {
    calls: Arc<Mutex<Vec<String>>>,
}

impl CallLog {
    fn push(&self, call: impl Into<String>) {
        self.calls.lock().unwrap().push(call.into());
    }

    fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn count(&self, name: &str) -> usize {
        self.calls().iter().filter(|c| c.starts_with(name)).count()
    }
}

enum Behavior {
    Returns(Option<serde_json::Value>),
    ConnectFails,
    ReadFails,
}

struct RecordingConnector {
    log: CallLog,
    behavior: Behavior,
}

struct RecordingSession {
    log: CallLog,
    record: Option<serde_json::Value>,
    read_fails: bool,
}

#[async_trait]
impl DocumentConnector for RecordingConnector {
    type Session = RecordingSession;

    async fn connect(&self, uri: &str) -> Result<RecordingSession> {
        self.log.push(format!("connect {}", uri));
        match &self.behavior {
            Behavior::ConnectFails => Err(SiteError::ConfigError {
                message: "connection refused".to_string(),
            }),
            Behavior::Returns(record) => Ok(RecordingSession {
                log: self.log.clone(),
                record: record.clone(),
                read_fails: false,
            }),
            Behavior::ReadFails => Ok(RecordingSession {
                log: self.log.clone(),
                record: None,
                read_fails: true,
            }),
        }
    }
}

#[async_trait]
impl DocumentSession for RecordingSession {
    async fn find_one(&mut self, database: &str, collection: &str) -> Result<Option<Record>> {
        self.log.push(format!("find_one {}.{}", database, collection));
        if self.read_fails {
            return Err(SiteError::ConfigError {
                message: "cursor killed".to_string(),
            });
        }
        Ok(self.record.clone().map(Record::new))
    }

    async fn close(&mut self) -> Result<()> {
        self.log.push("close");
        Ok(())
    }
}

fn probe_with(uri: Option<&str>, behavior: Behavior) -> (Probe<RecordingConnector>, CallLog) {
    let log = CallLog::default();
    let connector = RecordingConnector {
        log: log.clone(),
        behavior,
    };
    let config = ProbeConfig::new(uri.map(str::to_string), "sample_db", "documents");
    (Probe::new(connector, config), log)
}

#[tokio::test]
async fn test_missing_uri_prints_single_notice_without_network() {
    let (probe, log) = probe_with(None, Behavior::Returns(None));
    let mut out = Vec::new();

    let outcome = probe.run(&mut out).await;

    assert_eq!(outcome, ProbeOutcome::Skipped);
    assert_eq!(
        String::from_utf8(out).unwrap(),
        format!("{}\n", MISSING_URI_NOTICE)
    );
    assert!(log.calls().is_empty());
}

#[tokio::test]
async fn test_record_is_printed_and_connection_closed() {
    let document = serde_json::json!({
        "_id": {"$oid": "65f0c0ffee0000000000abcd"},
        "title": "Hello",
        "tags": ["a", "b"]
    });
    let (probe, log) = probe_with(
        Some("mongodb://db.internal:27017"),
        Behavior::Returns(Some(document.clone())),
    );
    let mut out = Vec::new();

    let outcome = probe.run(&mut out).await;

    assert_eq!(outcome, ProbeOutcome::Printed(Record::new(document.clone())));
    let printed: serde_json::Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(printed, document);
    // 縮排輸出
    assert!(String::from_utf8(out).unwrap().contains("\n  \"title\": \"Hello\""));

    assert_eq!(
        log.calls(),
        vec![
            "connect mongodb://db.internal:27017".to_string(),
            "find_one sample_db.documents".to_string(),
            "close".to_string(),
        ]
    );
}

#[tokio::test]
async fn test_empty_collection_prints_null_and_closes() {
    let (probe, log) = probe_with(Some("mongodb://localhost"), Behavior::Returns(None));
    let mut out = Vec::new();

    let outcome = probe.run(&mut out).await;

    assert_eq!(outcome, ProbeOutcome::Empty);
    assert_eq!(String::from_utf8(out).unwrap(), "null\n");
    assert_eq!(log.count("close"), 1);
}

#[tokio::test]
async fn test_connect_failure_skips_query_and_returns_normally() {
    let (probe, log) = probe_with(Some("mongodb://unreachable"), Behavior::ConnectFails);
    let mut out = Vec::new();

    let outcome = probe.run(&mut out).await;

    assert!(matches!(outcome, ProbeOutcome::Failed(ref msg) if msg.contains("connection refused")));
    assert!(out.is_empty());
    assert_eq!(log.count("connect"), 1);
    assert_eq!(log.count("find_one"), 0);
    // 沒開成功的連線不需要關閉
    assert_eq!(log.count("close"), 0);
}

#[tokio::test]
async fn test_read_failure_still_closes_connection() {
    let (probe, log) = probe_with(Some("mongodb://localhost"), Behavior::ReadFails);
    let mut out = Vec::new();

    let outcome = probe.run(&mut out).await;

    assert!(matches!(outcome, ProbeOutcome::Failed(_)));
    assert!(out.is_empty());
    assert_eq!(log.calls().last().map(String::as_str), Some("close"));
}

#[tokio::test]
async fn test_mongo_connector_rejects_malformed_uri() {
    let config = ProbeConfig::new(Some("not-a-mongodb-uri".to_string()), "db", "coll");
    let probe = Probe::new(MongoConnector::new(), config);
    let mut out = Vec::new();

    let outcome = probe.run(&mut out).await;

    assert!(matches!(outcome, ProbeOutcome::Failed(_)));
    assert!(out.is_empty());
}
