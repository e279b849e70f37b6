use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "site-glue")]
#[command(about = "Site descriptors, backend client handle and a one-shot database probe")]
pub struct CliConfig {
    #[arg(long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Emit logs as JSON lines")]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// 從集合讀一筆文件並印出
    Probe {
        #[arg(long)]
        database: Option<String>,

        #[arg(long)]
        collection: Option<String>,
    },

    /// 顯示後端連線設定，或查詢一張表
    Backend {
        #[arg(long)]
        table: Option<String>,

        #[arg(long, default_value = "10")]
        limit: usize,
    },

    /// 輸出 robots.txt
    Robots {
        #[arg(long)]
        config: Option<PathBuf>,

        #[arg(long, help = "Print the route descriptor as JSON instead of robots.txt")]
        json: bool,
    },

    /// 列出已發佈的 sitemap
    Sitemaps {
        #[arg(long)]
        config: Option<PathBuf>,

        #[arg(long, help = "Render a sitemap index document")]
        index: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_probe_subcommand() {
        let config =
            CliConfig::parse_from(["site-glue", "--verbose", "probe", "--collection", "users"]);
        assert!(config.verbose);
        match config.command {
            Command::Probe {
                database,
                collection,
            } => {
                assert_eq!(database, None);
                assert_eq!(collection.as_deref(), Some("users"));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_backend_defaults() {
        let config = CliConfig::parse_from(["site-glue", "backend"]);
        match config.command {
            Command::Backend { table, limit } => {
                assert_eq!(table, None);
                assert_eq!(limit, 10);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }
}
