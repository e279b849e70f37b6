use clap::Parser;
use site_glue::core::{backend, site};
use site_glue::utils::{logger, validation::Validate};
use site_glue::{CliConfig, Command, MongoConnector, Probe, ProbeConfig, SiteConfig, SiteError};
use std::path::Path;

#[tokio::main]
async fn main() {
    let config = CliConfig::parse();

    // 初始化日誌
    if config.json_logs {
        logger::init_json_logger(config.verbose);
    } else {
        logger::init_cli_logger(config.verbose);
    }

    tracing::info!("Starting site-glue");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    if let Err(e) = run(config.command).await {
        tracing::error!("❌ {}", e);
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }
}

async fn run(command: Command) -> Result<(), SiteError> {
    match command {
        Command::Probe {
            database,
            collection,
        } => {
            let mut probe_config = ProbeConfig::from_env();
            if let Some(database) = database {
                probe_config = probe_config.with_database(database);
            }
            if let Some(collection) = collection {
                probe_config = probe_config.with_collection(collection);
            }

            let probe = Probe::new(
                MongoConnector::new().with_app_name("site-glue-probe"),
                probe_config,
            );
            let mut stdout = std::io::stdout().lock();
            // 探測失敗只記錄，行程照常結束
            let outcome = probe.run(&mut stdout).await;
            tracing::debug!("Probe outcome: {:?}", outcome);
            Ok(())
        }
        Command::Backend { table, limit } => {
            let client = backend::shared();
            println!("url: {}", client.base_url());
            println!("key: {}", client.masked_key());

            if let Some(table) = table {
                let rows = client.select(&table, limit).await?;
                println!("{}", serde_json::to_string_pretty(&rows)?);
            }
            Ok(())
        }
        Command::Robots { config, json } => {
            let site_config = load_site_config(config.as_deref())?;
            if json {
                println!("{}", serde_json::to_string_pretty(&site_config.robots())?);
            } else if site_config.generate_robots_txt {
                print!("{}", site::render_robots_txt(&site_config));
            } else {
                tracing::warn!("robots.txt generation is disabled in the site config");
            }
            Ok(())
        }
        Command::Sitemaps { config, index } => {
            let site_config = load_site_config(config.as_deref())?;
            let locations = site_config.sitemap_locations();
            if index {
                print!(
                    "{}",
                    site::render_sitemap_index(&locations, chrono::Utc::now())
                );
            } else {
                for location in locations {
                    println!("{}", location);
                }
            }
            Ok(())
        }
    }
}

fn load_site_config(path: Option<&Path>) -> Result<SiteConfig, SiteError> {
    let site_config = SiteConfig::load(path)?;
    if let Err(e) = site_config.validate() {
        tracing::error!("❌ Site configuration validation failed: {}", e);
        return Err(e);
    }
    Ok(site_config)
}
