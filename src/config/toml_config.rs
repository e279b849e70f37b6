use crate::domain::model::{RobotsDescriptor, RobotsRule};
use crate::utils::error::{SiteError, Result};
use crate::utils::validation::{validate_path_prefix, validate_url, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::OnceLock;

pub const SITE_URL_VAR: &str = "SITE_URL";
pub const DEFAULT_SITE_URL: &str = "https://example.com";

/// 預設擋掉的路徑前綴
pub const DEFAULT_DISALLOW: [&str; 3] = ["/api/", "/admin/", "/_next/"];

/// 網站描述：爬蟲規則與 sitemap 位置
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteConfig {
    pub site_url: String,
    #[serde(default = "default_true")]
    pub generate_robots_txt: bool,
    #[serde(default)]
    pub host: Option<String>,
    /// 不列入 sitemap 的路徑，結尾 `*` 表示前綴
    #[serde(default)]
    pub exclude: Vec<String>,
    #[serde(default = "default_rules")]
    pub robots: Vec<RobotsRule>,
    #[serde(default)]
    pub additional_sitemaps: Vec<String>,
}

fn default_true() -> bool {
    true
}

fn default_rules() -> Vec<RobotsRule> {
    vec![RobotsRule {
        user_agent: "*".to_string(),
        allow: vec!["/".to_string()],
        disallow: DEFAULT_DISALLOW.iter().map(|p| p.to_string()).collect(),
    }]
}

impl Default for SiteConfig {
    fn default() -> Self {
        let site_url =
            std::env::var(SITE_URL_VAR).unwrap_or_else(|_| DEFAULT_SITE_URL.to_string());
        Self::for_site(&site_url)
    }
}

impl SiteConfig {
    /// 內建描述：全開放、三個禁止前綴、兩個 sitemap
    pub fn for_site(site_url: &str) -> Self {
        let site_url = site_url.trim_end_matches('/').to_string();
        Self {
            additional_sitemaps: vec![format!("{}/server-sitemap.xml", site_url)],
            exclude: vec!["/server-sitemap.xml".to_string()],
            site_url,
            generate_robots_txt: true,
            host: None,
            robots: default_rules(),
        }
    }

    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(SiteError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed = Self::substitute_env_vars(content);
        let mut config: SiteConfig = toml::from_str(&processed)?;
        config.site_url = config.site_url.trim_end_matches('/').to_string();
        Ok(config)
    }

    /// 有指定檔案就讀檔，否則用內建值
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => {
                tracing::debug!("Loading site config from {}", path.display());
                Self::from_file(path)
            }
            None => Ok(Self::default()),
        }
    }

    /// 替換環境變數 (例如 ${SITE_URL})，未設定的保留原字串
    fn substitute_env_vars(content: &str) -> String {
        static PATTERN: OnceLock<Regex> = OnceLock::new();
        let re = PATTERN.get_or_init(|| {
            Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)\}").expect("static regex is valid")
        });

        re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        })
        .into_owned()
    }

    /// 主 sitemap 在前，其餘依設定順序
    pub fn sitemap_locations(&self) -> Vec<String> {
        let mut locations = vec![format!("{}/sitemap.xml", self.site_url)];
        for extra in &self.additional_sitemaps {
            if !locations.contains(extra) {
                locations.push(extra.clone());
            }
        }
        locations
    }

    pub fn robots(&self) -> RobotsDescriptor {
        RobotsDescriptor {
            rules: self.robots.clone(),
            sitemap: self.sitemap_locations(),
            host: self.host.clone(),
        }
    }

    pub fn is_excluded(&self, path: &str) -> bool {
        self.exclude.iter().any(|pattern| match pattern.strip_suffix('*') {
            Some(prefix) => path.starts_with(prefix),
            None => path == pattern,
        })
    }
}

impl Validate for SiteConfig {
    fn validate(&self) -> Result<()> {
        validate_url("site_url", &self.site_url)?;

        for sitemap in &self.additional_sitemaps {
            validate_url("additional_sitemaps", sitemap)?;
        }

        if let Some(host) = &self.host {
            validate_url("host", host)?;
        }

        for rule in &self.robots {
            crate::utils::validation::validate_non_empty_string("robots.user_agent", &rule.user_agent)?;
            for prefix in rule.allow.iter() {
                validate_path_prefix("robots.allow", prefix)?;
            }
            for prefix in rule.disallow.iter() {
                validate_path_prefix("robots.disallow", prefix)?;
            }
        }

        for pattern in &self.exclude {
            validate_path_prefix("exclude", pattern)?;
        }

        Ok(())
    }
}
