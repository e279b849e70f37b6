use crate::config::SiteConfig;
use chrono::{DateTime, Utc};
use std::fmt::Write;

/// robots.txt 文字
pub fn render_robots_txt(config: &SiteConfig) -> String {
    let descriptor = config.robots();
    let mut out = String::new();

    for rule in &descriptor.rules {
        let _ = writeln!(out, "# {}", rule.user_agent);
        let _ = writeln!(out, "User-agent: {}", rule.user_agent);
        for path in &rule.allow {
            let _ = writeln!(out, "Allow: {}", path);
        }
        for path in &rule.disallow {
            let _ = writeln!(out, "Disallow: {}", path);
        }
        out.push('\n');
    }

    if let Some(host) = &descriptor.host {
        let _ = writeln!(out, "# Host");
        let _ = writeln!(out, "Host: {}", host);
        out.push('\n');
    }

    let _ = writeln!(out, "# Sitemaps");
    for sitemap in &descriptor.sitemap {
        let _ = writeln!(out, "Sitemap: {}", sitemap);
    }

    out
}

/// sitemap index XML，列出所有發佈位置
pub fn render_sitemap_index(locations: &[String], lastmod: DateTime<Utc>) -> String {
    let lastmod = lastmod.format("%Y-%m-%dT%H:%M:%SZ").to_string();
    let mut out = String::from(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
         <sitemapindex xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">\n",
    );

    for loc in locations {
        let _ = writeln!(
            out,
            "  <sitemap><loc>{}</loc><lastmod>{}</lastmod></sitemap>",
            escape_xml(loc),
            lastmod
        );
    }

    out.push_str("</sitemapindex>\n");
    out
}

fn escape_xml(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            c => escaped.push(c),
        }
    }
    escaped
}
