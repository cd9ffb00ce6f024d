use serde::Deserialize;
use std::path::Path;

use crate::error::{MenuError, Result};
use crate::parse::ParseOptions;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub site_url: String,
    pub doc_dir: String,
    /// Remove generated files before a run. The PDF archive is never cleared.
    pub clear: bool,
    /// Fetch menus from the site; otherwise reuse PDFs already on disk.
    pub download: bool,
    pub breakfast_period: bool,
    pub server: ServerSettings,
    pub notify: NotifySettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct NotifySettings {
    pub enabled: bool,
    pub webhook_url: Option<String>,
    pub subject_prefix: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    pub level: String,
    pub json: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            site_url: "http://www.weswings.com".to_string(),
            doc_dir: "ww".to_string(),
            clear: false,
            download: true,
            breakfast_period: false,
            server: ServerSettings::default(),
            notify: NotifySettings::default(),
            logging: LoggingSettings::default(),
        }
    }
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
        }
    }
}

impl Default for NotifySettings {
    fn default() -> Self {
        Self {
            enabled: false,
            webhook_url: None,
            subject_prefix: "WesWings Menu".to_string(),
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

impl Settings {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let settings: Settings = toml::from_str(content)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Load from `path` when given, defaults otherwise.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.site_url.starts_with("http://") || self.site_url.starts_with("https://")) {
            return Err(MenuError::config(format!(
                "site_url must be an http(s) URL, got {:?}",
                self.site_url
            )));
        }
        if self.doc_dir.trim().is_empty() {
            return Err(MenuError::config("doc_dir cannot be empty"));
        }
        if self.server.port == 0 {
            return Err(MenuError::config("server.port must be non-zero"));
        }
        if self.notify.enabled && self.notify.webhook_url.is_none() {
            return Err(MenuError::config(
                "notify.webhook_url is required when notifications are enabled",
            ));
        }
        Ok(())
    }

    pub fn parse_options(&self) -> ParseOptions {
        ParseOptions {
            breakfast_period: self.breakfast_period,
        }
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        let settings = Settings::from_toml_str("").unwrap();
        assert_eq!(settings.site_url, "http://www.weswings.com");
        assert_eq!(settings.doc_dir, "ww");
        assert!(settings.download);
        assert!(!settings.clear);
        assert!(!settings.breakfast_period);
        assert_eq!(settings.bind_addr(), "0.0.0.0:3000");
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let settings = Settings::from_toml_str(
            r#"
            breakfast_period = true

            [server]
            port = 8080

            [notify]
            enabled = true
            webhook_url = "https://hooks.example.com/menu"
            "#,
        )
        .unwrap();
        assert!(settings.parse_options().breakfast_period);
        assert_eq!(settings.server.host, "0.0.0.0");
        assert_eq!(settings.server.port, 8080);
        assert_eq!(settings.notify.subject_prefix, "WesWings Menu");
    }

    #[test]
    fn notify_without_webhook_is_rejected() {
        let err = Settings::from_toml_str("[notify]\nenabled = true\n").unwrap_err();
        assert!(matches!(err, MenuError::Config { .. }));
    }

    #[test]
    fn bad_site_url_is_rejected() {
        assert!(Settings::from_toml_str("site_url = \"ftp://example.com\"").is_err());
    }

    #[test]
    fn malformed_toml_is_reported() {
        let err = Settings::from_toml_str("download = \"maybe\"").unwrap_err();
        assert!(matches!(err, MenuError::ConfigFile(_)));
    }
}
