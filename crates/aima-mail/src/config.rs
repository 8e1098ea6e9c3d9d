//! aima configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Implicit-TLS SMTP port.
pub const SMTPS_PORT: u16 = 465;
/// STARTTLS submission port.
pub const SUBMISSION_PORT: u16 = 587;

/// SMTP delivery settings.
///
/// Note: Custom Debug impl masks the password to prevent accidental exposure in logs.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SmtpSettings {
    /// SMTP server hostname. Delivery is disabled when unset.
    #[serde(default)]
    pub host: Option<String>,
    /// Port; defaults to 465 when `secure`, 587 otherwise.
    #[serde(default)]
    pub port: Option<u16>,
    /// Implicit TLS (`true`) or STARTTLS (`false`).
    #[serde(default = "default_true")]
    pub secure: bool,
    #[serde(default)]
    pub user: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    /// `From` mailbox, e.g. `Allure IMA <info@allureima.com>`.
    #[serde(default = "default_from")]
    pub from: String,
}

impl std::fmt::Debug for SmtpSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SmtpSettings")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("secure", &self.secure)
            .field("user", &self.user)
            .field("password", &self.password.as_ref().map(|_| "***"))
            .field("from", &self.from)
            .finish()
    }
}

impl Default for SmtpSettings {
    fn default() -> Self {
        Self {
            host: None,
            port: None,
            secure: true,
            user: None,
            password: None,
            from: default_from(),
        }
    }
}

impl SmtpSettings {
    /// The configured port, or the conventional one for the TLS mode.
    pub fn effective_port(&self) -> u16 {
        self.port.unwrap_or(if self.secure {
            SMTPS_PORT
        } else {
            SUBMISSION_PORT
        })
    }
}

fn default_true() -> bool {
    true
}

fn default_from() -> String {
    "info@allureima.com".to_string()
}

/// HTTP relay server settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerSettings {
    /// Socket address to bind.
    #[serde(default = "default_bind")]
    pub bind: String,
    /// Per-request timeout.
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
    /// Allowed CORS origins; empty allows any origin.
    #[serde(default)]
    pub cors_origins: Vec<String>,
}

fn default_bind() -> String {
    "127.0.0.1:3000".to_string()
}
fn default_request_timeout() -> u64 {
    30
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            request_timeout_secs: default_request_timeout(),
            cors_origins: Vec::new(),
        }
    }
}

/// Top-level aima configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AimaConfig {
    /// Where form submissions are sent.
    #[serde(default = "default_recipients")]
    pub recipients: Vec<String>,
    /// Relay endpoint used by `aima send`.
    #[serde(default = "default_relay_url")]
    pub relay_url: String,
    /// Optional TOML question bank replacing the built-in one.
    #[serde(default)]
    pub question_bank: Option<PathBuf>,
    /// Optional TOML catalog (file or directory) replacing the built-in one.
    #[serde(default)]
    pub catalog: Option<PathBuf>,
    #[serde(default)]
    pub smtp: SmtpSettings,
    #[serde(default)]
    pub server: ServerSettings,
}

fn default_recipients() -> Vec<String> {
    vec![
        "info@allureima.com".to_string(),
        "harry@allureima.com".to_string(),
    ]
}
fn default_relay_url() -> String {
    "http://127.0.0.1:3000/api/send-email".to_string()
}

impl Default for AimaConfig {
    fn default() -> Self {
        Self {
            recipients: default_recipients(),
            relay_url: default_relay_url(),
            question_bank: None,
            catalog: None,
            smtp: SmtpSettings::default(),
            server: ServerSettings::default(),
        }
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
///
/// Substituted values are inserted verbatim and never expanded again.
fn resolve_env_vars(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(start) = rest.find("${") {
        let Some(len) = rest[start..].find('}') else {
            break;
        };
        result.push_str(&rest[..start]);
        result.push_str(&std::env::var(&rest[start + 2..start + len]).unwrap_or_default());
        rest = &rest[start + len + 1..];
    }
    result.push_str(rest);
    result
}

impl AimaConfig {
    /// Apply the `SMTP_*` and `AIMA_RELAY_URL` overrides from `lookup`.
    ///
    /// | Variable         | Field             |
    /// |------------------|-------------------|
    /// | `SMTP_HOST`      | `smtp.host`       |
    /// | `SMTP_PORT`      | `smtp.port`       |
    /// | `SMTP_USER`      | `smtp.user`       |
    /// | `SMTP_PASS`      | `smtp.password`   |
    /// | `SMTP_FROM`      | `smtp.from`       |
    /// | `AIMA_RELAY_URL` | `relay_url`       |
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<()> {
        if let Some(host) = lookup("SMTP_HOST") {
            self.smtp.host = Some(host);
        }
        if let Some(port) = lookup("SMTP_PORT") {
            let port = port
                .trim()
                .parse()
                .with_context(|| format!("SMTP_PORT is not a port number: {port}"))?;
            self.smtp.port = Some(port);
        }
        if let Some(user) = lookup("SMTP_USER") {
            self.smtp.user = Some(user);
        }
        if let Some(password) = lookup("SMTP_PASS") {
            self.smtp.password = Some(password);
        }
        if let Some(from) = lookup("SMTP_FROM") {
            self.smtp.from = from;
        }
        if let Some(url) = lookup("AIMA_RELAY_URL") {
            self.relay_url = url;
        }
        Ok(())
    }

    fn resolve_references(&mut self) {
        let resolve = |value: &mut Option<String>| {
            if let Some(v) = value.as_mut() {
                *v = resolve_env_vars(v);
            }
        };
        resolve(&mut self.smtp.host);
        resolve(&mut self.smtp.user);
        resolve(&mut self.smtp.password);
        self.smtp.from = resolve_env_vars(&self.smtp.from);
        self.relay_url = resolve_env_vars(&self.relay_url);
        for recipient in &mut self.recipients {
            *recipient = resolve_env_vars(recipient);
        }
    }
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `aima.toml` in the current directory
/// 2. `~/.config/aima/config.toml`
///
/// Environment variable overrides: `SMTP_HOST`, `SMTP_PORT`, `SMTP_USER`,
/// `SMTP_PASS`, `SMTP_FROM`, `AIMA_RELAY_URL`.
pub fn load_config() -> Result<AimaConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<AimaConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("aima.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|home| home.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let mut config = match &config_path {
        Some(path) => parse_config_file(path)?,
        None => AimaConfig::default(),
    };

    config.resolve_references();
    config.apply_overrides(|key| std::env::var(key).ok().filter(|v| !v.is_empty()))?;

    tracing::debug!(path = ?config_path, smtp = ?config.smtp, "configuration loaded");
    Ok(config)
}

fn parse_config_file(path: &Path) -> Result<AimaConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config: {}", path.display()))?;
    let mut config: AimaConfig = toml::from_str(&content)
        .with_context(|| format!("failed to parse config: {}", path.display()))?;

    // Relative bank/catalog paths are relative to the config file.
    let base = path.parent().unwrap_or_else(|| Path::new("."));
    for file in [&mut config.question_bank, &mut config.catalog]
        .into_iter()
        .flatten()
    {
        if file.is_relative() {
            *file = base.join(&*file);
        }
    }
    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("aima"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn resolve_env_vars_basic() {
        std::env::set_var("_AIMA_TEST_VAR", "hello");
        assert_eq!(resolve_env_vars("${_AIMA_TEST_VAR}"), "hello");
        assert_eq!(
            resolve_env_vars("prefix_${_AIMA_TEST_VAR}_suffix"),
            "prefix_hello_suffix"
        );
        assert_eq!(resolve_env_vars("unterminated ${"), "unterminated ${");
        std::env::remove_var("_AIMA_TEST_VAR");
    }

    #[test]
    fn substituted_values_are_not_expanded_again() {
        std::env::set_var("_AIMA_TEST_PASS", "p@ss${word}");
        assert_eq!(resolve_env_vars("${_AIMA_TEST_PASS}"), "p@ss${word}");
        std::env::remove_var("_AIMA_TEST_PASS");

        std::env::set_var("_AIMA_TEST_SELF", "a${_AIMA_TEST_SELF}");
        assert_eq!(
            resolve_env_vars("x-${_AIMA_TEST_SELF}-y"),
            "x-a${_AIMA_TEST_SELF}-y"
        );
        std::env::remove_var("_AIMA_TEST_SELF");
    }

    #[test]
    fn default_config() {
        let config = AimaConfig::default();
        assert_eq!(
            config.recipients,
            vec!["info@allureima.com", "harry@allureima.com"]
        );
        assert!(config.smtp.secure);
        assert_eq!(config.smtp.effective_port(), 465);
        assert_eq!(config.server.request_timeout_secs, 30);
    }

    #[test]
    fn starttls_defaults_to_submission_port() {
        let smtp = SmtpSettings {
            secure: false,
            ..SmtpSettings::default()
        };
        assert_eq!(smtp.effective_port(), 587);
    }

    #[test]
    fn parse_full_config() {
        let toml_str = r#"
recipients = ["frontdesk@allureima.com"]
relay_url = "https://allureima.com/api/send-email"

[smtp]
host = "smtp.example.com"
port = 2525
secure = false
user = "mailer"
password = "hunter2"
from = "Allure IMA <info@allureima.com>"

[server]
bind = "0.0.0.0:8080"
cors_origins = ["https://allureima.com"]
"#;
        let config: AimaConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.recipients, vec!["frontdesk@allureima.com"]);
        assert_eq!(config.smtp.effective_port(), 2525);
        assert_eq!(config.server.bind, "0.0.0.0:8080");
        assert_eq!(config.server.request_timeout_secs, 30);
    }

    #[test]
    fn env_overrides_win() {
        let env: HashMap<&str, &str> = HashMap::from([
            ("SMTP_HOST", "smtp.override.test"),
            ("SMTP_PORT", "2587"),
            ("SMTP_PASS", "s3cret"),
            ("AIMA_RELAY_URL", "http://relay.test/api/send-email"),
        ]);
        let mut config = AimaConfig::default();
        config
            .apply_overrides(|key| env.get(key).map(|v| v.to_string()))
            .unwrap();

        assert_eq!(config.smtp.host.as_deref(), Some("smtp.override.test"));
        assert_eq!(config.smtp.port, Some(2587));
        assert_eq!(config.smtp.password.as_deref(), Some("s3cret"));
        assert_eq!(config.smtp.from, "info@allureima.com");
        assert_eq!(config.relay_url, "http://relay.test/api/send-email");
    }

    #[test]
    fn bad_port_override_is_an_error() {
        let mut config = AimaConfig::default();
        let err = config
            .apply_overrides(|key| (key == "SMTP_PORT").then(|| "smtp".to_string()))
            .unwrap_err();
        assert!(err.to_string().contains("SMTP_PORT"));
    }

    #[test]
    fn debug_masks_password() {
        let smtp = SmtpSettings {
            password: Some("hunter2".into()),
            ..SmtpSettings::default()
        };
        let debug = format!("{smtp:?}");
        assert!(!debug.contains("hunter2"));
        assert!(debug.contains("***"));
    }

    #[test]
    fn explicit_path_must_exist() {
        let err = load_config_from(Some(Path::new("/nonexistent/aima.toml"))).unwrap_err();
        assert!(err.to_string().contains("config file not found"));
    }

    #[test]
    fn relative_paths_follow_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("aima.toml");
        std::fs::write(&path, "question_bank = \"bank.toml\"\n").unwrap();

        let config = parse_config_file(&path).unwrap();
        assert_eq!(config.question_bank, Some(dir.path().join("bank.toml")));
        assert!(config.catalog.is_none());
    }
}
