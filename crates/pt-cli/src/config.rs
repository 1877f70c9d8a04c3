//! Configuration loading and management.

use std::fmt;
use std::path::{Path, PathBuf};

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};

use pt_mail::SmtpSettings;

/// Application configuration.
#[derive(Clone, Serialize, Deserialize)]
pub struct Config {
    /// Path to the journal CSV file.
    pub journal_path: PathBuf,

    /// Subject line for the emailed report.
    #[serde(default = "default_subject")]
    pub email_subject: String,

    /// SMTP settings; required only when `--email` is requested.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub smtp: Option<SmtpSettings>,
}

fn default_subject() -> String {
    "Potty Trainer report".to_string()
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("journal_path", &self.journal_path)
            .field("email_subject", &self.email_subject)
            .field("smtp", &self.smtp)
            .finish()
    }
}

impl Default for Config {
    fn default() -> Self {
        let docs_dir = dirs::document_dir()
            .or_else(dirs::home_dir)
            .unwrap_or_else(|| PathBuf::from("."));
        Self {
            journal_path: docs_dir.join("poops.csv"),
            email_subject: default_subject(),
            smtp: None,
        }
    }
}

impl Config {
    /// Loads configuration, optionally from a specific file.
    ///
    /// Precedence, lowest first: built-in defaults, the platform config
    /// file, the `--config` file, then `PT_*` environment variables
    /// (`PT_SMTP__HOST` and friends for the nested section).
    #[expect(
        clippy::result_large_err,
        reason = "figment::Error is large but only returned at startup"
    )]
    pub fn load_from(config_path: Option<&Path>) -> Result<Self, figment::Error> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(config_dir) = dirs_config_path() {
            figment = figment.merge(Toml::file(config_dir.join("config.toml")));
        }

        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        figment = figment.merge(Env::prefixed("PT_").split("__"));

        figment.extract()
    }
}

/// Returns the platform-specific config directory for pt.
fn dirs_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("pottytrainer"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn default_journal_is_poops_csv() {
        let config = Config::default();
        assert_eq!(config.journal_path.file_name().unwrap(), "poops.csv");
    }

    #[test]
    fn default_has_no_smtp_section() {
        let config = Config::default();
        assert!(config.smtp.is_none());
    }

    #[test]
    fn explicit_config_file_overrides_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
journal_path = "/tmp/journal.csv"
email_subject = "digest"

[smtp]
host = "smtp.example.com"
username = "pt"
password = "secret"
from = "pt@example.com"
to = "me@example.com"
"#
        )
        .unwrap();

        let config = Config::load_from(Some(file.path())).unwrap();
        assert_eq!(config.journal_path, PathBuf::from("/tmp/journal.csv"));
        assert_eq!(config.email_subject, "digest");
        let smtp = config.smtp.unwrap();
        assert_eq!(smtp.host, "smtp.example.com");
        assert_eq!(smtp.port, 465);
    }
}
