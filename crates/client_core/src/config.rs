use url::Url;

use crate::error::SettingsError;

pub const DEFAULT_BACKEND_URL: &str = "http://localhost:8000";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub backend_url: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            backend_url: DEFAULT_BACKEND_URL.into(),
        }
    }
}

impl Settings {
    /// Replaces the backend address, e.g. with a value given on the command line.
    pub fn with_backend_url(mut self, raw: &str) -> Result<Self, SettingsError> {
        self.backend_url = normalize_backend_url(raw)?;
        Ok(self)
    }
}

pub fn load_settings() -> Result<Settings, SettingsError> {
    load_settings_from(|key| std::env::var(key).ok())
}

/// Resolves settings from `lookup`; later keys win, blank values are ignored.
pub(crate) fn load_settings_from(
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<Settings, SettingsError> {
    let mut settings = Settings::default();

    for key in ["BOOK_HUB_BACKEND_URL", "APP__BACKEND_URL"] {
        if let Some(v) = lookup(key).filter(|v| !v.trim().is_empty()) {
            settings.backend_url = normalize_backend_url(&v)?;
        }
    }

    Ok(settings)
}

fn normalize_backend_url(raw: &str) -> Result<String, SettingsError> {
    let raw = raw.trim();
    let invalid = |reason: String| SettingsError::InvalidBackendUrl {
        value: raw.to_string(),
        reason,
    };

    let parsed = Url::parse(raw).map_err(|err| invalid(err.to_string()))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(invalid(format!("unsupported scheme '{}'", parsed.scheme())));
    }
    if parsed.host_str().is_none() {
        return Err(invalid("missing host".into()));
    }

    Ok(raw.trim_end_matches('/').to_string())
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
