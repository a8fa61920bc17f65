use std::{collections::HashMap, fs, path::Path};

/// Endpoint used when nothing else is configured (local backend).
pub const DEFAULT_API_URL: &str = "http://localhost:8000/api/process";
pub const SETTINGS_FILE: &str = "triage.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub api_url: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.into(),
        }
    }
}

impl Settings {
    /// Applies keys from a `triage.toml` body. Unknown keys and unparsable
    /// files are ignored.
    pub fn apply_file_config(&mut self, raw: &str) {
        let Ok(file_cfg) = toml::from_str::<HashMap<String, String>>(raw) else {
            return;
        };
        if let Some(v) = non_empty(file_cfg.get("api_url").cloned()) {
            self.api_url = v;
        }
    }

    pub fn apply_env_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(v) = non_empty(lookup("TRIAGE_API_URL")) {
            self.api_url = v;
        }
        if let Some(v) = non_empty(lookup("APP__API_URL")) {
            self.api_url = v;
        }
    }

    pub fn with_api_url(mut self, api_url: Option<String>) -> Self {
        if let Some(v) = non_empty(api_url) {
            self.api_url = v;
        }
        self
    }
}

/// Defaults, then `triage.toml` in the working directory, then environment.
pub fn load_settings() -> Settings {
    load_settings_from(Path::new(SETTINGS_FILE))
}

pub fn load_settings_from(path: &Path) -> Settings {
    let mut settings = Settings::default();
    if let Ok(raw) = fs::read_to_string(path) {
        settings.apply_file_config(&raw);
    }
    settings.apply_env_overrides(|name| std::env::var(name).ok());
    settings
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
