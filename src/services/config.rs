use crate::constants::vertex::{
    API_HOST, COLLECTION, CONFIG_FILE_NAME, ENV_CONFIG, ENV_DEBUG, SERVING_CONFIG,
};
use crate::errors::ConfigError;
use serde::Deserialize;
use std::fmt;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Location {
    Global,
    Us,
    Eu,
}

impl Location {
    pub fn parse(raw: &str) -> Result<Self, ConfigError> {
        match raw.trim() {
            "global" => Ok(Location::Global),
            "us" => Ok(Location::Us),
            "eu" => Ok(Location::Eu),
            other => Err(ConfigError::InvalidLocation(other.to_string())),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Location::Global => "global",
            Location::Us => "us",
            Location::Eu => "eu",
        }
    }

    /// Regional endpoints live on a prefixed host; `global` uses the bare host.
    pub fn host_prefix(self) -> &'static str {
        match self {
            Location::Global => "",
            Location::Us => "us-",
            Location::Eu => "eu-",
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Default, Deserialize)]
struct RawVertexConfig {
    #[serde(default)]
    project_id: Option<String>,
    #[serde(default)]
    location: Option<String>,
    #[serde(default)]
    app_id: Option<String>,
}

/// Identity of the search app that every call targets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VertexConfig {
    pub project_id: String,
    pub location: Location,
    pub app_id: String,
}

impl VertexConfig {
    pub fn from_yaml(raw: &str) -> Result<Self, ConfigError> {
        let parsed: Option<RawVertexConfig> = serde_yaml::from_str(raw)?;
        let parsed = parsed.unwrap_or_default();

        let project_id = required(parsed.project_id, "project_id")?;
        let location = required(parsed.location, "location")?;
        let app_id = required(parsed.app_id, "app_id")?;

        Ok(Self {
            project_id,
            location: Location::parse(&location)?,
            app_id,
        })
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_yaml(&raw)
    }

    /// Full `servingConfigs/default_search:search` endpoint for this app.
    pub fn url(&self) -> String {
        format!(
            "https://{}{}/v1/projects/{}/locations/{}/collections/{}/engines/{}/servingConfigs/{}:search",
            self.location.host_prefix(),
            API_HOST,
            self.project_id,
            self.location,
            COLLECTION,
            self.app_id,
            SERVING_CONFIG,
        )
    }
}

fn required(value: Option<String>, field: &'static str) -> Result<String, ConfigError> {
    match value {
        Some(text) if !text.trim().is_empty() => Ok(text.trim().to_string()),
        _ => Err(ConfigError::MissingField(field)),
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub config_path: PathBuf,
    pub config: VertexConfig,
    pub is_debug: bool,
}

impl AppConfig {
    /// Resolves configuration from flags first, then `VERTEX_CONFIG` / `VERTEX_DEBUG`.
    pub fn load(config_flag: Option<&Path>, debug_flag: bool) -> Result<Self, ConfigError> {
        let location = match config_flag {
            Some(path) if !path.as_os_str().is_empty() => path.to_path_buf(),
            _ => match std::env::var(ENV_CONFIG) {
                Ok(value) if !value.trim().is_empty() => PathBuf::from(value.trim()),
                _ => return Err(ConfigError::MissingLocation(ENV_CONFIG)),
            },
        };

        let is_debug = debug_flag
            || std::env::var(ENV_DEBUG)
                .ok()
                .map(|value| parse_bool(&value))
                .unwrap_or(false);

        let config_path = resolve_config_file(&location);
        let config = VertexConfig::load(&config_path)?;

        Ok(Self {
            config_path,
            config,
            is_debug,
        })
    }
}

/// Accepts either the directory holding `vertex.yaml` or the file itself.
fn resolve_config_file(location: &Path) -> PathBuf {
    if location.is_dir() {
        location.join(CONFIG_FILE_NAME)
    } else {
        location.to_path_buf()
    }
}

/// Accepts `1`, `t`, `T`, `true`, `TRUE` and `True`; anything else is false.
fn parse_bool(raw: &str) -> bool {
    matches!(raw.trim(), "1" | "t" | "T" | "true" | "TRUE" | "True")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(location: Location) -> VertexConfig {
        VertexConfig {
            project_id: "my-project".to_string(),
            location,
            app_id: "my-app".to_string(),
        }
    }

    #[test]
    fn url_uses_bare_host_for_global() {
        assert_eq!(
            config(Location::Global).url(),
            "https://discoveryengine.googleapis.com/v1/projects/my-project/locations/global/collections/default_collection/engines/my-app/servingConfigs/default_search:search"
        );
    }

    #[test]
    fn url_uses_regional_host_prefix() {
        assert_eq!(
            config(Location::Us).url(),
            "https://us-discoveryengine.googleapis.com/v1/projects/my-project/locations/us/collections/default_collection/engines/my-app/servingConfigs/default_search:search"
        );
        assert_eq!(
            config(Location::Eu).url(),
            "https://eu-discoveryengine.googleapis.com/v1/projects/my-project/locations/eu/collections/default_collection/engines/my-app/servingConfigs/default_search:search"
        );
    }

    #[test]
    fn from_yaml_accepts_complete_config() {
        let cfg = VertexConfig::from_yaml(
            "project_id: \"123456\"\nlocation: \"us\"\napp_id: \"my-app\"\n",
        )
        .expect("valid config");
        assert_eq!(cfg.project_id, "123456");
        assert_eq!(cfg.location, Location::Us);
        assert_eq!(cfg.app_id, "my-app");
    }

    #[test]
    fn from_yaml_reports_each_missing_field() {
        let cases = [
            ("location: us\napp_id: my-app\n", "project_id must be set"),
            ("project_id: \"1\"\nlocation: us\n", "app_id must be set"),
            ("project_id: \"1\"\napp_id: my-app\n", "location must be set"),
        ];
        for (raw, expected) in cases {
            let err = VertexConfig::from_yaml(raw).expect_err("must fail");
            assert!(
                err.to_string().contains(expected),
                "{:?} should mention {:?}, got {}",
                raw,
                expected,
                err
            );
        }
    }

    #[test]
    fn from_yaml_rejects_unknown_location() {
        let err = VertexConfig::from_yaml("project_id: \"1\"\nlocation: asia\napp_id: a\n")
            .expect_err("must fail");
        assert!(err.to_string().contains("location must be one of"));
    }

    #[test]
    fn from_yaml_reports_invalid_yaml() {
        let err = VertexConfig::from_yaml("{{{invalid").expect_err("must fail");
        assert!(err.to_string().contains("unmarshal config"));
    }

    #[test]
    fn parse_bool_follows_common_spellings() {
        assert!(parse_bool("true"));
        assert!(parse_bool("1"));
        assert!(parse_bool("TRUE"));
        assert!(parse_bool("True"));
        assert!(parse_bool("T"));
        assert!(!parse_bool("tRuE"));
        assert!(!parse_bool("yes"));
        assert!(!parse_bool("false"));
        assert!(!parse_bool("nope"));
    }
}
