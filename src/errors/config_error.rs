use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("configuration directory must be set via --vertex-config or {0}")]
    MissingLocation(&'static str),

    #[error("load config: {0}")]
    Read(#[from] std::io::Error),

    #[error("unmarshal config: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("{0} must be set in vertex.yaml")]
    MissingField(&'static str),

    #[error("location must be one of: global, us, eu (got {0:?})")]
    InvalidLocation(String),
}
