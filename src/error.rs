use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigErrorKind {
    #[error("failed to read file: {0}")]
    Read(std::io::Error),

    #[error("failed to parse file: {0}")]
    Parse(toml::de::Error),
}

/// Errors raised while loading the process configuration. Anything that happens once a
/// command runs is reported through the command itself.
#[derive(Debug, Error)]
pub enum InfraError {
    #[error("invalid configuration in {path}: {source}")]
    Config {
        path: std::path::PathBuf,
        #[source]
        source: ConfigErrorKind,
    },

    #[error("invalid environment variable {0}: {1}")]
    InvalidEnv(String, String),
}
