use thiserror::Error;

#[derive(Error, Debug)]
pub enum ChainSpecError {
    #[error("Failed to read network spec file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse network spec YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
}
