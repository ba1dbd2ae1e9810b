use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("Unknown template: {0}")]
    UnknownTemplate(String),

    #[error("Invalid key binding: {0}")]
    InvalidKeyBinding(String),
}

pub type Result<T> = std::result::Result<T, Error>;
