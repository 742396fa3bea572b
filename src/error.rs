//! Crate-wide error types.

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("Daily chat limit reached")]
    RateLimited { detail: Option<String> },

    #[error("Assistant API returned status {status}")]
    Api { status: u16, detail: Option<String> },

    #[error("Transport failure: {source}")]
    Transport {
        #[from]
        source: reqwest::Error,
    },

    #[error("Malformed assistant response: {reason}")]
    InvalidResponse { reason: String },
}

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("Product feed returned status {status}")]
    Status { status: u16 },

    #[error("Product feed request failed: {source}")]
    Fetch {
        #[from]
        source: reqwest::Error,
    },
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid URL `{url}`: {source}")]
    InvalidUrl {
        url: String,
        source: url::ParseError,
    },

    #[error("Cannot read config file `{path}`: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("Malformed config file `{path}`: {source}")]
    Parse {
        path: String,
        source: toml::de::Error,
    },

    #[error("HTTP client setup failed: {source}")]
    Http {
        #[from]
        source: reqwest::Error,
    },
}

pub type ClientResult<T> = Result<T, ClientError>;
pub type CatalogResult<T> = Result<T, CatalogError>;
