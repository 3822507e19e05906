use thiserror::Error;

#[derive(Debug, Error)]
pub enum SocialsError {
    #[error("missing API token: pass --api-token or set INTERCOM_API_TOKEN")]
    MissingToken,

    #[error("invalid URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("error sending request to {url}: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} returned {status}: {body}")]
    Status {
        status: u16,
        url: String,
        body: String,
    },

    #[error("error decoding response body from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("pagination loop: {0} was already fetched")]
    PaginationLoop(String),

    #[error("spreadsheet error: {0}")]
    Spreadsheet(String),

    #[error(transparent)]
    Http(#[from] reqwest::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),
}

pub type Result<T> = std::result::Result<T, SocialsError>;
