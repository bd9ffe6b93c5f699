use reqwest::StatusCode;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DownloadError {
    #[error("Failed to build the download HTTP client")]
    ClientBuild(#[source] reqwest::Error),

    #[error("Invalid granule URL '{0}'")]
    InvalidUrl(String, #[source] url::ParseError),

    #[error("Network request to '{0}' failed")]
    NetworkRequest(String, #[source] reqwest::Error),

    #[error("HTTP status {status} fetching '{url}'")]
    HttpStatus { url: String, status: StatusCode },

    #[error("Redirect chain for '{0}' exceeded {1} hops")]
    TooManyRedirects(String, usize),

    #[error("Redirect from '{0}' carried no usable Location header")]
    BadRedirect(String),

    #[error("Failed to write downloaded granule to '{0}'")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("Failed to create output directory '{0}'")]
    OutDirCreation(PathBuf, #[source] std::io::Error),
}
