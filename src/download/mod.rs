//! Bulk retrieval of MERRA-2 granules from NASA GES DISC.
//!
//! GES DISC sits behind Earthdata Login: the first request for a granule
//! redirects to `urs.earthdata.nasa.gov`, which wants HTTP basic credentials
//! and then redirects back to the data server with a session cookie. The
//! client follows that chain manually so credentials are only ever sent to
//! the login host.

pub mod error;
pub mod urls;

pub use error::DownloadError;
pub use urls::{merra2_stream, monthly_granule_urls, GESDISC_BASE};

use futures_util::TryStreamExt;
use log::{info, warn};
use reqwest::header::LOCATION;
use reqwest::{Client, StatusCode};
use std::path::Path;
use tokio::fs;
use tokio_util::io::StreamReader;
use url::Url;

const EARTHDATA_LOGIN_HOST: &str = "urs.earthdata.nasa.gov";
const MAX_REDIRECTS: usize = 10;

pub struct Downloader {
    client: Client,
    username: String,
    password: String,
}

impl Downloader {
    pub fn new(username: &str, password: &str) -> Result<Self, DownloadError> {
        // Cookies carry the Earthdata session between hops; redirects are
        // handled by hand so auth can be restricted to the login host.
        let client = Client::builder()
            .user_agent("NASA-GESDISC-Downloader")
            .cookie_store(true)
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .map_err(DownloadError::ClientBuild)?;
        Ok(Self {
            client,
            username: username.to_string(),
            password: password.to_string(),
        })
    }

    /// Downloads every granule into `out_dir`, skipping files already on
    /// disk. A failed granule is logged and skipped so one outage does not
    /// abort a multi-year fetch. Returns the number of files downloaded.
    pub async fn fetch_all(&self, urls: &[String], out_dir: &Path) -> Result<usize, DownloadError> {
        fs::create_dir_all(out_dir)
            .await
            .map_err(|e| DownloadError::OutDirCreation(out_dir.to_path_buf(), e))?;

        let mut downloaded = 0usize;
        for url in urls {
            let filename = match granule_filename(url) {
                Ok(name) => name,
                Err(e) => {
                    warn!("Skipping malformed URL: {e}");
                    continue;
                }
            };
            let target = out_dir.join(&filename);
            if fs::metadata(&target).await.is_ok() {
                info!("Already present, skipping {filename}");
                continue;
            }
            match self.fetch_one(url, &target).await {
                Ok(()) => {
                    info!("Saved {filename}");
                    downloaded += 1;
                }
                Err(e) => warn!("Failed to download {url}: {e}"),
            }
        }
        info!("Fetched {downloaded} of {} granules", urls.len());
        Ok(downloaded)
    }

    /// Fetches one granule, following the Earthdata login redirect chain.
    pub async fn fetch_one(&self, url: &str, target: &Path) -> Result<(), DownloadError> {
        let mut current =
            Url::parse(url).map_err(|e| DownloadError::InvalidUrl(url.to_string(), e))?;

        for _ in 0..MAX_REDIRECTS {
            let mut request = self.client.get(current.clone());
            if current.host_str() == Some(EARTHDATA_LOGIN_HOST) {
                request = request.basic_auth(&self.username, Some(&self.password));
            }
            let response = request
                .send()
                .await
                .map_err(|e| DownloadError::NetworkRequest(current.to_string(), e))?;

            let status = response.status();
            if status.is_redirection() {
                let location = response
                    .headers()
                    .get(LOCATION)
                    .and_then(|v| v.to_str().ok())
                    .ok_or_else(|| DownloadError::BadRedirect(current.to_string()))?;
                current = resolve_location(&current, location)?;
                continue;
            }
            if status != StatusCode::OK {
                return Err(DownloadError::HttpStatus {
                    url: current.to_string(),
                    status,
                });
            }

            let stream = response
                .bytes_stream()
                .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e));
            let mut reader = StreamReader::new(stream);
            let mut file = fs::File::create(target)
                .await
                .map_err(|e| DownloadError::Io(target.to_path_buf(), e))?;
            tokio::io::copy(&mut reader, &mut file)
                .await
                .map_err(|e| DownloadError::Io(target.to_path_buf(), e))?;
            return Ok(());
        }
        Err(DownloadError::TooManyRedirects(
            url.to_string(),
            MAX_REDIRECTS,
        ))
    }
}

/// Local filename for a granule URL: its last path segment.
fn granule_filename(url: &str) -> Result<String, DownloadError> {
    let parsed = Url::parse(url).map_err(|e| DownloadError::InvalidUrl(url.to_string(), e))?;
    parsed
        .path_segments()
        .and_then(|mut segments| segments.next_back())
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .ok_or_else(|| DownloadError::BadRedirect(url.to_string()))
}

/// Resolves a Location header, which GES DISC sometimes sends relative.
fn resolve_location(current: &Url, location: &str) -> Result<Url, DownloadError> {
    current
        .join(location)
        .map_err(|e| DownloadError::InvalidUrl(location.to_string(), e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filename_is_the_last_path_segment() {
        let url = "https://data.gesdisc.earthdata.nasa.gov/data/MERRA2_MONTHLY/\
                   M2TMNXLND.5.12.4/2015/MERRA2_400.tavgM_2d_lnd_Nx.201508.nc4";
        assert_eq!(
            granule_filename(url).unwrap(),
            "MERRA2_400.tavgM_2d_lnd_Nx.201508.nc4"
        );
        assert!(granule_filename("not a url").is_err());
    }

    #[test]
    fn relative_redirects_resolve_against_the_login_host() {
        let current = Url::parse("https://urs.earthdata.nasa.gov/oauth/authorize?x=1").unwrap();
        let next = resolve_location(&current, "/login?return=abc").unwrap();
        assert_eq!(next.host_str(), Some("urs.earthdata.nasa.gov"));
        assert_eq!(next.path(), "/login");

        let absolute =
            resolve_location(&current, "https://data.gesdisc.earthdata.nasa.gov/data/x.nc4")
                .unwrap();
        assert_eq!(absolute.host_str(), Some("data.gesdisc.earthdata.nasa.gov"));
    }
}
