//! Fetches yearly daily-climate CSV files of one station into a local directory.

use crate::download::error::DownloadError;
use crate::types::station::{Station, DEFAULT_BULK_DATA_URL};
use bon::bon;
use chrono::{Datelike, NaiveDate};
use futures_util::TryStreamExt;
use log::{info, warn};
use reqwest::Client;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tokio_util::io::StreamReader;

pub struct WeatherDownloader {
    client: Client,
    station: Station,
    base_url: String,
}

#[bon]
impl WeatherDownloader {
    /// Creates a downloader.
    ///
    /// * `.station(Station)`: Optional. Defaults to Calgary International.
    /// * `.base_url(String)`: Optional. Bulk data endpoint, defaults to the
    ///   Environment and Climate Change Canada archive.
    /// * `.client(Client)`: Optional. A preconfigured `reqwest` client.
    #[builder]
    pub fn new(
        station: Option<Station>,
        #[builder(into)] base_url: Option<String>,
        client: Option<Client>,
    ) -> Self {
        Self {
            client: client.unwrap_or_default(),
            station: station.unwrap_or_default(),
            base_url: base_url.unwrap_or_else(|| DEFAULT_BULK_DATA_URL.to_string()),
        }
    }

    pub fn station(&self) -> &Station {
        &self.station
    }

    /// Whether the file of `year` has to be fetched.
    ///
    /// Past years never change once downloaded. The current year's file grows
    /// every day and is always fetched again.
    pub async fn needs_download(&self, year: i32, dir: &Path, today: NaiveDate) -> bool {
        if year == today.year() {
            return true;
        }
        fs::metadata(dir.join(self.station.file_name(year)))
            .await
            .is_err()
    }

    /// Downloads one year of daily data into `dir` and returns the file path.
    ///
    /// The body is streamed into a temporary file next to the target and moved
    /// into place once complete, so an interrupted download never leaves a
    /// truncated yearly file behind. `dir` is created if missing.
    pub async fn download_year(&self, year: i32, dir: &Path) -> Result<PathBuf, DownloadError> {
        fs::create_dir_all(dir)
            .await
            .map_err(|e| DownloadError::DirCreation(dir.to_path_buf(), e))?;
        let url = self.station.daily_url(&self.base_url, year);
        let target = dir.join(self.station.file_name(year));
        info!("Downloading {} data for {} from {}", year, self.station, url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| DownloadError::NetworkRequest(url.clone(), e))?;

        let response = match response.error_for_status() {
            Ok(resp) => resp,
            Err(e) => {
                warn!("HTTP error for {}: {:?}", url, e);
                return Err(if let Some(status) = e.status() {
                    DownloadError::HttpStatus {
                        url,
                        status,
                        source: e,
                    }
                } else {
                    DownloadError::NetworkRequest(url, e)
                });
            }
        };

        let temp_file =
            NamedTempFile::new_in(dir).map_err(|e| DownloadError::FileWrite(target.clone(), e))?;
        let std_file = temp_file
            .reopen()
            .map_err(|e| DownloadError::FileWrite(target.clone(), e))?;
        let mut file = fs::File::from_std(std_file);

        let stream = response
            .bytes_stream()
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e));
        let reader = StreamReader::new(stream);
        tokio::pin!(reader);

        let written = tokio::io::copy(&mut reader, &mut file)
            .await
            .map_err(|e| DownloadError::DownloadIo(url.clone(), e))?;
        file.flush()
            .await
            .map_err(|e| DownloadError::FileWrite(target.clone(), e))?;
        drop(file);

        temp_file
            .persist(&target)
            .map_err(|e| DownloadError::FilePersist(target.clone(), e.error))?;

        info!("Saved {} bytes for {} to {:?}", written, year, target);
        Ok(target)
    }

    /// Downloads every year of `start_year..=end_year` into `dir`, one after the other.
    ///
    /// Years already present on disk are skipped, except the year of `today`.
    /// Returns the local file of every year in year order.
    pub async fn download_range(
        &self,
        start_year: i32,
        end_year: i32,
        dir: &Path,
        today: NaiveDate,
    ) -> Result<Vec<PathBuf>, DownloadError> {
        if start_year > end_year {
            return Err(DownloadError::InvalidYearRange {
                start: start_year,
                end: end_year,
            });
        }
        let mut paths = Vec::with_capacity((end_year - start_year + 1) as usize);
        for year in start_year..=end_year {
            if self.needs_download(year, dir, today).await {
                paths.push(self.download_year(year, dir).await?);
            } else {
                let path = dir.join(self.station.file_name(year));
                info!("Cache hit for {} data of {} at {:?}", year, self.station, path);
                paths.push(path);
            }
        }
        Ok(paths)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::AsyncReadExt;
    use tokio::net::TcpListener;

    /// Answers a single HTTP request with `status` and `body`, returns the base URL.
    async fn serve_once(status: &'static str, body: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request: Vec<u8> = Vec::new();
            let mut buf = [0u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
            }
            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: text/csv\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status,
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.ok();
        });
        format!("http://{}/bulk_data_e.html", addr)
    }

    fn local_downloader(base_url: String) -> WeatherDownloader {
        let client = Client::builder().no_proxy().build().unwrap();
        WeatherDownloader::builder()
            .base_url(base_url)
            .client(client)
            .build()
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2021, 5, 10).unwrap()
    }

    #[tokio::test]
    async fn test_needs_download() {
        let dir = tempfile::tempdir().unwrap();
        let downloader = WeatherDownloader::builder().build();
        let station = downloader.station().clone();
        std::fs::write(dir.path().join(station.file_name(2019)), "cached").unwrap();
        std::fs::write(dir.path().join(station.file_name(2021)), "partial").unwrap();

        assert!(!downloader.needs_download(2019, dir.path(), today()).await);
        assert!(downloader.needs_download(2020, dir.path(), today()).await);
        // Current year is refreshed even when present.
        assert!(downloader.needs_download(2021, dir.path(), today()).await);
    }

    #[tokio::test]
    async fn test_download_range_uses_cached_files() -> Result<(), DownloadError> {
        let dir = tempfile::tempdir().unwrap();
        let downloader = WeatherDownloader::builder()
            .base_url("http://127.0.0.1:9/unused")
            .build();
        let station = downloader.station().clone();
        for year in 2015..=2017 {
            std::fs::write(dir.path().join(station.file_name(year)), "cached").unwrap();
        }

        let paths = downloader
            .download_range(2015, 2017, dir.path(), today())
            .await?;
        assert_eq!(paths.len(), 3);
        assert!(paths[0].ends_with(station.file_name(2015)));
        assert!(paths[2].ends_with(station.file_name(2017)));
        Ok(())
    }

    #[tokio::test]
    async fn test_download_range_rejects_inverted_range() {
        let dir = tempfile::tempdir().unwrap();
        let downloader = WeatherDownloader::builder().build();
        let result = downloader.download_range(2020, 2010, dir.path(), today()).await;
        assert!(matches!(
            result,
            Err(DownloadError::InvalidYearRange { start: 2020, end: 2010 })
        ));
    }

    #[tokio::test]
    async fn test_unreachable_server_leaves_no_file() {
        let dir = tempfile::tempdir().unwrap();
        let downloader = WeatherDownloader::builder()
            .base_url("http://127.0.0.1:9/bulk_data_e.html")
            .build();

        let result = downloader.download_year(2019, dir.path()).await;
        assert!(matches!(
            result,
            Err(DownloadError::NetworkRequest(..)) | Err(DownloadError::HttpStatus { .. })
        ));
        let target = dir.path().join(downloader.station().file_name(2019));
        assert!(!target.exists());
    }

    #[tokio::test]
    async fn test_download_year_writes_body() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempfile::tempdir()?;
        let downloader = local_downloader(serve_once("200 OK", "a,b\n1,2\n").await);

        let path = downloader.download_year(2019, dir.path()).await?;
        assert_eq!(path, dir.path().join(downloader.station().file_name(2019)));
        assert_eq!(std::fs::read_to_string(&path)?, "a,b\n1,2\n");
        // Only the persisted file remains in the directory.
        assert_eq!(std::fs::read_dir(dir.path())?.count(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_download_year_creates_missing_dir() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempfile::tempdir()?;
        let nested = dir.path().join("not_yet").join("there");
        let downloader = local_downloader(serve_once("200 OK", "Date/Time\n").await);

        let path = downloader.download_year(2019, &nested).await?;
        assert!(path.starts_with(&nested));
        assert_eq!(std::fs::read_to_string(&path)?, "Date/Time\n");
        Ok(())
    }

    #[tokio::test]
    async fn test_http_error_status_leaves_no_file() {
        let dir = tempfile::tempdir().unwrap();
        let downloader = local_downloader(serve_once("404 Not Found", "missing").await);

        let result = downloader.download_year(2019, dir.path()).await;
        assert!(matches!(
            result,
            Err(DownloadError::HttpStatus { status, .. }) if status == reqwest::StatusCode::NOT_FOUND
        ));
        let target = dir.path().join(downloader.station().file_name(2019));
        assert!(!target.exists());
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[tokio::test]
    #[ignore = "downloads from climate.weather.gc.ca"]
    async fn test_download_year_from_archive() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempfile::tempdir()?;
        let downloader = WeatherDownloader::builder().build();
        let path = downloader.download_year(2019, dir.path()).await?;

        let content = std::fs::read_to_string(&path)?;
        assert!(content.contains("Max Temp (°C)"));
        assert!(content.contains("2019-12-31"));
        Ok(())
    }
}
