use log::debug;
use std::time::Duration;

use crate::error::FetchError;
use crate::models::{Period, PrayerResponse};

pub const DEFAULT_BASE_URL: &str = "https://www.e-solat.gov.my/index.php";

/// Anything that can produce an e-Solat table for a zone.
pub trait PrayerSource {
    fn fetch(&self, zone: &str, period: Period) -> Result<PrayerResponse, FetchError>;

    fn fetch_month(&self, zone: &str) -> Result<PrayerResponse, FetchError> {
        self.fetch(zone, Period::Month)
    }
}

impl<T: PrayerSource + ?Sized> PrayerSource for &T {
    fn fetch(&self, zone: &str, period: Period) -> Result<PrayerResponse, FetchError> {
        (**self).fetch(zone, period)
    }
}

pub struct EsolatClient {
    client: reqwest::blocking::Client,
    base_url: String,
}

impl EsolatClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, FetchError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("waktu-solat/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(FetchError::Network)?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn url_for(&self, zone: &str, period: Period) -> String {
        format!(
            "{}?r=esolatApi/TakwimSolat&period={}&zone={}",
            self.base_url,
            period.as_str(),
            zone
        )
    }
}

impl PrayerSource for EsolatClient {
    fn fetch(&self, zone: &str, period: Period) -> Result<PrayerResponse, FetchError> {
        let url = self.url_for(zone, period);
        debug!("GET {}", url);

        let response = self
            .client
            .get(&url)
            .header("Accept", "application/json")
            .send()
            .map_err(FetchError::Network)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::HttpStatus(status.as_u16()));
        }

        let body = response.text().map_err(FetchError::Network)?;
        parse_response(&body)
    }
}

/// Decode a response body and check e-Solat's own status marker.
pub fn parse_response(body: &str) -> Result<PrayerResponse, FetchError> {
    let data: PrayerResponse =
        serde_json::from_str(body).map_err(|e| FetchError::Decode(e.to_string()))?;
    if !data.is_ok() {
        return Err(FetchError::ApiStatus(data.status));
    }
    Ok(data)
}
