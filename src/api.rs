//! OpenWeatherMap current-weather client

use std::fmt;
use std::time::Duration;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

use crate::config::AppConfig;
use crate::icons::IconKind;
use crate::state::WeatherReading;

pub const EMPTY_QUERY_MESSAGE: &str = "Please enter a city name.";
pub const UPSTREAM_FALLBACK_MESSAGE: &str = "Unable to fetch weather data.";
pub const TRANSPORT_FAILURE_MESSAGE: &str = "Error in fetching weather data.";
pub const MALFORMED_RESPONSE_MESSAGE: &str = "Unexpected response from the weather service.";

/// Why a weather lookup produced no reading
#[derive(
    thiserror::Error, Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema,
)]
pub enum FetchError {
    #[error("empty city name")]
    EmptyQuery,
    #[error("upstream rejected request: {0}")]
    UpstreamRejected(String),
    #[error("transport failure: {0}")]
    TransportFailure(String),
    #[error("malformed response: {0}")]
    MalformedResponse(String),
}

impl FetchError {
    /// Text shown in place of the weather card
    pub fn user_message(&self) -> &str {
        match self {
            FetchError::EmptyQuery => EMPTY_QUERY_MESSAGE,
            FetchError::UpstreamRejected(message) => message.as_str(),
            FetchError::TransportFailure(_) => TRANSPORT_FAILURE_MESSAGE,
            FetchError::MalformedResponse(_) => MALFORMED_RESPONSE_MESSAGE,
        }
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        // The request URL carries the API key
        FetchError::TransportFailure(e.without_url().to_string())
    }
}

// ============================================================================
// Wire format
// ============================================================================

#[derive(Debug, Deserialize)]
struct CurrentResponse {
    weather: Vec<Condition>,
    main: MainBlock,
    wind: WindBlock,
    name: String,
}

#[derive(Debug, Deserialize)]
struct Condition {
    icon: String,
}

#[derive(Debug, Deserialize)]
struct MainBlock {
    temp: f64,
    humidity: f64,
}

#[derive(Debug, Deserialize)]
struct WindBlock {
    speed: f64,
}

/// Error body: `{"cod":"404","message":"city not found"}`
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

// ============================================================================
// Client
// ============================================================================

/// HTTP client for `GET /data/2.5/weather`
#[derive(Clone)]
pub struct OpenWeatherClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl fmt::Debug for OpenWeatherClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpenWeatherClient")
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

impl OpenWeatherClient {
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        timeout: Option<Duration>,
    ) -> Result<Self, reqwest::Error> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            http: builder.build()?,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        })
    }

    pub fn from_config(config: &AppConfig) -> Result<Self, reqwest::Error> {
        Self::new(&config.base_url, &config.api_key, config.timeout)
    }

    fn weather_url(&self, city: &str) -> String {
        format!(
            "{}/data/2.5/weather?q={}&units=metric&appid={}",
            self.base_url,
            urlencoding::encode(city),
            urlencoding::encode(&self.api_key)
        )
    }

    /// Look up current weather for `city`.
    ///
    /// Blank input fails with [`FetchError::EmptyQuery`] without touching the
    /// network; otherwise exactly one request is made.
    #[instrument(skip(self), level = "debug")]
    pub async fn fetch_weather(&self, city: &str) -> Result<WeatherReading, FetchError> {
        let city = city.trim();
        if city.is_empty() {
            return Err(FetchError::EmptyQuery);
        }

        let response = self.http.get(self.weather_url(city)).send().await?;
        let status = response.status();
        let body = response.text().await?;
        debug!(%status, bytes = body.len(), "weather response received");

        if !status.is_success() {
            let message = upstream_message(&body);
            warn!(%status, %message, "weather request rejected");
            return Err(FetchError::UpstreamRejected(message));
        }

        parse_reading(&body)
    }
}

fn upstream_message(body: &str) -> String {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.message)
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| UPSTREAM_FALLBACK_MESSAGE.to_string())
}

/// Map a successful response body into a [`WeatherReading`]
pub fn parse_reading(body: &str) -> Result<WeatherReading, FetchError> {
    let data: CurrentResponse = serde_json::from_str(body).map_err(|e| {
        if e.is_data() {
            FetchError::MalformedResponse(e.to_string())
        } else {
            // Not JSON at all (truncated, HTML error page, ...)
            FetchError::TransportFailure(e.to_string())
        }
    })?;

    let condition = data
        .weather
        .first()
        .ok_or_else(|| FetchError::MalformedResponse("empty `weather` array".into()))?;

    Ok(WeatherReading {
        temperature: data.main.temp.floor() as i32,
        location: data.name,
        humidity: data.main.humidity.round().clamp(0.0, 100.0) as u8,
        wind_speed: data.wind.speed,
        icon: IconKind::from_code(&condition.icon),
    })
}
