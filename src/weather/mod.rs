//! OpenWeather client for geocoding, current weather and air pollution
//!
//! All three endpoints share one credential and one base URL. There is no
//! retry: a single failed call ends the lookup with a [`LookupError`].

use std::time::{Duration, Instant};

use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use tracing::{debug, info, instrument, warn};

use crate::config::OpenWeatherConfig;
use crate::error::{AirAwareError, Endpoint, LookupError};
use crate::models::{GeocodeResult, LocationQuery, WeatherSnapshot};

pub mod openweather;

use openweather::{AirPollutionResponse, GeocodingEntry, WeatherResponse};

const GEOCODE_PATH: &str = "/geo/1.0/direct";
const WEATHER_PATH: &str = "/data/2.5/weather";
const AIR_POLLUTION_PATH: &str = "/data/2.5/air_pollution";

/// Client for the OpenWeather geocoding, weather and air pollution APIs
#[derive(Clone)]
pub struct OpenWeatherClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl OpenWeatherClient {
    /// Create a new OpenWeather client
    pub fn new(config: &OpenWeatherConfig) -> Result<Self, AirAwareError> {
        let timeout = Duration::from_secs(config.timeout_seconds.into());

        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("AirAware/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| AirAwareError::config(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        })
    }

    /// Resolve `"{area},{city}"` to the coordinates of the first match
    #[instrument(skip(self), fields(city = %query.city, area = %query.area))]
    pub async fn geocode(&self, query: &LocationQuery) -> Result<GeocodeResult, LookupError> {
        let start_time = Instant::now();
        let params = [("q", query.search_text()), ("limit", "1".to_string())];

        let entries: Vec<GeocodingEntry> = self
            .get_json(Endpoint::Geocode, GEOCODE_PATH, &params)
            .await?;

        let Some(entry) = entries.into_iter().next() else {
            warn!("No results found for location '{}'", query.search_text());
            return Err(LookupError::not_found(&query.area, &query.city));
        };

        let result = GeocodeResult::from(entry);
        info!(
            "Geocoded '{}' to {} ({}) in {:.3}s",
            query.search_text(),
            result.name.as_deref().unwrap_or("unnamed place"),
            result.format_coordinates(),
            start_time.elapsed().as_secs_f64()
        );
        Ok(result)
    }

    /// Description of the current weather at a location
    #[instrument(skip(self), fields(lat = location.latitude, lon = location.longitude))]
    pub async fn current_weather(&self, location: &GeocodeResult) -> Result<String, LookupError> {
        let response: WeatherResponse = self
            .get_json(Endpoint::Weather, WEATHER_PATH, &coordinates(location))
            .await?;

        let description = response.description();
        debug!("Current weather: {}", description);
        Ok(description)
    }

    /// Current PM2.5 concentration at a location
    #[instrument(skip(self), fields(lat = location.latitude, lon = location.longitude))]
    pub async fn pm2_5(&self, location: &GeocodeResult) -> Result<f64, LookupError> {
        let response: AirPollutionResponse = self
            .get_json(Endpoint::AirPollution, AIR_POLLUTION_PATH, &coordinates(location))
            .await?;

        let pm2_5 = response.pm2_5().ok_or_else(|| {
            LookupError::unexpected("air pollution response has no pm2_5 reading")
        })?;
        debug!("Current PM2.5: {}", pm2_5);
        Ok(pm2_5)
    }

    /// Geocode, then fetch weather and PM2.5 for the resolved coordinates
    #[instrument(skip(self), fields(city = %query.city, area = %query.area))]
    pub async fn lookup(&self, query: &LocationQuery) -> Result<WeatherSnapshot, LookupError> {
        let start_time = Instant::now();

        let location = self.geocode(query).await?;
        let description = self.current_weather(&location).await?;
        let pm2_5 = self.pm2_5(&location).await?;

        let total_duration = start_time.elapsed();
        info!(
            "Live lookup finished in {:.3}s",
            total_duration.as_secs_f64()
        );
        if total_duration.as_secs() > 5 {
            warn!(
                "Slow OpenWeather responses: {:.3}s",
                total_duration.as_secs_f64()
            );
        }

        Ok(WeatherSnapshot::new(description, pm2_5))
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: Endpoint,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<T, LookupError> {
        let response = self.send(endpoint, path, params).await?;
        response.json::<T>().await.map_err(|e| {
            LookupError::unexpected(format!(
                "Failed to parse {endpoint} response: {}",
                e.without_url()
            ))
        })
    }

    /// Issue a GET and turn any non-success status into [`LookupError::Upstream`]
    async fn send(
        &self,
        endpoint: Endpoint,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<Response, LookupError> {
        let url = format!("{}{}", self.base_url, path);
        debug!("OpenWeather request: {}", url);

        let response = self
            .client
            .get(&url)
            .query(params)
            .query(&[("appid", self.api_key.as_str())])
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response
            .text()
            .await
            .unwrap_or_else(|e| format!("<unreadable body: {}>", e.without_url()));
        warn!("OpenWeather {} request failed with {}: {}", endpoint, status, body);
        Err(LookupError::upstream(endpoint, status.as_u16(), body))
    }
}

fn coordinates(location: &GeocodeResult) -> [(&'static str, String); 2] {
    [
        ("lat", location.latitude.to_string()),
        ("lon", location.longitude.to_string()),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> OpenWeatherClient {
        let config = OpenWeatherConfig {
            api_key: "test_key".to_string(),
            base_url: server.uri(),
            timeout_seconds: 5,
        };
        OpenWeatherClient::new(&config).unwrap()
    }

    #[tokio::test]
    async fn test_geocode_sends_area_first_query() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(GEOCODE_PATH))
            .and(query_param("q", "Soho,London"))
            .and(query_param("limit", "1"))
            .and(query_param("appid", "test_key"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!([{"name": "Soho", "lat": 51.51, "lon": -0.13}])),
            )
            .expect(1)
            .mount(&server)
            .await;

        let result = client_for(&server)
            .geocode(&LocationQuery::new("London", "Soho"))
            .await
            .unwrap();

        assert_eq!(result.latitude, 51.51);
        assert_eq!(result.longitude, -0.13);
    }

    #[tokio::test]
    async fn test_geocode_empty_result_is_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(GEOCODE_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .geocode(&LocationQuery::new("Nowhere", "Void"))
            .await
            .unwrap_err();

        assert_eq!(err, LookupError::not_found("Void", "Nowhere"));
    }

    #[tokio::test]
    async fn test_geocode_non_success_carries_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(GEOCODE_PATH))
            .respond_with(ResponseTemplate::new(401).set_body_string(
                r#"{"cod":401, "message": "Invalid API key."}"#,
            ))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .geocode(&LocationQuery::new("London", "Soho"))
            .await
            .unwrap_err();

        match &err {
            LookupError::Upstream {
                endpoint,
                status,
                body,
            } => {
                assert_eq!(*endpoint, Endpoint::Geocode);
                assert_eq!(*status, 401);
                assert!(body.contains("Invalid API key."));
            }
            other => panic!("expected upstream error, got {other:?}"),
        }
        assert!(err.to_string().starts_with("Error fetching geocode data:"));
    }

    #[tokio::test]
    async fn test_geocode_malformed_body_is_unexpected() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(GEOCODE_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .geocode(&LocationQuery::new("London", "Soho"))
            .await
            .unwrap_err();

        assert!(matches!(err, LookupError::Unexpected { .. }));
        assert!(!err.to_string().contains("test_key"));
    }

    #[tokio::test]
    async fn test_lookup_chains_all_three_calls() {
        let server = MockServer::start().await;
        Mock::given(path(GEOCODE_PATH))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!([{"lat": 51.51, "lon": -0.13}])),
            )
            .mount(&server)
            .await;
        Mock::given(path(WEATHER_PATH))
            .and(query_param("lat", "51.51"))
            .and(query_param("lon", "-0.13"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"weather": [{"description": "clear sky"}]})),
            )
            .mount(&server)
            .await;
        Mock::given(path(AIR_POLLUTION_PATH))
            .and(query_param("lat", "51.51"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"list": [{"components": {"pm2_5": 42.0}}]})),
            )
            .mount(&server)
            .await;

        let snapshot = client_for(&server)
            .lookup(&LocationQuery::new("London", "Soho"))
            .await
            .unwrap();

        assert_eq!(snapshot, WeatherSnapshot::new("clear sky", 42.0));
    }

    #[tokio::test]
    async fn test_lookup_stops_at_failing_weather_call() {
        let server = MockServer::start().await;
        Mock::given(path(GEOCODE_PATH))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!([{"lat": 1.0, "lon": 2.0}])),
            )
            .mount(&server)
            .await;
        Mock::given(path(WEATHER_PATH))
            .respond_with(ResponseTemplate::new(500).set_body_string("upstream down"))
            .mount(&server)
            .await;
        Mock::given(path(AIR_POLLUTION_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"list": []})))
            .expect(0)
            .mount(&server)
            .await;

        let err = client_for(&server)
            .lookup(&LocationQuery::new("London", "Soho"))
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "Error fetching weather: upstream down");
    }

    #[tokio::test]
    async fn test_lookup_missing_pm2_5_is_unexpected() {
        let server = MockServer::start().await;
        Mock::given(path(GEOCODE_PATH))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!([{"lat": 1.0, "lon": 2.0}])),
            )
            .mount(&server)
            .await;
        Mock::given(path(WEATHER_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"weather": []})))
            .mount(&server)
            .await;
        Mock::given(path(AIR_POLLUTION_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"list": []})))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .lookup(&LocationQuery::new("London", "Soho"))
            .await
            .unwrap_err();

        assert!(matches!(err, LookupError::Unexpected { .. }));
    }

    #[tokio::test]
    async fn test_transport_failure_hides_api_key() {
        let config = OpenWeatherConfig {
            api_key: "SECRET_OW_KEY".to_string(),
            base_url: "http://127.0.0.1:1".to_string(),
            timeout_seconds: 5,
        };
        let err = OpenWeatherClient::new(&config)
            .unwrap()
            .lookup(&LocationQuery::new("London", "Soho"))
            .await
            .unwrap_err();

        assert!(matches!(err, LookupError::Unexpected { .. }));
        assert!(err.to_string().starts_with("Error occurred:"));
        assert!(!err.to_string().contains("SECRET_OW_KEY"));
        assert!(!AirAwareError::from(err).user_message().contains("SECRET_OW_KEY"));
    }

    #[tokio::test]
    async fn test_truncated_error_body_is_reported() {
        use tokio::io::{AsyncReadExt, AsyncWriteExt};

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = [0u8; 4096];
            let _ = socket.read(&mut request).await.unwrap();
            socket
                .write_all(b"HTTP/1.1 500 Internal Server Error\r\nContent-Length: 100\r\n\r\nshort")
                .await
                .unwrap();
            socket.shutdown().await.unwrap();
        });

        let config = OpenWeatherConfig {
            api_key: "test_key".to_string(),
            base_url: format!("http://{addr}"),
            timeout_seconds: 5,
        };
        let err = OpenWeatherClient::new(&config)
            .unwrap()
            .geocode(&LocationQuery::new("London", "Soho"))
            .await
            .unwrap_err();

        match err {
            LookupError::Upstream { status, body, .. } => {
                assert_eq!(status, 500);
                assert!(body.starts_with("<unreadable body:"));
                assert!(!body.contains("test_key"));
            }
            other => panic!("expected upstream error, got {other:?}"),
        }
    }
}
