//! Client for the trip endpoints of a running tripcast server

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use reqwest::{Client, Response};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use super::TripStore;
use crate::models::TripRecord;
use crate::{Result, TripCastError};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SaveTripBody<'a> {
    city: &'a str,
    saved_at: String,
}

#[derive(Deserialize)]
struct SaveTripResponse {
    #[serde(default)]
    data: Vec<TripRecord>,
}

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

/// [`TripStore`] backed by `/api/save-trip` and `/api/saved-trips`
pub struct HttpTripStoreClient {
    client: Client,
    base_url: String,
}

impl HttpTripStoreClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| TripCastError::config(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// The server's `{error}` text, or the status line when the body has none
    async fn error_message(response: Response) -> String {
        let status = response.status();
        match response.json::<ErrorBody>().await {
            Ok(body) => body.error,
            Err(_) => status.to_string(),
        }
    }
}

#[async_trait]
impl TripStore for HttpTripStoreClient {
    #[instrument(skip(self))]
    async fn save(&self, city: String, saved_at: DateTime<Utc>) -> Result<TripRecord> {
        let url = format!("{}/api/save-trip", self.base_url);
        let body = SaveTripBody {
            city: &city,
            saved_at: saved_at.to_rfc3339_opts(SecondsFormat::AutoSi, true),
        };

        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| TripCastError::store_write(e.to_string()))?;

        if !response.status().is_success() {
            return Err(TripCastError::store_write(
                Self::error_message(response).await,
            ));
        }

        let saved: SaveTripResponse = response
            .json()
            .await
            .map_err(|e| TripCastError::store_write(e.to_string()))?;
        debug!("Server stored {} record(s)", saved.data.len());

        Ok(saved
            .data
            .into_iter()
            .next()
            .unwrap_or_else(|| TripRecord::new(city, saved_at)))
    }

    #[instrument(skip(self))]
    async fn list(&self) -> Result<Vec<TripRecord>> {
        let url = format!("{}/api/saved-trips", self.base_url);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| TripCastError::store_read(e.to_string()))?;

        if !response.status().is_success() {
            return Err(TripCastError::store_read(
                Self::error_message(response).await,
            ));
        }

        response
            .json()
            .await
            .map_err(|e| TripCastError::store_read(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client(server: &MockServer) -> HttpTripStoreClient {
        HttpTripStoreClient::new(&server.uri(), Duration::from_secs(5)).unwrap()
    }

    #[tokio::test]
    async fn test_save_posts_camel_case_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/save-trip"))
            .and(body_json(json!({"city": "Rome", "savedAt": "2026-10-17T09:30:00Z"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "message": "Trip saved!",
                "data": [{"city": "Rome", "saved_at": "2026-10-17T09:30:00Z"}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let saved_at = Utc.with_ymd_and_hms(2026, 10, 17, 9, 30, 0).unwrap();
        let record = client(&server)
            .save("Rome".to_string(), saved_at)
            .await
            .unwrap();
        assert_eq!(record, TripRecord::new("Rome".to_string(), saved_at));
    }

    #[tokio::test]
    async fn test_store_error_message_is_surfaced_verbatim() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/save-trip"))
            .respond_with(
                ResponseTemplate::new(500)
                    .set_body_json(json!({"error": "duplicate key value violates unique constraint"})),
            )
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/saved-trips"))
            .respond_with(ResponseTemplate::new(500).set_body_string("oops"))
            .mount(&server)
            .await;

        let client = client(&server);
        let err = client.save("Rome".to_string(), Utc::now()).await.unwrap_err();
        assert!(matches!(err, TripCastError::StoreWriteFailure { .. }));
        assert_eq!(
            err.user_message(),
            "duplicate key value violates unique constraint"
        );

        let err = client.list().await.unwrap_err();
        assert!(matches!(err, TripCastError::StoreReadFailure { .. }));
        assert_eq!(err.user_message(), "500 Internal Server Error");
    }

    #[tokio::test]
    async fn test_list_parses_records() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/saved-trips"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"city": "Paris", "saved_at": "2026-10-17T12:00:00Z"},
                {"city": "Rome", "saved_at": "2026-10-16T08:00:00+00:00"}
            ])))
            .mount(&server)
            .await;

        let records = client(&server).list().await.unwrap();
        let cities: Vec<_> = records.iter().map(|r| r.city.as_str()).collect();
        assert_eq!(cities, ["Paris", "Rome"]);
    }
}
