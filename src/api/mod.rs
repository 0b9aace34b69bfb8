use std::sync::Arc;

use axum::{
    Router,
    extract::{
        Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
};
use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{error, info};

use crate::{
    TripCastError,
    cities::{CityCatalog, Continent},
    models::TripRecord,
    planner::{SearchForm, SearchRequest, TripPlanner},
    render::{SearchView, render},
    trips::TripStore,
};

/// Shared handles for every request
#[derive(Clone)]
pub struct AppState {
    pub planner: Arc<TripPlanner>,
    pub trips: Arc<dyn TripStore>,
}

impl AppState {
    pub fn new(planner: TripPlanner, trips: Arc<dyn TripStore>) -> Self {
        Self {
            planner: Arc::new(planner),
            trips,
        }
    }
}

#[derive(Deserialize)]
pub struct SaveTripPayload {
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default, rename = "savedAt")]
    pub saved_at: Option<String>,
}

#[derive(Serialize)]
pub struct SaveTripResponse {
    pub message: &'static str,
    pub data: Vec<TripRecord>,
}

#[derive(Serialize)]
pub struct ApiContinent {
    pub name: String,
    pub cities: Vec<&'static str>,
}

impl ApiContinent {
    fn from_catalog(catalog: &CityCatalog, continent: Continent) -> Self {
        Self {
            name: continent.label().to_string(),
            cities: catalog
                .in_continent(continent)
                .iter()
                .map(|c| c.name)
                .collect(),
        }
    }
}

impl IntoResponse for TripCastError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            error!("Request failed: {}", self);
        }
        (status, Json(json!({ "error": self.user_message() }))).into_response()
    }
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/save-trip", post(save_trip).fallback(method_not_allowed))
        .route("/saved-trips", get(get_saved_trips).fallback(method_not_allowed))
        .route("/search", get(search).fallback(method_not_allowed))
        .route("/continents", get(get_continents).fallback(method_not_allowed))
}

async fn method_not_allowed() -> TripCastError {
    TripCastError::MethodNotAllowed
}

async fn save_trip(
    State(state): State<AppState>,
    payload: Result<Json<SaveTripPayload>, JsonRejection>,
) -> Result<Json<SaveTripResponse>, TripCastError> {
    let missing = || TripCastError::missing_field("city or date");

    let Json(payload) = payload.map_err(|_| missing())?;
    let city = payload
        .city
        .filter(|c| !c.trim().is_empty())
        .ok_or_else(missing)?;
    let saved_at = payload
        .saved_at
        .filter(|s| !s.trim().is_empty())
        .ok_or_else(missing)?;
    let saved_at = DateTime::parse_from_rfc3339(saved_at.trim())
        .map_err(|_| TripCastError::invalid_timestamp(&saved_at))?
        .with_timezone(&Utc);

    let record = state.trips.save(city, saved_at).await?;
    info!("Saved trip to {}", record.city);

    Ok(Json(SaveTripResponse {
        message: "Trip saved!",
        data: vec![record],
    }))
}

async fn get_saved_trips(
    State(state): State<AppState>,
) -> Result<Json<Vec<TripRecord>>, TripCastError> {
    let records = state.trips.list().await?;
    Ok(Json(records))
}

async fn search(
    State(state): State<AppState>,
    form: Result<Query<SearchForm>, QueryRejection>,
) -> Result<Json<SearchView>, Response> {
    let Query(form) = form.map_err(|rejection| {
        (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": rejection.body_text() })),
        )
            .into_response()
    })?;

    let today = Local::now().date_naive();
    let request =
        SearchRequest::from_form(&form, today, state.planner.settings().max_trip_days)
            .map_err(IntoResponse::into_response)?;
    let outcome = state
        .planner
        .search(&request)
        .await
        .map_err(IntoResponse::into_response)?;

    Ok(Json(render(&outcome)))
}

async fn get_continents(State(state): State<AppState>) -> Json<Vec<ApiContinent>> {
    let catalog = state.planner.catalog();
    Json(
        Continent::ALL
            .into_iter()
            .map(|continent| ApiContinent::from_catalog(catalog, continent))
            .collect(),
    )
}
