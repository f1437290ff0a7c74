use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use signal_advisor_api_types::{
    AdvisoryResponse, Advanced, CreateSession, ErrorBody, SessionCreated, SessionId, SpeedConfig,
};
use signal_advisor_core::AdvisorError;
use signal_advisor_core::presentation::map_view;
use tower_http::cors::{Any, CorsLayer};
use tracing::error;

use crate::http::payload::advisory_response;
use crate::sessions::SessionRegistry;

const INDEX_HTML: &str = include_str!("../../assets/index.html");

type AppState = Arc<SessionRegistry>;

pub fn create_router(registry: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/health", get(health))
        .route("/config", get(config))
        .route("/sessions", post(create_session))
        .route("/sessions/{id}", delete(end_session))
        // `navigator.sendBeacon` can only POST
        .route("/sessions/{id}/end", post(end_session))
        .route("/sessions/{id}/advisory", get(advisory))
        .route("/sessions/{id}/advance", post(advance))
        .layer(CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any))
        .with_state(registry)
}

#[derive(Debug)]
pub enum ApiError {
    SessionNotFound(SessionId),
    Rejected(AdvisorError),
    Internal(AdvisorError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::SessionNotFound(id) => (StatusCode::NOT_FOUND, format!("Session not found: {id}")),
            ApiError::Rejected(error) => (StatusCode::BAD_REQUEST, error.to_string()),
            ApiError::Internal(error) => {
                error!(%error, "advisory failed");
                (StatusCode::INTERNAL_SERVER_ERROR, error.to_string())
            }
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}

async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

async fn health() -> &'static str {
    "OK"
}

async fn config(State(registry): State<AppState>) -> Json<SpeedConfig> {
    let limits = registry.scenario().speed_limits();

    Json(SpeedConfig {
        min_kmh: limits.min_kmh,
        max_kmh: limits.max_kmh,
        default_kmh: limits.default_kmh,
    })
}

async fn create_session(
    State(registry): State<AppState>,
    Json(request): Json<CreateSession>,
) -> Result<(StatusCode, Json<SessionCreated>), ApiError> {
    let (id, session) = registry.create(request.speed_kmh).await.map_err(ApiError::Rejected)?;
    let speed_kmh = session.lock().await.speed().kmh();

    Ok((StatusCode::CREATED, Json(SessionCreated { id, speed_kmh })))
}

async fn advisory(
    State(registry): State<AppState>,
    Path(id): Path<SessionId>,
) -> Result<Json<AdvisoryResponse>, ApiError> {
    let session = registry.get(id).await.ok_or(ApiError::SessionNotFound(id))?;
    let session = session.lock().await;

    let advisory = session.refresh().map_err(ApiError::Internal)?;
    let view = map_view(&session, &advisory);

    Ok(Json(advisory_response(&advisory, &view).map_err(ApiError::Internal)?))
}

async fn advance(
    State(registry): State<AppState>,
    Path(id): Path<SessionId>,
) -> Result<Json<Advanced>, ApiError> {
    let session = registry.get(id).await.ok_or(ApiError::SessionNotFound(id))?;
    let position = session.lock().await.advance();

    Ok(Json(Advanced { position }))
}

async fn end_session(State(registry): State<AppState>, Path(id): Path<SessionId>) -> StatusCode {
    if registry.remove(id).await {
        StatusCode::NO_CONTENT
    } else {
        StatusCode::NOT_FOUND
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeDelta;
    use signal_advisor_core::{AdvisorConfig, ManualClock};

    fn state(clock: &ManualClock) -> AppState {
        let scenario = Arc::new(AdvisorConfig::chandigarh().unwrap().into_scenario().unwrap());
        Arc::new(SessionRegistry::new(scenario, Arc::new(clock.clone()), TimeDelta::minutes(10)))
    }

    async fn new_session(state: &AppState, speed_kmh: Option<f64>) -> SessionId {
        let (status, Json(created)) = create_session(State(state.clone()), Json(CreateSession { speed_kmh }))
            .await
            .unwrap();
        assert_eq!(status, StatusCode::CREATED);
        created.id
    }

    #[tokio::test]
    async fn test_config() {
        let state = state(&ManualClock::default());
        let Json(speed) = config(State(state)).await;

        assert_eq!(speed, SpeedConfig { min_kmh: 10.0, max_kmh: 60.0, default_kmh: 30.0 });
    }

    #[tokio::test]
    async fn test_advisory_at_start() {
        let state = state(&ManualClock::default());
        let id = new_session(&state, None).await;

        let Json(response) = advisory(State(state), Path(id)).await.unwrap();

        assert_eq!(response.position, 0);
        assert_eq!(response.display.location, [30.7412, 76.7824]);
        assert_eq!(response.display.signal, "Sector 17/22 Intersection");
        assert_eq!(response.display.distance_m, 486.5);
        assert_eq!(response.display.eta_s, 58.4);
        assert_eq!(response.display.phase, "RED");
        assert_eq!(response.display.indicator, "🔴 RED");
        assert_eq!(response.display.remaining_s, 30);
        assert_eq!(
            response.announcement,
            "Upcoming traffic light: Sector 17/22 Intersection. Signal is RED. 30 seconds remaining."
        );

        assert_eq!(response.map.center, [30.7412, 76.7824]);
        assert_eq!(response.map.zoom, 15);
        assert_eq!(response.map.markers.len(), 3);
        assert_eq!(response.map.markers[0].kind, "vehicle");
        assert_eq!(response.map.markers[0].color, "blue");
        assert_eq!(response.map.markers[2].label, "Sector 22/23 Intersection");
        assert_eq!(response.map.bounds, Some([[30.7360, 76.7750], [30.7412, 76.7824]]));
    }

    #[tokio::test]
    async fn test_advance_then_advisory() {
        let clock = ManualClock::default();
        let state = state(&clock);
        let id = new_session(&state, Some(60.0)).await;

        for expected in [1, 2, 3, 4, 0, 1] {
            let Json(advanced) = advance(State(state.clone()), Path(id)).await.unwrap();
            assert_eq!(advanced.position, expected);
        }

        clock.advance_by(TimeDelta::seconds(45));
        let Json(response) = advisory(State(state), Path(id)).await.unwrap();

        // Waypoint 1 is ~221m from 17/22; 30/30 cycle is 45s in
        assert_eq!(response.position, 1);
        assert_eq!(response.display.signal, "Sector 17/22 Intersection");
        assert_eq!(response.display.distance_m, 221.1);
        assert_eq!(response.display.eta_s, 13.3);
        assert_eq!(response.display.phase, "GREEN");
        assert_eq!(response.display.remaining_s, 15);
    }

    #[tokio::test]
    async fn test_bad_speed_rejected() {
        let state = state(&ManualClock::default());
        let result = create_session(State(state), Json(CreateSession { speed_kmh: Some(90.0) })).await;

        let response = result.unwrap_err().into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_unknown_session() {
        let state = state(&ManualClock::default());

        let error = advisory(State(state.clone()), Path(7)).await.unwrap_err();
        assert!(matches!(error, ApiError::SessionNotFound(7)));
        assert_eq!(error.into_response().status(), StatusCode::NOT_FOUND);

        assert!(matches!(
            advance(State(state.clone()), Path(7)).await,
            Err(ApiError::SessionNotFound(7))
        ));
        assert_eq!(end_session(State(state), Path(7)).await, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_end_session() {
        let state = state(&ManualClock::default());
        let id = new_session(&state, None).await;

        assert_eq!(end_session(State(state.clone()), Path(id)).await, StatusCode::NO_CONTENT);
        assert!(advisory(State(state), Path(id)).await.is_err());
    }

    #[tokio::test]
    async fn test_idle_session_expires() {
        let clock = ManualClock::default();
        let state = state(&clock);
        let id = new_session(&state, None).await;

        clock.advance_by(TimeDelta::minutes(11));
        state.evict_idle().await;

        assert!(matches!(
            advisory(State(state), Path(id)).await,
            Err(ApiError::SessionNotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_index_and_health() {
        let Html(page) = index().await;
        assert!(page.contains("Smart Traffic Light Advisor"));
        assert_eq!(health().await, "OK");
    }
}
