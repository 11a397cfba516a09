use serde::Serialize;
use std::sync::Arc;
use warp::Filter;
use warp::http::StatusCode;
use warp::reply::{Json, WithStatus};

use chameleon_types::{ClientAction, ErrorKind, ErrorResponse, GameError, PlayerId};

use crate::session_manager::SessionManager;

pub mod config;
pub mod content;
pub mod session_manager;

pub fn create_routes(
    session_manager: Arc<SessionManager>,
) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
    let session_filter = warp::any().map({
        let session_manager = session_manager.clone();
        move || session_manager.clone()
    });

    // Health check endpoint
    let health = warp::path("health")
        .and(warp::get())
        .map(|| warp::reply::with_status("OK", StatusCode::OK));

    let themes = warp::path!("themes")
        .and(warp::get())
        .and(session_filter.clone())
        .and_then(handle_themes_request);

    // Public view, safe for the shared screen
    let session_view = warp::path!("session")
        .and(warp::get())
        .and(session_filter.clone())
        .and_then(handle_session_request);

    let actions = warp::path!("session" / "actions")
        .and(warp::post())
        .and(warp::body::content_length_limit(16 * 1024))
        .and(warp::body::json::<ClientAction>())
        .and(session_filter.clone())
        .and_then(handle_action_request);

    let role = warp::path!("session" / "players" / PlayerId / "role")
        .and(warp::get())
        .and(session_filter.clone())
        .and_then(handle_role_request);

    let scores = warp::path!("session" / "scores")
        .and(warp::get())
        .and(session_filter.clone())
        .and_then(handle_scores_request);

    // Scores the finished round before ranking
    let apply_scores = warp::path!("session" / "scores")
        .and(warp::post())
        .and(session_filter.clone())
        .and_then(handle_apply_scores_request);

    let reload = warp::path!("session" / "content" / "reload")
        .and(warp::post())
        .and(session_filter.clone())
        .and_then(handle_reload_request);

    // CORS configuration
    let cors = warp::cors()
        .allow_any_origin()
        .allow_headers(vec!["content-type"])
        .allow_methods(vec!["GET", "POST"]);

    health
        .or(themes)
        .or(session_view)
        .or(actions)
        .or(role)
        .or(scores)
        .or(apply_scores)
        .or(reload)
        .with(cors)
        .with(warp::log("chameleon"))
}

/// HTTP status for a rejected game action
pub fn error_status(error: &GameError) -> StatusCode {
    match error.kind() {
        ErrorKind::ContentUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        ErrorKind::Configuration => StatusCode::INTERNAL_SERVER_ERROR,
        ErrorKind::ValidationFailed => match error {
            GameError::InvalidGamePhase { .. } | GameError::ContentLoading => StatusCode::CONFLICT,
            _ => StatusCode::BAD_REQUEST,
        },
    }
}

fn json_reply<T: Serialize>(body: &T, status: StatusCode) -> WithStatus<Json> {
    warp::reply::with_status(warp::reply::json(body), status)
}

fn error_reply(error: &GameError) -> WithStatus<Json> {
    json_reply(&ErrorResponse::from(error), error_status(error))
}

async fn handle_themes_request(
    session_manager: Arc<SessionManager>,
) -> Result<impl warp::Reply, warp::Rejection> {
    Ok(json_reply(&session_manager.themes().await, StatusCode::OK))
}

async fn handle_session_request(
    session_manager: Arc<SessionManager>,
) -> Result<impl warp::Reply, warp::Rejection> {
    Ok(json_reply(&session_manager.view().await, StatusCode::OK))
}

async fn handle_action_request(
    action: ClientAction,
    session_manager: Arc<SessionManager>,
) -> Result<impl warp::Reply, warp::Rejection> {
    match session_manager.apply(action).await {
        Ok(view) => Ok(json_reply(&view, StatusCode::OK)),
        Err(err) => Ok(error_reply(&err)),
    }
}

async fn handle_role_request(
    player_id: PlayerId,
    session_manager: Arc<SessionManager>,
) -> Result<impl warp::Reply, warp::Rejection> {
    match session_manager.reveal_role(player_id).await {
        Ok(reveal) => Ok(json_reply(&reveal, StatusCode::OK)),
        Err(err) => Ok(error_reply(&err)),
    }
}

async fn handle_scores_request(
    session_manager: Arc<SessionManager>,
) -> Result<impl warp::Reply, warp::Rejection> {
    Ok(json_reply(&session_manager.scores().await, StatusCode::OK))
}

async fn handle_apply_scores_request(
    session_manager: Arc<SessionManager>,
) -> Result<impl warp::Reply, warp::Rejection> {
    match session_manager.apply_scores().await {
        Ok(rankings) => Ok(json_reply(&rankings, StatusCode::OK)),
        Err(err) => Ok(error_reply(&err)),
    }
}

async fn handle_reload_request(
    session_manager: Arc<SessionManager>,
) -> Result<impl warp::Reply, warp::Rejection> {
    match session_manager.load_content().await {
        Ok(()) => Ok(json_reply(&session_manager.view().await, StatusCode::OK)),
        Err(err) => Ok(error_reply(&err)),
    }
}
