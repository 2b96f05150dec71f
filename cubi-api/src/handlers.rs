//! Request handling.
//!
//! One handler sees every request and dispatches on the method: the path of
//! a GET is the rig identifier, a POST creates a rig, anything else is
//! refused. Only a POST body is ever read, so the body limit never masks
//! the status another method would get.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{FromRequest, Request, State},
    http::{header, Method, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use tracing::{debug, info, instrument};

use cubi_core::error::CubiError;
use cubi_core::types::Rig;

use crate::dto::CreateRigResponse;
use crate::error::ApiError;
use crate::state::AppState;

type Result<T> = std::result::Result<T, ApiError>;

/// Any method, any path.
pub async fn dispatch(State(state): State<Arc<AppState>>, request: Request) -> Result<Response> {
    match request.method().clone() {
        Method::GET => fetch_rig(&state, rig_id_from_path(request.uri().path())),
        Method::POST => {
            let body = Bytes::from_request(request, &state)
                .await
                .map_err(ApiError::from)?;
            create_rig(&state, &body)
        }
        other => Err(CubiError::MethodNotAllowed(other.to_string()).into()),
    }
}

/// Strips the leading and trailing slashes around an identifier.
fn rig_id_from_path(path: &str) -> &str {
    path.trim_matches('/')
}

/// GET /{id}
#[instrument(skip(state))]
fn fetch_rig(state: &AppState, id: &str) -> Result<Response> {
    let rig = state
        .rigs
        .get(id)
        .ok_or_else(|| CubiError::NotFound(id.to_string()))?;

    let script = state.renderer.render(&rig)?;
    debug!(bytes = script.len(), "Rendered install script");

    Ok((
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        script,
    )
        .into_response())
}

/// POST /
///
/// Validation runs to completion before anything touches the store.
#[instrument(skip_all)]
fn create_rig(state: &AppState, body: &[u8]) -> Result<Response> {
    if body.is_empty() {
        return Err(CubiError::DecodeError("empty request body".into()).into());
    }

    let rig = Rig::from_json(body)?;
    rig.validate()?;

    let rigs = &state.rigs;
    let rig_id = state
        .allocator
        .allocate(|candidate| rigs.try_insert(candidate, rig.clone()))?;

    info!(rig_id = %rig_id, coinbase = %rig.coinbase, "Created rig");

    Ok((StatusCode::CREATED, Json(CreateRigResponse { rig_id })).into_response())
}
