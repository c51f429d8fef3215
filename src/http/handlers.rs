//! Route handlers for the gateway's own API surface.
//!
//! # Responsibilities
//! - Decode form credentials for register/login
//! - Resolve dual-source queries (URL parameter first, JSON body fallback)
//! - Dispatch to the geocoding provider and serialize results
//! - Map every failure to its deterministic status code and short message
//!
//! # Design Decisions
//! - Credential-store failures are reported as 200 with a descriptive body,
//!   matching the upstream API contract
//! - "No results" from the provider is a success with an empty list
//! - Errors are logged here, at the boundary that turns them into responses

use axum::{
    extract::{rejection::FormRejection, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Form, Json,
};
use serde::{Deserialize, Serialize};

use crate::auth::gate::TOKEN_COOKIE;
use crate::auth::token::TOKEN_TTL_SECS;
use crate::geo::Address;
use crate::users::UserError;

use super::server::AppState;

/// Form-encoded credentials for register and login.
#[derive(Debug, Deserialize)]
pub struct CredentialsForm {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// URL-parameter source for address search.
#[derive(Debug, Default, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    query: String,
}

/// JSON-body source for address search. Absent fields decode to empty
/// strings; the provider defines their semantics.
#[derive(Debug, Deserialize)]
struct SearchBody {
    #[serde(default)]
    query: String,
}

/// URL-parameter source for geocoding.
#[derive(Debug, Default, Deserialize)]
pub struct GeocodeQuery {
    #[serde(default)]
    lat: String,
    #[serde(default)]
    lng: String,
}

/// JSON-body source for geocoding. Absent fields decode to empty strings;
/// the provider defines their semantics.
#[derive(Debug, Deserialize)]
struct GeocodeBody {
    #[serde(default)]
    lat: String,
    #[serde(default)]
    lng: String,
}

#[derive(Debug, Serialize)]
struct AddressesResponse {
    addresses: Vec<Address>,
}

pub async fn register(
    State(state): State<AppState>,
    form: Result<Form<CredentialsForm>, FormRejection>,
) -> Response {
    let Ok(Form(form)) = form else {
        return (StatusCode::BAD_REQUEST, "empty email or password").into_response();
    };
    if form.email.is_empty() || form.password.is_empty() {
        return (StatusCode::BAD_REQUEST, "empty email or password").into_response();
    }

    match state.users.insert(&form.email, &form.password) {
        Ok(()) => (StatusCode::OK, "successfully signed up").into_response(),
        Err(err) => {
            tracing::error!(error = %err, "failed to insert user");
            (StatusCode::OK, "failed to insert user").into_response()
        }
    }
}

pub async fn login(
    State(state): State<AppState>,
    form: Result<Form<CredentialsForm>, FormRejection>,
) -> Response {
    let Ok(Form(form)) = form else {
        return (StatusCode::BAD_REQUEST, "missing email or password").into_response();
    };
    if form.email.is_empty() || form.password.is_empty() {
        return (StatusCode::BAD_REQUEST, "missing email or password").into_response();
    }

    if let Err(err) = state.users.authenticate(&form.email, &form.password) {
        tracing::error!(error = %err, "failed to authenticate");
        return match err {
            UserError::UnknownUser => (StatusCode::OK, "user doesn't exist").into_response(),
            UserError::WrongPassword => (StatusCode::OK, "wrong password").into_response(),
            UserError::Store(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "failed to authenticate").into_response()
            }
        };
    }

    match state.tokens.issue(&form.email) {
        Ok(token) => {
            // Cookie Max-Age and the token's embedded expiry derive from the
            // same constant.
            let cookie = format!(
                "{TOKEN_COOKIE}={token}; Max-Age={TOKEN_TTL_SECS}; Path=/; HttpOnly; SameSite=Lax"
            );
            (
                [(header::SET_COOKIE, cookie)],
                "successfully logged in",
            )
                .into_response()
        }
        Err(err) => {
            tracing::error!(error = %err, "failed to issue token");
            (StatusCode::INTERNAL_SERVER_ERROR, "failed to authenticate").into_response()
        }
    }
}

pub async fn search(
    State(state): State<AppState>,
    Query(params): Query<SearchQuery>,
    body: String,
) -> Response {
    let query = match resolve_search_query(&params, &body) {
        Ok(query) => query,
        Err(err) => {
            tracing::warn!(error = %err, "invalid search request");
            return (StatusCode::BAD_REQUEST, "Invalid request body").into_response();
        }
    };

    match state.geo.search(&query).await {
        Ok(addresses) => Json(AddressesResponse { addresses }).into_response(),
        Err(err) => {
            tracing::error!(error = %err, "address search failed");
            (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error").into_response()
        }
    }
}

pub async fn geocode(
    State(state): State<AppState>,
    Query(params): Query<GeocodeQuery>,
    body: String,
) -> Response {
    let (lat, lng) = match resolve_geocode_query(&params, &body) {
        Ok(pair) => pair,
        Err(err) => {
            tracing::warn!(error = %err, "invalid geocode request");
            return (StatusCode::BAD_REQUEST, "Invalid request body").into_response();
        }
    };

    match state.geo.geocode(&lat, &lng).await {
        Ok(addresses) => Json(AddressesResponse { addresses }).into_response(),
        Err(err) => {
            tracing::error!(error = %err, "geocode lookup failed");
            (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error").into_response()
        }
    }
}

/// The URL parameter takes priority; the body is parsed only when the
/// parameter is empty.
fn resolve_search_query(params: &SearchQuery, body: &str) -> Result<String, serde_json::Error> {
    if !params.query.is_empty() {
        return Ok(params.query.clone());
    }
    serde_json::from_str::<SearchBody>(body).map(|b| b.query)
}

/// Both URL parameters must be present for the parameter source to win.
fn resolve_geocode_query(
    params: &GeocodeQuery,
    body: &str,
) -> Result<(String, String), serde_json::Error> {
    if !params.lat.is_empty() && !params.lng.is_empty() {
        return Ok((params.lat.clone(), params.lng.clone()));
    }
    serde_json::from_str::<GeocodeBody>(body).map(|b| (b.lat, b.lng))
}
