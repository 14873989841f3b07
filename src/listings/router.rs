use std::sync::Arc;

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Router,
};
use serde::Deserialize;
use serde_json::json;

use super::domain::{DealType, InvalidValue, ModerationStatus, PropertyId, PropertyType};
use super::moderation::ModerationError;
use super::query::{AdminStatusFilter, ListingFilter};
use super::service::{CatalogService, CatalogServiceError};
use super::store::PropertyRepository;
use crate::accounts::{RoleFilter, UserId};
use crate::error::AppError;

/// Header carrying the acting user's id on admin routes.
pub const ACTOR_HEADER: &str = "x-user-id";

/// Router builder exposing browse, moderation, account, and favorites endpoints.
pub fn catalog_router<R>(service: Arc<CatalogService<R>>) -> Router
where
    R: PropertyRepository + 'static,
{
    Router::new()
        .route("/api/v1/properties", get(list_handler::<R>))
        .route("/api/v1/properties/:property_id", get(detail_handler::<R>))
        .route("/api/v1/admin/properties", get(admin_list_handler::<R>))
        .route(
            "/api/v1/admin/properties/:property_id/moderation",
            put(moderation_handler::<R>),
        )
        .route(
            "/api/v1/admin/properties/:property_id/verification",
            post(verification_handler::<R>),
        )
        .route("/api/v1/admin/summary", get(summary_handler::<R>))
        .route("/api/v1/users", get(users_handler::<R>))
        .route(
            "/api/v1/users/:user_id/favorites",
            get(favorites_handler::<R>),
        )
        .route(
            "/api/v1/users/:user_id/favorites/:property_id",
            post(toggle_favorite_handler::<R>),
        )
        .with_state(service)
}

/// Body of a moderation decision. The status stays a raw string so unknown literals get a
/// descriptive 422 instead of a generic deserialization failure.
#[derive(Debug, Deserialize)]
pub struct ModerationRequest {
    pub status: String,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Browse query string. Enum facets stay raw so they parse case-insensitively and unknown
/// literals get the same 422 as every other route.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct ListingParams {
    #[serde(default)]
    q: Option<String>,
    #[serde(default, rename = "type")]
    property_type: Option<String>,
    #[serde(default)]
    deal_type: Option<String>,
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    verified: Option<bool>,
    #[serde(default)]
    featured: Option<bool>,
}

impl ListingParams {
    fn into_filter(self) -> Result<ListingFilter, InvalidValue> {
        Ok(ListingFilter {
            query: self.q,
            property_type: self
                .property_type
                .as_deref()
                .map(str::parse::<PropertyType>)
                .transpose()?,
            deal_type: self
                .deal_type
                .as_deref()
                .map(str::parse::<DealType>)
                .transpose()?,
            status: self
                .status
                .as_deref()
                .map(str::parse::<ModerationStatus>)
                .transpose()?,
            verified: self.verified,
            featured: self.featured,
        })
    }
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct AdminListingParams {
    #[serde(default)]
    q: Option<String>,
    #[serde(default)]
    status: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct UserSearchParams {
    #[serde(default)]
    q: Option<String>,
    #[serde(default)]
    role: Option<String>,
}

fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    let payload = json!({ "error": message.into() });
    (status, axum::Json(payload)).into_response()
}

fn service_error_response(error: CatalogServiceError) -> Response {
    AppError::from(error).into_response()
}

fn invalid_value_response(error: InvalidValue) -> Response {
    service_error_response(ModerationError::Invalid(error).into())
}

/// Admin routes treat an unknown actor like a non-admin one. Elsewhere it is a 404.
fn admin_error_response(error: CatalogServiceError) -> Response {
    match error {
        CatalogServiceError::UnknownUser { id } => error_response(
            StatusCode::FORBIDDEN,
            format!("user {id} may not moderate listings"),
        ),
        other => service_error_response(other),
    }
}

fn actor_from_headers(headers: &HeaderMap) -> Result<UserId, Response> {
    headers
        .get(ACTOR_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(UserId::new)
        .ok_or_else(|| {
            error_response(
                StatusCode::FORBIDDEN,
                format!("missing {ACTOR_HEADER} header"),
            )
        })
}

pub(crate) async fn list_handler<R>(
    State(service): State<Arc<CatalogService<R>>>,
    params: Result<Query<ListingParams>, QueryRejection>,
) -> Response
where
    R: PropertyRepository + 'static,
{
    let params = match params {
        Ok(Query(params)) => params,
        Err(rejection) => {
            return error_response(StatusCode::UNPROCESSABLE_ENTITY, rejection.body_text())
        }
    };
    let filter = match params.into_filter() {
        Ok(filter) => filter,
        Err(error) => return invalid_value_response(error),
    };

    match service.listings().filter(&filter) {
        Ok(listings) => (StatusCode::OK, axum::Json(listings)).into_response(),
        Err(error) => service_error_response(error.into()),
    }
}

pub(crate) async fn detail_handler<R>(
    State(service): State<Arc<CatalogService<R>>>,
    Path(property_id): Path<String>,
) -> Response
where
    R: PropertyRepository + 'static,
{
    let id = PropertyId(property_id);
    match service.listings().find_by_id(&id) {
        Ok(Some(property)) => (StatusCode::OK, axum::Json(property)).into_response(),
        Ok(None) => error_response(StatusCode::NOT_FOUND, format!("property {id} not found")),
        Err(error) => service_error_response(error.into()),
    }
}

pub(crate) async fn admin_list_handler<R>(
    State(service): State<Arc<CatalogService<R>>>,
    Query(params): Query<AdminListingParams>,
) -> Response
where
    R: PropertyRepository + 'static,
{
    let filter = match params.status.as_deref() {
        Some(raw) => match raw.parse::<AdminStatusFilter>() {
            Ok(filter) => filter,
            Err(error) => return invalid_value_response(error),
        },
        None => AdminStatusFilter::All,
    };
    let text = params.q.unwrap_or_default();

    match service.listings().admin_search(&text, filter) {
        Ok(listings) => (StatusCode::OK, axum::Json(listings)).into_response(),
        Err(error) => service_error_response(error.into()),
    }
}

pub(crate) async fn moderation_handler<R>(
    State(service): State<Arc<CatalogService<R>>>,
    Path(property_id): Path<String>,
    headers: HeaderMap,
    body: Result<axum::Json<ModerationRequest>, JsonRejection>,
) -> Response
where
    R: PropertyRepository + 'static,
{
    let actor = match actor_from_headers(&headers) {
        Ok(actor) => actor,
        Err(response) => return response,
    };
    let request = match body {
        Ok(axum::Json(request)) => request,
        Err(rejection) => {
            return error_response(StatusCode::UNPROCESSABLE_ENTITY, rejection.body_text())
        }
    };
    let status = match request.status.parse::<ModerationStatus>() {
        Ok(status) => status,
        Err(error) => return invalid_value_response(error),
    };

    let id = PropertyId(property_id);
    match service.moderate(&actor, &id, status, request.notes) {
        Ok(property) => (StatusCode::OK, axum::Json(property)).into_response(),
        Err(error) => admin_error_response(error),
    }
}

pub(crate) async fn verification_handler<R>(
    State(service): State<Arc<CatalogService<R>>>,
    Path(property_id): Path<String>,
    headers: HeaderMap,
) -> Response
where
    R: PropertyRepository + 'static,
{
    let actor = match actor_from_headers(&headers) {
        Ok(actor) => actor,
        Err(response) => return response,
    };

    let id = PropertyId(property_id);
    match service.toggle_verification(&actor, &id) {
        Ok(property) => (StatusCode::OK, axum::Json(property)).into_response(),
        Err(error) => admin_error_response(error),
    }
}

pub(crate) async fn summary_handler<R>(State(service): State<Arc<CatalogService<R>>>) -> Response
where
    R: PropertyRepository + 'static,
{
    match service.dashboard() {
        Ok(summary) => (StatusCode::OK, axum::Json(summary)).into_response(),
        Err(error) => service_error_response(error),
    }
}

pub(crate) async fn users_handler<R>(
    State(service): State<Arc<CatalogService<R>>>,
    Query(params): Query<UserSearchParams>,
) -> Response
where
    R: PropertyRepository + 'static,
{
    let role = match params.role.as_deref() {
        Some(raw) => match raw.parse::<RoleFilter>() {
            Ok(role) => role,
            Err(error) => return invalid_value_response(error),
        },
        None => RoleFilter::All,
    };
    let text = params.q.unwrap_or_default();

    match service.directory().search(&text, role) {
        Ok(users) => (StatusCode::OK, axum::Json(users)).into_response(),
        Err(error) => service_error_response(error.into()),
    }
}

pub(crate) async fn favorites_handler<R>(
    State(service): State<Arc<CatalogService<R>>>,
    Path(user_id): Path<String>,
) -> Response
where
    R: PropertyRepository + 'static,
{
    match service.favorite_listings(&UserId(user_id)) {
        Ok(listings) => (StatusCode::OK, axum::Json(listings)).into_response(),
        Err(error) => service_error_response(error),
    }
}

pub(crate) async fn toggle_favorite_handler<R>(
    State(service): State<Arc<CatalogService<R>>>,
    Path((user_id, property_id)): Path<(String, String)>,
) -> Response
where
    R: PropertyRepository + 'static,
{
    let user = UserId(user_id);
    let property = PropertyId(property_id);
    match service.toggle_favorite(&user, &property) {
        Ok(added) => {
            let payload = json!({
                "user_id": user.0,
                "property_id": property.0,
                "favorite": added,
            });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        Err(error) => service_error_response(error),
    }
}
