use crate::error::{AppError, Result};
use crate::model::{CreateUrlRequest, CreateUrlResponse, UrlStatsResponse};
use crate::state::AppState;
use crate::RESERVED_CODES;
use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use jiff::SignedDuration;
use pinhole_core::ShortCode;
use pinhole_shortener::{ExpirationPolicy, Resolution, ShortenParams, Shortened};
use tracing::info;

fn expiration(request: &CreateUrlRequest) -> Result<ExpirationPolicy> {
    match (request.expire_at, request.expires_in_secs) {
        (Some(_), Some(_)) => Err(AppError::BadRequest(
            "expire_at and expires_in_secs are mutually exclusive".to_string(),
        )),
        (Some(at), None) => Ok(ExpirationPolicy::AtTimestamp(at)),
        (None, Some(secs)) if secs <= 0 => Err(AppError::BadRequest(
            "expires_in_secs must be positive".to_string(),
        )),
        (None, Some(secs)) => Ok(ExpirationPolicy::AfterDuration(SignedDuration::from_secs(
            secs,
        ))),
        (None, None) => Ok(ExpirationPolicy::Never),
    }
}

pub async fn create_url_handler(
    State(state): State<AppState>,
    Json(request): Json<CreateUrlRequest>,
) -> Result<(StatusCode, Json<CreateUrlResponse>)> {
    let expiration = expiration(&request)?;
    if let Some(alias) = request.alias.as_deref() {
        if RESERVED_CODES.contains(&alias) {
            return Err(AppError::BadRequest(format!("alias '{alias}' is reserved")));
        }
    }

    let params = ShortenParams::builder()
        .original_url(request.url)
        .expiration(expiration)
        .custom_alias(request.alias)
        .overwrite(request.overwrite)
        .build();
    let original_url = params.original_url.clone();

    let Shortened { code, expire_at } = state.shortener().shorten(params)?;

    info!(code = %code, url = %original_url, "shortened url");

    Ok((
        StatusCode::CREATED,
        Json(CreateUrlResponse {
            short_url: code.to_url(state.base_url()),
            code: code.to_string(),
            original_url,
            expire_at,
        }),
    ))
}

pub async fn get_url_handler(
    Path(short_code): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<UrlStatsResponse>> {
    let code = ShortCode::new(short_code)?;
    let record = state.shortener().stats(&code)?.ok_or(AppError::NotFound)?;

    Ok(Json(UrlStatsResponse {
        code: code.to_string(),
        expired: record.is_expired(),
        original_url: record.original_url,
        created_at: record.created_at,
        expire_at: record.expire_at,
        clicks: record.clicks,
    }))
}

pub async fn redirect_handler(
    Path(short_code): Path<String>,
    State(state): State<AppState>,
) -> Result<Response> {
    // anything that cannot be a code cannot be stored either
    let code = ShortCode::new(short_code).map_err(|_| AppError::NotFound)?;

    match state.shortener().resolve(&code)? {
        Resolution::Found(record) => Ok((
            StatusCode::FOUND,
            [(header::LOCATION, record.original_url)],
        )
            .into_response()),
        Resolution::Expired(_) => Err(AppError::Gone),
        Resolution::NotFound => Err(AppError::NotFound),
    }
}
