use anyhow::Context;
use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    http::{
        header::{CACHE_CONTROL, CONTENT_TYPE, ETAG, IF_NONE_MATCH},
        HeaderMap, StatusCode,
    },
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use sha2::{Digest, Sha256};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::{
    app::{
        avatar::{generate, render_png, render_svg, Color},
        error::{AppError, InputErrorResponse},
        ApiContext,
    },
    routes::docs::AVATAR_TAG,
    telemetry::spawn_blocking_with_tracing,
};

use super::{resolve_seed, SeedKind};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum AvatarFormat {
    #[default]
    Png,
    Svg,
}

impl AvatarFormat {
    fn content_type(&self) -> &'static str {
        match self {
            AvatarFormat::Png => "image/png",
            AvatarFormat::Svg => "image/svg+xml",
        }
    }
}

#[derive(Debug, Deserialize, Validate, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ImageQuery {
    #[serde(default)]
    kind: SeedKind,

    #[serde(default)]
    format: AvatarFormat,

    /// Side length in pixels
    #[validate(range(min = 8, max = 1024))]
    size: Option<u32>,

    /// `#RRGGBB`, transparent when absent
    background: Option<String>,
}

#[utoipa::path(
    get,
    path = "/{seed}",
    tag = AVATAR_TAG,
    params(
        ("seed" = String, Path, description = "Conversation id or any other seed"),
        ImageQuery
    ),
    responses(
        (status = 200, description = "Rendered avatar as image/png or image/svg+xml"),
        (status = 304, description = "Matches If-None-Match"),
        (status = 400, description = "Malformed query"),
        (status = 422, description = "Invalid input", body = InputErrorResponse),
        (status = 500, description = "Internal server error")
    )
)]
#[tracing::instrument(name = "Render avatar image", skip_all, fields(seed = %seed))]
pub async fn get_avatar_image(
    ctx: State<ApiContext>,
    Path(seed): Path<String>,
    query: Result<Query<ImageQuery>, QueryRejection>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let Query(query) = query?;
    query.validate()?;

    let background = query
        .background
        .as_deref()
        .map(str::parse::<Color>)
        .transpose()
        .map_err(|_| AppError::unprocessable_entity([("background", "invalid_color")]))?;

    let seed = resolve_seed(seed, query.kind)?;
    let side = query.size.unwrap_or(ctx.config.avatar_default_size);
    let avatar = generate(&seed);

    let body = match query.format {
        AvatarFormat::Svg => render_svg(&avatar, side, background).into_bytes(),
        AvatarFormat::Png => {
            spawn_blocking_with_tracing(move || render_png(&avatar, side, background))
                .await
                .context("render task failed")??
        }
    };

    let etag = entity_tag(&body);
    let cache_control = format!(
        "public, max-age={}, immutable",
        ctx.config.avatar_cache_max_age
    );

    if matches_etag(&headers, &etag) {
        tracing::debug!("Avatar not modified");
        return Ok((
            StatusCode::NOT_MODIFIED,
            [(ETAG, etag), (CACHE_CONTROL, cache_control)],
        )
            .into_response());
    }

    Ok((
        [
            (CONTENT_TYPE, query.format.content_type().to_string()),
            (CACHE_CONTROL, cache_control),
            (ETAG, etag),
        ],
        body,
    )
        .into_response())
}

/// The empty seed, which a `:seed` segment cannot capture.
pub async fn get_empty_seed_image(
    ctx: State<ApiContext>,
    query: Result<Query<ImageQuery>, QueryRejection>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    get_avatar_image(ctx, Path(String::new()), query, headers).await
}

/// Strong validator from the first half of the body's SHA-256.
fn entity_tag(body: &[u8]) -> String {
    let digest = Sha256::digest(body);

    format!("\"{}\"", hex::encode(&digest[..16]))
}

fn matches_etag(headers: &HeaderMap, etag: &str) -> bool {
    headers
        .get(IF_NONE_MATCH)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| {
            value
                .split(',')
                .map(str::trim)
                // Weak comparison, `W/"x"` matches `"x"`
                .map(|tag| tag.strip_prefix("W/").unwrap_or(tag))
                .any(|tag| tag == etag || tag == "*")
        })
}
