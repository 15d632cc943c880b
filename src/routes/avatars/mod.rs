use axum::{
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use utoipa::{OpenApi, ToSchema};

use crate::app::{avatar::Seed, error::AppError, ApiContext};

pub mod batch;
pub mod grid;
pub mod render;

/// Longest accepted seed, in UTF-16 code units.
pub const SEED_MAX_LEN: usize = 256;

pub fn router() -> Router<ApiContext> {
    Router::new()
        .route("/avatars", post(batch::render_batch))
        .route("/avatars/", get(render::get_empty_seed_image))
        .route("/avatars/:seed", get(render::get_avatar_image))
        .route("/avatars/:seed/grid", get(grid::get_avatar_grid))
}

#[derive(OpenApi)]
#[openapi(paths(
    render::get_avatar_image,
    grid::get_avatar_grid,
    batch::render_batch
))]
pub struct AvatarsApi;

/// How the path segment is turned into a seed.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum SeedKind {
    /// Hashed string, e.g. a conversation id
    #[default]
    Text,
    /// Signed 32-bit integer used as the stream state
    Number,
}

pub(crate) fn resolve_seed(raw: String, kind: SeedKind) -> Result<Seed, AppError> {
    if raw.encode_utf16().count() > SEED_MAX_LEN {
        return Err(AppError::unprocessable_entity([("seed", "too_long")]));
    }

    match kind {
        SeedKind::Text => Ok(Seed::Text(raw)),
        SeedKind::Number => raw
            .parse::<i32>()
            .map(Seed::Number)
            .map_err(|_| AppError::unprocessable_entity([("seed", "not_an_integer")])),
    }
}
