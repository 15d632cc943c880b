use axum::{
    extract::{rejection::QueryRejection, Path, Query},
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::{
    app::{
        avatar::{generate, generate_silhouette, AvatarColors, Grid},
        error::{AppError, InputErrorResponse},
    },
    routes::docs::AVATAR_TAG,
};

use super::{resolve_seed, SeedKind};

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct GridQuery {
    #[serde(default)]
    kind: SeedKind,

    /// Set to false for the mirrored silhouette without detail noise
    #[serde(default = "default_detail")]
    detail: bool,
}

fn default_detail() -> bool {
    true
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AvatarGrid {
    seed: String,
    colors: AvatarColors,
    /// Rows top to bottom, `null` for empty cells
    #[schema(value_type = Vec<Vec<Option<String>>>)]
    rows: Grid,
}

#[utoipa::path(
    get,
    path = "/{seed}/grid",
    tag = AVATAR_TAG,
    params(
        ("seed" = String, Path, description = "Conversation id or any other seed"),
        GridQuery
    ),
    responses(
        (status = 200, description = "Cell colours of the avatar", body = AvatarGrid),
        (status = 400, description = "Malformed query"),
        (status = 422, description = "Invalid input", body = InputErrorResponse)
    )
)]
#[tracing::instrument(name = "Describe avatar grid", skip_all, fields(seed = %seed))]
pub async fn get_avatar_grid(
    Path(seed): Path<String>,
    query: Result<Query<GridQuery>, QueryRejection>,
) -> Result<Json<AvatarGrid>, AppError> {
    let Query(query) = query?;
    let resolved = resolve_seed(seed.clone(), query.kind)?;

    let avatar = if query.detail {
        generate(&resolved)
    } else {
        generate_silhouette(&resolved)
    };

    Ok(Json(AvatarGrid {
        seed,
        colors: avatar.colors,
        rows: avatar.grid,
    }))
}
