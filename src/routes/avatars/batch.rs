use anyhow::Context;
use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::{
    app::{
        avatar::{generate, render_svg},
        error::{AppError, InputErrorResponse},
        ApiContext,
    },
    routes::docs::AVATAR_TAG,
    telemetry::spawn_blocking_with_tracing,
};

use super::{resolve_seed, SeedKind};

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct BatchRequest {
    /// Text seeds, usually the ids of a conversation list
    #[validate(length(min = 1))]
    seeds: Vec<String>,

    #[validate(range(min = 8, max = 1024))]
    size: Option<u32>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct BatchAvatar {
    pub seed: String,
    pub svg: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct BatchResponse {
    pub avatars: Vec<BatchAvatar>,
}

#[utoipa::path(
    post,
    path = "",
    tag = AVATAR_TAG,
    request_body = BatchRequest,
    responses(
        (status = 200, description = "SVG avatars in request order", body = BatchResponse),
        (status = 400, description = "Bad request"),
        (status = 422, description = "Invalid input", body = InputErrorResponse),
        (status = 500, description = "Internal server error")
    )
)]
#[tracing::instrument(name = "Render avatar batch", skip_all)]
pub async fn render_batch(
    ctx: State<ApiContext>,
    payload: Result<Json<BatchRequest>, JsonRejection>,
) -> Result<Json<BatchResponse>, AppError> {
    let Json(req) = payload?;
    req.validate()?;

    if req.seeds.len() > ctx.config.avatar_batch_limit {
        tracing::info!(count = req.seeds.len(), "Batch over limit");
        return Err(AppError::unprocessable_entity([("seeds", "too_many")]));
    }

    let side = req.size.unwrap_or(ctx.config.avatar_default_size);

    let seeds = req
        .seeds
        .into_iter()
        .map(|raw| Ok((resolve_seed(raw.clone(), SeedKind::Text)?, raw)))
        .collect::<Result<Vec<_>, AppError>>()?;

    // One task per seed, each generating with its own stream
    let tasks = seeds.into_iter().map(|(seed, raw)| {
        spawn_blocking_with_tracing(move || BatchAvatar {
            svg: render_svg(&generate(&seed), side, None),
            seed: raw,
        })
    });

    let avatars = futures::future::try_join_all(tasks)
        .await
        .context("render task failed")?;

    Ok(Json(BatchResponse { avatars }))
}
