use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use std::net::IpAddr;

use crate::{
    application::admin::dto::{BlockIpRequest, BlockIpResponse, BlockedIpList},
    presentation::http::{errors::AppError, state::AppState},
};

fn parse_ip(raw: &str) -> Result<IpAddr, AppError> {
    raw.trim()
        .parse()
        .map_err(|_| AppError::BadRequest(format!("Invalid IP address: {}", raw)))
}

pub async fn list_blocked_ips(
    State(state): State<AppState>,
) -> Result<Json<BlockedIpList>, AppError> {
    let items = state.block_list.list().await?;
    Ok(Json(BlockedIpList {
        total: items.len(),
        items,
    }))
}

pub async fn block_ip(
    State(state): State<AppState>,
    Json(body): Json<BlockIpRequest>,
) -> Result<(StatusCode, Json<BlockIpResponse>), AppError> {
    let ip = parse_ip(&body.ip)?;
    let reason = body.reason.filter(|r| !r.trim().is_empty());
    let newly_blocked = state.block_list.add(ip, reason).await?;
    tracing::info!(%ip, newly_blocked, "Admin blocked address");

    let status = if newly_blocked {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };
    Ok((
        status,
        Json(BlockIpResponse {
            ip: ip.to_string(),
            newly_blocked,
        }),
    ))
}

pub async fn unblock_ip(
    State(state): State<AppState>,
    Path(ip): Path<String>,
) -> Result<StatusCode, AppError> {
    let ip = parse_ip(&ip)?;
    let removed = state.block_list.remove(ip).await?;
    tracing::info!(%ip, removed, "Admin unblocked address");
    Ok(StatusCode::NO_CONTENT)
}
