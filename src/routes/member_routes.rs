use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use group_order::{DisplayOrderUpdate, GroupKey};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::domain::{Member, MemberPatch, NewMember, TeamLayout};
use crate::error::AppError;
use crate::repository::{MemberOrderingOperations, Repository};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ReorderMembersRequest {
    pub updates: Vec<DisplayOrderUpdate<String>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReorderTeamsRequest {
    pub team_order: Vec<GroupKey>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReorderTeamMembersRequest {
    pub ordered_ids: Vec<String>,
}

fn updated(count: usize) -> Json<Value> {
    Json(json!({ "updated": count }))
}

pub async fn list_members(State(state): State<AppState>) -> Result<Json<Vec<Member>>, AppError> {
    Ok(Json(state.members.list().await?))
}

pub async fn list_teams(State(state): State<AppState>) -> Result<Json<TeamLayout>, AppError> {
    Ok(Json(state.members.team_layout().await?))
}

pub async fn get_member(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Member>, AppError> {
    let id = Member::parse_id(&id)?;
    state
        .members
        .find_by_id(&id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Member {} not found", id)))
}

pub async fn create_member(
    State(state): State<AppState>,
    payload: Result<Json<NewMember>, JsonRejection>,
) -> Result<(StatusCode, Json<Member>), AppError> {
    let Json(new_member) = payload?;
    let member = state.members.append_member(new_member).await?;
    Ok((StatusCode::CREATED, Json(member)))
}

pub async fn update_member(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<MemberPatch>, JsonRejection>,
) -> Result<Json<Member>, AppError> {
    let id = Member::parse_id(&id)?;
    let Json(patch) = payload?;
    Ok(Json(state.members.patch_member(&id, patch).await?))
}

pub async fn delete_member(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    let id = Member::parse_id(&id)?;
    state.members.delete(&id).await?;
    tracing::info!(id = %id, "member deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// Apply display orders computed by the client
pub async fn reorder_members(
    State(state): State<AppState>,
    payload: Result<Json<ReorderMembersRequest>, JsonRejection>,
) -> Result<Json<Value>, AppError> {
    let Json(request) = payload?;
    let updates = request
        .updates
        .into_iter()
        .map(|u| Ok(DisplayOrderUpdate::new(Member::parse_id(&u.id)?, u.display_order)))
        .collect::<Result<Vec<_>, AppError>>()?;

    Ok(updated(state.members.apply_display_order(&updates).await?))
}

pub async fn reorder_teams(
    State(state): State<AppState>,
    payload: Result<Json<ReorderTeamsRequest>, JsonRejection>,
) -> Result<Json<Value>, AppError> {
    let Json(request) = payload?;
    Ok(updated(state.members.reorder_teams(&request.team_order).await?))
}

pub async fn reorder_team_members(
    State(state): State<AppState>,
    Path(team): Path<String>,
    payload: Result<Json<ReorderTeamMembersRequest>, JsonRejection>,
) -> Result<Json<Value>, AppError> {
    let Json(request) = payload?;
    let ordered_ids = request
        .ordered_ids
        .iter()
        .map(|id| Member::parse_id(id))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(updated(
        state.members.reorder_within_team(&team, &ordered_ids).await?,
    ))
}
