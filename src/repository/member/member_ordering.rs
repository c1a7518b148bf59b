//! Member Ordering Operations
//!
//! Every operation reads a fresh snapshot and writes its updates inside one
//! immediate transaction. A failed batch rolls back completely, so readers
//! never see a partially renumbered collection.

use async_trait::async_trait;
use group_order::{
    append_to_flat_order, append_to_group, reorder_groups, reorder_within_group_global,
    DisplayOrderUpdate, GroupKey,
};
use rusqlite::{params, Connection, Transaction, TransactionBehavior};
use std::collections::HashSet;

use super::member_repo::{find_member, insert_member, load_members, MemberRepository};
use crate::domain::{DomainError, DomainResult, Member, MemberPatch, NewMember, TeamLayout};

/// Trait for member ordering operations
#[async_trait]
pub trait MemberOrderingOperations {
    /// `display_order` that appends to `team`; a new team goes after every existing one
    async fn next_display_order(&self, team: &str) -> DomainResult<u32>;

    /// Current teams and their members, in display order
    async fn team_layout(&self) -> DomainResult<TeamLayout>;

    /// Create a member at the end of its team
    async fn append_member(&self, new_member: NewMember) -> DomainResult<Member>;

    /// Apply a partial update; a team change appends the member to the new team
    async fn patch_member(&self, id: &str, patch: MemberPatch) -> DomainResult<Member>;

    /// Write client-computed orders as one batch. Returns the number of rows written.
    async fn apply_display_order(&self, updates: &[DisplayOrderUpdate<String>]) -> DomainResult<usize>;

    /// Reorder the members of one team, renumbering the whole collection
    async fn reorder_within_team(&self, team: &str, ordered_ids: &[String]) -> DomainResult<usize>;

    /// Reorder teams, renumbering the whole collection
    async fn reorder_teams(&self, team_order: &[GroupKey]) -> DomainResult<usize>;
}

fn placement(snapshot: &[Member], team: &str) -> u32 {
    if snapshot.iter().any(|member| member.team == team) {
        append_to_group(snapshot, team)
    } else {
        append_to_flat_order(snapshot)
    }
}

/// Run `f` inside an immediate transaction, committing only on success
fn in_transaction<T>(
    conn: &mut Connection,
    f: impl FnOnce(&Transaction<'_>) -> DomainResult<T>,
) -> DomainResult<T> {
    let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
    let value = f(&tx)?;
    tx.commit()?;
    Ok(value)
}

fn write_orders(tx: &Transaction<'_>, updates: &[DisplayOrderUpdate<String>]) -> DomainResult<usize> {
    let now = chrono::Utc::now().timestamp_millis();
    let mut stmt =
        tx.prepare_cached("UPDATE members SET display_order = ?1, updated_at = ?2 WHERE id = ?3")?;

    let mut written = 0;
    for update in updates {
        let rows = stmt.execute(params![update.display_order, now, update.id])?;
        if rows == 0 {
            return Err(DomainError::NotFound(format!("Member {} not found", update.id)));
        }
        written += rows;
    }
    Ok(written)
}

fn log_failed_batch(operation: &str, updates: &[DisplayOrderUpdate<String>], err: &DomainError) {
    let batch: Vec<String> = updates
        .iter()
        .map(|u| format!("{}={}", u.id, u.display_order))
        .collect();
    tracing::error!(
        operation,
        error = %err,
        batch = %batch.join(","),
        "display order batch rolled back"
    );
}

#[async_trait]
impl MemberOrderingOperations for MemberRepository {
    async fn next_display_order(&self, team: &str) -> DomainResult<u32> {
        let conn = self.conn.lock().await;
        let snapshot = load_members(&conn)?;
        Ok(placement(&snapshot, team))
    }

    async fn team_layout(&self) -> DomainResult<TeamLayout> {
        let conn = self.conn.lock().await;
        let snapshot = load_members(&conn)?;
        Ok(TeamLayout::from_members(&snapshot))
    }

    async fn append_member(&self, new_member: NewMember) -> DomainResult<Member> {
        let team = new_member.team()?;
        let now = chrono::Utc::now().timestamp_millis();

        let mut conn = self.conn.lock().await;
        let member = in_transaction(&mut conn, |tx| {
            let snapshot = load_members(tx)?;
            let member = new_member.into_member(placement(&snapshot, &team), now)?;
            insert_member(tx, &member)?;
            Ok(member)
        })?;

        tracing::info!(id = %member.id, team = %member.team, display_order = member.display_order, "member created");
        Ok(member)
    }

    async fn patch_member(&self, id: &str, patch: MemberPatch) -> DomainResult<Member> {
        let mut conn = self.conn.lock().await;
        in_transaction(&mut conn, |tx| {
            let mut member = find_member(tx, id)?
                .ok_or_else(|| DomainError::NotFound(format!("Member {} not found", id)))?;

            if let Some(team) = patch.team_change(&member)? {
                let snapshot = load_members(tx)?;
                member.display_order = placement(&snapshot, &team);
                member.team = team;
            }
            patch.apply(&mut member)?;
            member.updated_at = chrono::Utc::now().timestamp_millis();

            tx.execute(
                "UPDATE members SET name = ?1, role = ?2, team = ?3, bio = ?4, email = ?5, image_url = ?6, display_order = ?7, updated_at = ?8 WHERE id = ?9",
                params![
                    member.name,
                    member.role,
                    member.team,
                    member.bio,
                    member.email,
                    member.image_url,
                    member.display_order,
                    member.updated_at,
                    member.id,
                ],
            )?;
            Ok(member)
        })
    }

    async fn apply_display_order(&self, updates: &[DisplayOrderUpdate<String>]) -> DomainResult<usize> {
        let mut seen = HashSet::with_capacity(updates.len());
        if let Some(dup) = updates.iter().find(|u| !seen.insert(u.id.as_str())) {
            return Err(DomainError::InvalidInput(format!(
                "member {} appears more than once",
                dup.id
            )));
        }
        if updates.is_empty() {
            return Ok(0);
        }

        let mut conn = self.conn.lock().await;
        let result = in_transaction(&mut conn, |tx| {
            let known: HashSet<String> = load_members(tx)?.into_iter().map(|m| m.id).collect();
            if let Some(missing) = updates.iter().find(|u| !known.contains(&u.id)) {
                return Err(DomainError::NotFound(format!("Member {} not found", missing.id)));
            }
            write_orders(tx, updates)
        });

        match &result {
            Ok(written) => tracing::info!(written = *written, "display order batch applied"),
            Err(DomainError::NotFound(_)) => {}
            Err(err) => log_failed_batch("apply_display_order", updates, err),
        }
        result
    }

    async fn reorder_within_team(&self, team: &str, ordered_ids: &[String]) -> DomainResult<usize> {
        let mut conn = self.conn.lock().await;
        let mut attempted = Vec::new();
        let result = in_transaction(&mut conn, |tx| {
            let snapshot = load_members(tx)?;
            if !snapshot.iter().any(|member| member.team == team) {
                return Err(DomainError::NotFound(format!("Team {} not found", team)));
            }
            attempted = reorder_within_group_global(&snapshot, team, ordered_ids)?;
            write_orders(tx, &attempted)
        });

        match &result {
            Ok(written) => tracing::info!(team, written = *written, "team members reordered"),
            Err(err @ DomainError::Internal(_)) => log_failed_batch("reorder_within_team", &attempted, err),
            Err(err) => tracing::warn!(team, error = %err, "team member reorder rejected"),
        }
        result
    }

    async fn reorder_teams(&self, team_order: &[GroupKey]) -> DomainResult<usize> {
        let mut conn = self.conn.lock().await;
        let mut attempted = Vec::new();
        let result = in_transaction(&mut conn, |tx| {
            let snapshot = load_members(tx)?;
            attempted = reorder_groups(&snapshot, team_order)?;
            write_orders(tx, &attempted)
        });

        match &result {
            Ok(written) => tracing::info!(teams = team_order.len(), written = *written, "teams reordered"),
            Err(err @ DomainError::Internal(_)) => log_failed_batch("reorder_teams", &attempted, err),
            Err(err) => tracing::warn!(error = %err, "team reorder rejected"),
        }
        result
    }
}
