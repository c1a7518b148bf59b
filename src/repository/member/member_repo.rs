//! Member Repository - Core Operations
//!
//! SQLite-backed lookups and removal. Inserts and updates place the member in
//! the flat order, so they live in member_ordering.

use async_trait::async_trait;
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::domain::{DomainError, DomainResult, Member};
use crate::repository::traits::Repository;

const MEMBER_COLUMNS: &str =
    "id, name, role, team, bio, email, image_url, display_order, created_at, updated_at";

/// SQLite implementation of Member repository
#[derive(Clone)]
pub struct MemberRepository {
    pub(super) conn: Arc<Mutex<Connection>>,
}

impl MemberRepository {
    pub fn new(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }
}

#[async_trait]
impl Repository<Member> for MemberRepository {
    async fn find_by_id(&self, id: &String) -> DomainResult<Option<Member>> {
        let conn = self.conn.lock().await;
        Ok(find_member(&conn, id)?)
    }

    async fn list(&self) -> DomainResult<Vec<Member>> {
        let conn = self.conn.lock().await;
        Ok(load_members(&conn)?)
    }

    async fn delete(&self, id: &String) -> DomainResult<()> {
        let conn = self.conn.lock().await;

        // Siblings keep their display_order; gaps are fine.
        let rows = conn.execute("DELETE FROM members WHERE id = ?1", params![id])?;
        if rows == 0 {
            return Err(DomainError::NotFound(format!("Member {} not found", id)));
        }
        Ok(())
    }
}

pub(super) fn insert_member(conn: &Connection, member: &Member) -> rusqlite::Result<()> {
    conn.execute(
        "INSERT INTO members (id, name, role, team, bio, email, image_url, display_order, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
        params![
            member.id,
            member.name,
            member.role,
            member.team,
            member.bio,
            member.email,
            member.image_url,
            member.display_order,
            member.created_at,
            member.updated_at,
        ],
    )?;
    Ok(())
}

pub(super) fn find_member(conn: &Connection, id: &str) -> rusqlite::Result<Option<Member>> {
    conn.query_row(
        &format!("SELECT {MEMBER_COLUMNS} FROM members WHERE id = ?1"),
        params![id],
        row_to_member,
    )
    .optional()
}

/// Every member, in flat display order
pub(super) fn load_members(conn: &Connection) -> rusqlite::Result<Vec<Member>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {MEMBER_COLUMNS} FROM members ORDER BY display_order, rowid"
    ))?;
    let members = stmt
        .query_map([], row_to_member)?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(members)
}

/// Convert a database row to Member
fn row_to_member(row: &Row<'_>) -> rusqlite::Result<Member> {
    Ok(Member {
        id: row.get(0)?,
        name: row.get(1)?,
        role: row.get(2)?,
        team: row.get(3)?,
        bio: row.get(4)?,
        email: row.get(5)?,
        image_url: row.get(6)?,
        display_order: row.get(7)?,
        created_at: row.get(8)?,
        updated_at: row.get(9)?,
    })
}
