//! Member Entity
//!
//! An executive-board member. Members are grouped by `team` and rendered in
//! one flat `display_order` sequence across all teams.

use group_order::Orderable;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::entity::{DomainError, DomainResult, Entity};

/// An executive-board member
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    /// UUID v4, hyphenated lowercase
    pub id: String,
    pub name: String,
    /// Board position, e.g. "Vice President"
    pub role: String,
    /// Team the member is listed under
    pub team: String,
    pub bio: Option<String>,
    pub email: Option<String>,
    /// Object path from the image upload flow, stored as given
    pub image_url: Option<String>,
    /// Position in the flat order; gaps are allowed
    pub display_order: u32,
    /// Milliseconds since epoch
    pub created_at: i64,
    pub updated_at: i64,
}

impl Member {
    /// Normalize a client-supplied id, rejecting anything that is not a UUID.
    pub fn parse_id(raw: &str) -> DomainResult<String> {
        Uuid::parse_str(raw.trim())
            .map(|id| id.hyphenated().to_string())
            .map_err(|_| DomainError::InvalidInput(format!("malformed member id `{raw}`")))
    }
}

impl Entity for Member {
    type Id = String;
}

impl Orderable for Member {
    type Id = String;

    fn id(&self) -> &String {
        &self.id
    }

    fn group_key(&self) -> &str {
        &self.team
    }

    fn display_order(&self) -> u32 {
        self.display_order
    }
}

fn required(field: &str, value: &str) -> DomainResult<String> {
    let value = value.trim();
    if value.is_empty() {
        return Err(DomainError::InvalidInput(format!("{field} must not be empty")));
    }
    Ok(value.to_string())
}

/// Empty strings clear an optional field
fn optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Fields accepted when creating a member
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewMember {
    pub name: String,
    pub role: String,
    pub team: String,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
}

impl NewMember {
    /// Validate the input and build a member at `display_order`.
    pub fn into_member(self, display_order: u32, now_ms: i64) -> DomainResult<Member> {
        Ok(Member {
            id: Uuid::new_v4().hyphenated().to_string(),
            name: required("name", &self.name)?,
            role: required("role", &self.role)?,
            team: required("team", &self.team)?,
            bio: optional(self.bio),
            email: optional(self.email),
            image_url: optional(self.image_url),
            display_order,
            created_at: now_ms,
            updated_at: now_ms,
        })
    }

    /// Team name as it will be stored
    pub fn team(&self) -> DomainResult<String> {
        required("team", &self.team)
    }
}

/// Partial update; absent fields are left unchanged
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberPatch {
    pub name: Option<String>,
    pub role: Option<String>,
    pub team: Option<String>,
    pub bio: Option<String>,
    pub email: Option<String>,
    pub image_url: Option<String>,
}

impl MemberPatch {
    /// New team, if the patch moves the member to a different one
    pub fn team_change(&self, member: &Member) -> DomainResult<Option<String>> {
        match &self.team {
            Some(team) => {
                let team = required("team", team)?;
                Ok((team != member.team).then_some(team))
            }
            None => Ok(None),
        }
    }

    /// Apply every field except `team`, which moves through ordering.
    pub fn apply(self, member: &mut Member) -> DomainResult<()> {
        if let Some(name) = self.name {
            member.name = required("name", &name)?;
        }
        if let Some(role) = self.role {
            member.role = required("role", &role)?;
        }
        if self.bio.is_some() {
            member.bio = optional(self.bio);
        }
        if self.email.is_some() {
            member.email = optional(self.email);
        }
        if self.image_url.is_some() {
            member.image_url = optional(self.image_url);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_member(team: &str) -> NewMember {
        NewMember {
            name: "  Ada Lovelace ".to_string(),
            role: "President".to_string(),
            team: team.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_member_creation() {
        let member = new_member("Exec").into_member(3, 1_000).unwrap();
        assert_eq!(member.name, "Ada Lovelace");
        assert_eq!(member.team, "Exec");
        assert_eq!(member.display_order, 3);
        assert_eq!(member.created_at, 1_000);
        assert!(Member::parse_id(&member.id).is_ok());
    }

    #[test]
    fn test_blank_team_rejected() {
        let err = new_member("   ").into_member(0, 0).unwrap_err();
        assert!(matches!(err, DomainError::InvalidInput(_)));
    }

    #[test]
    fn test_parse_id_normalizes() {
        let id = Member::parse_id("67E55044-10B1-426F-9247-BB680E5FE0C8").unwrap();
        assert_eq!(id, "67e55044-10b1-426f-9247-bb680e5fe0c8");
        assert!(Member::parse_id("not-a-uuid").is_err());
    }

    #[test]
    fn test_patch_keeps_team_for_ordering() {
        let mut member = new_member("Exec").into_member(0, 0).unwrap();
        let patch = MemberPatch {
            role: Some("Treasurer".to_string()),
            team: Some("Finance".to_string()),
            bio: Some("".to_string()),
            ..Default::default()
        };

        assert_eq!(patch.team_change(&member).unwrap(), Some("Finance".to_string()));
        patch.apply(&mut member).unwrap();
        assert_eq!(member.role, "Treasurer");
        assert_eq!(member.team, "Exec");
        assert_eq!(member.bio, None);
    }

    #[test]
    fn test_patch_same_team_is_not_a_move() {
        let member = new_member("Exec").into_member(0, 0).unwrap();
        let patch = MemberPatch {
            team: Some(" Exec ".to_string()),
            ..Default::default()
        };
        assert_eq!(patch.team_change(&member).unwrap(), None);
    }

    #[test]
    fn test_serializes_camel_case() {
        let member = new_member("Exec").into_member(2, 0).unwrap();
        let json = serde_json::to_value(&member).unwrap();
        assert_eq!(json["displayOrder"], 2);
        assert_eq!(json["team"], "Exec");
    }
}
