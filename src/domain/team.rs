//! Team Layout
//!
//! Members bucketed by team, in the order the public page lists them.

use group_order::derive_groups;
use serde::Serialize;

use super::member::Member;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamLayout {
    pub team_order: Vec<String>,
    pub teams: Vec<TeamBlock>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeamBlock {
    pub team: String,
    pub members: Vec<Member>,
}

impl TeamLayout {
    /// Derive the layout from a snapshot of all members in any order
    pub fn from_members(members: &[Member]) -> Self {
        let grouping = derive_groups(members);
        let teams: Vec<TeamBlock> = grouping
            .iter()
            .map(|(team, members)| TeamBlock {
                team: team.to_string(),
                members: members.iter().map(|&m| m.clone()).collect(),
            })
            .collect();

        Self {
            team_order: teams.iter().map(|block| block.team.clone()).collect(),
            teams,
        }
    }

    pub fn team(&self, name: &str) -> Option<&TeamBlock> {
        self.teams.iter().find(|block| block.team == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::NewMember;

    fn member(name: &str, team: &str, order: u32) -> Member {
        NewMember {
            name: name.to_string(),
            role: "Member".to_string(),
            team: team.to_string(),
            ..Default::default()
        }
        .into_member(order, 0)
        .unwrap()
    }

    #[test]
    fn test_layout_from_members() {
        let members = vec![
            member("c", "Events", 2),
            member("a", "Exec", 0),
            member("b", "Exec", 1),
        ];

        let layout = TeamLayout::from_members(&members);

        assert_eq!(layout.team_order, vec!["Exec", "Events"]);
        let exec: Vec<&str> = layout.teams[0].members.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(exec, vec!["a", "b"]);
        assert_eq!(layout.team("Events").map(|t| t.members.len()), Some(1));
        assert!(layout.team("Design").is_none());
    }
}
