//! Derived group-stage records: standings and the qualified pool.

use crate::models::team::TeamId;
use serde::{Deserialize, Serialize};

/// A team's aggregated group-stage record and its rank within the group.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Standing {
    pub team_id: TeamId,
    pub team_name: String,
    pub group_id: String,
    pub played: u32,
    pub won: u32,
    pub drawn: u32,
    pub lost: u32,
    pub sets_won: u32,
    pub sets_lost: u32,
    /// Total games across all sets, not matches.
    pub goals_for: u32,
    pub goals_against: u32,
    pub goal_difference: i32,
    pub points: u32,
    /// 1-based rank within the group.
    pub position: u32,
}

impl Standing {
    pub fn new(
        team_id: impl Into<TeamId>,
        team_name: impl Into<String>,
        group_id: impl Into<String>,
    ) -> Self {
        Self {
            team_id: team_id.into(),
            team_name: team_name.into(),
            group_id: group_id.into(),
            ..Self::default()
        }
    }
}

/// A team entering the knockout stage. Bracket winners reuse this shape.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QualifiedTeam {
    pub team_id: TeamId,
    pub team_name: String,
    pub group_id: String,
    pub position: u32,
    pub points: u32,
    pub goal_difference: i32,
}

impl From<&Standing> for QualifiedTeam {
    fn from(s: &Standing) -> Self {
        Self {
            team_id: s.team_id.clone(),
            team_name: s.team_name.clone(),
            group_id: s.group_id.clone(),
            position: s.position,
            points: s.points,
            goal_difference: s.goal_difference,
        }
    }
}
