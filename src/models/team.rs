//! Team, Group and the identifiers they are keyed by.

use serde::{Deserialize, Serialize};

/// Store-assigned identifier for a team.
pub type TeamId = String;

/// Identifier of the tournament a record belongs to.
pub type TournamentId = String;

/// Name of a competition category; every division runs independently.
pub type Division = String;

/// A registered team. Member names are display-only.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Team {
    pub id: TeamId,
    pub name: String,
    pub division: Division,
    #[serde(default)]
    pub members: Vec<String>,
    /// Seed or position carried over from registration, if any.
    #[serde(default)]
    pub seed: Option<u32>,
}

impl Team {
    pub fn new(
        id: impl Into<TeamId>,
        name: impl Into<String>,
        division: impl Into<Division>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            division: division.into(),
            members: Vec::new(),
            seed: None,
        }
    }
}

/// A round-robin group within a division (`group_A`, `group_B`, ...).
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Group {
    pub group_id: String,
    pub name: String,
    pub division: Division,
    #[serde(default)]
    pub teams: Vec<Team>,
}

impl Group {
    pub fn new(
        group_id: impl Into<String>,
        name: impl Into<String>,
        division: impl Into<Division>,
    ) -> Self {
        Self {
            group_id: group_id.into(),
            name: name.into(),
            division: division.into(),
            teams: Vec::new(),
        }
    }

    pub fn contains(&self, team_id: &str) -> bool {
        self.teams.iter().any(|t| t.id == team_id)
    }
}

/// Group id for the zero-based group index: 0 -> `group_A`, 1 -> `group_B`, ...
pub fn group_id_for(index: usize) -> String {
    format!("group_{}", group_letter(index))
}

/// Display name for the zero-based group index: 0 -> `Group A`.
pub fn group_name_for(index: usize) -> String {
    format!("Group {}", group_letter(index))
}

fn group_letter(index: usize) -> String {
    // A..Z, then AA, AB, ...
    let mut n = index;
    let mut letters = Vec::new();
    loop {
        letters.push((b'A' + (n % 26) as u8) as char);
        if n < 26 {
            break;
        }
        n = n / 26 - 1;
    }
    letters.iter().rev().collect()
}
