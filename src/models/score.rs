//! Set scores, match sides and match status shared by group and bracket matches.

use crate::models::team::TeamId;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Team name used for an empty bracket slot.
pub const BYE: &str = "BYE";

/// Games credited to the live side of a walkover.
pub const WALKOVER_GAMES: u32 = 6;

/// One set as seen from one side of a match.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetScore {
    /// 1..=5.
    pub set_number: u8,
    pub games: u32,
    /// Only meaningful when the games are level.
    #[serde(default)]
    pub tiebreak: Option<u32>,
    #[serde(default)]
    pub players: Vec<String>,
}

impl SetScore {
    pub fn new(set_number: u8, games: u32) -> Self {
        Self {
            set_number,
            games,
            tiebreak: None,
            players: Vec::new(),
        }
    }

    pub fn with_tiebreak(mut self, points: u32) -> Self {
        self.tiebreak = Some(points);
        self
    }
}

/// Which side of a match.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    One,
    Two,
}

/// Lifecycle of a match. A winner is recorded iff the match is `Completed`.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStatus {
    #[default]
    Scheduled,
    InProgress,
    Completed,
    Cancelled,
}

/// One side of a match: who plays and what they scored.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchSide {
    pub team_id: TeamId,
    pub team_name: String,
    #[serde(default)]
    pub sets: Vec<SetScore>,
    /// Single top-level score, used only when neither side has sets.
    #[serde(default)]
    pub score: Option<u32>,
    #[serde(default)]
    pub total_sets_won: u32,
}

impl MatchSide {
    pub fn new(team_id: impl Into<TeamId>, team_name: impl Into<String>) -> Self {
        Self {
            team_id: team_id.into(),
            team_name: team_name.into(),
            ..Self::default()
        }
    }

    /// The empty bracket slot.
    pub fn bye() -> Self {
        Self::new(BYE, BYE)
    }

    pub fn is_bye(&self) -> bool {
        self.team_name == BYE
    }
}

/// Decide one set. `Greater` means side one took it, `Equal` is a no-decision.
///
/// More games wins; level games go to the tiebreak when both sides have one.
pub fn compare_set(one: Option<&SetScore>, two: Option<&SetScore>) -> Ordering {
    let games_one = one.map_or(0, |s| s.games);
    let games_two = two.map_or(0, |s| s.games);
    match games_one.cmp(&games_two) {
        Ordering::Equal => match (one.and_then(|s| s.tiebreak), two.and_then(|s| s.tiebreak)) {
            (Some(a), Some(b)) => a.cmp(&b),
            _ => Ordering::Equal,
        },
        decided => decided,
    }
}

/// Set-level tally of a match from side one's point of view.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct SetTally {
    pub sets_one: u32,
    pub sets_two: u32,
    pub games_one: u32,
    pub games_two: u32,
}

impl SetTally {
    /// `Greater` if side one won on sets, `Less` if side two did, `Equal` for a draw.
    pub fn outcome(&self) -> Ordering {
        self.sets_one.cmp(&self.sets_two)
    }

    /// The same tally from side two's point of view.
    pub fn reversed(&self) -> SetTally {
        SetTally {
            sets_one: self.sets_two,
            sets_two: self.sets_one,
            games_one: self.games_two,
            games_two: self.games_one,
        }
    }
}

/// Count sets and games for both sides, falling back to the top-level score as a
/// single set when neither side recorded any sets. Game totals saturate at
/// `u32::MAX`.
pub fn tally_sets(one: &MatchSide, two: &MatchSide) -> SetTally {
    if one.sets.is_empty() && two.sets.is_empty() {
        let a = one.score.unwrap_or(0);
        let b = two.score.unwrap_or(0);
        return SetTally {
            sets_one: u32::from(a > b),
            sets_two: u32::from(b > a),
            games_one: a,
            games_two: b,
        };
    }

    let mut tally = SetTally::default();
    let count = one.sets.len().max(two.sets.len());
    for i in 0..count {
        let s1 = one.sets.get(i);
        let s2 = two.sets.get(i);
        tally.games_one = tally.games_one.saturating_add(s1.map_or(0, |s| s.games));
        tally.games_two = tally.games_two.saturating_add(s2.map_or(0, |s| s.games));
        match compare_set(s1, s2) {
            Ordering::Greater => tally.sets_one = tally.sets_one.saturating_add(1),
            Ordering::Less => tally.sets_two = tally.sets_two.saturating_add(1),
            Ordering::Equal => {}
        }
    }
    tally
}
