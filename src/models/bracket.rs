//! Knockout bracket: rounds, bracket matches and the per-division bracket aggregate.

use crate::models::error::EngineError;
use crate::models::group_match::ScoredMatch;
use crate::models::score::{MatchSide, MatchStatus, Side};
use crate::models::team::{Division, TeamId, TournamentId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Key used to patch a single bracket match.
pub type MatchKey = Uuid;

/// Knockout round, in play order. `Final` is terminal.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Round {
    Round32,
    Round16,
    Quarterfinal,
    Semifinal,
    Final,
}

impl Round {
    const ORDER: [Round; 5] = [
        Round::Round32,
        Round::Round16,
        Round::Quarterfinal,
        Round::Semifinal,
        Round::Final,
    ];

    /// All rounds in play order.
    pub fn all() -> &'static [Round] {
        &Self::ORDER
    }

    /// The round played after this one; `None` after the final.
    pub fn next(self) -> Option<Round> {
        match self {
            Round::Round32 => Some(Round::Round16),
            Round::Round16 => Some(Round::Quarterfinal),
            Round::Quarterfinal => Some(Round::Semifinal),
            Round::Semifinal => Some(Round::Final),
            Round::Final => None,
        }
    }

    /// Starting round for a bracket of `size` slots (2, 4, 8, 16 or 32).
    pub fn from_bracket_size(size: usize) -> Option<Round> {
        match size {
            32 => Some(Round::Round32),
            16 => Some(Round::Round16),
            8 => Some(Round::Quarterfinal),
            4 => Some(Round::Semifinal),
            2 => Some(Round::Final),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Round::Round32 => "round32",
            Round::Round16 => "round16",
            Round::Quarterfinal => "quarterfinal",
            Round::Semifinal => "semifinal",
            Round::Final => "final",
        }
    }
}

impl fmt::Display for Round {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Round {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ORDER
            .iter()
            .copied()
            .find(|r| r.as_str() == s)
            .ok_or_else(|| EngineError::UnknownRound(s.to_string()))
    }
}

/// Round following the round named `round`; `None` for `final` or an unknown name.
pub fn next_round_name(round: &str) -> Option<Round> {
    round.parse::<Round>().ok().and_then(Round::next)
}

/// A single-elimination match.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BracketMatch {
    pub key: MatchKey,
    pub round: Round,
    /// Per round, from 1.
    pub match_number: u32,
    pub team1: MatchSide,
    pub team2: MatchSide,
    #[serde(default)]
    pub status: MatchStatus,
    #[serde(default)]
    pub court: Option<String>,
    #[serde(default)]
    pub winner: Option<TeamId>,
}

impl BracketMatch {
    pub fn new(round: Round, match_number: u32, team1: MatchSide, team2: MatchSide) -> Self {
        Self {
            key: Uuid::new_v4(),
            round,
            match_number,
            team1,
            team2,
            status: MatchStatus::Scheduled,
            court: None,
            winner: None,
        }
    }
}

impl ScoredMatch for BracketMatch {
    fn side(&self, side: Side) -> &MatchSide {
        match side {
            Side::One => &self.team1,
            Side::Two => &self.team2,
        }
    }

    fn side_mut(&mut self, side: Side) -> &mut MatchSide {
        match side {
            Side::One => &mut self.team1,
            Side::Two => &mut self.team2,
        }
    }

    fn status(&self) -> MatchStatus {
        self.status
    }

    fn set_status(&mut self, status: MatchStatus) {
        self.status = status;
    }

    fn winner(&self) -> Option<&TeamId> {
        self.winner.as_ref()
    }

    fn set_winner(&mut self, winner: Option<TeamId>) {
        self.winner = winner;
    }
}

/// The one knockout bracket of a (tournament, division).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bracket {
    pub tournament_id: TournamentId,
    pub division: Division,
    pub matches: Vec<BracketMatch>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Bumped on every mutation; callers compare it to detect concurrent writers.
    #[serde(default)]
    pub version: u64,
}

impl Bracket {
    pub fn new(
        tournament_id: impl Into<TournamentId>,
        division: impl Into<Division>,
        matches: Vec<BracketMatch>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            tournament_id: tournament_id.into(),
            division: division.into(),
            matches,
            created_at: now,
            updated_at: now,
            version: 1,
        }
    }

    /// Latest round present in the bracket.
    pub fn current_round(&self) -> Option<Round> {
        self.matches.iter().map(|m| m.round).max()
    }

    pub fn matches_in(&self, round: Round) -> impl Iterator<Item = &BracketMatch> {
        self.matches.iter().filter(move |m| m.round == round)
    }

    pub fn match_mut(&mut self, key: MatchKey) -> Result<&mut BracketMatch, EngineError> {
        self.matches
            .iter_mut()
            .find(|m| m.key == key)
            .ok_or(EngineError::MatchNotFound(key))
    }

    pub(crate) fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = now;
        self.version += 1;
    }
}
