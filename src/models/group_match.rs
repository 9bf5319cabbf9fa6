//! Group-stage match record.

use crate::models::score::{MatchSide, MatchStatus, Side};
use crate::models::team::{Division, TeamId, TournamentId};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a group match.
pub type MatchId = Uuid;

/// A round-robin fixture between two teams of the same group.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupMatch {
    pub id: MatchId,
    pub tournament_id: TournamentId,
    pub division: Division,
    pub group_id: String,
    /// Sequential within the division, from 1.
    pub match_number: u32,
    pub team1: MatchSide,
    pub team2: MatchSide,
    #[serde(default)]
    pub status: MatchStatus,
    #[serde(default)]
    pub winner: Option<TeamId>,
}

impl GroupMatch {
    /// A scheduled match with no sets and no winner.
    pub fn new(
        tournament_id: impl Into<TournamentId>,
        division: impl Into<Division>,
        group_id: impl Into<String>,
        match_number: u32,
        team1: MatchSide,
        team2: MatchSide,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            tournament_id: tournament_id.into(),
            division: division.into(),
            group_id: group_id.into(),
            match_number,
            team1,
            team2,
            status: MatchStatus::Scheduled,
            winner: None,
        }
    }

    pub fn involves(&self, team_id: &str) -> bool {
        self.team1.team_id == team_id || self.team2.team_id == team_id
    }
}

/// Common access to the two sides, status and winner of any match, so score
/// updates apply the same way to group and bracket matches.
pub trait ScoredMatch {
    fn side(&self, side: Side) -> &MatchSide;
    fn side_mut(&mut self, side: Side) -> &mut MatchSide;
    fn status(&self) -> MatchStatus;
    fn set_status(&mut self, status: MatchStatus);
    fn winner(&self) -> Option<&TeamId>;
    fn set_winner(&mut self, winner: Option<TeamId>);

    /// Whether the match may complete level, without a winner.
    fn allows_draw(&self) -> bool {
        false
    }

    /// The side whose team id equals the recorded winner.
    fn winning_side(&self) -> Option<&MatchSide> {
        let winner = self.winner()?;
        [Side::One, Side::Two]
            .into_iter()
            .map(|s| self.side(s))
            .find(|side| &side.team_id == winner)
    }
}

impl ScoredMatch for GroupMatch {
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

    /// Group play scores level set counts as a draw.
    fn allows_draw(&self) -> bool {
        true
    }
}
