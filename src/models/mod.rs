//! Data structures for the competition engine: teams, groups, matches, standings, brackets.

mod bracket;
mod error;
mod group_match;
mod score;
mod standing;
mod team;

pub use bracket::{next_round_name, Bracket, BracketMatch, MatchKey, Round};
pub use error::{EngineError, ErrorKind};
pub use group_match::{GroupMatch, MatchId, ScoredMatch};
pub use score::{
    compare_set, tally_sets, MatchSide, MatchStatus, SetScore, SetTally, Side, BYE, WALKOVER_GAMES,
};
pub use standing::{QualifiedTeam, Standing};
pub use team::{group_id_for, group_name_for, Division, Group, Team, TeamId, TournamentId};
