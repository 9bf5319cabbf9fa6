//! Engine errors and their coarse kinds.

use crate::models::bracket::{MatchKey, Round};
use crate::models::group_match::MatchId;
use thiserror::Error;

/// Coarse classification callers branch on (e.g. to pick an HTTP status).
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorKind {
    /// Bad or premature request; never silently recovered.
    Input,
    /// Would violate at-most-one-bracket or lost a race with another writer.
    Conflict,
    NotFound,
    /// Backing store failed.
    Store,
}

/// Errors returned by the competition engine and its store.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("No groups found for division {0}")]
    NoGroups(String),

    #[error("No qualified teams to seed")]
    EmptyPool,

    #[error("Round {0} is not completed")]
    RoundNotCompleted(Round),

    #[error("Unrecognized round: {0}")]
    UnknownRound(String),

    #[error("No round follows {0}")]
    NoNextRound(Round),

    #[error("Unsupported bracket size {0} (must be a power of two, at least 2)")]
    UnsupportedBracketSize(usize),

    #[error("Too many qualified teams: {count} (a bracket holds at most {max})")]
    TooManyTeams { count: usize, max: usize },

    #[error("Winner {0} is not one of the match's teams")]
    InvalidWinner(String),

    #[error("Cannot complete a match without a decisive result")]
    UndecidedResult,

    #[error("Number of groups must be at least 1")]
    NoGroupCount,

    #[error("No teams to draw")]
    NoTeams,

    #[error("Invalid CSV: {0}")]
    InvalidCsv(#[from] csv::Error),

    #[error("Bracket already exists for tournament {tournament_id}, division {division}")]
    BracketExists { tournament_id: String, division: String },

    #[error("Round {0} already exists")]
    RoundExists(Round),

    #[error("Bracket was modified concurrently (expected version {expected}, found {found})")]
    VersionMismatch { expected: u64, found: u64 },

    #[error("No bracket for tournament {tournament_id}, division {division}")]
    BracketNotFound { tournament_id: String, division: String },

    #[error("Bracket match not found: {0}")]
    MatchNotFound(MatchKey),

    #[error("Group match not found: {0}")]
    GroupMatchNotFound(MatchId),

    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),
}

impl EngineError {
    pub fn kind(&self) -> ErrorKind {
        use EngineError::*;
        match self {
            NoGroups(_)
            | EmptyPool
            | RoundNotCompleted(_)
            | UnknownRound(_)
            | NoNextRound(_)
            | UnsupportedBracketSize(_)
            | TooManyTeams { .. }
            | InvalidWinner(_)
            | UndecidedResult
            | NoGroupCount
            | NoTeams
            | InvalidCsv(_) => ErrorKind::Input,
            BracketExists { .. } | RoundExists(_) | VersionMismatch { .. } => ErrorKind::Conflict,
            BracketNotFound { .. } | MatchNotFound(_) | GroupMatchNotFound(_) => {
                ErrorKind::NotFound
            }
            StoreUnavailable(_) => ErrorKind::Store,
        }
    }
}
