//! Tournament competition engine: round-robin group play, standings, qualification,
//! knockout seeding and bracket progression, plus an in-memory store for the web app.

pub mod config;
pub mod logic;
pub mod models;
pub mod store;

pub use config::{PacingPolicy, ServerConfig};
pub use logic::{
    apply_bracket_command, apply_group_command, apply_update, bracket_size, calculate_standings,
    delete_round, division_standings, draw_groups, generate_group_matches, generate_next_round,
    is_round_completed, mirrored_seed_positions, qualify_division, read_groups_csv, seed_bracket,
    seed_positions, select_qualified, sort_pool, winning_teams, BracketCommand, GroupCommand,
    MatchUpdate, SeededBracket, BRACKET_WINNER_GROUP, POINTS_DRAW, POINTS_WIN,
    QUALIFIERS_PER_GROUP, WINNER_POINTS, WINNER_POSITION,
};
pub use models::{
    compare_set, group_id_for, group_name_for, next_round_name, tally_sets, Bracket, BracketMatch,
    Division, EngineError, ErrorKind, Group, GroupMatch, MatchId, MatchKey, MatchSide, MatchStatus,
    QualifiedTeam, Round, ScoredMatch, SetScore, SetTally, Side, Standing, Team, TeamId,
    TournamentId, BYE, WALKOVER_GAMES,
};
pub use store::MemoryStore;
