//! Competition engine: group stage, standings, qualification, seeding, progression.

mod commands;
mod draw;
mod group_stage;
mod progression;
mod qualification;
mod seeding;
mod standings;

pub use commands::{
    apply_bracket_command, apply_group_command, apply_update, BracketCommand, GroupCommand,
    MatchUpdate,
};
pub use draw::{draw_groups, read_groups_csv};
pub use group_stage::generate_group_matches;
pub use progression::{
    delete_round, generate_next_round, is_round_completed, winning_teams, BRACKET_WINNER_GROUP,
    WINNER_POINTS, WINNER_POSITION,
};
pub use qualification::{
    division_standings, qualify_division, select_qualified, QUALIFIERS_PER_GROUP,
};
pub use seeding::{
    bracket_size, mirrored_seed_positions, seed_bracket, seed_positions, sort_pool, SeededBracket,
    SEED_POSITIONS_16, SEED_POSITIONS_2, SEED_POSITIONS_32, SEED_POSITIONS_4, SEED_POSITIONS_8,
};
pub use standings::{calculate_standings, POINTS_DRAW, POINTS_WIN};
