//! Bracket progression: round completion, winners, next round, round deletion.

use crate::logic::seeding::{pair_slots, place_by_seed};
use crate::models::{BracketMatch, EngineError, MatchStatus, QualifiedTeam, Round, ScoredMatch};

/// Group id given to the synthetic records of bracket winners.
pub const BRACKET_WINNER_GROUP: &str = "bracket_winner";

/// Fixed position and points of a bracket winner's record. Winners are seeded
/// by match order, so these never steer placement.
pub const WINNER_POSITION: u32 = 1;
pub const WINNER_POINTS: u32 = 0;

/// True iff `round` has at least one match and every one of them is completed
/// with a winner that is a real team.
pub fn is_round_completed(matches: &[BracketMatch], round: Round) -> bool {
    let mut in_round = matches.iter().filter(|m| m.round == round).peekable();
    if in_round.peek().is_none() {
        return false;
    }
    in_round.all(|m| {
        m.status == MatchStatus::Completed && m.winning_side().is_some_and(|side| !side.is_bye())
    })
}

/// Winners of the completed matches of `round`, in match order, as placeholder
/// qualified-team records.
pub fn winning_teams(matches: &[BracketMatch], round: Round) -> Vec<QualifiedTeam> {
    let mut in_round: Vec<&BracketMatch> = matches
        .iter()
        .filter(|m| m.round == round && m.status == MatchStatus::Completed)
        .collect();
    in_round.sort_by_key(|m| m.match_number);

    in_round
        .into_iter()
        .filter_map(|m| {
            let side = m.winning_side().filter(|side| !side.is_bye())?;
            Some(QualifiedTeam {
                team_id: side.team_id.clone(),
                team_name: side.team_name.clone(),
                group_id: BRACKET_WINNER_GROUP.to_string(),
                position: WINNER_POSITION,
                points: WINNER_POINTS,
                goal_difference: 0,
            })
        })
        .collect()
}

/// Build the matches of the round after `current` from its winners.
///
/// Winners are seeded in match order into a bracket sized by their count
/// (rounded up to a power of two) with the same seed tables as the first
/// round, then paired; an empty slot gives its opponent a walkover. No winners
/// means no further round: the result is empty rather than an error.
pub fn generate_next_round(
    matches: &[BracketMatch],
    current: Round,
) -> Result<Vec<BracketMatch>, EngineError> {
    if !is_round_completed(matches, current) {
        log::warn!("Refusing to advance: round {} is not completed", current);
        return Err(EngineError::RoundNotCompleted(current));
    }
    let next = current.next().ok_or(EngineError::NoNextRound(current))?;
    if matches.iter().any(|m| m.round == next) {
        return Err(EngineError::RoundExists(next));
    }

    let winners = winning_teams(matches, current);
    if winners.is_empty() {
        return Ok(Vec::new());
    }
    let size = winners.len().next_power_of_two().max(2);
    let slots = place_by_seed(&winners, size)?;

    let next_matches = pair_slots(&slots, next);
    log::info!(
        "Generated {} with {} matches from {} winners of {}",
        next,
        next_matches.len(),
        winners.len(),
        current
    );
    Ok(next_matches)
}

/// Remove the matches of `round` and of every later round. Returns how many were removed.
pub fn delete_round(matches: &mut Vec<BracketMatch>, round: Round) -> usize {
    let before = matches.len();
    matches.retain(|m| m.round < round);
    let removed = before - matches.len();
    if removed > 0 {
        log::info!("Deleted {} bracket matches from {} onward", removed, round);
    }
    removed
}
