//! Knockout seeding: bracket sizing, seed-position tables and first-round pairing.

use crate::models::{
    BracketMatch, EngineError, MatchSide, MatchStatus, QualifiedTeam, Round, SetScore,
    WALKOVER_GAMES,
};

/// Slot (0-based) of seeds 1..=n, standard layouts where top seeds meet as late as possible.
pub const SEED_POSITIONS_2: [usize; 2] = [0, 1];
pub const SEED_POSITIONS_4: [usize; 4] = [0, 2, 3, 1];
pub const SEED_POSITIONS_8: [usize; 8] = [0, 4, 6, 2, 3, 7, 5, 1];
pub const SEED_POSITIONS_16: [usize; 16] = [0, 8, 12, 4, 6, 14, 10, 2, 3, 11, 15, 7, 5, 13, 9, 1];
pub const SEED_POSITIONS_32: [usize; 32] = [
    0, 16, 24, 8, 12, 28, 20, 4, 6, 22, 30, 14, 10, 26, 18, 2, 3, 19, 27, 11, 15, 31, 23, 7, 5,
    21, 29, 13, 9, 25, 17, 1,
];

/// Bracket slots for `team_count` qualified teams.
///
/// Coarse thresholds: 9 teams get 16 slots (7 byes) even though that is not the
/// tightest fit.
pub fn bracket_size(team_count: usize) -> usize {
    match team_count {
        n if n >= 17 => 32,
        n if n >= 9 => 16,
        n if n >= 5 => 8,
        n if n >= 3 => 4,
        _ => 2,
    }
}

/// Seed-to-slot table for `size`, tabulated for 2..=32, constructed otherwise.
pub fn seed_positions(size: usize) -> Result<Vec<usize>, EngineError> {
    match size {
        2 => Ok(SEED_POSITIONS_2.to_vec()),
        4 => Ok(SEED_POSITIONS_4.to_vec()),
        8 => Ok(SEED_POSITIONS_8.to_vec()),
        16 => Ok(SEED_POSITIONS_16.to_vec()),
        32 => Ok(SEED_POSITIONS_32.to_vec()),
        _ => mirrored_seed_positions(size),
    }
}

/// Build a seed-to-slot table for any power-of-two `size` by mirroring.
///
/// Starting from `[1]`, each doubling replaces seed s with the pair
/// (s, 2m + 1 - s) where 2m is the new size, so every seed's first opponent is
/// its mirror and the two halves stay balanced all the way down.
pub fn mirrored_seed_positions(size: usize) -> Result<Vec<usize>, EngineError> {
    if size < 2 || !size.is_power_of_two() {
        return Err(EngineError::UnsupportedBracketSize(size));
    }
    let mut layout = vec![1usize];
    while layout.len() < size {
        let doubled = layout.len() * 2;
        layout = layout
            .iter()
            .flat_map(|&seed| [seed, doubled + 1 - seed])
            .collect();
    }
    let mut positions = vec![0; size];
    for (slot, seed) in layout.into_iter().enumerate() {
        positions[seed - 1] = slot;
    }
    Ok(positions)
}

/// Order the pool best seed first: points desc, goal difference desc, group position asc.
pub fn sort_pool(pool: &mut [QualifiedTeam]) {
    pool.sort_by(|a, b| {
        b.points
            .cmp(&a.points)
            .then_with(|| b.goal_difference.cmp(&a.goal_difference))
            .then_with(|| a.position.cmp(&b.position))
    });
}

/// The starting round of a freshly seeded bracket.
#[derive(Clone, Debug)]
pub struct SeededBracket {
    pub size: usize,
    pub round: Round,
    pub matches: Vec<BracketMatch>,
}

/// Seed the qualified pool into the first knockout round.
///
/// Empty slots become byes; a team drawn against a bye advances by walkover
/// and its match is already completed.
pub fn seed_bracket(pool: &[QualifiedTeam]) -> Result<SeededBracket, EngineError> {
    if pool.is_empty() {
        return Err(EngineError::EmptyPool);
    }
    let mut seeded = pool.to_vec();
    sort_pool(&mut seeded);

    let size = bracket_size(seeded.len());
    let round = Round::from_bracket_size(size).ok_or(EngineError::UnsupportedBracketSize(size))?;
    if seeded.len() > size {
        return Err(EngineError::TooManyTeams {
            count: seeded.len(),
            max: size,
        });
    }
    let slots = place_by_seed(&seeded, size)?;

    let matches = pair_slots(&slots, round);
    log::info!(
        "Seeded {} teams into a {}-slot bracket starting at {} ({} matches)",
        seeded.len(),
        size,
        round,
        matches.len()
    );
    Ok(SeededBracket { size, round, matches })
}

/// Put `teams[i]` (seed i + 1) into its slot of a `size`-slot bracket; the rest are byes.
pub(crate) fn place_by_seed(
    teams: &[QualifiedTeam],
    size: usize,
) -> Result<Vec<Option<&QualifiedTeam>>, EngineError> {
    let positions = seed_positions(size)?;
    let mut slots: Vec<Option<&QualifiedTeam>> = vec![None; size];
    for (team, &slot) in teams.iter().zip(positions.iter()) {
        slots[slot] = Some(team);
    }
    Ok(slots)
}

/// Pair slots (0,1), (2,3), ... into matches of `round`. `None` is a bye.
///
/// Bye against bye is dropped; a team against a bye is a completed walkover.
/// Matches are numbered from 1 in slot order.
pub(crate) fn pair_slots(slots: &[Option<&QualifiedTeam>], round: Round) -> Vec<BracketMatch> {
    let mut matches = Vec::new();
    for pair in slots.chunks(2) {
        let one = pair[0];
        let two = pair.get(1).copied().flatten();
        let match_number = matches.len() as u32 + 1;
        let m = match (one, two) {
            (None, None) => continue,
            (Some(team), None) => walkover(round, match_number, team, true),
            (None, Some(team)) => walkover(round, match_number, team, false),
            (Some(a), Some(b)) => {
                let mut team1 = side_for(a);
                let mut team2 = side_for(b);
                team1.sets.push(SetScore::new(1, 0));
                team2.sets.push(SetScore::new(1, 0));
                BracketMatch::new(round, match_number, team1, team2)
            }
        };
        matches.push(m);
    }
    matches
}

fn side_for(team: &QualifiedTeam) -> MatchSide {
    MatchSide::new(team.team_id.as_str(), team.team_name.as_str())
}

fn walkover(
    round: Round,
    match_number: u32,
    team: &QualifiedTeam,
    team_first: bool,
) -> BracketMatch {
    let mut live = side_for(team);
    live.sets.push(SetScore::new(1, WALKOVER_GAMES));
    live.total_sets_won = 1;
    let mut bye = MatchSide::bye();
    bye.sets.push(SetScore::new(1, 0));

    let (team1, team2) = if team_first { (live, bye) } else { (bye, live) };
    let mut m = BracketMatch::new(round, match_number, team1, team2);
    m.status = MatchStatus::Completed;
    m.winner = Some(team.team_id.clone());
    m
}
