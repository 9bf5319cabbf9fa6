//! Group standings: per-team records and the tie-break ranking.

use crate::models::{tally_sets, Group, GroupMatch, MatchStatus, ScoredMatch, SetTally, Standing};
use std::cmp::Ordering;
use std::collections::HashMap;

/// Points for a match won on sets.
pub const POINTS_WIN: u32 = 3;
/// Points each side gets when set-wins are level.
pub const POINTS_DRAW: u32 = 1;

/// Compute the ranked standings of one group.
///
/// Only completed matches of this group count. A match is won by the side with
/// strictly more sets; equal set counts (0-0 included) are a draw. Goals are
/// total games. Ranking: points, goal difference, goals for, then head-to-head
/// among the teams still level, then team id so the order is total.
pub fn calculate_standings(group: &Group, matches: &[GroupMatch]) -> Vec<Standing> {
    let mut standings: Vec<Standing> = group
        .teams
        .iter()
        .map(|t| Standing::new(t.id.as_str(), t.name.as_str(), group.group_id.as_str()))
        .collect();
    let index: HashMap<String, usize> = standings
        .iter()
        .enumerate()
        .map(|(i, s)| (s.team_id.clone(), i))
        .collect();

    let played: Vec<&GroupMatch> = matches
        .iter()
        .filter(|m| {
            m.status == MatchStatus::Completed
                && m.group_id == group.group_id
                && m.division == group.division
                && index.contains_key(&m.team1.team_id)
                && index.contains_key(&m.team2.team_id)
        })
        .collect();

    for m in &played {
        let tally = tally_sets(&m.team1, &m.team2);
        let outcome = tally.outcome();
        let i1 = index[&m.team1.team_id];
        let i2 = index[&m.team2.team_id];
        record(&mut standings[i1], &tally, outcome);
        record(&mut standings[i2], &tally.reversed(), outcome.reverse());
    }

    for s in &mut standings {
        s.goal_difference = goal_difference(s.goals_for, s.goals_against);
    }

    rank(&mut standings, &played);
    standings
}

/// Add one match to a team's record; `tally` is from the team's side. Counters
/// saturate instead of wrapping.
fn record(s: &mut Standing, tally: &SetTally, outcome: Ordering) {
    s.played = s.played.saturating_add(1);
    s.sets_won = s.sets_won.saturating_add(tally.sets_one);
    s.sets_lost = s.sets_lost.saturating_add(tally.sets_two);
    s.goals_for = s.goals_for.saturating_add(tally.games_one);
    s.goals_against = s.goals_against.saturating_add(tally.games_two);
    match outcome {
        Ordering::Greater => {
            s.won = s.won.saturating_add(1);
            s.points = s.points.saturating_add(POINTS_WIN);
        }
        Ordering::Less => s.lost = s.lost.saturating_add(1),
        Ordering::Equal => {
            s.drawn = s.drawn.saturating_add(1);
            s.points = s.points.saturating_add(POINTS_DRAW);
        }
    }
}

fn goal_difference(goals_for: u32, goals_against: u32) -> i32 {
    let diff = i64::from(goals_for) - i64::from(goals_against);
    i32::try_from(diff).unwrap_or(if diff < 0 { i32::MIN } else { i32::MAX })
}

fn compare_record(a: &Standing, b: &Standing) -> Ordering {
    b.points
        .cmp(&a.points)
        .then_with(|| b.goal_difference.cmp(&a.goal_difference))
        .then_with(|| b.goals_for.cmp(&a.goals_for))
}

/// Sort best-first and assign 1-based positions.
fn rank(standings: &mut [Standing], played: &[&GroupMatch]) {
    standings.sort_by(|a, b| compare_record(a, b).then_with(|| a.team_id.cmp(&b.team_id)));

    // (winner, loser) of every decided match
    let decided: Vec<(&str, &str)> = played
        .iter()
        .filter_map(|m| {
            let winner = m.winning_side()?;
            let loser = if winner.team_id == m.team1.team_id { &m.team2 } else { &m.team1 };
            Some((winner.team_id.as_str(), loser.team_id.as_str()))
        })
        .collect();

    let mut start = 0;
    while start < standings.len() {
        let mut end = start + 1;
        while end < standings.len()
            && compare_record(&standings[start], &standings[end]) == Ordering::Equal
        {
            end += 1;
        }
        if end - start > 1 {
            break_tie(&mut standings[start..end], &decided);
        }
        start = end;
    }

    for (i, s) in standings.iter_mut().enumerate() {
        s.position = i as u32 + 1;
    }
}

/// Order teams level on record by wins against each other.
fn break_tie(tied: &mut [Standing], decided: &[(&str, &str)]) {
    let members: Vec<String> = tied.iter().map(|s| s.team_id.clone()).collect();
    let mut wins: HashMap<String, u32> = HashMap::new();
    for &(winner, loser) in decided {
        if members.iter().any(|m| m == winner) && members.iter().any(|m| m == loser) {
            *wins.entry(winner.to_string()).or_default() += 1;
        }
    }
    let wins_of = |s: &Standing| wins.get(&s.team_id).copied().unwrap_or(0);
    tied.sort_by(|a, b| {
        wins_of(b)
            .cmp(&wins_of(a))
            .then_with(|| a.team_id.cmp(&b.team_id))
    });
}
