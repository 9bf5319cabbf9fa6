//! Explicit commands applied to match records, a division's groups and its bracket.

use crate::logic::progression::{delete_round, generate_next_round};
use crate::logic::seeding::seed_bracket;
use crate::models::{
    tally_sets, Bracket, BracketMatch, EngineError, Group, MatchKey, MatchStatus, QualifiedTeam,
    Round, ScoredMatch, SetScore, Side, Team, TeamId,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// A change to one match. Applies to group and bracket matches alike.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MatchUpdate {
    /// Change the display name of one side.
    RenameSide {
        side: Side,
        #[serde(rename = "teamName")]
        team_name: String,
    },
    /// Replace one side's sets; both sides' set totals are recounted.
    UpdateScore { side: Side, sets: Vec<SetScore> },
    /// Move the match to `status`. Completing without a winner takes the side
    /// with more sets (a level group match completes as a draw); any other
    /// status clears the winner.
    UpdateStatus {
        status: MatchStatus,
        #[serde(default)]
        winner: Option<TeamId>,
    },
}

/// Apply `update` to `m`. On error the match is left untouched.
pub fn apply_update<M: ScoredMatch>(m: &mut M, update: MatchUpdate) -> Result<(), EngineError> {
    match update {
        MatchUpdate::RenameSide { side, team_name } => {
            m.side_mut(side).team_name = team_name;
        }
        MatchUpdate::UpdateScore { side, sets } => {
            m.side_mut(side).sets = sets;
            let tally = tally_sets(m.side(Side::One), m.side(Side::Two));
            m.side_mut(Side::One).total_sets_won = tally.sets_one;
            m.side_mut(Side::Two).total_sets_won = tally.sets_two;
        }
        MatchUpdate::UpdateStatus { status: MatchStatus::Completed, winner } => {
            let one = m.side(Side::One);
            let two = m.side(Side::Two);
            let winner = match winner {
                Some(w) if w == one.team_id || w == two.team_id => Some(w),
                Some(w) => return Err(EngineError::InvalidWinner(w)),
                None => match tally_sets(one, two).outcome() {
                    Ordering::Greater => Some(one.team_id.clone()),
                    Ordering::Less => Some(two.team_id.clone()),
                    Ordering::Equal if m.allows_draw() => None,
                    Ordering::Equal => return Err(EngineError::UndecidedResult),
                },
            };
            m.set_status(MatchStatus::Completed);
            m.set_winner(winner);
        }
        MatchUpdate::UpdateStatus { status, .. } => {
            m.set_status(status);
            m.set_winner(None);
        }
    }
    Ok(())
}

/// Changes to how a division's teams are split into groups.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GroupCommand {
    /// Put `team` into `group_id`, taking it out of any other group.
    AssignTeamToGroup {
        team: Team,
        #[serde(rename = "groupId")]
        group_id: String,
    },
    UnassignTeam {
        #[serde(rename = "teamId")]
        team_id: TeamId,
    },
}

/// Apply `command` to the groups of `division`. Groups never share a team.
pub fn apply_group_command(groups: &mut Vec<Group>, division: &str, command: GroupCommand) {
    match command {
        GroupCommand::AssignTeamToGroup { mut team, group_id } => {
            for g in groups.iter_mut() {
                g.teams.retain(|t| t.id != team.id);
            }
            team.division = division.to_string();
            match groups.iter_mut().find(|g| g.group_id == group_id) {
                Some(group) => group.teams.push(team),
                None => {
                    let name = group_id
                        .strip_prefix("group_")
                        .map(|suffix| format!("Group {suffix}"))
                        .unwrap_or_else(|| group_id.clone());
                    let mut group = Group::new(group_id, name, division);
                    group.teams.push(team);
                    groups.push(group);
                }
            }
        }
        GroupCommand::UnassignTeam { team_id } => {
            for g in groups.iter_mut() {
                g.teams.retain(|t| t.id != team_id);
            }
        }
    }
}

/// Changes to the bracket of one (tournament, division).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BracketCommand {
    /// Seed a new bracket; replaces an existing one only with `overwrite`.
    GenerateBracket {
        pool: Vec<QualifiedTeam>,
        #[serde(default)]
        overwrite: bool,
    },
    GenerateNextRound {
        current: Round,
        #[serde(default, rename = "expectedVersion")]
        expected_version: Option<u64>,
    },
    /// Remove `round` and everything after it.
    DeleteRound {
        round: Round,
        #[serde(default, rename = "expectedVersion")]
        expected_version: Option<u64>,
    },
    PatchMatch { key: MatchKey, update: MatchUpdate },
}

/// Apply `command` to a division's bracket slot and return the resulting match
/// list. A bracket whose last round is deleted is removed from the slot.
pub fn apply_bracket_command(
    slot: &mut Option<Bracket>,
    tournament_id: &str,
    division: &str,
    command: BracketCommand,
    now: DateTime<Utc>,
) -> Result<Vec<BracketMatch>, EngineError> {
    match command {
        BracketCommand::GenerateBracket { pool, overwrite } => {
            if slot.is_some() && !overwrite {
                return Err(EngineError::BracketExists {
                    tournament_id: tournament_id.to_string(),
                    division: division.to_string(),
                });
            }
            let seeded = seed_bracket(&pool)?;
            let bracket = Bracket::new(tournament_id, division, seeded.matches, now);
            let matches = bracket.matches.clone();
            *slot = Some(bracket);
            Ok(matches)
        }
        BracketCommand::GenerateNextRound { current, expected_version } => {
            let bracket = existing(slot, tournament_id, division)?;
            check_version(bracket, expected_version)?;
            let next = generate_next_round(&bracket.matches, current)?;
            if !next.is_empty() {
                bracket.matches.extend(next);
                bracket.touch(now);
            }
            Ok(bracket.matches.clone())
        }
        BracketCommand::DeleteRound { round, expected_version } => {
            let bracket = existing(slot, tournament_id, division)?;
            check_version(bracket, expected_version)?;
            if delete_round(&mut bracket.matches, round) > 0 {
                bracket.touch(now);
            }
            if !bracket.matches.is_empty() {
                return Ok(bracket.matches.clone());
            }
            log::info!(
                "Bracket for tournament {} division {} is empty, removing it",
                tournament_id,
                division
            );
            *slot = None;
            Ok(Vec::new())
        }
        BracketCommand::PatchMatch { key, update } => {
            let bracket = existing(slot, tournament_id, division)?;
            apply_update(bracket.match_mut(key)?, update)?;
            bracket.touch(now);
            Ok(bracket.matches.clone())
        }
    }
}

fn existing<'a>(
    slot: &'a mut Option<Bracket>,
    tournament_id: &str,
    division: &str,
) -> Result<&'a mut Bracket, EngineError> {
    slot.as_mut().ok_or_else(|| EngineError::BracketNotFound {
        tournament_id: tournament_id.to_string(),
        division: division.to_string(),
    })
}

fn check_version(bracket: &Bracket, expected: Option<u64>) -> Result<(), EngineError> {
    match expected {
        Some(expected) if expected != bracket.version => Err(EngineError::VersionMismatch {
            expected,
            found: bracket.version,
        }),
        _ => Ok(()),
    }
}
