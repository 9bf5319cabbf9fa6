//! In-memory stand-in for the hosted document store.
//!
//! Each (tournament, division) lives behind its own mutex, so bracket creation,
//! progression and deletion for one division are serialized while other
//! divisions proceed independently.

use crate::logic::{
    apply_bracket_command, apply_group_command, apply_update, division_standings,
    generate_group_matches, qualify_division, BracketCommand, GroupCommand, MatchUpdate,
};
use crate::models::{
    Bracket, BracketMatch, EngineError, Group, GroupMatch, MatchId, QualifiedTeam, Standing,
};
use chrono::Utc;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, RwLock};

#[derive(Clone, Debug, Eq, Hash, PartialEq)]
struct DivisionKey {
    tournament_id: String,
    division: String,
}

/// Everything persisted for one division.
#[derive(Debug, Default)]
struct DivisionEntry {
    groups: Vec<Group>,
    matches: Vec<GroupMatch>,
    bracket: Option<Bracket>,
}

/// Groups, group matches and brackets for any number of tournaments.
#[derive(Debug, Default)]
pub struct MemoryStore {
    divisions: RwLock<HashMap<DivisionKey, Arc<Mutex<DivisionEntry>>>>,
}

fn poisoned<T>(_: T) -> EngineError {
    EngineError::StoreUnavailable("lock poisoned".to_string())
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn division(
        &self,
        tournament_id: &str,
        division: &str,
    ) -> Result<Arc<Mutex<DivisionEntry>>, EngineError> {
        let key = DivisionKey {
            tournament_id: tournament_id.to_string(),
            division: division.to_string(),
        };
        if let Some(entry) = self.divisions.read().map_err(poisoned)?.get(&key) {
            return Ok(Arc::clone(entry));
        }
        let mut map = self.divisions.write().map_err(poisoned)?;
        Ok(Arc::clone(map.entry(key).or_default()))
    }

    fn with_division<T>(
        &self,
        tournament_id: &str,
        division: &str,
        f: impl FnOnce(&mut DivisionEntry) -> Result<T, EngineError>,
    ) -> Result<T, EngineError> {
        let entry = self.division(tournament_id, division)?;
        let mut guard: MutexGuard<'_, DivisionEntry> = entry.lock().map_err(poisoned)?;
        f(&mut guard)
    }

    /// Replace the division's groups. Teams are assigned one by one, so a team
    /// listed in two groups ends up only in the last.
    pub fn put_groups(
        &self,
        tournament_id: &str,
        division: &str,
        groups: Vec<Group>,
    ) -> Result<Vec<Group>, EngineError> {
        self.with_division(tournament_id, division, |entry| {
            let mut rebuilt = Vec::with_capacity(groups.len());
            for group in groups {
                rebuilt.push(Group::new(group.group_id.as_str(), group.name.as_str(), division));
                for team in group.teams {
                    let command = GroupCommand::AssignTeamToGroup {
                        team,
                        group_id: group.group_id.clone(),
                    };
                    apply_group_command(&mut rebuilt, division, command);
                }
            }
            entry.groups = rebuilt;
            Ok(entry.groups.clone())
        })
    }

    pub fn apply_group_command(
        &self,
        tournament_id: &str,
        division: &str,
        command: GroupCommand,
    ) -> Result<Vec<Group>, EngineError> {
        self.with_division(tournament_id, division, |entry| {
            apply_group_command(&mut entry.groups, division, command);
            Ok(entry.groups.clone())
        })
    }

    /// All groups and group matches of a division.
    pub fn group_stage(
        &self,
        tournament_id: &str,
        division: &str,
    ) -> Result<(Vec<Group>, Vec<GroupMatch>), EngineError> {
        self.with_division(tournament_id, division, |entry| {
            Ok((entry.groups.clone(), entry.matches.clone()))
        })
    }

    /// Discard the division's group matches and generate a fresh round robin.
    pub fn regenerate_group_matches(
        &self,
        tournament_id: &str,
        division: &str,
    ) -> Result<Vec<GroupMatch>, EngineError> {
        self.with_division(tournament_id, division, |entry| {
            let matches = generate_group_matches(tournament_id, division, &entry.groups)?;
            if !entry.matches.is_empty() {
                log::info!(
                    "Discarding {} group matches of tournament {} division {}",
                    entry.matches.len(),
                    tournament_id,
                    division
                );
            }
            entry.matches = matches;
            Ok(entry.matches.clone())
        })
    }

    pub fn patch_group_match(
        &self,
        tournament_id: &str,
        division: &str,
        id: MatchId,
        update: MatchUpdate,
    ) -> Result<GroupMatch, EngineError> {
        self.with_division(tournament_id, division, |entry| {
            let m = entry
                .matches
                .iter_mut()
                .find(|m| m.id == id)
                .ok_or(EngineError::GroupMatchNotFound(id))?;
            apply_update(m, update)?;
            Ok(m.clone())
        })
    }

    pub fn standings(
        &self,
        tournament_id: &str,
        division: &str,
    ) -> Result<Vec<Vec<Standing>>, EngineError> {
        self.with_division(tournament_id, division, |entry| {
            division_standings(division, &entry.groups, &entry.matches)
        })
    }

    pub fn qualified(
        &self,
        tournament_id: &str,
        division: &str,
    ) -> Result<Vec<QualifiedTeam>, EngineError> {
        self.with_division(tournament_id, division, |entry| {
            qualify_division(division, &entry.groups, &entry.matches)
        })
    }

    pub fn bracket(&self, tournament_id: &str, division: &str) -> Result<Bracket, EngineError> {
        self.with_division(tournament_id, division, |entry| {
            entry.bracket.clone().ok_or_else(|| EngineError::BracketNotFound {
                tournament_id: tournament_id.to_string(),
                division: division.to_string(),
            })
        })
    }

    /// Seed a bracket from the division's current qualified pool.
    pub fn create_bracket(
        &self,
        tournament_id: &str,
        division: &str,
        overwrite: bool,
    ) -> Result<Vec<BracketMatch>, EngineError> {
        self.with_division(tournament_id, division, |entry| {
            let pool = qualify_division(division, &entry.groups, &entry.matches)?;
            apply_bracket_command(
                &mut entry.bracket,
                tournament_id,
                division,
                BracketCommand::GenerateBracket { pool, overwrite },
                Utc::now(),
            )
        })
    }

    pub fn apply_bracket_command(
        &self,
        tournament_id: &str,
        division: &str,
        command: BracketCommand,
    ) -> Result<Vec<BracketMatch>, EngineError> {
        self.with_division(tournament_id, division, |entry| {
            apply_bracket_command(&mut entry.bracket, tournament_id, division, command, Utc::now())
        })
    }

    pub fn delete_bracket(&self, tournament_id: &str, division: &str) -> Result<(), EngineError> {
        self.with_division(tournament_id, division, |entry| match entry.bracket.take() {
            Some(_) => {
                log::info!("Deleted bracket of tournament {} division {}", tournament_id, division);
                Ok(())
            }
            None => Err(EngineError::BracketNotFound {
                tournament_id: tournament_id.to_string(),
                division: division.to_string(),
            }),
        })
    }
}
