//! Group draw: split a division's registrations into groups.

use crate::logic::commands::{apply_group_command, GroupCommand};
use crate::models::{group_id_for, group_name_for, EngineError, Group, Team};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::Deserialize;
use std::io::Read;

/// Shuffle `teams` and deal them one by one into `group_count` groups
/// (`group_A`, `group_B`, ...). Group sizes differ by at most one.
pub fn draw_groups<R: Rng + ?Sized>(
    division: &str,
    teams: &[Team],
    group_count: usize,
    rng: &mut R,
) -> Result<Vec<Group>, EngineError> {
    if group_count == 0 {
        return Err(EngineError::NoGroupCount);
    }
    if teams.is_empty() {
        return Err(EngineError::NoTeams);
    }

    let mut shuffled = teams.to_vec();
    shuffled.shuffle(rng);

    let mut groups: Vec<Group> = (0..group_count.min(shuffled.len()))
        .map(|i| Group::new(group_id_for(i), group_name_for(i), division))
        .collect();
    let count = groups.len();
    for (i, team) in shuffled.into_iter().enumerate() {
        let group_id = groups[i % count].group_id.clone();
        let command = GroupCommand::AssignTeamToGroup { team, group_id };
        apply_group_command(&mut groups, division, command);
    }
    Ok(groups)
}

/// One registration row: `group_id,team_id,team_name,members`.
#[derive(Debug, Deserialize)]
struct RegistrationRow {
    group_id: String,
    team_id: String,
    team_name: String,
    #[serde(default)]
    members: String,
}

/// Read group assignments for `division` from CSV with header
/// `group_id,team_id,team_name,members`; members are `;`-separated.
/// Groups appear in order of first mention.
pub fn read_groups_csv<R: Read>(reader: R, division: &str) -> Result<Vec<Group>, EngineError> {
    let mut csv_reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let mut groups = Vec::new();
    for row in csv_reader.deserialize::<RegistrationRow>() {
        let row = row?;
        let mut team = Team::new(row.team_id, row.team_name, division);
        team.members = row
            .members
            .split(';')
            .map(str::trim)
            .filter(|m| !m.is_empty())
            .map(String::from)
            .collect();
        apply_group_command(
            &mut groups,
            division,
            GroupCommand::AssignTeamToGroup { team, group_id: row.group_id },
        );
    }
    Ok(groups)
}
