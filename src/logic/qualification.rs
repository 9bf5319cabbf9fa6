//! Qualification: the top finishers of every group form the knockout pool.

use crate::logic::standings::calculate_standings;
use crate::models::{EngineError, Group, GroupMatch, QualifiedTeam, Standing};

/// How many teams leave each group.
pub const QUALIFIERS_PER_GROUP: u32 = 2;

/// Take positions 1 and 2 from every group's standings. A group with a single
/// team contributes one. Output order is not significant.
pub fn select_qualified(group_standings: &[Vec<Standing>]) -> Vec<QualifiedTeam> {
    group_standings
        .iter()
        .flat_map(|standings| {
            standings
                .iter()
                .filter(|s| (1..=QUALIFIERS_PER_GROUP).contains(&s.position))
                .map(QualifiedTeam::from)
        })
        .collect()
}

/// Standings of every group of `division`, in group order.
pub fn division_standings(
    division: &str,
    groups: &[Group],
    matches: &[GroupMatch],
) -> Result<Vec<Vec<Standing>>, EngineError> {
    let standings: Vec<Vec<Standing>> = groups
        .iter()
        .filter(|g| g.division == division)
        .map(|g| calculate_standings(g, matches))
        .collect();
    if standings.is_empty() {
        return Err(EngineError::NoGroups(division.to_string()));
    }
    Ok(standings)
}

/// Standings then selection for a whole division.
pub fn qualify_division(
    division: &str,
    groups: &[Group],
    matches: &[GroupMatch],
) -> Result<Vec<QualifiedTeam>, EngineError> {
    let standings = division_standings(division, groups, matches)?;
    Ok(select_qualified(&standings))
}
