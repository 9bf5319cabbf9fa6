//! Group stage: round-robin fixture generation.

use crate::models::{EngineError, Group, GroupMatch, MatchSide};

/// Generate the full round robin for every group of `division`.
///
/// Each group of k teams yields k·(k−1)/2 scheduled matches, one per unordered
/// pair, enumerated (i, j) with i < j in list order. Match numbers run across
/// the whole division in group-then-pair order starting at 1. Prior matches are
/// the caller's to discard; nothing here deduplicates.
pub fn generate_group_matches(
    tournament_id: &str,
    division: &str,
    groups: &[Group],
) -> Result<Vec<GroupMatch>, EngineError> {
    let groups: Vec<&Group> = groups.iter().filter(|g| g.division == division).collect();
    if groups.is_empty() {
        return Err(EngineError::NoGroups(division.to_string()));
    }

    let mut matches = Vec::new();
    let mut match_number = 0;
    for group in groups {
        let teams = &group.teams;
        for (i, a) in teams.iter().enumerate() {
            for b in &teams[i + 1..] {
                match_number += 1;
                matches.push(GroupMatch::new(
                    tournament_id,
                    division,
                    group.group_id.as_str(),
                    match_number,
                    MatchSide::new(a.id.as_str(), a.name.as_str()),
                    MatchSide::new(b.id.as_str(), b.name.as_str()),
                ));
            }
        }
    }

    log::debug!(
        "Generated {} group matches for tournament {} division {}",
        matches.len(),
        tournament_id,
        division
    );
    Ok(matches)
}
