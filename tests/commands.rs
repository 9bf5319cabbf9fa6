//! Integration tests for match updates, group commands and bracket commands.

use chrono::Utc;
use club_tournament::{
    apply_bracket_command, apply_group_command, apply_update, Bracket, BracketCommand,
    BracketMatch, EngineError, ErrorKind, Group, GroupCommand, GroupMatch, MatchKey, MatchSide,
    MatchStatus, MatchUpdate, QualifiedTeam, Round, SetScore, Side, Team,
};

fn bracket_match() -> BracketMatch {
    BracketMatch::new(Round::Final, 1, MatchSide::new("a", "Alpha"), MatchSide::new("b", "Beta"))
}

fn sets(games: &[u32]) -> Vec<SetScore> {
    games
        .iter()
        .enumerate()
        .map(|(i, &g)| SetScore::new(i as u8 + 1, g))
        .collect()
}

fn score(side: Side, games: &[u32]) -> MatchUpdate {
    MatchUpdate::UpdateScore { side, sets: sets(games) }
}

fn status(status: MatchStatus, winner: Option<&str>) -> MatchUpdate {
    MatchUpdate::UpdateStatus {
        status,
        winner: winner.map(str::to_string),
    }
}

fn assign(team: Team, group_id: &str) -> GroupCommand {
    GroupCommand::AssignTeamToGroup {
        team,
        group_id: group_id.to_string(),
    }
}

fn pool(n: usize) -> Vec<QualifiedTeam> {
    (0..n)
        .map(|i| QualifiedTeam {
            team_id: format!("s{}", i + 1),
            team_name: format!("Seed {}", i + 1),
            group_id: "group_A".to_string(),
            position: 1,
            points: (50 - i) as u32,
            goal_difference: 0,
        })
        .collect()
}

/// Run `command` against the bracket of tournament `t1`, division `open`.
fn run(
    slot: &mut Option<Bracket>,
    command: BracketCommand,
) -> Result<Vec<BracketMatch>, EngineError> {
    apply_bracket_command(slot, "t1", "open", command, Utc::now())
}

fn generate(n: usize, overwrite: bool) -> BracketCommand {
    BracketCommand::GenerateBracket { pool: pool(n), overwrite }
}

#[test]
fn score_update_recounts_sets_for_both_sides() {
    let mut m = bracket_match();
    apply_update(&mut m, score(Side::One, &[6, 3, 6])).unwrap();
    apply_update(&mut m, score(Side::Two, &[4, 6, 2])).unwrap();
    assert_eq!(m.team1.total_sets_won, 2);
    assert_eq!(m.team2.total_sets_won, 1);
    // scores alone do not complete a match
    assert_eq!(m.status, MatchStatus::Scheduled);
    assert_eq!(m.winner, None);
}

#[test]
fn completing_without_a_winner_takes_the_side_with_more_sets() {
    let mut m = bracket_match();
    apply_update(&mut m, score(Side::One, &[2, 3])).unwrap();
    apply_update(&mut m, score(Side::Two, &[6, 6])).unwrap();
    apply_update(&mut m, status(MatchStatus::Completed, None)).unwrap();
    assert_eq!(m.status, MatchStatus::Completed);
    assert_eq!(m.winner.as_deref(), Some("b"));
}

#[test]
fn level_bracket_match_cannot_complete_without_a_winner() {
    let mut m = bracket_match();
    let err = apply_update(&mut m, status(MatchStatus::Completed, None)).unwrap_err();
    assert!(matches!(err, EngineError::UndecidedResult));
    assert_eq!(m.status, MatchStatus::Scheduled);
}

#[test]
fn level_group_match_completes_as_a_draw() {
    let (a, b) = (MatchSide::new("a", "A"), MatchSide::new("b", "B"));
    let mut m = GroupMatch::new("t1", "open", "group_A", 1, a, b);
    apply_update(&mut m, status(MatchStatus::Completed, None)).unwrap();
    assert_eq!(m.status, MatchStatus::Completed);
    assert_eq!(m.winner, None);
}

#[test]
fn winner_must_be_one_of_the_sides() {
    let mut m = bracket_match();
    let err = apply_update(&mut m, status(MatchStatus::Completed, Some("zzz"))).unwrap_err();
    assert!(matches!(err, EngineError::InvalidWinner(ref w) if w == "zzz"));
    assert_eq!(err.kind(), ErrorKind::Input);
    assert_eq!(m.winner, None);
}

#[test]
fn reopening_a_match_clears_its_winner() {
    let mut m = bracket_match();
    apply_update(&mut m, status(MatchStatus::Completed, Some("a"))).unwrap();
    apply_update(&mut m, status(MatchStatus::InProgress, Some("a"))).unwrap();
    assert_eq!(m.status, MatchStatus::InProgress);
    assert_eq!(m.winner, None);
}

#[test]
fn rename_changes_only_the_display_name() {
    let mut m = bracket_match();
    let rename = MatchUpdate::RenameSide {
        side: Side::Two,
        team_name: "Beta Club".to_string(),
    };
    apply_update(&mut m, rename).unwrap();
    assert_eq!(m.team2.team_name, "Beta Club");
    assert_eq!(m.team2.team_id, "b");
}

#[test]
fn updates_deserialize_from_tagged_json() {
    let update: MatchUpdate =
        serde_json::from_str(r#"{"type":"update_status","status":"completed","winner":"a"}"#)
            .unwrap();
    assert_eq!(update, status(MatchStatus::Completed, Some("a")));
    let rename: MatchUpdate =
        serde_json::from_str(r#"{"type":"rename_side","side":"two","teamName":"New"}"#).unwrap();
    assert_eq!(
        rename,
        MatchUpdate::RenameSide {
            side: Side::Two,
            team_name: "New".to_string()
        }
    );
}

#[test]
fn assigning_moves_a_team_between_groups() {
    let mut groups = vec![
        Group::new("group_A", "Group A", "open"),
        Group::new("group_B", "Group B", "open"),
    ];
    let team = Team::new("x", "X", "");
    apply_group_command(&mut groups, "open", assign(team.clone(), "group_A"));
    apply_group_command(&mut groups, "open", assign(team, "group_B"));

    assert!(!groups[0].contains("x"));
    assert!(groups[1].contains("x"));
    assert_eq!(groups[1].teams[0].division, "open");
}

#[test]
fn assigning_to_a_missing_group_creates_it() {
    let mut groups = Vec::new();
    apply_group_command(&mut groups, "open", assign(Team::new("x", "X", "open"), "group_C"));
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].name, "Group C");

    let unassign = GroupCommand::UnassignTeam { team_id: "x".to_string() };
    apply_group_command(&mut groups, "open", unassign);
    assert!(groups[0].teams.is_empty());
}

#[test]
fn second_bracket_conflicts_unless_overwritten() {
    let mut slot: Option<Bracket> = None;
    let first = run(&mut slot, generate(4, false)).unwrap();
    assert_eq!(first.len(), 2);

    let err = run(&mut slot, generate(8, false)).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Conflict);
    assert_eq!(slot.as_ref().unwrap().matches.len(), 2);

    let replaced = run(&mut slot, generate(8, true)).unwrap();
    assert_eq!(replaced.len(), 4);
}

#[test]
fn stale_version_is_rejected() {
    let mut slot = None;
    run(&mut slot, generate(2, false)).unwrap();
    let key = slot.as_ref().unwrap().matches[0].key;
    let version = slot.as_ref().unwrap().version;

    let patch = BracketCommand::PatchMatch {
        key,
        update: status(MatchStatus::Completed, Some("s1")),
    };
    run(&mut slot, patch).unwrap();
    assert_eq!(slot.as_ref().unwrap().version, version + 1);

    let delete = BracketCommand::DeleteRound {
        round: Round::Final,
        expected_version: Some(version),
    };
    let err = run(&mut slot, delete).unwrap_err();
    assert!(matches!(err, EngineError::VersionMismatch { .. }));
    assert!(slot.is_some());
}

#[test]
fn deleting_the_only_round_removes_the_bracket() {
    let mut slot = None;
    run(&mut slot, generate(2, false)).unwrap();
    let delete = BracketCommand::DeleteRound {
        round: Round::Final,
        expected_version: None,
    };
    let remaining = run(&mut slot, delete).unwrap();
    assert!(remaining.is_empty());
    assert!(slot.is_none());
}

#[test]
fn commands_on_a_missing_bracket_or_match_are_not_found() {
    let mut slot = None;
    let next = BracketCommand::GenerateNextRound {
        current: Round::Semifinal,
        expected_version: None,
    };
    let err = run(&mut slot, next).unwrap_err();
    assert!(matches!(err, EngineError::BracketNotFound { .. }));

    run(&mut slot, generate(2, false)).unwrap();
    let patch = BracketCommand::PatchMatch {
        key: unknown_key(),
        update: MatchUpdate::RenameSide {
            side: Side::One,
            team_name: "X".to_string(),
        },
    };
    let err = run(&mut slot, patch).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

fn unknown_key() -> MatchKey {
    BracketMatch::new(Round::Final, 9, MatchSide::bye(), MatchSide::bye()).key
}
