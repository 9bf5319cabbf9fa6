//! Integration tests for group standings and the tie-break order.

use club_tournament::{
    calculate_standings, tally_sets, Group, GroupMatch, MatchSide, MatchStatus, SetScore, Standing,
    Team,
};
use std::cmp::Ordering;

fn group_of(ids: &[&str]) -> Group {
    let mut g = Group::new("group_A", "Group A", "open");
    g.teams = ids.iter().map(|id| Team::new(*id, id.to_uppercase(), "open")).collect();
    g
}

fn sets(games: &[u32]) -> Vec<SetScore> {
    games
        .iter()
        .enumerate()
        .map(|(i, &g)| SetScore::new(i as u8 + 1, g))
        .collect()
}

/// A completed match of `group_A`, winner taken from the sets.
fn played(a: &str, b: &str, games_a: &[u32], games_b: &[u32]) -> GroupMatch {
    let mut one = MatchSide::new(a, a.to_uppercase());
    one.sets = sets(games_a);
    let mut two = MatchSide::new(b, b.to_uppercase());
    two.sets = sets(games_b);
    let mut m = GroupMatch::new("t1", "open", "group_A", 0, one, two);
    m.status = MatchStatus::Completed;
    m.winner = match tally_sets(&m.team1, &m.team2).outcome() {
        Ordering::Greater => Some(a.to_string()),
        Ordering::Less => Some(b.to_string()),
        Ordering::Equal => None,
    };
    m
}

fn find<'a>(standings: &'a [Standing], id: &str) -> &'a Standing {
    standings.iter().find(|s| s.team_id == id).unwrap()
}

#[test]
fn win_awards_three_points_and_counts_games() {
    let g = group_of(&["a", "b"]);
    let standings = calculate_standings(&g, &[played("a", "b", &[6, 6], &[3, 4])]);

    let a = find(&standings, "a");
    assert_eq!((a.played, a.won, a.drawn, a.lost), (1, 1, 0, 0));
    assert_eq!(a.points, 3);
    assert_eq!((a.goals_for, a.goals_against, a.goal_difference), (12, 7, 5));
    assert_eq!((a.sets_won, a.sets_lost), (2, 0));
    assert_eq!(a.position, 1);

    let b = find(&standings, "b");
    assert_eq!((b.won, b.lost, b.points), (0, 1, 0));
    assert_eq!(b.goal_difference, -5);
    assert_eq!(b.position, 2);
}

#[test]
fn level_sets_are_a_draw() {
    let g = group_of(&["a", "b"]);
    let standings = calculate_standings(&g, &[played("a", "b", &[6, 3], &[3, 6])]);
    for s in &standings {
        assert_eq!((s.drawn, s.points), (1, 1));
    }
}

#[test]
fn completed_match_without_any_score_is_a_draw() {
    let g = group_of(&["a", "b"]);
    let standings = calculate_standings(&g, &[played("a", "b", &[], &[])]);
    for s in &standings {
        assert_eq!((s.played, s.drawn, s.points, s.goals_for), (1, 1, 1, 0));
    }
}

#[test]
fn top_level_score_stands_in_for_missing_sets() {
    let g = group_of(&["a", "b"]);
    let mut m = played("a", "b", &[], &[]);
    m.team1.score = Some(3);
    m.team2.score = Some(1);
    let standings = calculate_standings(&g, &[m]);
    let a = find(&standings, "a");
    assert_eq!((a.won, a.points, a.goals_for, a.goals_against), (1, 3, 3, 1));
}

#[test]
fn tiebreak_decides_level_games() {
    let g = group_of(&["a", "b"]);
    let mut m = played("a", "b", &[6], &[6]);
    m.team1.sets[0] = SetScore::new(1, 6).with_tiebreak(7);
    m.team2.sets[0] = SetScore::new(1, 6).with_tiebreak(5);
    let standings = calculate_standings(&g, &[m]);
    assert_eq!(find(&standings, "a").points, 3);
    assert_eq!(find(&standings, "b").points, 0);
}

#[test]
fn one_sided_tiebreak_leaves_the_set_undecided() {
    let g = group_of(&["a", "b"]);
    let mut m = played("a", "b", &[6], &[6]);
    m.team1.sets[0] = SetScore::new(1, 6).with_tiebreak(7);
    let standings = calculate_standings(&g, &[m]);
    assert_eq!(find(&standings, "a").drawn, 1);
    assert_eq!(find(&standings, "b").drawn, 1);
}

#[test]
fn missing_set_on_one_side_counts_as_zero_games() {
    let g = group_of(&["a", "b"]);
    // 6-4, then a second set only recorded for a
    let standings = calculate_standings(&g, &[played("a", "b", &[4, 6], &[6])]);
    let a = find(&standings, "a");
    assert_eq!((a.sets_won, a.sets_lost), (1, 1));
    assert_eq!(a.drawn, 1);
    assert_eq!((a.goals_for, a.goals_against), (10, 6));
}

#[test]
fn unfinished_and_foreign_matches_are_ignored() {
    let g = group_of(&["a", "b", "c"]);
    let mut scheduled = played("a", "b", &[6], &[0]);
    scheduled.status = MatchStatus::Scheduled;
    let mut in_progress = played("a", "c", &[6], &[0]);
    in_progress.status = MatchStatus::InProgress;
    let mut other_group = played("b", "c", &[6], &[0]);
    other_group.group_id = "group_B".to_string();

    let standings = calculate_standings(&g, &[scheduled, in_progress, other_group]);
    assert!(standings.iter().all(|s| s.played == 0 && s.points == 0));
    let positions: Vec<u32> = standings.iter().map(|s| s.position).collect();
    assert_eq!(positions, vec![1, 2, 3]);
}

#[test]
fn points_per_match_never_exceed_three() {
    let g = group_of(&["a", "b", "c", "d"]);
    let matches = vec![
        played("a", "b", &[6, 6], &[2, 3]),
        played("a", "c", &[6, 2], &[4, 6]),
        played("a", "d", &[], &[]),
        played("b", "c", &[7], &[5]),
        played("b", "d", &[3, 6, 6], &[6, 3, 2]),
        played("c", "d", &[1], &[6]),
    ];
    let standings = calculate_standings(&g, &matches);
    let total: u32 = standings.iter().map(|s| s.points).sum();
    // four decisive results and two draws
    assert_eq!(total, 4 * 3 + 2 * 2);
}

/// b and a finish level on points, goal difference and goals for; b won their meeting.
fn head_to_head_fixture() -> Vec<GroupMatch> {
    vec![
        played("b", "a", &[6], &[4]),
        played("a", "c", &[6], &[3]),
        played("a", "d", &[6], &[2]),
        played("c", "b", &[6], &[3]),
        played("b", "d", &[7], &[1]),
        played("d", "c", &[6], &[0]),
    ]
}

#[test]
fn head_to_head_breaks_a_two_way_tie() {
    let g = group_of(&["a", "b", "c", "d"]);
    let standings = calculate_standings(&g, &head_to_head_fixture());

    let a = find(&standings, "a");
    let b = find(&standings, "b");
    assert_eq!((a.points, a.goal_difference, a.goals_for), (6, 5, 16));
    assert_eq!((b.points, b.goal_difference, b.goals_for), (6, 5, 16));

    let order: Vec<&str> = standings.iter().map(|s| s.team_id.as_str()).collect();
    assert_eq!(order, vec!["b", "a", "d", "c"]);
}

#[test]
fn ranking_does_not_depend_on_input_order() {
    let g = group_of(&["a", "b", "c", "d"]);
    let expected = calculate_standings(&g, &head_to_head_fixture());

    let mut reversed = head_to_head_fixture();
    reversed.reverse();
    let mut shuffled_group = g.clone();
    shuffled_group.teams.reverse();
    let actual = calculate_standings(&shuffled_group, &reversed);

    let ids = |s: &[Standing]| {
        s.iter()
            .map(|x| (x.team_id.clone(), x.position))
            .collect::<Vec<_>>()
    };
    assert_eq!(ids(&expected), ids(&actual));
}

#[test]
fn three_way_cycle_falls_back_to_team_id() {
    let g = group_of(&["t3", "t1", "t2"]);
    let matches = vec![
        played("t2", "t1", &[6], &[4]),
        played("t1", "t3", &[6], &[4]),
        played("t3", "t2", &[6], &[4]),
    ];
    let standings = calculate_standings(&g, &matches);
    let order: Vec<&str> = standings.iter().map(|s| s.team_id.as_str()).collect();
    assert_eq!(order, vec!["t1", "t2", "t3"]);
}

#[test]
fn game_totals_saturate_at_the_counter_limit() {
    let one = {
        let mut side = MatchSide::new("a", "A");
        side.sets = sets(&[u32::MAX, 1]);
        side
    };
    let tally = tally_sets(&one, &MatchSide::new("b", "B"));
    assert_eq!(tally.games_one, u32::MAX);
    assert_eq!(tally.sets_one, 2);

    let g = group_of(&["a", "b", "c"]);
    let matches = vec![
        played("a", "b", &[u32::MAX, 1], &[0, 0]),
        played("a", "c", &[u32::MAX], &[0]),
        played("b", "c", &[0], &[u32::MAX]),
    ];
    let standings = calculate_standings(&g, &matches);
    let a = find(&standings, "a");
    assert_eq!(a.goals_for, u32::MAX);
    assert_eq!(a.goal_difference, i32::MAX);
    let b = find(&standings, "b");
    assert_eq!(b.goals_against, u32::MAX);
    assert_eq!(b.goal_difference, i32::MIN);
}
