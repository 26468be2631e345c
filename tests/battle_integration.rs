//! Integration tests for battle planning and resolution driven through the engine

use bondwar::command::CommandEngine;
use bondwar::core::config::GameConfig;

fn engine(players: usize) -> CommandEngine {
    let config = GameConfig {
        initial_player_count: players,
        ..GameConfig::default()
    };
    CommandEngine::new(&config)
}

fn run(engine: &mut CommandEngine, lines: &[&str]) {
    for line in lines {
        let outcome = engine.apply_line(line);
        assert!(outcome.success, "`{}` failed: {}", line, outcome.message);
    }
}

#[test]
fn test_two_land_attackers_draw_against_one_defender() {
    let mut engine = engine(3);
    run(
        &mut engine,
        &[
            "set-map [[1, 2], [0, 2], [0, 1]]",
            "set-soldiers 0 6",
            "set-soldiers 1 4",
            "set-soldiers 2 10",
            "set-gold 2 40",
            "start-battle",
            "declare-attack 0 2",
            "declare-attack 1 2",
            "resolve-battle",
        ],
    );

    let state = engine.state();
    assert_eq!(state.soldiers, vec![0, 0, 0]);
    // draws move no wealth
    assert_eq!(state.gold, vec![0, 0, 40]);
    assert!(!state.battle.in_battle);
    assert!(state.battle.attacks.is_empty());
}

#[test]
fn test_sea_crossing_costs_attackers() {
    let mut engine = engine(2);
    run(
        &mut engine,
        &[
            "set-soldiers 0 100",
            "set-soldiers 1 50",
            "start-battle",
            "declare-attack 0 1",
            "resolve-battle",
        ],
    );

    // 10 lost at sea, then 50 each in the fight
    assert_eq!(engine.state().soldiers, vec![40, 0]);
}

#[test]
fn test_attackers_lost_at_sea_retreat() {
    let mut engine = engine(2);
    run(
        &mut engine,
        &[
            "set-water-die 100",
            "set-soldiers 0 5",
            "set-soldiers 1 3",
            "set-gold 1 10",
            "start-battle",
            "declare-attack 0 1",
            "resolve-battle",
        ],
    );

    let state = engine.state();
    assert_eq!(state.soldiers, vec![0, 3]);
    assert_eq!(state.gold, vec![0, 10]);
}

#[test]
fn test_loot_takes_half_of_gold_and_bonds() {
    let mut engine = engine(2);
    run(
        &mut engine,
        &[
            "set-map [[1], [0]]",
            "set-soldiers 0 10",
            "set-soldiers 1 4",
            "set-gold 1 10",
            "set-bonds 1 [[7, 2, 10]]",
            "start-battle",
            "declare-attack 0 1",
            "resolve-battle",
        ],
    );

    let state = engine.state();
    assert_eq!(state.soldiers, vec![6, 0]);
    assert_eq!(state.gold, vec![8, 5]);
    assert_eq!(state.bonds.held_by(1), 4);
    assert_eq!(state.bonds.len(), 1);
}

#[test]
fn test_loot_remainder_goes_to_lead_winner() {
    let mut engine = engine(4);
    run(
        &mut engine,
        &[
            "set-map [[1, 2, 3], [0, 2, 3], [0, 1, 3], [0, 1, 2]]",
            "set-soldiers 0 5",
            "set-soldiers 1 5",
            "set-soldiers 2 3",
            "set-soldiers 3 5",
            "set-gold 2 20",
            "start-battle",
            "declare-attack 0 2",
            "declare-attack 1 2",
            "declare-support 3 0",
            "resolve-battle",
        ],
    );

    let state = engine.state();
    // attackers [1, 0, 3] split a pool of 10
    assert_eq!(state.gold, vec![3, 4, 10, 3]);
    assert_eq!(state.soldiers, vec![4, 4, 0, 4]);
}

#[test]
fn test_support_cycle_picks_no_side() {
    let mut engine = engine(4);
    run(
        &mut engine,
        &[
            "set-map [[1], [0], [], []]",
            "set-soldiers 0 8",
            "set-soldiers 1 3",
            "set-soldiers 2 50",
            "set-soldiers 3 50",
            "start-battle",
            "declare-attack 0 1",
            "declare-support 2 3",
            "declare-support 3 2",
            "resolve-battle",
        ],
    );

    assert_eq!(engine.state().soldiers, vec![5, 0, 50, 50]);
}

#[test]
fn test_resolution_undoes_as_one_unit() {
    let mut engine = engine(3);
    run(
        &mut engine,
        &[
            "set-map [[1, 2], [0], [0]]",
            "set-soldiers 0 9",
            "set-soldiers 1 4",
            "set-soldiers 2 2",
            "set-gold 1 12",
            "set-gold 2 6",
            "start-battle",
            "declare-attack 0 1",
            "declare-attack 2 1",
        ],
    );
    let before = engine.state().clone();

    run(&mut engine, &["resolve-battle"]);
    assert_ne!(engine.state(), &before);

    let outcome = engine.undo();
    assert!(outcome.success);
    assert_eq!(engine.state(), &before);
    assert!(engine.state().battle.in_battle);
    assert_eq!(engine.state().battle.attacks.len(), 2);
}

#[test]
fn test_declaration_rules() {
    let mut engine = engine(3);
    run(&mut engine, &["set-soldiers 0 5", "set-soldiers 1 5"]);

    assert!(!engine.apply_line("declare-attack 0 1").success);
    run(&mut engine, &["start-battle"]);
    assert!(!engine.apply_line("start-battle").success);

    assert!(!engine.apply_line("declare-attack 2 0").success);
    assert!(!engine.apply_line("declare-attack 0 0").success);
    assert!(!engine.apply_line("declare-attack 0 7").success);
    run(&mut engine, &["declare-support 0 1"]);
    assert!(!engine.apply_line("declare-attack 0 1").success);
}

#[test]
fn test_undo_start_battle_closes_phase() {
    let mut engine = engine(2);
    run(&mut engine, &["start-battle"]);
    assert!(engine.undo().success);
    assert!(!engine.state().battle.in_battle);
    assert!(!engine.apply_line("resolve-battle").success);
}

#[test]
fn test_huge_armies_resolve_without_overflow() {
    let max = i64::MAX;
    let mut engine = engine(4);
    let mut lines = vec!["set-map [[3], [3], [3], [0, 1, 2]]".to_string()];
    for player in 0..3 {
        lines.push(format!("set-soldiers {} {}", player, max));
        lines.push(format!("set-gold {} {}", player, max));
    }
    lines.push(format!("set-soldiers 3 {}", max));
    lines.push(format!("set-gold 3 {}", max));
    lines.push("start-battle".to_string());
    for player in 0..3 {
        lines.push(format!("declare-attack {} 3", player));
    }
    lines.push("resolve-battle".to_string());
    let lines: Vec<&str> = lines.iter().map(String::as_str).collect();
    run(&mut engine, &lines);

    let state = engine.state();
    assert_eq!(state.soldiers[3], 0);
    assert_eq!(state.soldiers[..3].iter().map(|&s| u128::from(s)).sum::<u128>(), 2 * max as u128);
    assert!(state.gold[..3].iter().all(|&g| g >= max as u64));
    assert_eq!(state.gold[3], max as u64 - max as u64 / 2);
}
