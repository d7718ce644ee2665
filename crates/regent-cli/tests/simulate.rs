use std::path::PathBuf;

use regent_cli::{run, RegentConfig, Scenario};

fn scenario(name: &str) -> Scenario {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../../scenarios")
        .join(name);
    Scenario::load(&path).unwrap()
}

fn inline(map: &str, unit: u32, to: (i32, i32)) -> Scenario {
    serde_yaml::from_str(&format!(
        "name: inline\nmap: \"{}\"\nexpeditions:\n  - unit: {}\n    to: [{}, {}]\n",
        map.replace('\n', "\\n"),
        unit,
        to.0,
        to.1
    ))
    .unwrap()
}

#[test]
fn strait_crossing_arrives_and_builds_a_defender() {
    let summary = run(&scenario("strait.yaml"), &RegentConfig::default()).unwrap();

    assert_eq!(summary.arrivals.len(), 1);
    assert!(summary.arrivals[0].arrived);
    assert_eq!(summary.arrivals[0].at, Some((8, 1)));
    assert!(summary.tasks.is_empty());
    assert!(summary.turns_played < 20);

    // The defender is the only order on turn one; the galley is already at sea.
    let first = summary.reports[0];
    assert_eq!(first.orders_proposed, 1);
    assert_eq!(first.orders_executed, 1);
}

#[test]
fn missing_fleet_is_built_first() {
    let summary = run(&scenario("no-fleet.yaml"), &RegentConfig::default()).unwrap();

    assert!(summary.arrivals[0].arrived);
    assert_eq!(summary.reports[0].orders_proposed, 1);
    let resolved: usize = summary.reports.iter().map(|r| r.roots_resolved).sum();
    assert_eq!(resolved, 1);
}

#[test]
fn contested_port_still_gets_its_galley() {
    let mut contested = scenario("no-fleet.yaml");
    contested.garrison = true;

    for seed in 1..=8 {
        let config = RegentConfig {
            seed,
            ..RegentConfig::default()
        };
        let summary = run(&contested, &config).unwrap();
        // Transport and defender bid for the same city; only one can win.
        assert_eq!(summary.reports[0].orders_proposed, 2);
        assert_eq!(summary.reports[0].orders_executed, 1);
        assert!(summary.arrivals[0].arrived, "seed {seed}");
    }
}

#[test]
fn same_seed_same_game() {
    let config = RegentConfig {
        seed: 42,
        ..RegentConfig::default()
    };
    let a = run(&scenario("strait.yaml"), &config).unwrap();
    let b = run(&scenario("strait.yaml"), &config).unwrap();
    assert_eq!(
        serde_json::to_value(&a).unwrap(),
        serde_json::to_value(&b).unwrap()
    );
}

#[test]
fn unreachable_destination_stops_after_the_failure() {
    let summary = run(&inline("W#.\nG#.", 1, (2, 0)), &RegentConfig::default()).unwrap();

    assert_eq!(summary.turns_played, 1);
    assert!(!summary.arrivals[0].arrived);
    assert_eq!(summary.arrivals[0].at, Some((0, 0)));
    assert_eq!(summary.reports[0].roots_resolved, 1);
}

#[test]
fn bad_scenarios_are_rejected() {
    assert!(inline("W~.", 9, (2, 0)).build().is_err());
    assert!(inline("W~.", 1, (7, 7)).build().is_err());
    assert!(inline("W~x", 1, (2, 0)).build().is_err());
}

#[test]
fn turn_limit_is_respected() {
    let config = RegentConfig {
        max_turns: 2,
        ..RegentConfig::default()
    };
    let summary = run(&scenario("strait.yaml"), &config).unwrap();
    assert_eq!(summary.turns_played, 2);
    assert_eq!(summary.reports.len(), 2);
    assert!(!summary.arrivals[0].arrived);
    assert_eq!(summary.tasks.len(), 1);
    assert_eq!(summary.tasks[0].kind, "naval-transport");
}
