use anyhow::Result;
use regent_core::{UnitId, WorldView};
use regent_grid::world::HOME;
use regent_grid::GridWorld;
use regent_tasks::TaskSnapshot;
use regent_turn::{Orchestrator, TurnReport};
use serde::Serialize;
use tracing::info;

use crate::config::RegentConfig;
use crate::planners::{ExpeditionPlanner, GarrisonPlanner};
use crate::scenario::Scenario;

#[derive(Debug, Clone, Serialize)]
pub struct Arrival {
    pub unit: UnitId,
    pub arrived: bool,
    /// Final position as `[x, y]`; `None` if the unit died.
    pub at: Option<(i32, i32)>,
}

/// Everything `simulate` prints.
#[derive(Debug, Clone, Serialize)]
pub struct Summary {
    pub scenario: String,
    pub seed: u64,
    pub turns_played: u64,
    pub reports: Vec<TurnReport>,
    pub arrivals: Vec<Arrival>,
    /// Task trees still alive when the run stopped.
    pub tasks: Vec<TaskSnapshot>,
}

pub fn build_orchestrator(config: &RegentConfig) -> Orchestrator<GridWorld> {
    let ai = Orchestrator::new(HOME, config.seed);
    match config.priorities {
        Some(priorities) => ai.with_priorities(priorities),
        None => ai.with_difficulty(config.difficulty),
    }
}

/// Play the home player until every expedition resolves or `max_turns` runs out.
pub fn run(scenario: &Scenario, config: &RegentConfig) -> Result<Summary> {
    let (mut world, targets) = scenario.build()?;
    let mut ai = build_orchestrator(config);
    ai.add_planner(ExpeditionPlanner::new(targets.clone()));
    if scenario.garrison {
        ai.add_planner(GarrisonPlanner);
    }

    let mut reports = Vec::new();
    let mut turns_played = 0;
    for turn in 1..=config.max_turns {
        if let Some(report) = ai.next_turn(turn, &mut world) {
            reports.push(report);
        }
        world.end_turn();
        turns_played = turn;
        // Expeditions are all rooted on turn 1; garrison-only runs use every turn.
        if !targets.is_empty() && ai.roots().is_empty() {
            break;
        }
    }

    let arrivals: Vec<Arrival> = targets
        .iter()
        .map(|t| {
            let tile = world.unit_tile(t.unit);
            Arrival {
                unit: t.unit,
                arrived: tile == Some(t.to),
                at: tile.map(|tile| world.coords(tile)),
            }
        })
        .collect();
    info!(
        scenario = %scenario.name,
        turns = turns_played,
        arrived = arrivals.iter().filter(|a| a.arrived).count(),
        expeditions = arrivals.len(),
        "simulation finished"
    );

    Ok(Summary {
        scenario: scenario.name.clone(),
        seed: config.seed,
        turns_played,
        reports,
        arrivals,
        tasks: ai.snapshot(),
    })
}
