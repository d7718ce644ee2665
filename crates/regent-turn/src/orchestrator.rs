use regent_core::turn::streams;
use regent_core::{AssignmentRegistry, Difficulty, PlayerId, Priorities, TurnContext, WorldMut};
use regent_tasks::{Task, TaskContext, TaskIds, TaskNode, TaskSnapshot};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::{arbitrate, PlanContext, Planner, Proposal};

/// What happened during one player-turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TurnReport {
    pub turn: u64,
    pub orders_proposed: usize,
    pub orders_executed: usize,
    pub roots_active: usize,
    pub roots_resolved: usize,
}

/// Drives one AI player: task trees, planners and the order auction.
pub struct Orchestrator<W>
where
    W: WorldMut + 'static,
{
    player: PlayerId,
    seed: u64,
    priorities: Priorities,
    rebalance_expansion: bool,
    registry: AssignmentRegistry,
    roots: Vec<TaskNode<W>>,
    queued: Vec<Box<dyn Task<W>>>,
    planners: Vec<Box<dyn Planner<W>>>,
    ids: TaskIds,
    last_turn: Option<u64>,
}

impl<W> Orchestrator<W>
where
    W: WorldMut + 'static,
{
    pub fn new(player: PlayerId, seed: u64) -> Self {
        Self {
            player,
            seed,
            priorities: Priorities::default(),
            rebalance_expansion: true,
            registry: AssignmentRegistry::new(),
            roots: Vec::new(),
            queued: Vec::new(),
            planners: Vec::new(),
            ids: TaskIds::new(),
            last_turn: None,
        }
    }

    pub fn with_difficulty(mut self, difficulty: Difficulty) -> Self {
        self.priorities.randomize = difficulty.randomize();
        self
    }

    /// Fixed weights: also turns off the per-turn expansion rebalance.
    pub fn with_priorities(mut self, priorities: Priorities) -> Self {
        self.priorities = priorities;
        self.rebalance_expansion = false;
        self
    }

    pub fn with_planner(mut self, planner: impl Planner<W>) -> Self {
        self.add_planner(planner);
        self
    }

    pub fn add_planner(&mut self, planner: impl Planner<W>) {
        self.planners.push(Box::new(planner));
    }

    /// Queue a root task. It is initialized during the next turn, alongside planner tasks.
    pub fn add_root(&mut self, task: impl Task<W>) {
        self.queued.push(Box::new(task));
    }

    pub fn player(&self) -> PlayerId {
        self.player
    }

    pub fn priorities(&self) -> &Priorities {
        &self.priorities
    }

    pub fn registry(&self) -> &AssignmentRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut AssignmentRegistry {
        &mut self.registry
    }

    pub fn roots(&self) -> &[TaskNode<W>] {
        &self.roots
    }

    pub fn last_turn(&self) -> Option<u64> {
        self.last_turn
    }

    pub fn snapshot(&self) -> Vec<TaskSnapshot> {
        self.roots.iter().map(TaskNode::snapshot).collect()
    }

    /// Play one turn. Returns `None` if `turn` is not newer than the last one played.
    pub fn next_turn(&mut self, turn: u64, world: &mut W) -> Option<TurnReport> {
        if self.last_turn.is_some_and(|last| turn <= last) {
            debug!(player = %self.player, turn, "turn already processed");
            return None;
        }
        self.last_turn = Some(turn);

        let tc = TurnContext {
            turn,
            player: self.player,
            seed: self.seed,
        };

        self.registry.sync_with_world(&*world, self.player);
        if self.rebalance_expansion {
            let cities = world.cities(self.player).len();
            self.priorities.rebalance_expansion(cities);
        }

        let mut orders = Vec::new();
        let mut task_rng = tc.rng(streams::TASKS);
        {
            let mut cx = TaskContext::new(
                tc,
                &mut *world,
                &mut self.registry,
                &mut orders,
                &mut self.ids,
                &mut task_rng,
            );
            for root in &mut self.roots {
                root.scheduling_pass(&mut cx);
            }
        }

        let before = self.roots.len();
        self.roots.retain(|root| {
            if root.is_terminal() {
                debug!(
                    task_id = %root.id(),
                    kind = root.kind(),
                    status = root.status().as_str(),
                    "root task dropped"
                );
            }
            !root.is_terminal()
        });
        let mut roots_resolved = before - self.roots.len();

        let mut fresh: Vec<Box<dyn Task<W>>> = self.queued.drain(..).collect();
        let mut plan_rng = tc.rng(streams::PLANNERS);
        for planner in &mut self.planners {
            let mut pcx = PlanContext {
                turn: tc,
                world: &*world,
                registry: &mut self.registry,
                priorities: &self.priorities,
                rng: &mut plan_rng,
            };
            let proposals = planner.plan(&mut pcx);
            debug!(planner = planner.name(), count = proposals.len(), "planner proposals");
            for proposal in proposals {
                match proposal {
                    Proposal::Order(order) => orders.push(order),
                    Proposal::Task(task) => fresh.push(task),
                }
            }
        }

        if !fresh.is_empty() {
            let mut cx = TaskContext::new(
                tc,
                &mut *world,
                &mut self.registry,
                &mut orders,
                &mut self.ids,
                &mut task_rng,
            );
            for task in fresh {
                let node = TaskNode::root_boxed(task, &mut cx);
                if node.is_terminal() {
                    debug!(
                        task_id = %node.id(),
                        kind = node.kind(),
                        status = node.status().as_str(),
                        "root task resolved at init"
                    );
                    roots_resolved += 1;
                } else {
                    self.roots.push(node);
                }
            }
        }

        let orders_proposed = orders.len();
        let mut arb_rng = tc.rng(streams::ARBITRATION);
        let winners = arbitrate(orders, &self.priorities, &mut arb_rng);
        let orders_executed = winners.len();
        for order in winners {
            debug!(
                group = order.group.as_str(),
                entity = order.entity_id,
                priority = order.priority,
                "order executed"
            );
            order.perform(world);
        }

        let report = TurnReport {
            turn,
            orders_proposed,
            orders_executed,
            roots_active: self.roots.len(),
            roots_resolved,
        };
        info!(
            player = %self.player,
            turn,
            proposed = report.orders_proposed,
            executed = report.orders_executed,
            active = report.roots_active,
            resolved = report.roots_resolved,
            "turn complete"
        );
        Some(report)
    }
}
