use regent_core::{
    AssignmentRegistry, Order, OrderGroup, SplitMix64, TurnContext, UnitId, UnitTrait, WorldView,
};
use regent_grid::world::HOME;
use regent_grid::GridWorld;
use regent_naval::{find_crossing, Crossing, Embark, MoveUnit, NavalTransport, ProduceUnit};
use regent_tasks::{Task, TaskContext, TaskIds, TaskNode, TaskStatus};

struct Harness {
    world: GridWorld,
    registry: AssignmentRegistry,
    orders: Vec<Order<GridWorld>>,
    ids: TaskIds,
    rng: SplitMix64,
    turn: u64,
}

impl Harness {
    fn new(map: &str) -> Self {
        let world = GridWorld::from_ascii(map).unwrap();
        let mut registry = AssignmentRegistry::new();
        registry.sync_with_world(&world, HOME);
        Self {
            world,
            registry,
            orders: Vec::new(),
            ids: TaskIds::new(),
            rng: SplitMix64::new(1),
            turn: 0,
        }
    }

    fn cx(&mut self) -> TaskContext<'_, GridWorld> {
        self.turn += 1;
        let turn = TurnContext {
            turn: self.turn,
            player: HOME,
            seed: 1,
        };
        TaskContext::new(
            turn,
            &mut self.world,
            &mut self.registry,
            &mut self.orders,
            &mut self.ids,
            &mut self.rng,
        )
    }

    fn root(&mut self, task: impl Task<GridWorld>) -> TaskNode<GridWorld> {
        let mut cx = self.cx();
        TaskNode::root(task, &mut cx)
    }

    /// One pass, then the world's end of turn.
    fn turn(&mut self, node: &mut TaskNode<GridWorld>) {
        {
            let mut cx = self.cx();
            node.scheduling_pass(&mut cx);
        }
        self.world.end_turn();
    }
}

#[test]
fn crossing_on_a_single_tile_strip() {
    let world = GridWorld::from_ascii("W.~~..").unwrap();
    let crossing = find_crossing(&world, UnitId(1), world.tile(5, 0).unwrap()).unwrap();
    assert_eq!(
        crossing,
        Crossing {
            land_staging: world.tile(1, 0).unwrap(),
            sea_staging: world.tile(2, 0).unwrap(),
            sea_arrival: world.tile(3, 0).unwrap(),
        }
    );
}

#[test]
fn crossing_from_the_shore_stages_in_place() {
    let world = GridWorld::from_ascii("W~.").unwrap();
    let crossing = find_crossing(&world, UnitId(1), world.tile(2, 0).unwrap()).unwrap();
    assert_eq!(crossing.land_staging, world.tile(0, 0).unwrap());
    assert_eq!(crossing.sea_staging, crossing.sea_arrival);
}

#[test]
fn no_crossing_without_water_or_route() {
    let dry = GridWorld::from_ascii("W....").unwrap();
    assert_eq!(find_crossing(&dry, UnitId(1), dry.tile(4, 0).unwrap()), None);

    let walled = GridWorld::from_ascii("W#.").unwrap();
    assert_eq!(find_crossing(&walled, UnitId(1), walled.tile(2, 0).unwrap()), None);
}

#[test]
fn same_region_fails_without_children() {
    let mut h = Harness::new("W....\n.~G~.");
    let to = h.world.tile(4, 0).unwrap();
    let root = h.root(NavalTransport::new(UnitId(1), to));

    assert_eq!(root.status(), &TaskStatus::Failed("no crossing needed".into()));
    assert_eq!(root.child_count(), 0);
    assert_eq!(h.registry.assigned_count(), 0);
}

#[test]
fn unroutable_destination_fails_and_releases_transport() {
    let mut h = Harness::new("W#.\nG#.");
    let galley = UnitId(2);
    let to = h.world.tile(2, 0).unwrap();
    let root = h.root(NavalTransport::new(UnitId(1), to));

    assert_eq!(root.status(), &TaskStatus::Failed("no crossing found".into()));
    assert_eq!(root.child_count(), 0);
    assert!(h.registry.is_free(galley));
}

#[test]
fn move_unit_walks_until_arrival() {
    let mut h = Harness::new("W....");
    let to = h.world.tile(3, 0).unwrap();
    let mut root = h.root(MoveUnit::new(UnitId(1), to));

    for _ in 0..2 {
        h.turn(&mut root);
        assert_eq!(root.status(), &TaskStatus::Unresolved);
    }
    h.turn(&mut root);
    assert_eq!(root.status(), &TaskStatus::Completed);
    assert_eq!(h.world.unit_tile(UnitId(1)), Some(to));
}

#[test]
fn move_unit_fails_on_no_path_or_death() {
    let mut h = Harness::new("W~.");
    let mut root = h.root(MoveUnit::new(UnitId(1), h.world.tile(2, 0).unwrap()));
    h.turn(&mut root);
    assert_eq!(root.status(), &TaskStatus::Failed("no path found".into()));

    let mut h = Harness::new("W...");
    let mut root = h.root(MoveUnit::new(UnitId(1), h.world.tile(3, 0).unwrap()));
    h.turn(&mut root);
    h.world.kill(UnitId(1));
    h.turn(&mut root);
    assert_eq!(root.status(), &TaskStatus::Failed("unit is dead".into()));
}

#[test]
fn embark_is_confirmed_by_cargo_list() {
    let mut h = Harness::new("W~");
    let galley = h.world.spawn(HOME, "galley", 1, 0).unwrap();
    let mut root = h.root(Embark::new(UnitId(1), galley));

    h.turn(&mut root);
    assert_eq!(root.status(), &TaskStatus::Completed);
    assert_eq!(h.world.carried_units(galley), vec![UnitId(1)]);
}

#[test]
fn embark_fails_when_transport_is_out_of_reach() {
    let mut h = Harness::new("W~~");
    let galley = h.world.spawn(HOME, "galley", 2, 0).unwrap();
    let mut root = h.root(Embark::new(UnitId(1), galley));

    h.turn(&mut root);
    assert_eq!(
        root.status(),
        &TaskStatus::Failed("transport out of reach".into())
    );
}

#[test]
fn produce_unit_orders_the_priciest_matching_type() {
    let mut h = Harness::new(".C~");
    let city = h.world.cities(HOME)[0];
    let galley = h.world.catalogue().by_name("galley").unwrap().def.id;
    let mut root = h.root(ProduceUnit::new(UnitTrait::Transport, 70.0));

    assert_eq!(h.orders.len(), 1);
    let order = h.orders.remove(0);
    assert_eq!(order.bucket(), (OrderGroup::CityProduce, city.0));
    assert_eq!(order.priority, 70.0);
    order.perform(&mut h.world);
    assert_eq!(h.world.current_production(city), Some(galley));

    // Build takes three end-of-turns; the pass after the last one sees the ship.
    for _ in 0..3 {
        h.turn(&mut root);
        assert_eq!(root.status(), &TaskStatus::Unresolved);
    }
    h.turn(&mut root);
    assert_eq!(root.status(), &TaskStatus::Completed);
    let built = root.task().produced_unit().unwrap();
    assert_eq!(h.world.unit_def(built), Some(galley));
    assert!(h.orders.is_empty());
}

#[test]
fn produce_unit_retries_after_losing_the_auction() {
    let mut h = Harness::new(".C~");
    let mut root = h.root(ProduceUnit::new(UnitTrait::Transport, 5.0));
    assert_eq!(h.orders.len(), 1);
    h.orders.clear();

    h.turn(&mut root);
    assert_eq!(h.orders.len(), 1);
    assert_eq!(root.status(), &TaskStatus::Unresolved);
}

#[test]
fn produce_unit_without_matching_type_fails() {
    let mut h = Harness::new(".C.");
    let root = h.root(ProduceUnit::new(UnitTrait::Siege, 5.0));
    assert!(matches!(root.status(), TaskStatus::Failed(r) if r.contains("Siege")));
}

#[test]
fn produce_unit_stalls_out_without_a_city() {
    let mut h = Harness::new("W.~");
    let mut root = h.root(ProduceUnit::new(UnitTrait::Transport, 70.0));
    assert!(h.orders.is_empty());

    for _ in 0..5 {
        h.turn(&mut root);
        assert_eq!(root.status(), &TaskStatus::Unresolved);
    }
    h.turn(&mut root);
    assert_eq!(root.status(), &TaskStatus::Failed("stuck in cycle".into()));
    assert!(h.orders.is_empty());
}

#[test]
fn crossing_gives_up_when_no_transport_can_ever_be_built() {
    let mut h = Harness::new("W~.");
    let to = h.world.tile(2, 0).unwrap();
    let mut root = h.root(NavalTransport::new(UnitId(1), to));
    assert_eq!(root.child_count(), 1);

    for _ in 0..60 {
        if root.is_terminal() {
            break;
        }
        h.turn(&mut root);
    }
    assert_eq!(
        root.status(),
        &TaskStatus::Failed("no transport available".into())
    );
    assert_eq!(h.world.unit_tile(UnitId(1)), h.world.tile(0, 0));
}
