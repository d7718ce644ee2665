use regent_core::{Domain, MoveOutcome, Mover, UnitId, UnitTrait, WorldMut, WorldView};
use regent_grid::world::{HOME, RIVAL};
use regent_grid::{GridWorld, MapError};

const STRAIT: &str = "
    ..~~..
    W.~G.C
    ..~~..
";

#[test]
fn parses_symbols_and_numbers_units_in_reading_order() {
    let world = GridWorld::from_ascii(STRAIT).unwrap();
    assert_eq!(world.map().width(), 6);
    assert_eq!(world.map().height(), 3);

    let units = world.units(HOME);
    assert_eq!(units, vec![UnitId(1), UnitId(2)]);
    assert_eq!(world.unit_tile(UnitId(1)), world.tile(0, 1));
    assert_eq!(world.unit_domain(UnitId(2)), Domain::Water);
    assert!(world.unit_traits(UnitId(2)).contains(&UnitTrait::Transport));
    assert_eq!(world.cities(HOME).len(), 1);
    assert!(world.units(RIVAL).is_empty());
}

#[test]
fn rejects_bad_maps() {
    assert_eq!(GridWorld::from_ascii("  \n ").unwrap_err(), MapError::Empty);
    assert_eq!(
        GridWorld::from_ascii("...\n..").unwrap_err(),
        MapError::RaggedRow {
            row: 1,
            expected: 3,
            found: 2
        }
    );
    assert_eq!(
        GridWorld::from_ascii("..x").unwrap_err(),
        MapError::UnknownSymbol {
            symbol: 'x',
            row: 0,
            col: 2
        }
    );

    let mut world = GridWorld::from_ascii("..~").unwrap();
    assert_eq!(
        world.spawn(HOME, "dragon", 0, 0).unwrap_err(),
        MapError::UnknownUnit("dragon".into())
    );
    assert!(matches!(
        world.spawn(HOME, "galley", 0, 0),
        Err(MapError::BadPlacement { .. })
    ));
    assert!(matches!(
        world.spawn(HOME, "warrior", 9, 0),
        Err(MapError::OutOfBounds { x: 9, y: 0 })
    ));
}

#[test]
fn regions_split_land_by_water() {
    let world = GridWorld::from_ascii(STRAIT).unwrap();
    let west = world.area(world.tile(0, 0).unwrap());
    let east = world.area(world.tile(5, 0).unwrap());
    let sea = world.area(world.tile(2, 0).unwrap());

    assert!(west.is_some() && east.is_some() && sea.is_some());
    assert_ne!(west, east);
    assert_ne!(west, sea);
    assert_eq!(sea, world.area(world.tile(3, 2).unwrap()));
}

#[test]
fn deep_water_has_no_region_and_blocks_everyone() {
    let world = GridWorld::from_ascii("W#.\n.#.").unwrap();
    let deep = world.tile(1, 0).unwrap();
    assert!(world.is_water(deep));
    assert_eq!(world.area(deep), None);

    let far = world.tile(2, 0).unwrap();
    let warrior = UnitId(1);
    assert_eq!(world.find_path(Mover::native(&world, warrior), far), None);
    assert_eq!(
        world.find_path(Mover::native(&world, warrior).with_domain(Domain::Amphibious), far),
        None
    );
}

#[test]
fn amphibious_routes_cross_water_land_routes_do_not() {
    let world = GridWorld::from_ascii(STRAIT).unwrap();
    let warrior = UnitId(1);
    let target = world.tile(5, 1).unwrap();

    assert_eq!(world.find_path(Mover::native(&world, warrior), target), None);

    let route = world
        .find_path(Mover::native(&world, warrior).with_domain(Domain::Amphibious), target)
        .unwrap();
    assert_eq!(route.len(), 5);
    assert_eq!(route.last(), Some(&target));
    assert!(route.iter().any(|t| world.is_water(*t)));
}

#[test]
fn galleys_dock_in_own_cities() {
    let world = GridWorld::from_ascii(
        "
        ..~~C.
        W.~G..
        ",
    )
    .unwrap();
    let galley = UnitId(2);
    let city = world.tile(4, 0).unwrap();
    let route = world.find_path(Mover::native(&world, galley), city).unwrap();
    assert_eq!(route, vec![world.tile(3, 0).unwrap(), city]);
    // Open land is still off limits.
    assert_eq!(
        world.find_path(Mover::native(&world, galley), world.tile(4, 1).unwrap()),
        None
    );
}

#[test]
fn ferrying_moves_cargo_with_transport() {
    let mut world = GridWorld::from_ascii(
        "
        W~~~.
        ",
    )
    .unwrap();
    let warrior = UnitId(1);
    let galley = world.spawn(HOME, "galley", 1, 0).unwrap();

    assert!(world.step_onto(warrior, world.tile(1, 0).unwrap()));
    assert_eq!(world.carried_units(galley), vec![warrior]);
    assert_eq!(world.carrier(warrior), Some(galley));

    let route = vec![world.tile(2, 0).unwrap(), world.tile(3, 0).unwrap()];
    assert_eq!(world.advance(galley, &route), MoveOutcome::Moved(2));
    assert_eq!(world.unit_tile(warrior), world.tile(3, 0));

    // Warrior spent its move boarding.
    let shore = world.tile(4, 0).unwrap();
    assert_eq!(world.advance(warrior, &[shore]), MoveOutcome::Stalled);
    world.end_turn();
    assert_eq!(world.advance(warrior, &[shore]), MoveOutcome::Moved(1));
    assert_eq!(world.carrier(warrior), None);
    assert!(world.carried_units(galley).is_empty());
}

#[test]
fn refused_steps_are_blocked() {
    let mut world = GridWorld::from_ascii("W~.").unwrap();
    let warrior = UnitId(1);
    let water = world.tile(1, 0).unwrap();
    assert_eq!(world.advance(warrior, &[water]), MoveOutcome::Blocked);
    assert!(!world.step_onto(warrior, world.tile(2, 0).unwrap()));
    assert_eq!(world.movement_left(warrior), 1);
}

#[test]
fn production_completes_after_build_turns() {
    let mut world = GridWorld::from_ascii(".C~").unwrap();
    let city = world.cities(HOME)[0];
    let galley = world.catalogue().by_name("galley").unwrap().def.id;
    let warrior = world.catalogue().by_name("warrior").unwrap().def.id;

    assert!(world.can_produce(city, galley));
    assert_eq!(world.idle_cities(HOME), vec![city]);
    world.produce(city, galley);
    assert_eq!(world.current_production(city), Some(galley));
    assert!(world.idle_cities(HOME).is_empty());

    // A busy city ignores further orders.
    world.produce(city, warrior);
    assert_eq!(world.current_production(city), Some(galley));

    assert!(world.end_turn().is_empty());
    assert!(world.end_turn().is_empty());
    let built = world.end_turn();
    assert_eq!(built.len(), 1);
    assert_eq!(world.unit_tile(built[0]), world.city_tile(city));
    assert_eq!(world.unit_def(built[0]), Some(galley));
    assert_eq!(world.current_production(city), None);
}

#[test]
fn inland_cities_cannot_build_ships() {
    let world = GridWorld::from_ascii("C..~").unwrap();
    let city = world.cities(HOME)[0];
    let galley = world.catalogue().by_name("galley").unwrap().def.id;
    assert!(!world.can_produce(city, galley));
    assert_eq!(world.city_areas(city).len(), 1);
}

#[test]
fn killing_a_transport_sinks_its_cargo() {
    let mut world = GridWorld::from_ascii("W~").unwrap();
    let warrior = UnitId(1);
    let galley = world.spawn(HOME, "galley", 1, 0).unwrap();
    assert!(world.step_onto(warrior, world.tile(1, 0).unwrap()));

    world.kill(galley);
    assert!(!world.is_alive(galley));
    assert!(!world.is_alive(warrior));
}
