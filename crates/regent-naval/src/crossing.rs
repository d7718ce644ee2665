use regent_core::{Domain, Mover, TileId, UnitId, WorldView};

/// Where cargo and transport meet, and where the transport lets the cargo off.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Crossing {
    /// Last land tile before the water.
    pub land_staging: TileId,
    /// First water tile; the transport waits here.
    pub sea_staging: TileId,
    /// Last water tile before landfall.
    pub sea_arrival: TileId,
}

/// Walk a hypothetical amphibious route from `cargo` to `to` and pick out the crossing.
///
/// `None` if no such route exists or it never touches water and comes back out.
pub fn find_crossing<W>(world: &W, cargo: UnitId, to: TileId) -> Option<Crossing>
where
    W: WorldView + ?Sized,
{
    let start = world.unit_tile(cargo)?;
    let mover = Mover::native(world, cargo).with_domain(Domain::Amphibious);
    let route = world.find_path(mover, to)?;

    let mut land_staging = None;
    let mut sea_staging: Option<TileId> = None;
    let mut sea_arrival = None;
    let mut last = start;
    for tile in route {
        if let Some(sea) = sea_staging {
            if !world.is_water(tile) && world.area(last) == world.area(sea) {
                sea_arrival = Some(last);
                break;
            }
        }
        if land_staging.is_none() && world.is_water(tile) {
            land_staging = Some(last);
            sea_staging = Some(tile);
        }
        last = tile;
    }

    let mut sea_staging = sea_staging?;
    // A port tile is land; the transport has to wait on open water next to it.
    if world.city_at(sea_staging).is_some() {
        sea_staging = world
            .neighbours(sea_staging)
            .into_iter()
            .find(|n| world.is_water(*n) && world.city_at(*n).is_none())?;
    }

    Some(Crossing {
        land_staging: land_staging?,
        sea_staging,
        sea_arrival: sea_arrival?,
    })
}
