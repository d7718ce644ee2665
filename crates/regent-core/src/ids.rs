use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

macro_rules! id_type {
    ($(#[$meta:meta])* $name:ident, $prefix:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        #[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
        #[cfg_attr(feature = "serde", serde(transparent))]
        pub struct $name(pub u32);

        impl $name {
            /// Stable numeric id for seeding and logs.
            pub fn stable_id(self) -> u64 {
                self.0 as u64
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($prefix, "{}"), self.0)
            }
        }
    };
}

id_type!(
    /// A unit owned by some player.
    UnitId,
    "unit#"
);
id_type!(CityId, "city#");
id_type!(
    /// A map tile. Ids are assigned by the world and only compared for equality.
    TileId,
    "tile#"
);
id_type!(
    /// A connectivity region: a maximal set of tiles mutually reachable within one
    /// movement domain. Land and water regions share the id space.
    AreaId,
    "area#"
);
id_type!(PlayerId, "player#");
id_type!(UnitDefId, "def#");
