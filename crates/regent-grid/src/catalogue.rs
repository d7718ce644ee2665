use regent_core::{Domain, UnitDef, UnitDefId, UnitTrait};

/// A unit definition plus the rules the grid needs to move and build it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnitSpec {
    pub def: UnitDef,
    pub moves: u32,
    /// Land units a transport can carry.
    pub capacity: usize,
    pub build_turns: u32,
}

#[derive(Debug, Clone, Default)]
pub struct Catalogue {
    specs: Vec<UnitSpec>,
}

impl Catalogue {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Warrior, settler, trireme and galley.
    pub fn standard() -> Self {
        let mut c = Self::empty();
        c.add("warrior", &[UnitTrait::Military, UnitTrait::Land], Domain::Land, 10, 1, 0, 2);
        c.add("settler", &[UnitTrait::Settler, UnitTrait::Land], Domain::Land, 25, 1, 0, 3);
        c.add(
            "trireme",
            &[UnitTrait::Naval, UnitTrait::Transport],
            Domain::Water,
            20,
            2,
            1,
            2,
        );
        c.add(
            "galley",
            &[UnitTrait::Naval, UnitTrait::Transport],
            Domain::Water,
            30,
            3,
            2,
            3,
        );
        c
    }

    #[allow(clippy::too_many_arguments)]
    pub fn add(
        &mut self,
        name: &str,
        traits: &[UnitTrait],
        domain: Domain,
        production_cost: u32,
        moves: u32,
        capacity: usize,
        build_turns: u32,
    ) -> UnitDefId {
        let id = UnitDefId(self.specs.len() as u32 + 1);
        self.specs.push(UnitSpec {
            def: UnitDef {
                id,
                name: name.to_string(),
                traits: traits.to_vec(),
                domain,
                production_cost,
            },
            moves,
            capacity,
            build_turns: build_turns.max(1),
        });
        id
    }

    pub fn get(&self, id: UnitDefId) -> Option<&UnitSpec> {
        self.specs.iter().find(|s| s.def.id == id)
    }

    pub fn by_name(&self, name: &str) -> Option<&UnitSpec> {
        self.specs.iter().find(|s| s.def.name == name)
    }

    pub fn defs(&self) -> Vec<UnitDef> {
        self.specs.iter().map(|s| s.def.clone()).collect()
    }
}
