use serde::{Deserialize, Serialize};

use crate::world::terrain::Passability;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OccupantKind {
    Door,
    Building,
    Rubble,
    Item,
    Plant,
}

/// An object standing in a cell: a structure, a plant, debris, an item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OccupantDescriptor {
    pub name: String,
    pub kind: OccupantKind,
    #[serde(default)]
    pub passability: Passability,
    #[serde(default)]
    pub path_cost: u32,
    /// Marks debris-like objects that should not be charged twice in a row.
    #[serde(default)]
    pub ignore_repeat: bool,
}

impl OccupantDescriptor {
    pub fn new(name: &str, kind: OccupantKind, path_cost: u32) -> Self {
        Self {
            name: name.to_string(),
            kind,
            passability: Passability::Passable,
            path_cost,
            ignore_repeat: false,
        }
    }

    pub fn impassable(name: &str, kind: OccupantKind) -> Self {
        Self {
            passability: Passability::Impassable,
            ..Self::new(name, kind, 0)
        }
    }

    pub fn with_ignore_repeat(mut self) -> Self {
        self.ignore_repeat = true;
        self
    }

    pub fn is_door(&self) -> bool {
        self.kind == OccupantKind::Door
    }

    /// Fixed structures: doors and buildings.
    pub fn is_edifice(&self) -> bool {
        matches!(self.kind, OccupantKind::Door | OccupantKind::Building)
    }
}

pub fn occupant_catalog() -> Vec<OccupantDescriptor> {
    vec![
        OccupantDescriptor::new("door", OccupantKind::Door, 0),
        OccupantDescriptor::impassable("wall", OccupantKind::Building),
        OccupantDescriptor::new("table", OccupantKind::Building, 30),
        OccupantDescriptor::new("rock_chunk", OccupantKind::Rubble, 42).with_ignore_repeat(),
        OccupantDescriptor::new("rubble", OccupantKind::Rubble, 30).with_ignore_repeat(),
        OccupantDescriptor::new("slag", OccupantKind::Rubble, 20).with_ignore_repeat(),
        OccupantDescriptor::new("tree", OccupantKind::Plant, 10),
        OccupantDescriptor::new("bush", OccupantKind::Plant, 6),
        OccupantDescriptor::new("crate", OccupantKind::Item, 14),
    ]
}

pub fn builtin_occupant(name: &str) -> Option<OccupantDescriptor> {
    occupant_catalog().into_iter().find(|o| o.name == name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn doors_and_buildings_are_edifices() {
        assert!(builtin_occupant("door").unwrap().is_edifice());
        assert!(builtin_occupant("wall").unwrap().is_edifice());
        assert!(!builtin_occupant("tree").unwrap().is_edifice());
        assert!(!builtin_occupant("rubble").unwrap().is_edifice());
    }

    #[test]
    fn only_door_is_door() {
        let doors: Vec<_> = occupant_catalog()
            .into_iter()
            .filter(|o| o.is_door())
            .collect();
        assert_eq!(doors.len(), 1);
        assert_eq!(doors[0].name, "door");
    }

    #[test]
    fn serde_defaults_for_plain_occupant() {
        let toml = r#"
            name = "crate"
            kind = "Item"
        "#;
        let o: OccupantDescriptor = toml::from_str(toml).unwrap();
        assert_eq!(o.path_cost, 0);
        assert!(!o.ignore_repeat);
        assert_eq!(o.passability, Passability::Passable);
    }
}
