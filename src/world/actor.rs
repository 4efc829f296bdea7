use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::cost::lookup::ActorStats;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ActorId(pub u32);

impl std::fmt::Display for ActorId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "actor#{}", self.0)
    }
}

/// Stats that the movement cost evaluator reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StatId {
    IcePenaltyReduction,
    SnowPenaltyReduction,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StatOffset {
    pub stat: StatId,
    pub value: f32,
}

/// A worn item contributing stat offsets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Equipment {
    pub name: String,
    #[serde(default)]
    pub stat_offsets: Vec<StatOffset>,
}

impl Equipment {
    pub fn snowshoes() -> Self {
        Self {
            name: "snowshoes".to_string(),
            stat_offsets: vec![StatOffset {
                stat: StatId::SnowPenaltyReduction,
                value: 0.5,
            }],
        }
    }

    pub fn ice_cleats() -> Self {
        Self {
            name: "ice_cleats".to_string(),
            stat_offsets: vec![StatOffset {
                stat: StatId::IcePenaltyReduction,
                value: 0.5,
            }],
        }
    }

    pub fn offset_for(&self, stat: StatId) -> f32 {
        self.stat_offsets
            .iter()
            .filter(|o| o.stat == stat)
            .map(|o| o.value)
            .sum()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActorProfile {
    pub id: ActorId,
    pub name: String,
    #[serde(default)]
    pub ice_penalty_reduction: f32,
    #[serde(default)]
    pub snow_penalty_reduction: f32,
    #[serde(default = "default_ticks_per_move")]
    pub ticks_per_move: u32,
    #[serde(default)]
    pub equipment: Vec<Equipment>,
}

fn default_ticks_per_move() -> u32 {
    13
}

impl ActorProfile {
    pub fn new(id: u32, name: &str) -> Self {
        Self {
            id: ActorId(id),
            name: name.to_string(),
            ice_penalty_reduction: 0.0,
            snow_penalty_reduction: 0.0,
            ticks_per_move: default_ticks_per_move(),
            equipment: Vec::new(),
        }
    }

    pub fn wearing(mut self, item: Equipment) -> Self {
        self.equipment.push(item);
        self
    }

    pub fn base_stat(&self, stat: StatId) -> f32 {
        match stat {
            StatId::IcePenaltyReduction => self.ice_penalty_reduction,
            StatId::SnowPenaltyReduction => self.snow_penalty_reduction,
        }
    }

    /// Base value plus every equipped offset. Not clamped.
    pub fn stat(&self, stat: StatId) -> f32 {
        self.base_stat(stat)
            + self
                .equipment
                .iter()
                .map(|e| e.offset_for(stat))
                .sum::<f32>()
    }
}

/// Lookup table of actor profiles by id. Serialized as a plain list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<ActorProfile>", into = "Vec<ActorProfile>")]
pub struct ActorRoster {
    actors: HashMap<ActorId, ActorProfile>,
}

impl ActorRoster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_profiles(profiles: impl IntoIterator<Item = ActorProfile>) -> Self {
        let mut roster = Self::new();
        for p in profiles {
            roster.insert(p);
        }
        roster
    }

    pub fn insert(&mut self, profile: ActorProfile) {
        self.actors.insert(profile.id, profile);
    }

    pub fn get(&self, id: ActorId) -> Option<&ActorProfile> {
        self.actors.get(&id)
    }

    pub fn len(&self) -> usize {
        self.actors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actors.is_empty()
    }

    /// Profiles sorted by id.
    pub fn profiles(&self) -> Vec<&ActorProfile> {
        let mut all: Vec<_> = self.actors.values().collect();
        all.sort_by_key(|p| p.id);
        all
    }
}

impl From<Vec<ActorProfile>> for ActorRoster {
    fn from(profiles: Vec<ActorProfile>) -> Self {
        Self::from_profiles(profiles)
    }
}

impl From<ActorRoster> for Vec<ActorProfile> {
    fn from(roster: ActorRoster) -> Self {
        let mut profiles: Vec<_> = roster.actors.into_values().collect();
        profiles.sort_by_key(|p| p.id);
        profiles
    }
}

impl ActorStats for ActorRoster {
    /// Unknown actors have no modifiers.
    fn stat_value(&self, actor: ActorId, stat: StatId) -> f32 {
        self.actors.get(&actor).map_or(0.0, |p| p.stat(stat))
    }

    fn ticks_per_move(&self, actor: ActorId) -> u32 {
        self.actors
            .get(&actor)
            .map_or(default_ticks_per_move(), |p| p.ticks_per_move)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equipment_offsets_add_to_base() {
        let mut profile = ActorProfile::new(1, "Hild").wearing(Equipment::snowshoes());
        profile.snow_penalty_reduction = 0.1;
        let v = profile.stat(StatId::SnowPenaltyReduction);
        assert!((v - 0.6).abs() < 1e-6);
        assert_eq!(profile.stat(StatId::IcePenaltyReduction), 0.0);
    }

    #[test]
    fn stacked_equipment_is_not_clamped_here() {
        let profile = ActorProfile::new(1, "Hild")
            .wearing(Equipment::snowshoes())
            .wearing(Equipment::snowshoes())
            .wearing(Equipment::snowshoes());
        assert!(profile.stat(StatId::SnowPenaltyReduction) > 1.0);
    }

    #[test]
    fn roster_unknown_actor_has_zero_stats() {
        let roster = ActorRoster::new();
        assert_eq!(roster.stat_value(ActorId(9), StatId::IcePenaltyReduction), 0.0);
        assert_eq!(roster.ticks_per_move(ActorId(9)), 13);
    }

    #[test]
    fn roster_looks_up_by_id() {
        let roster = ActorRoster::from_profiles([
            ActorProfile::new(1, "Hild").wearing(Equipment::ice_cleats()),
            ActorProfile::new(2, "Oswin"),
        ]);
        assert_eq!(roster.len(), 2);
        assert_eq!(roster.stat_value(ActorId(1), StatId::IcePenaltyReduction), 0.5);
        assert_eq!(roster.stat_value(ActorId(2), StatId::IcePenaltyReduction), 0.0);
        let ids: Vec<_> = roster.profiles().iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![ActorId(1), ActorId(2)]);
    }

    #[test]
    fn profile_defaults_from_toml() {
        let toml = r#"
            id = 3
            name = "Wulf"

            [[equipment]]
            name = "snowshoes"
            stat_offsets = [{ stat = "SnowPenaltyReduction", value = 0.5 }]
        "#;
        let p: ActorProfile = toml::from_str(toml).unwrap();
        assert_eq!(p.id, ActorId(3));
        assert_eq!(p.ticks_per_move, 13);
        assert_eq!(p.stat(StatId::SnowPenaltyReduction), 0.5);
    }
}
