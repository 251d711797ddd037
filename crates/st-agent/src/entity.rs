//! Destroyable sub-entities owned by an agent: carriers and factories.
//!
//! # Handles
//!
//! Both live in [`EntityTable`]s backed by `slotmap::SlotMap`, so a
//! [`CarrierId`] / [`FactoryId`] carries a generation.  A command that was
//! sent while a factory existed and arrives after it was removed (and its slot
//! reused) resolves to `None` instead of silently hitting the new occupant.
//!
//! Mutating loops take a snapshot of keys first ([`EntityTable::keys`]) and
//! then look each one up, never removing while iterating.

use slotmap::{Key, SlotMap, new_key_type};
use st_core::{AgentId, ResourceType};

new_key_type! {
    /// Generation-checked handle to a [`Carrier`].
    pub struct CarrierId;
}

new_key_type! {
    /// Generation-checked handle to a [`Factory`].
    pub struct FactoryId;
}

/// A population-bearing vessel belonging to an agent.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Carrier {
    /// Number of inhabitants (continuous).
    pub population: f64,
    /// Salary paid per employee each tick, in fuel units.
    pub salary:     f64,
}

/// A production facility hosted on one of the agent's carriers.
///
/// `owner_id` may be a different agent ("foreign" factory); only the owner
/// may supply it.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Factory {
    pub owner_id:     AgentId,
    pub carrier_id:   CarrierId,
    pub output:       ResourceType,
    /// Fuel set aside for running the factory.
    pub fuel_reserve: f64,
}

/// A slot map with structural equality, so whole agent states can be compared.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct EntityTable<K: Key, V> {
    slots: SlotMap<K, V>,
}

impl<K: Key, V> EntityTable<K, V> {
    pub fn new() -> Self {
        Self { slots: SlotMap::with_key() }
    }

    pub fn insert(&mut self, value: V) -> K {
        self.slots.insert(value)
    }

    pub fn remove(&mut self, key: K) -> Option<V> {
        self.slots.remove(key)
    }

    #[inline]
    pub fn get(&self, key: K) -> Option<&V> {
        self.slots.get(key)
    }

    #[inline]
    pub fn get_mut(&mut self, key: K) -> Option<&mut V> {
        self.slots.get_mut(key)
    }

    #[inline]
    pub fn contains(&self, key: K) -> bool {
        self.slots.contains_key(key)
    }

    /// Snapshot of live keys, in slot order.
    pub fn keys(&self) -> Vec<K> {
        self.slots.keys().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (K, &V)> + '_ {
        self.slots.iter()
    }

    pub fn values(&self) -> impl Iterator<Item = &V> + '_ {
        self.slots.values()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

impl<K: Key, V> Default for EntityTable<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Key, V: PartialEq> PartialEq for EntityTable<K, V> {
    fn eq(&self, other: &Self) -> bool {
        self.slots.len() == other.slots.len()
            && self.slots.iter().zip(other.slots.iter()).all(|(a, b)| a == b)
    }
}

pub type Carriers = EntityTable<CarrierId, Carrier>;
pub type Factories = EntityTable<FactoryId, Factory>;
