//! Registry for state hooks addressed by name.
//!
//! Enter/exit hooks for [`crate::resources::gamestate::GameStates`] are
//! registered as one-shot systems at startup and looked up by the game state
//! observer when a transition is applied.

use bevy_ecs::prelude::*;
use bevy_ecs::system::SystemId;
use rustc_hash::FxHashMap;

use crate::components::persistent::Persistent;

/// Map of string names to system IDs.
#[derive(Resource, Default)]
pub struct SystemsStore {
    pub map: FxHashMap<String, SystemId>,
}

impl SystemsStore {
    /// Create an empty store.
    pub fn new() -> Self {
        SystemsStore {
            map: FxHashMap::default(),
        }
    }

    /// Insert a system ID under a human-readable name.
    pub fn insert(&mut self, name: impl Into<String>, id: SystemId) {
        self.map.insert(name.into(), id);
    }

    /// Register `system` with the world and store it under `name`.
    ///
    /// Registered systems live on entities; they are marked [`Persistent`]
    /// so scene switches do not despawn them.
    pub fn register<M>(
        &mut self,
        world: &mut World,
        name: impl Into<String>,
        system: impl IntoSystem<(), (), M> + 'static,
    ) -> SystemId {
        let id = world.register_system(system);
        world.entity_mut(id.entity()).insert(Persistent);
        self.insert(name, id);
        id
    }

    /// Retrieve a system ID by name, if present.
    pub fn get(&self, name: impl AsRef<str>) -> Option<&SystemId> {
        self.map.get(name.as_ref())
    }
}
