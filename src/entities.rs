use indexmap::{IndexMap, IndexSet};

use super::inputs::*;

#[derive(Clone,Debug)]
pub struct Entity {
    pub id: EntityId,
    pub kind: EntityKind,
    pub dead: bool,
    pub previous_position: Position,
    pub position: Position,
    pub carried: Item,
    /// Only filled in for our own robots
    pub commands: Vec<Action>,
}
impl Entity {
    fn sighted(observation: &EntityObservation) -> Self {
        Self {
            id: observation.id,
            kind: observation.kind,
            dead: observation.is_dead(),
            previous_position: observation.position,
            position: observation.position,
            carried: observation.item,
            commands: Vec::new(),
        }
    }

    pub fn last_command(&self) -> Option<&Action> {
        self.commands.last()
    }

    pub fn is_idle(&self) -> bool {
        !self.dead && self.position == self.previous_position
    }
}

/// Every entity seen so far this match, in ascending id order.
/// Entities are never removed, so the command history of a destroyed robot survives.
#[derive(Default)]
pub struct Entities {
    entities: IndexMap<EntityId, Entity>,
    suspects: IndexSet<EntityId>,
}
impl Entities {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the ids of our robots which were alive last turn but are dead now.
    pub fn apply_observation(&mut self, observed: &[EntityObservation]) -> Vec<EntityId> {
        let mut casualties = Vec::new();
        let mut num_sighted = 0;
        for observation in observed.iter() {
            if let Some(entity) = self.entities.get_mut(&observation.id) {
                let was_dead = entity.dead;
                entity.kind = observation.kind;
                entity.dead = observation.is_dead();
                entity.previous_position = entity.position;
                if !entity.dead {
                    entity.position = observation.position;
                }
                entity.carried = observation.item;

                if entity.kind == EntityKind::MyRobot && entity.dead && !was_dead {
                    casualties.push(entity.id);
                }
            } else {
                self.entities.insert(observation.id, Entity::sighted(observation));
                num_sighted += 1;
            }
        }

        if num_sighted > 0 {
            self.entities.sort_keys();
        }

        casualties
    }

    /// Enemy robots that pause at their home column are probably collecting a trap,
    /// and the next place they pause away from home is probably where they bury it.
    /// Returns those burial positions.
    pub fn update_suspects(&mut self) -> Vec<Position> {
        let mut placements = Vec::new();
        for entity in self.entities.values() {
            if entity.kind != EntityKind::EnemyRobot || !entity.is_idle() { continue }

            if entity.position.is_home() {
                if self.suspects.insert(entity.id) {
                    tracing::debug!(enemy = entity.id, "suspect paused at home");
                }
            } else if self.suspects.shift_remove(&entity.id) {
                tracing::debug!(enemy = entity.id, at = %entity.position, "suspect paused in the field");
                placements.push(entity.position);
            }
        }
        placements
    }

    pub fn record_command(&mut self, id: EntityId, action: Action) {
        if let Some(entity) = self.entities.get_mut(&id) {
            entity.commands.push(action);
        }
    }

    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.entities.get(&id)
    }

    pub fn iter(&self) -> impl Iterator<Item=&Entity> {
        self.entities.values()
    }

    pub fn of_kind(&self, kind: EntityKind) -> impl Iterator<Item=&Entity> {
        self.entities.values().filter(move |entity| entity.kind == kind)
    }

    pub fn my_robots(&self) -> impl Iterator<Item=&Entity> {
        self.of_kind(EntityKind::MyRobot)
    }

    pub fn is_suspect(&self, id: EntityId) -> bool {
        self.suspects.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}
