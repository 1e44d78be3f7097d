//! Simulation entities and the registry that pairs visual nodes with bodies.

use std::fmt;

/// Stable index of an entity in the [`Registry`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(pub(crate) usize);

impl EntityId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "entity#{}", self.0)
    }
}

/// Handle to a body owned by the physics backend.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct BodyHandle(pub usize);

/// Handle to a node owned by the scene graph.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct VisualHandle(pub usize);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Table,
    Die,
}

impl EntityKind {
    pub fn name(&self) -> &'static str {
        match self {
            EntityKind::Table => "table",
            EntityKind::Die => "d6",
        }
    }
}

/// A visual node and its rigid body, created and kept together.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SimEntity {
    pub visual: VisualHandle,
    pub body: BodyHandle,
    pub kind: EntityKind,
}

/// Entities in creation order. There is no removal path; ids stay valid for
/// the lifetime of the registry.
#[derive(Debug, Default, Clone)]
pub struct Registry {
    entities: Vec<SimEntity>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Only `SimulationContext::spawn` registers entities, right after it has
    /// created both handles.
    pub(crate) fn insert(&mut self, entity: SimEntity) -> EntityId {
        self.entities.push(entity);
        EntityId(self.entities.len() - 1)
    }

    pub fn get(&self, id: EntityId) -> Option<&SimEntity> {
        self.entities.get(id.0)
    }

    pub fn kind(&self, id: EntityId) -> Option<EntityKind> {
        self.get(id).map(|e| e.kind)
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (EntityId, &SimEntity)> {
        self.entities
            .iter()
            .enumerate()
            .map(|(i, e)| (EntityId(i), e))
    }

    pub fn dice(&self) -> impl Iterator<Item = (EntityId, &SimEntity)> {
        self.iter().filter(|(_, e)| e.kind == EntityKind::Die)
    }

    pub fn find_by_visual(&self, visual: VisualHandle) -> Option<EntityId> {
        self.iter()
            .find(|(_, e)| e.visual == visual)
            .map(|(id, _)| id)
    }
}
