//! Hover and selection state plus the two outline highlight passes.

use bevy::color::Color;

use super::entity::EntityId;

/// The entity under the pointer, if it is not the table.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct HoverState {
    pub hovered: Option<EntityId>,
}

impl HoverState {
    pub fn is_hovering(&self) -> bool {
        self.hovered.is_some()
    }
}

/// Selected dice in the order they were clicked.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SelectionSet {
    members: Vec<EntityId>,
}

impl SelectionSet {
    /// Returns `false` when `id` was already selected.
    pub fn insert(&mut self, id: EntityId) -> bool {
        if self.members.contains(&id) {
            return false;
        }
        self.members.push(id);
        true
    }

    pub fn clear(&mut self) {
        self.members.clear();
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.members.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.members.iter().copied()
    }

    pub fn as_slice(&self) -> &[EntityId] {
        &self.members
    }
}

/// One outline pass: when enabled, every listed entity is drawn with an
/// outline of `color`.
#[derive(Debug, Clone, PartialEq)]
pub struct HighlightPass {
    pub enabled: bool,
    pub objects: Vec<EntityId>,
    pub color: Color,
}

impl HighlightPass {
    pub fn new(color: Color) -> Self {
        Self {
            enabled: false,
            objects: Vec::new(),
            color,
        }
    }

    /// Entities to outline this frame.
    pub fn visible_objects(&self) -> &[EntityId] {
        if self.enabled {
            &self.objects
        } else {
            &[]
        }
    }
}

/// The hover and selected passes are configured and toggled independently.
#[derive(Debug, Clone, PartialEq)]
pub struct Highlights {
    pub hover: HighlightPass,
    pub selected: HighlightPass,
}

impl Highlights {
    pub fn new(hover_color: Color, selected_color: Color) -> Self {
        Self {
            hover: HighlightPass::new(hover_color),
            selected: HighlightPass::new(selected_color),
        }
    }
}
