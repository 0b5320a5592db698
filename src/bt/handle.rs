use std::fmt;
use uuid::Uuid;

/// Non-owning reference to a node held by a [`TreeArena`](super::arena::TreeArena).
///
/// The handle is stamped with the id of the arena that created it, so the
/// arena can refuse handles of other arenas instead of indexing a wrong node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeHandle {
    arena: Uuid,
    index: usize,
}

impl NodeHandle {
    pub(crate) fn new(arena: Uuid, index: usize) -> Self {
        Self { arena, index }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub(crate) fn arena(&self) -> Uuid {
        self.arena
    }
}

impl fmt::Display for NodeHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.index)
    }
}
