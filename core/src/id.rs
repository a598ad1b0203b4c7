//! Identity types for compiled Delta entities.
//!
//! Ids are dense indices into the arena that issued them:
//! - Unique within their arena
//! - Stable once assigned
//! - Never derived from object identity

use std::fmt;

/// Index of a node in a merged working-memory tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WmNodeId(pub u32);

impl WmNodeId {
    /// Create a new WmNodeId from a raw value.
    pub fn new(id: u32) -> Self {
        Self(id)
    }

    pub fn index(&self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for WmNodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "wm{}", self.0)
    }
}

/// Index of a Prim in the container's flat Prim sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PrimId(pub u32);

impl PrimId {
    pub fn new(id: u32) -> Self {
        Self(id)
    }

    pub fn index(&self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for PrimId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "p{}", self.0)
    }
}
