//! Level Geometry
//!
//! Block records consumed by physics. The block list is owned by the level
//! and read-only to the simulation for the whole run.

use serde::{Serialize, Deserialize};

use crate::core::constants::{SPAWN_X, SPAWN_Y};
use crate::core::rect::Rect;

// =============================================================================
// BLOCKS
// =============================================================================

/// What a block does when the actor meets it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockKind {
    /// Positional collision.
    #[default]
    Solid,
    /// Goal trigger: touching it completes the level.
    End,
    /// Hazard trigger: touching it kills the actor.
    Kill,
}

impl BlockKind {
    /// Whether this kind takes part in positional collision.
    #[inline]
    pub fn is_solid(self) -> bool {
        self == BlockKind::Solid
    }

    /// Whether this kind is detected by swept overlap only.
    #[inline]
    pub fn is_trigger(self) -> bool {
        !self.is_solid()
    }
}

/// Axis-aligned block placed by the level editor.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(from = "BlockRecord", into = "BlockRecord")]
pub struct Block {
    /// Block rectangle.
    pub rect: Rect,
    /// Block behaviour.
    pub kind: BlockKind,
}

impl Block {
    /// Create a block.
    pub const fn new(x: f64, y: f64, width: f64, height: f64, kind: BlockKind) -> Self {
        Self {
            rect: Rect::new(x, y, width, height),
            kind,
        }
    }

    /// Create a solid block.
    pub const fn solid(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self::new(x, y, width, height, BlockKind::Solid)
    }

    /// Create a goal block.
    pub const fn end(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self::new(x, y, width, height, BlockKind::End)
    }

    /// Create a hazard block.
    pub const fn kill(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self::new(x, y, width, height, BlockKind::Kill)
    }

    /// Whether the block can collide at all (finite, positive size).
    #[inline]
    pub fn is_well_formed(&self) -> bool {
        self.rect.is_well_formed()
    }
}

/// Editor wire form of a block.
///
/// Accepts both `"type": "end"` and the older `"end": true` / `"kill": true`
/// flags. A missing or unrecognised type is a solid block.
#[derive(Clone, Debug, Serialize, Deserialize)]
struct BlockRecord {
    x: f64,
    y: f64,
    width: f64,
    height: f64,
    #[serde(rename = "type", default)]
    kind: Option<String>,
    #[serde(default)]
    end: bool,
    #[serde(default)]
    kill: bool,
}

impl From<BlockRecord> for Block {
    fn from(record: BlockRecord) -> Self {
        let kind = match record.kind.as_deref() {
            Some("end") => BlockKind::End,
            Some("kill") => BlockKind::Kill,
            _ if record.end => BlockKind::End,
            _ if record.kill => BlockKind::Kill,
            _ => BlockKind::Solid,
        };
        Block::new(record.x, record.y, record.width, record.height, kind)
    }
}

impl From<Block> for BlockRecord {
    fn from(block: Block) -> Self {
        let kind = match block.kind {
            BlockKind::Solid => "solid",
            BlockKind::End => "end",
            BlockKind::Kill => "kill",
        };
        BlockRecord {
            x: block.rect.x,
            y: block.rect.y,
            width: block.rect.width,
            height: block.rect.height,
            kind: Some(kind.to_string()),
            end: false,
            kill: false,
        }
    }
}

// =============================================================================
// LEVEL
// =============================================================================

/// Actor spawn position.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Spawn {
    /// Left edge of the actor.
    pub x: f64,
    /// Top edge of the actor.
    pub y: f64,
}

impl Default for Spawn {
    fn default() -> Self {
        Self { x: SPAWN_X, y: SPAWN_Y }
    }
}

/// A playable level: a name and its block list.
///
/// Editor-only data (text labels, categories) is ignored when parsing.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Level {
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Block list, in editor placement order.
    #[serde(default)]
    pub blocks: Vec<Block>,
    /// Spawn override. `None` uses the canonical spawn.
    #[serde(default)]
    pub spawn: Option<Spawn>,
}

impl Level {
    /// Create a level from a block list with the canonical spawn.
    pub fn new(name: impl Into<String>, blocks: Vec<Block>) -> Self {
        Self {
            name: name.into(),
            blocks,
            spawn: None,
        }
    }

    /// Where a fresh actor starts.
    pub fn spawn_point(&self) -> Spawn {
        self.spawn.unwrap_or_default()
    }

    /// Number of blocks that will be ignored by collision.
    pub fn malformed_block_count(&self) -> usize {
        self.blocks.iter().filter(|b| !b.is_well_formed()).count()
    }

    /// Parse a level from editor JSON.
    pub fn from_json(s: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(s)
    }

    /// Serialize to editor JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
