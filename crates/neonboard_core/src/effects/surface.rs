//! Rendering-backend seam for the effect engines.
//!
//! # Responsibility
//! - Define the minimal operations engines need from a rendering surface.
//! - Provide in-memory surfaces for headless hosts and tests.
//!
//! # Invariants
//! - Engines only touch visuals through these traits.
//! - `MemorySurface` never reports a destroyed node as live.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Surface-assigned handle for one particle visual.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct NodeId(pub u64);

/// Look of one particle, fixed at creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParticleVisual {
    /// Diameter in surface units.
    pub size: f64,
    pub color: String,
    pub opacity: f64,
    /// Box-shadow spread, twice the size.
    pub glow_radius: f64,
}

/// 2D transform applied to a text element.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub x: f64,
    pub y: f64,
    /// Degrees.
    pub skew_x: f64,
    /// Degrees.
    pub skew_y: f64,
    pub scale: f64,
}

impl Transform {
    pub const IDENTITY: Self = Self {
        x: 0.0,
        y: 0.0,
        skew_x: 0.0,
        skew_y: 0.0,
        scale: 1.0,
    };

    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Layered text-shadow glow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GlowStyle {
    pub color: String,
    /// Blur radius per shadow layer, innermost first.
    pub radii: [f64; 4],
}

/// Surface hosting absolutely positioned particles.
pub trait ParticleSurface {
    fn bounds(&self) -> Size;
    fn create_particle(&mut self, visual: &ParticleVisual, at: Point) -> NodeId;
    /// `at` is the particle's top-left corner.
    fn move_particle(&mut self, node: NodeId, at: Point);
    fn destroy_particle(&mut self, node: NodeId);
}

/// Surface hosting one text element.
pub trait TextSurface {
    fn set_text(&mut self, text: &str);
    fn set_transform(&mut self, transform: Transform);
    fn set_glow(&mut self, glow: &GlowStyle);
}

/// One live particle node on a `MemorySurface`.
#[derive(Debug, Clone, PartialEq)]
pub struct MemoryNode {
    pub visual: ParticleVisual,
    pub position: Point,
}

/// Headless particle surface that records every call.
#[derive(Debug, Clone, Default)]
pub struct MemorySurface {
    bounds: Size,
    next_id: u64,
    nodes: BTreeMap<NodeId, MemoryNode>,
    pub created: u64,
    pub moved: u64,
    pub destroyed: u64,
}

impl MemorySurface {
    pub fn new(bounds: Size) -> Self {
        Self {
            bounds,
            ..Self::default()
        }
    }

    pub fn live_nodes(&self) -> usize {
        self.nodes.len()
    }

    pub fn node(&self, node: NodeId) -> Option<&MemoryNode> {
        self.nodes.get(&node)
    }

    pub fn nodes(&self) -> impl Iterator<Item = (&NodeId, &MemoryNode)> {
        self.nodes.iter()
    }

    /// Total calls of any kind, used to assert idle engines stay silent.
    pub fn call_count(&self) -> u64 {
        self.created + self.moved + self.destroyed
    }
}

impl ParticleSurface for MemorySurface {
    fn bounds(&self) -> Size {
        self.bounds
    }

    fn create_particle(&mut self, visual: &ParticleVisual, at: Point) -> NodeId {
        let id = NodeId(self.next_id);
        self.next_id += 1;
        self.created += 1;
        self.nodes.insert(
            id,
            MemoryNode {
                visual: visual.clone(),
                position: at,
            },
        );
        id
    }

    fn move_particle(&mut self, node: NodeId, at: Point) {
        self.moved += 1;
        if let Some(entry) = self.nodes.get_mut(&node) {
            entry.position = at;
        }
    }

    fn destroy_particle(&mut self, node: NodeId) {
        self.destroyed += 1;
        self.nodes.remove(&node);
    }
}

/// Headless text surface holding the last applied state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemoryTextSurface {
    pub text: String,
    pub transform: Transform,
    pub glow: Option<GlowStyle>,
    pub text_writes: u64,
}

impl MemoryTextSurface {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TextSurface for MemoryTextSurface {
    fn set_text(&mut self, text: &str) {
        self.text_writes += 1;
        self.text.clear();
        self.text.push_str(text);
    }

    fn set_transform(&mut self, transform: Transform) {
        self.transform = transform;
    }

    fn set_glow(&mut self, glow: &GlowStyle) {
        self.glow = Some(glow.clone());
    }
}
