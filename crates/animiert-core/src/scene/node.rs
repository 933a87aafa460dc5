//! Scene nodes.

use kurbo::{Affine, Rect};
use serde::Serialize;
use uuid::Uuid;

use super::graphics::Graphics;
use super::text::TextNode;

/// Unique identifier for scene nodes.
pub type NodeId = Uuid;

/// Position and rotation of a node relative to its parent.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Transform {
    pub x: f64,
    pub y: f64,
    /// Rotation in degrees, clockwise in screen space.
    pub rotation: f64,
}

impl Transform {
    pub fn at(x: f64, y: f64) -> Self {
        Self { x, y, rotation: 0.0 }
    }

    pub fn to_affine(&self) -> Affine {
        Affine::translate((self.x, self.y)) * Affine::rotate(self.rotation.to_radians())
    }
}

/// What a node draws.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum NodeKind {
    /// Groups children, draws nothing itself.
    Container,
    Shape(Graphics),
    Text(TextNode),
}

impl NodeKind {
    pub fn name(&self) -> &'static str {
        match self {
            NodeKind::Container => "container",
            NodeKind::Shape(_) => "shape",
            NodeKind::Text(_) => "text",
        }
    }
}

/// A node in the stage's display tree.
#[derive(Debug, Clone, Serialize)]
pub struct Node {
    pub id: NodeId,
    pub kind: NodeKind,
    pub transform: Transform,
    pub visible: bool,
    /// Clip rectangle in the parent's coordinate space.
    pub mask: Option<Rect>,
    pub children: Vec<NodeId>,
    #[serde(skip)]
    pub(crate) parent: Option<NodeId>,
}

impl Node {
    pub(crate) fn new(kind: NodeKind) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            transform: Transform::default(),
            visible: true,
            mask: None,
            children: Vec::new(),
            parent: None,
        }
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn graphics(&self) -> Option<&Graphics> {
        match &self.kind {
            NodeKind::Shape(g) => Some(g),
            _ => None,
        }
    }

    pub fn text(&self) -> Option<&TextNode> {
        match &self.kind {
            NodeKind::Text(t) => Some(t),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Point;

    #[test]
    fn test_transform_translates_then_rotates() {
        let t = Transform {
            x: 10.0,
            y: 20.0,
            rotation: 90.0,
        };
        let p = t.to_affine() * Point::new(5.0, 0.0);
        assert!((p.x - 10.0).abs() < 1e-9);
        assert!((p.y - 25.0).abs() < 1e-9);
    }

    #[test]
    fn test_node_kind_accessors() {
        let node = Node::new(NodeKind::Shape(Graphics::new()));
        assert!(node.graphics().is_some());
        assert!(node.text().is_none());
        assert_eq!(node.kind.name(), "shape");
    }
}
