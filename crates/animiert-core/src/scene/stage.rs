//! The stage: owner of every scene node and root of the display tree.

use kurbo::{Affine, Point, Rect, Size};
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;

use super::graphics::Graphics;
use super::node::{Node, NodeId, NodeKind, Transform};
use super::text::{ApproxMeasurer, Font, TextMeasurer, TextNode};
use crate::config::Theme;
use crate::error::{WidgetError, WidgetResult};

/// Slack (in pixels) granted to pointer hit tests.
pub const HIT_TOLERANCE: f64 = 1.0;

/// Retained display tree shared by all widgets.
///
/// Nodes live in an arena keyed by [`NodeId`]; the tree structure is kept in
/// each node's `children` list and the stage's root list (back to front).
pub struct Stage {
    nodes: HashMap<NodeId, Node>,
    roots: Vec<NodeId>,
    size: Size,
    theme: Theme,
    measurer: Box<dyn TextMeasurer>,
    dirty: bool,
    revision: u64,
}

impl fmt::Debug for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Stage")
            .field("nodes", &self.nodes.len())
            .field("roots", &self.roots)
            .field("size", &self.size)
            .field("revision", &self.revision)
            .finish()
    }
}

impl Default for Stage {
    fn default() -> Self {
        Self::new(800.0, 600.0)
    }
}

impl Stage {
    /// Create an empty stage with the default theme and approximate text measurement.
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            nodes: HashMap::new(),
            roots: Vec::new(),
            size: Size::new(width, height),
            theme: Theme::default(),
            measurer: Box::new(ApproxMeasurer),
            dirty: false,
            revision: 0,
        }
    }

    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    pub fn with_measurer(mut self, measurer: impl TextMeasurer + 'static) -> Self {
        self.measurer = Box::new(measurer);
        self
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn set_size(&mut self, width: f64, height: f64) {
        self.size = Size::new(width, height);
        self.dirty = true;
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    /// Measure text with the stage's measurer.
    pub fn measure_text(&self, text: &str, font: &Font) -> Size {
        self.measurer.measure(text, font)
    }

    // --- Node creation ---------------------------------------------------

    fn insert(&mut self, kind: NodeKind) -> NodeId {
        let node = Node::new(kind);
        let id = node.id;
        self.nodes.insert(id, node);
        id
    }

    /// Create a detached container node.
    pub fn create_container(&mut self) -> NodeId {
        self.insert(NodeKind::Container)
    }

    /// Create a detached, empty shape node.
    pub fn create_shape(&mut self) -> NodeId {
        self.insert(NodeKind::Shape(Graphics::new()))
    }

    /// Create a detached text node.
    pub fn create_text(&mut self, text: TextNode) -> NodeId {
        self.insert(NodeKind::Text(text))
    }

    // --- Tree structure --------------------------------------------------

    fn detach(&mut self, id: NodeId) {
        let parent = self.nodes.get(&id).and_then(|n| n.parent);
        match parent {
            Some(parent) => {
                if let Some(p) = self.nodes.get_mut(&parent) {
                    p.children.retain(|&c| c != id);
                }
            }
            None => self.roots.retain(|&r| r != id),
        }
        if let Some(node) = self.nodes.get_mut(&id) {
            node.parent = None;
        }
    }

    /// Attach a node on top of the stage root list.
    pub fn add_root(&mut self, id: NodeId) -> WidgetResult<()> {
        self.require(id)?;
        self.detach(id);
        self.roots.push(id);
        self.dirty = true;
        Ok(())
    }

    /// Append `child` to `parent`'s children (drawn on top).
    pub fn add_child(&mut self, parent: NodeId, child: NodeId) -> WidgetResult<()> {
        let len = self.require(parent)?.children.len();
        self.add_child_at(parent, child, len)
    }

    /// Insert `child` into `parent`'s children at `index` (clamped).
    pub fn add_child_at(&mut self, parent: NodeId, child: NodeId, index: usize) -> WidgetResult<()> {
        self.require(parent)?;
        self.require(child)?;
        if parent == child || self.is_ancestor(child, parent) {
            return Err(WidgetError::Cycle(child));
        }
        self.detach(child);
        if let Some(p) = self.nodes.get_mut(&parent) {
            let index = index.min(p.children.len());
            p.children.insert(index, child);
        }
        if let Some(c) = self.nodes.get_mut(&child) {
            c.parent = Some(parent);
        }
        self.dirty = true;
        Ok(())
    }

    /// Detach `child` from `parent` without destroying it.
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) -> WidgetResult<()> {
        if self.require(child)?.parent == Some(parent) {
            self.detach(child);
            self.dirty = true;
        }
        Ok(())
    }

    /// Destroy every child subtree of `parent`.
    pub fn remove_all_children(&mut self, parent: NodeId) -> WidgetResult<()> {
        let children = std::mem::take(&mut self.require_mut(parent)?.children);
        for child in children {
            if let Some(c) = self.nodes.get_mut(&child) {
                c.parent = None;
            }
            self.destroy(child);
        }
        self.dirty = true;
        Ok(())
    }

    /// Remove a node and its whole subtree from the stage.
    pub fn destroy(&mut self, id: NodeId) {
        if !self.nodes.contains_key(&id) {
            return;
        }
        self.detach(id);
        let mut stack = vec![id];
        while let Some(next) = stack.pop() {
            if let Some(node) = self.nodes.remove(&next) {
                stack.extend(node.children);
            }
        }
        self.dirty = true;
    }

    /// Whether `ancestor` is `node` or one of its ancestors.
    pub fn is_ancestor(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.nodes.get(&id).and_then(|n| n.parent);
        }
        false
    }

    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    // --- Node access -----------------------------------------------------

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(&id)
    }

    /// Mutable access; marks the stage dirty.
    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.dirty = true;
        self.nodes.get_mut(&id)
    }

    fn require(&self, id: NodeId) -> WidgetResult<&Node> {
        self.nodes.get(&id).ok_or(WidgetError::MissingNode(id))
    }

    fn require_mut(&mut self, id: NodeId) -> WidgetResult<&mut Node> {
        self.dirty = true;
        self.nodes.get_mut(&id).ok_or(WidgetError::MissingNode(id))
    }

    pub fn graphics(&self, id: NodeId) -> WidgetResult<&Graphics> {
        match &self.require(id)?.kind {
            NodeKind::Shape(g) => Ok(g),
            _ => Err(WidgetError::WrongNodeKind(id, "shape")),
        }
    }

    pub fn graphics_mut(&mut self, id: NodeId) -> WidgetResult<&mut Graphics> {
        match &mut self.require_mut(id)?.kind {
            NodeKind::Shape(g) => Ok(g),
            _ => Err(WidgetError::WrongNodeKind(id, "shape")),
        }
    }

    pub fn text(&self, id: NodeId) -> WidgetResult<&TextNode> {
        match &self.require(id)?.kind {
            NodeKind::Text(t) => Ok(t),
            _ => Err(WidgetError::WrongNodeKind(id, "text")),
        }
    }

    pub fn text_mut(&mut self, id: NodeId) -> WidgetResult<&mut TextNode> {
        match &mut self.require_mut(id)?.kind {
            NodeKind::Text(t) => Ok(t),
            _ => Err(WidgetError::WrongNodeKind(id, "text")),
        }
    }

    /// Measured size of a text node's content.
    pub fn measure_node(&self, id: NodeId) -> WidgetResult<Size> {
        let text = self.text(id)?;
        Ok(self.measurer.measure(&text.content, &text.font))
    }

    pub fn set_position(&mut self, id: NodeId, x: f64, y: f64) -> WidgetResult<()> {
        let node = self.require_mut(id)?;
        node.transform.x = x;
        node.transform.y = y;
        Ok(())
    }

    pub fn set_rotation(&mut self, id: NodeId, degrees: f64) -> WidgetResult<()> {
        self.require_mut(id)?.transform.rotation = degrees;
        Ok(())
    }

    pub fn set_transform(&mut self, id: NodeId, transform: Transform) -> WidgetResult<()> {
        self.require_mut(id)?.transform = transform;
        Ok(())
    }

    pub fn set_visible(&mut self, id: NodeId, visible: bool) -> WidgetResult<()> {
        self.require_mut(id)?.visible = visible;
        Ok(())
    }

    pub fn set_mask(&mut self, id: NodeId, mask: Option<Rect>) -> WidgetResult<()> {
        self.require_mut(id)?.mask = mask;
        Ok(())
    }

    // --- Geometry --------------------------------------------------------

    /// Transform from the node's local space to stage space.
    pub fn world_transform(&self, id: NodeId) -> Affine {
        let mut affine = Affine::IDENTITY;
        let mut current = self.nodes.get(&id);
        while let Some(node) = current {
            affine = node.transform.to_affine() * affine;
            current = node.parent.and_then(|p| self.nodes.get(&p));
        }
        affine
    }

    /// Convert a stage-space point into the node's local space.
    pub fn global_to_local(&self, id: NodeId, point: Point) -> Point {
        self.world_transform(id).inverse() * point
    }

    /// Convert a node-local point into stage space.
    pub fn local_to_global(&self, id: NodeId, point: Point) -> Point {
        self.world_transform(id) * point
    }

    /// Bounds of the node's content in its own space.
    pub fn local_bounds(&self, id: NodeId) -> Option<Rect> {
        let node = self.nodes.get(&id)?;
        let own = match &node.kind {
            NodeKind::Container => None,
            NodeKind::Shape(g) => g.bounds(),
            NodeKind::Text(t) => Some(t.local_box(self.measurer.measure(&t.content, &t.font))),
        };
        node.children
            .iter()
            .filter_map(|&child| {
                let c = self.nodes.get(&child)?;
                if !c.visible {
                    return None;
                }
                let rect = self.local_bounds(child)?;
                Some(c.transform.to_affine().transform_rect_bbox(rect))
            })
            .chain(own)
            .reduce(|a, b| a.union(b))
    }

    /// Bounds of the node in stage space.
    pub fn world_bounds(&self, id: NodeId) -> Option<Rect> {
        let rect = self.local_bounds(id)?;
        Some(self.world_transform(id).transform_rect_bbox(rect))
    }

    /// Topmost visible node under a stage-space point.
    pub fn hit_test(&self, point: Point) -> Option<NodeId> {
        self.roots
            .iter()
            .rev()
            .find_map(|&root| self.hit_node(root, point))
    }

    fn hit_node(&self, id: NodeId, parent_point: Point) -> Option<NodeId> {
        let node = self.nodes.get(&id)?;
        if !node.visible {
            return None;
        }
        if let Some(mask) = node.mask {
            if !mask.contains(parent_point) {
                return None;
            }
        }
        let local = node.transform.to_affine().inverse() * parent_point;
        if let Some(hit) = node.children.iter().rev().find_map(|&c| self.hit_node(c, local)) {
            return Some(hit);
        }
        let hit = match &node.kind {
            NodeKind::Container => false,
            NodeKind::Shape(g) => g.hit_test(local, HIT_TOLERANCE),
            NodeKind::Text(t) => t
                .local_box(self.measurer.measure(&t.content, &t.font))
                .inflate(HIT_TOLERANCE, HIT_TOLERANCE)
                .contains(local),
        };
        hit.then_some(id)
    }

    // --- Frame bookkeeping -----------------------------------------------

    /// Mark the stage as needing a repaint.
    pub fn invalidate(&mut self) {
        self.dirty = true;
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Commit pending changes; returns whether anything changed since the last update.
    pub fn update(&mut self) -> bool {
        if !self.dirty {
            return false;
        }
        self.dirty = false;
        self.revision += 1;
        log::trace!("stage update: revision {} ({} nodes)", self.revision, self.nodes.len());
        true
    }

    /// Number of committed updates.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Depth-first walk of the visible tree, parents before children.
    pub fn walk(&self, mut visit: impl FnMut(&Node, usize)) {
        fn go(stage: &Stage, id: NodeId, depth: usize, visit: &mut dyn FnMut(&Node, usize)) {
            if let Some(node) = stage.nodes.get(&id) {
                visit(node, depth);
                for &child in &node.children {
                    go(stage, child, depth + 1, visit);
                }
            }
        }
        for &root in &self.roots {
            go(self, root, 0, &mut visit);
        }
    }

    /// Pretty JSON dump of the display tree (for debugging).
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        let roots: Vec<NodeDump<'_>> = self.roots.iter().filter_map(|&r| self.dump(r)).collect();
        serde_json::to_string_pretty(&roots)
    }

    fn dump(&self, id: NodeId) -> Option<NodeDump<'_>> {
        let node = self.nodes.get(&id)?;
        Some(NodeDump {
            id,
            kind: &node.kind,
            transform: node.transform,
            visible: node.visible,
            mask: node.mask,
            children: node.children.iter().filter_map(|&c| self.dump(c)).collect(),
        })
    }
}

#[derive(Serialize)]
struct NodeDump<'a> {
    id: NodeId,
    kind: &'a NodeKind,
    transform: Transform,
    visible: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    mask: Option<Rect>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    children: Vec<NodeDump<'a>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::SerializableColor;
    use crate::scene::StrokeStyle;

    fn square(stage: &mut Stage, x: f64, y: f64) -> NodeId {
        let id = stage.create_shape();
        stage
            .graphics_mut(id)
            .unwrap()
            .fill(&Rect::new(0.0, 0.0, 10.0, 10.0), SerializableColor::black());
        stage.set_position(id, x, y).unwrap();
        id
    }

    #[test]
    fn test_add_and_remove_children() {
        let mut stage = Stage::default();
        let parent = stage.create_container();
        stage.add_root(parent).unwrap();
        let a = square(&mut stage, 0.0, 0.0);
        let b = square(&mut stage, 0.0, 0.0);
        stage.add_child(parent, a).unwrap();
        stage.add_child_at(parent, b, 0).unwrap();
        assert_eq!(stage.node(parent).unwrap().children, vec![b, a]);

        stage.remove_all_children(parent).unwrap();
        assert!(stage.node(parent).unwrap().children.is_empty());
        assert!(stage.node(a).is_none());
        assert_eq!(stage.len(), 1);
    }

    #[test]
    fn test_cycle_rejected() {
        let mut stage = Stage::default();
        let a = stage.create_container();
        let b = stage.create_container();
        stage.add_child(a, b).unwrap();
        assert!(matches!(stage.add_child(b, a), Err(WidgetError::Cycle(_))));
    }

    #[test]
    fn test_hit_test_topmost() {
        let mut stage = Stage::default();
        let below = square(&mut stage, 0.0, 0.0);
        let above = square(&mut stage, 5.0, 5.0);
        stage.add_root(below).unwrap();
        stage.add_root(above).unwrap();
        assert_eq!(stage.hit_test(Point::new(7.0, 7.0)), Some(above));
        assert_eq!(stage.hit_test(Point::new(2.0, 2.0)), Some(below));
        assert_eq!(stage.hit_test(Point::new(50.0, 50.0)), None);

        stage.set_visible(above, false).unwrap();
        assert_eq!(stage.hit_test(Point::new(7.0, 7.0)), Some(below));
    }

    #[test]
    fn test_nested_transforms() {
        let mut stage = Stage::default();
        let parent = stage.create_container();
        stage.set_position(parent, 100.0, 50.0).unwrap();
        stage.add_root(parent).unwrap();
        let child = square(&mut stage, 10.0, 0.0);
        stage.add_child(parent, child).unwrap();

        let local = stage.global_to_local(child, Point::new(115.0, 55.0));
        assert!((local.x - 5.0).abs() < 1e-9);
        assert!((local.y - 5.0).abs() < 1e-9);
        assert_eq!(stage.hit_test(Point::new(115.0, 55.0)), Some(child));

        let bounds = stage.world_bounds(parent).unwrap();
        assert!((bounds.x0 - 110.0).abs() < 1e-9);
        assert!((bounds.y1 - 60.0).abs() < 1e-9);
    }

    #[test]
    fn test_mask_clips_hits() {
        let mut stage = Stage::default();
        let id = stage.create_shape();
        stage.graphics_mut(id).unwrap().stroke(
            &kurbo::Line::new((0.0, 0.0), (100.0, 0.0)),
            StrokeStyle::new(2.0, SerializableColor::black()),
        );
        stage.add_root(id).unwrap();
        stage.set_mask(id, Some(Rect::new(0.0, -5.0, 50.0, 5.0))).unwrap();
        assert_eq!(stage.hit_test(Point::new(25.0, 0.0)), Some(id));
        assert_eq!(stage.hit_test(Point::new(75.0, 0.0)), None);
    }

    #[test]
    fn test_update_tracks_dirty() {
        let mut stage = Stage::default();
        assert!(!stage.update());
        let id = stage.create_shape();
        stage.add_root(id).unwrap();
        assert!(stage.update());
        assert_eq!(stage.revision(), 1);
        assert!(!stage.update());
        stage.graphics_mut(id).unwrap().clear();
        assert!(stage.update());
        assert_eq!(stage.revision(), 2);
    }

    #[test]
    fn test_wrong_kind_errors() {
        let mut stage = Stage::default();
        let c = stage.create_container();
        assert!(matches!(stage.graphics_mut(c), Err(WidgetError::WrongNodeKind(_, "shape"))));
        assert!(matches!(stage.text(c), Err(WidgetError::WrongNodeKind(_, "text"))));
        stage.destroy(c);
        assert!(matches!(stage.set_visible(c, false), Err(WidgetError::MissingNode(_))));
    }

    #[test]
    fn test_json_dump() {
        let mut stage = Stage::default();
        let text = stage.create_text(TextNode::new("hi", Font::default(), SerializableColor::black()));
        stage.add_root(text).unwrap();
        let json = stage.to_json().unwrap();
        assert!(json.contains("\"hi\""));
        assert!(json.contains("Text"));
    }
}
