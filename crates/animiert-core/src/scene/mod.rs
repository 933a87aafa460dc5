//! Retained-mode 2D scene graph the widgets draw into.
//!
//! A [`Stage`] owns every node. Shape nodes hold [`Graphics`] (filled and
//! stroked `kurbo` paths), text nodes hold a [`TextNode`], containers only
//! group children. Widgets never paint directly; they rewrite their nodes and
//! a renderer walks the tree.

mod graphics;
mod node;
mod stage;
mod text;

pub use graphics::{DrawOp, Graphics, Paint, StrokeStyle};
pub use node::{Node, NodeId, NodeKind, Transform};
pub use stage::{HIT_TOLERANCE, Stage};
pub use text::{ApproxMeasurer, Font, LINE_HEIGHT_FACTOR, TextAlign, TextBaseline, TextMeasurer, TextNode};
