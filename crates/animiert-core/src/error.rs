//! Error types shared by the scene graph, the curve math and the widgets.

use std::path::PathBuf;
use thiserror::Error;

use crate::scene::NodeId;

/// Degenerate geometry that a numeric query cannot answer.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeometryError {
    #[error("line is vertical (x = {x}), y is not a function of x")]
    VerticalLine { x: f64 },
    #[error("line is horizontal (y = {y}), x is not a function of y")]
    HorizontalLine { y: f64 },
    #[error("curve has zero horizontal extent at x = {x}")]
    ZeroWidth { x: f64 },
    #[error("x = {x} lies outside the curve domain [{min}, {max}]")]
    OutOfDomain { x: f64, min: f64, max: f64 },
}

/// Errors raised by widget construction and mutation.
#[derive(Debug, Error)]
pub enum WidgetError {
    #[error("invalid color: {0:?}")]
    InvalidColor(String),
    #[error("invalid font: {0:?}")]
    InvalidFont(String),
    #[error("node {0} does not exist in the stage")]
    MissingNode(NodeId),
    #[error("node {0} is not a {1} node")]
    WrongNodeKind(NodeId, &'static str),
    #[error("attaching node {0} there would create a cycle")]
    Cycle(NodeId),
    #[error("empty value range: min {min} must not exceed max {max}")]
    EmptyRange { min: f64, max: f64 },
    #[error(transparent)]
    Geometry(#[from] GeometryError),
    #[error("failed to read theme file {path:?}: {source}")]
    ThemeIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse theme: {0}")]
    ThemeParse(#[from] serde_json::Error),
}

/// Result type for widget operations.
pub type WidgetResult<T> = Result<T, WidgetError>;
