//! Numeric helpers shared by the curve widgets.

mod bezier;
mod function;
mod line;

pub use bezier::{
    BISECTION_TOLERANCE, cubic_point, inverse_lerp, lerp, quad_point, solve_t_for_x, spline_path,
    spline_segments,
};
pub use function::sample_function;
pub use line::{LineEquation, find_intersections, segment_intersection};
