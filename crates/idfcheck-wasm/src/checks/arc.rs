//! Arc-tangent degeneracy detection.
//!
//! At every vertex of a closed loop, the incoming and outgoing segments are
//! each treated as circular arcs (a straight segment is an arc of sweep 0).
//! The tangent of an arc at one of its endpoints is the chord direction
//! rotated by half the sweep. When the backward tangent of the incoming
//! segment matches the forward tangent of the outgoing segment, the
//! boundary doubles back on itself at that vertex: a cusp that cannot be
//! offset or milled reliably.

use std::f64::consts::TAU;

use crate::idf::{Board, SubShape, Vertex};

/// Absolute and relative tolerance, in radians, for a tangent match.
pub const TANGENT_TOLERANCE: f64 = 0.01;

/// Flag every vertex where two segments meet tangentially head-on.
pub fn check_arc_tangents(board: &Board) -> Vec<String> {
    board
        .shapes
        .iter()
        .flat_map(|shape| shape.sub_shapes())
        .flat_map(find_cusps)
        .map(|v| format!("Infinitesimal arc intersection found at [{:.2},{:.2}]", v.x, v.y))
        .collect()
}

/// Vertices of `sub` where the boundary reverses on itself.
///
/// The closing vertex duplicates the first, so the first vertex is dropped
/// and the rest is walked as a ring. Rings of two or fewer points are
/// skipped. The walk starts at the last point of the ring.
pub fn find_cusps(sub: &SubShape) -> Vec<&Vertex> {
    let ring = sub.vertices.get(1..).unwrap_or_default();
    let n = ring.len();
    if n <= 2 {
        return Vec::new();
    }

    let cycle: Vec<&Vertex> = ring.iter().skip(n - 2).chain(ring.iter()).collect();
    cycle
        .windows(3)
        .filter_map(|window| match *window {
            [prev, cur, next] if is_cusp(prev, cur, next) => Some(cur),
            _ => None,
        })
        .collect()
}

/// Whether the segments `prev → cur` and `cur → next` meet in a cusp at
/// `cur`. The sweep of each segment is stored on its end vertex.
#[allow(clippy::float_cmp)]
pub fn is_cusp(prev: &Vertex, cur: &Vertex, next: &Vertex) -> bool {
    let phi0 = cur.sweep_angle;
    let phi1 = next.sweep_angle;
    if phi0 == 0.0 && phi1 == 0.0 {
        return false;
    }

    let alpha0 = direction(cur, prev);
    let alpha1 = direction(cur, next);

    let beta0 = alpha0 + phi0.to_radians() / 2.0;
    let beta1 = alpha1 - phi1.to_radians() / 2.0;

    let delta = (beta1 - beta0).abs() % TAU;
    is_close(delta, 0.0) || is_close(delta, TAU)
}

/// Angle of the vector `from → to`, normalised into `[0, 2π)`.
fn direction(from: &Vertex, to: &Vertex) -> f64 {
    let angle = (to.y - from.y).atan2(to.x - from.x);
    (angle + TAU) % TAU
}

fn is_close(a: f64, b: f64) -> bool {
    let scale = a.abs().max(b.abs());
    (a - b).abs() <= (TANGENT_TOLERANCE * scale).max(TANGENT_TOLERANCE)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(x: f64, y: f64, sweep_angle: f64) -> Vertex {
        Vertex {
            loop_index: 0.0,
            x,
            y,
            sweep_angle,
        }
    }

    fn ring(vertices: Vec<Vertex>) -> SubShape {
        SubShape { vertices }
    }

    #[test]
    fn straight_segments_are_skipped() {
        assert!(!is_cusp(&v(0.0, 0.0, 0.0), &v(1.0, 0.0, 0.0), &v(2.0, 0.0, 0.0)));
        // Even a hairpin made of lines is outside this rule.
        assert!(!is_cusp(&v(0.0, 0.0, 0.0), &v(1.0, 0.0, 0.0), &v(0.0, 0.0, 0.0)));
    }

    #[test]
    fn opposing_semicircles_form_a_cusp() {
        // Both arcs bulge below the axis, so their tangents at (2,0) are
        // anti-parallel.
        assert!(is_cusp(&v(0.0, 0.0, 0.0), &v(2.0, 0.0, 180.0), &v(4.0, 0.0, 180.0)));
    }

    #[test]
    fn s_curve_is_smooth() {
        assert!(!is_cusp(&v(0.0, 0.0, 0.0), &v(2.0, 0.0, 180.0), &v(4.0, 0.0, -180.0)));
    }

    #[test]
    fn right_angle_arc_junction_is_not_a_cusp() {
        assert!(!is_cusp(&v(0.0, 0.0, 0.0), &v(2.0, 0.0, 180.0), &v(3.0, 1.0, 90.0)));
    }

    #[test]
    fn find_cusps_reports_junction_only() {
        let loop_ = ring(vec![
            v(0.0, 0.0, 0.0),
            v(2.0, 0.0, 180.0),
            v(4.0, 0.0, 180.0),
            v(0.0, 0.0, 0.0),
        ]);
        let cusps = find_cusps(&loop_);
        assert_eq!(cusps.len(), 1);
        assert!(cusps.iter().all(|c| (c.x - 2.0).abs() < 1e-9 && c.y.abs() < 1e-9));
    }

    #[test]
    fn find_cusps_right_angle_loop_is_clean() {
        let loop_ = ring(vec![
            v(0.0, 0.0, 0.0),
            v(2.0, 0.0, 180.0),
            v(3.0, 1.0, 90.0),
            v(0.0, 0.0, 0.0),
        ]);
        assert!(find_cusps(&loop_).is_empty());
    }

    #[test]
    fn short_rings_are_skipped() {
        let colinear = ring(vec![v(0.0, 0.0, 0.0), v(1.0, 0.0, 0.0), v(2.0, 0.0, 0.0)]);
        assert!(find_cusps(&colinear).is_empty());

        let circle = ring(vec![v(5.0, 5.0, 0.0), v(6.0, 5.0, 360.0)]);
        assert!(find_cusps(&circle).is_empty());
        assert!(find_cusps(&SubShape::default()).is_empty());
    }

    #[test]
    fn cusp_on_closing_vertex_is_found() {
        // Same junction as above, but the loop starts and ends on it.
        let loop_ = ring(vec![
            v(2.0, 0.0, 0.0),
            v(4.0, 0.0, 180.0),
            v(0.0, 0.0, 0.0),
            v(2.0, 0.0, 180.0),
        ]);
        let cusps = find_cusps(&loop_);
        assert_eq!(cusps.len(), 1);
        assert!(cusps.iter().all(|c| (c.x - 2.0).abs() < 1e-9 && c.y.abs() < 1e-9));
    }
}
