//! Vector helpers shared by the physics step and the pocket test.

use glam::DVec2;

/// Unit vector in the direction of `v`.
/// The zero vector (or anything non-finite) maps to `(1, 0)`.
pub fn normalize(v: DVec2) -> DVec2 {
    v.try_normalize().unwrap_or(DVec2::X)
}

/// Stylised unit-mass deflection of two touching balls.
///
/// Both balls trade the sum of their speeds along the line of centres, then
/// the pair is rescaled so the total scalar speed `|v1| + |v2|` is unchanged.
/// Two balls at rest come back unchanged.
pub fn deflect(p1: DVec2, v1: DVec2, p2: DVec2, v2: DVec2) -> (DVec2, DVec2) {
    let n = normalize(p2 - p1);
    let exchange = v1.dot(n).abs() + v2.dot(n).abs();

    let out1 = v1 - n * exchange;
    let out2 = v2 + n * exchange;

    let after = out1.length() + out2.length();
    if after == 0.0 {
        return (v1, v2);
    }
    let scale = (v1.length() + v2.length()) / after;
    (out1 * scale, out2 * scale)
}

/// True when two circles touch or overlap.
pub fn circles_overlap(a: DVec2, ra: f64, b: DVec2, rb: f64) -> bool {
    a.distance(b) <= ra + rb
}
