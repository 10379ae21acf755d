use std::f64::consts::TAU;

/// Elastic ease-out: overshoots the target slightly, then settles.
///
/// `t` is clamped to `[0, 1]`; the endpoints are exact (`f(0) = 0`, `f(1) = 1`).
pub fn elastic_out(t: f64) -> f64 {
    if t.is_nan() || t <= 0.0 {
        return 0.0;
    }
    if t >= 1.0 {
        return 1.0;
    }
    2f64.powf(-8.0 * t) * ((8.0 * t - 0.75) * (TAU / 4.5)).sin() + 1.0
}
