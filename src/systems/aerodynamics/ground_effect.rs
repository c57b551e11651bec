use crate::components::GroundEffectConfig;

/// Multiplier on induced drag near the ground.
///
/// One at or above the reference height (the wing span unless configured). Below it the
/// induced drag shrinks with the span-scaled curve `1 - exp(-4·h/b)`, rescaled so it meets
/// one exactly at the reference height, and never below `1 - max_reduction`.
pub fn ground_effect_factor(height_agl: f64, wing_span: f64, config: &GroundEffectConfig) -> f64 {
    let reference = config.reference_height.unwrap_or(wing_span);
    if height_agl >= reference || wing_span <= 0.0 || reference <= 0.0 {
        return 1.0;
    }

    let curve = |height: f64| 1.0 - (-4.0 * height / wing_span).exp();
    let factor = curve(height_agl.max(0.0)) / curve(reference);
    factor.max(1.0 - config.max_reduction).min(1.0)
}
