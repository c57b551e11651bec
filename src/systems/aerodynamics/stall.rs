use crate::components::aircraft::config::StallCoefficients;

/// Applies the three-region stall model to a linear lift coefficient.
///
/// Up to the stall angle the linear value passes through. Across the transition band it blends
/// linearly from the (capped) linear value to `peak_retention · cl_max`, and past the band it
/// decays exponentially toward `post_stall_floor · cl_max`. Negative angles mirror the curve.
pub fn stall_lift_coefficient(
    cl_linear: f64,
    alpha: f64,
    cl_max: f64,
    stall: &StallCoefficients,
) -> f64 {
    let magnitude = alpha.abs();
    if magnitude <= stall.alpha_stall {
        return cl_linear;
    }

    let sign = alpha.signum();
    let peak = stall.peak_retention * cl_max;
    let floor = stall.post_stall_floor * cl_max;
    let band_end = stall.alpha_stall + stall.stall_transition;

    let cl = if magnitude <= band_end {
        let start = (cl_linear * sign).min(cl_max);
        let t = (magnitude - stall.alpha_stall) / stall.stall_transition;
        start + (peak - start) * t
    } else {
        floor + (peak - floor) * (-stall.decay_rate * (magnitude - band_end)).exp()
    };

    sign * cl
}

pub fn is_stalled(alpha: f64, stall: &StallCoefficients) -> bool {
    alpha.abs() > stall.alpha_stall
}

/// Angle of attack beyond the stall angle (rad), zero when unstalled.
pub fn stall_excess(alpha: f64, stall: &StallCoefficients) -> f64 {
    (alpha.abs() - stall.alpha_stall).max(0.0)
}
