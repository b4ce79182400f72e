use crate::windows::WindowPair;

/// Count used in place of windows with no reads
pub const MIN_COUNT: f64 = 0.001;

/// Replace counts below 1 with MIN_COUNT and apply scale
pub fn clamp_count(count: i64, scale: f64) -> f64 {
    let c = if count < 1 { MIN_COUNT } else { count as f64 };
    c * scale
}

/// Ratio of first to (scaled) second count for a window
pub fn window_ratio(chrom: &str, w: &WindowPair, factor: f64) -> anyhow::Result<f64> {
    let counts_e = clamp_count(w.val_e, 1.0);
    let counts_g = clamp_count(w.val_g, factor);
    let ratio = counts_e / counts_g;
    if counts_g == 0.0 || !ratio.is_finite() {
        Err(anyhow!(
            "Ratio for window {}:{}-{} could not be computed ({} / {})",
            chrom,
            w.start,
            w.end,
            counts_e,
            counts_g
        ))
    } else {
        Ok(ratio)
    }
}
