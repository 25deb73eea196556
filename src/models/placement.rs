//! Initial placement policy for newly added modules.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Rectangle of candidate top-left positions used for jittered placement.
///
/// A jittered module lands at `x ∈ [x_min, x_min + x_span)`,
/// `y ∈ [y_min, y_min + y_span)`. The window is not checked against the room.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JitterWindow {
    /// Smallest x offset
    pub x_min: f64,
    /// Width of the x range
    pub x_span: f64,
    /// Smallest y offset
    pub y_min: f64,
    /// Height of the y range
    pub y_span: f64,
}

impl Default for JitterWindow {
    fn default() -> Self {
        Self {
            x_min: 100.0,
            x_span: 200.0,
            y_min: 100.0,
            y_span: 100.0,
        }
    }
}

impl JitterWindow {
    /// Validates that all bounds are finite and spans are non-negative.
    pub fn validate(&self) -> anyhow::Result<()> {
        let values = [self.x_min, self.x_span, self.y_min, self.y_span];
        if values.iter().any(|v| !v.is_finite()) {
            anyhow::bail!("Jitter window values must be finite numbers");
        }
        if self.x_span < 0.0 || self.y_span < 0.0 {
            anyhow::bail!(
                "Jitter window spans must be non-negative (got x_span={}, y_span={})",
                self.x_span,
                self.y_span
            );
        }
        Ok(())
    }
}

/// Where a newly added module goes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Placement {
    /// Exactly at the given top-left corner.
    At {
        /// Left edge
        x: f64,
        /// Top edge
        y: f64,
    },
    /// Somewhere inside the window, chosen from the module id's random bits.
    Jittered(JitterWindow),
}

impl Default for Placement {
    fn default() -> Self {
        Placement::Jittered(JitterWindow::default())
    }
}

impl Placement {
    /// Resolves the placement to a concrete position.
    ///
    /// `seed` is the uuid backing the new module's id; for
    /// [`Placement::Jittered`] its two halves pick the x and y offsets, so the
    /// result is random across modules but reproducible for a given id.
    #[must_use]
    pub fn resolve(&self, seed: &Uuid) -> (f64, f64) {
        match *self {
            Placement::At { x, y } => (x, y),
            Placement::Jittered(window) => {
                let bits = seed.as_u128();
                #[allow(clippy::cast_possible_truncation)]
                let (hi, lo) = ((bits >> 64) as u64, bits as u64);
                (
                    window.x_min + unit_interval(hi) * window.x_span,
                    window.y_min + unit_interval(lo) * window.y_span,
                )
            }
        }
    }
}

/// Maps 64 random bits to `[0, 1)` using the top 32 bits.
fn unit_interval(bits: u64) -> f64 {
    #[allow(clippy::cast_possible_truncation)]
    let top = (bits >> 32) as u32;
    f64::from(top) / 4_294_967_296.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_placement_is_exact() {
        let placement = Placement::At { x: 12.5, y: -4.0 };
        assert_eq!(placement.resolve(&Uuid::new_v4()), (12.5, -4.0));
    }

    #[test]
    fn test_jitter_stays_inside_window() {
        let window = JitterWindow::default();
        for _ in 0..200 {
            let (x, y) = Placement::Jittered(window).resolve(&Uuid::new_v4());
            assert!((100.0..300.0).contains(&x), "x out of window: {x}");
            assert!((100.0..200.0).contains(&y), "y out of window: {y}");
        }
    }

    #[test]
    fn test_jitter_extremes() {
        let window = JitterWindow::default();
        let low = Placement::Jittered(window).resolve(&Uuid::nil());
        assert_eq!(low, (100.0, 100.0));

        let high = Placement::Jittered(window).resolve(&Uuid::from_u128(u128::MAX));
        assert!(high.0 < 300.0 && high.1 < 200.0);
        assert!(high.0 > 299.0 && high.1 > 199.0);
    }

    #[test]
    fn test_jitter_is_reproducible_for_seed() {
        let seed = Uuid::new_v4();
        let placement = Placement::default();
        assert_eq!(placement.resolve(&seed), placement.resolve(&seed));
    }

    #[test]
    fn test_window_validate() {
        assert!(JitterWindow::default().validate().is_ok());
        let bad = JitterWindow {
            x_span: -1.0,
            ..JitterWindow::default()
        };
        assert!(bad.validate().is_err());
    }
}
