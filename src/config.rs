use serde::{Deserialize, Serialize};
use std::fs::File;
use std::path::Path;

use crate::spectral::{PadMode, DEFAULT_PAD_POINTS};

/// Filter settings recognised across the crate, as a serialisable record so
/// a driver can persist the parameters of a run next to its outputs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilterConfig {
    /// Samples of synthetic padding per edge before a spectral transform.
    pub n_pts: usize,
    /// Padding policy.
    pub mode: PadMode,
    /// Derivative order; 2 selects the Laplacian path in the vertical module.
    pub order: f64,
    /// Stabiliser added to the horizontal derivative in the hyperbolic tilt.
    pub k: f64,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            n_pts: DEFAULT_PAD_POINTS,
            mode: PadMode::LinearRamp,
            order: 1.0,
            k: crate::filters::DEFAULT_TILT_STABILIZER,
        }
    }
}

impl FilterConfig {
    /// Write the settings as pretty JSON to `<out_dir>/config.json`.
    pub fn write_to_dir(&self, out_dir: &Path) -> std::io::Result<()> {
        let path = out_dir.join("config.json");
        let file = File::create(path)?;
        serde_json::to_writer_pretty(file, self)?;
        Ok(())
    }

    /// Load settings from a JSON file written by [`FilterConfig::write_to_dir`].
    pub fn from_path(path: &Path) -> std::io::Result<Self> {
        let file = File::open(path)?;
        let cfg = serde_json::from_reader(file)?;
        Ok(cfg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_documented_values() {
        let cfg = FilterConfig::default();
        assert_eq!(cfg.n_pts, 10);
        assert_eq!(cfg.mode, PadMode::LinearRamp);
        assert_eq!(cfg.order, 1.0);
        assert_eq!(cfg.k, 0.25);
    }

    #[test]
    fn pad_mode_serialises_as_snake_case() {
        let json = serde_json::to_string(&FilterConfig {
            mode: PadMode::LinearRamp,
            ..FilterConfig::default()
        })
        .unwrap();
        assert!(json.contains("\"linear_ramp\""), "json = {}", json);

        let cfg: FilterConfig =
            serde_json::from_str(r#"{"n_pts": 5, "mode": "edge", "order": 1.5, "k": 0.1}"#)
                .unwrap();
        assert_eq!(cfg.mode, PadMode::Edge);
        assert_eq!(cfg.n_pts, 5);
    }
}
