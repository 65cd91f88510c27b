//! The configuration object consumed by the solver.
//!
//! This object is consumed, not defined, by the multigrid engine: loading
//! it from YAML, a CLI, or anywhere else is someone else's job. This
//! module only names the recognized fields and the validation rules the
//! engine itself depends on. `Config` derives `Deserialize` so an external
//! loader can populate it with `serde_yaml` (or any other `serde` format)
//! without this crate doing any file I/O.

use serde::{Deserialize, Serialize};

use crate::error::{MgError, MgResult};
use crate::geometry::{Dimensionality, StretchMode};
use crate::precision::SINGLE_PRECISION;

/// Per-direction grid description: base-2 log of the global extent, the
/// stretch law, and its `beta` parameter (ignored when the mode is
/// `Uniform`).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisConfig {
    /// Base-2 logarithm of the global node count along this axis.
    pub log2_extent: u32,
    pub grid_mode: u8,
    pub beta: f64,
    pub periodic: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub lx: f64,
    pub ly: f64,
    pub lz: f64,

    pub x: AxisConfig,
    pub y: AxisConfig,
    pub z: AxisConfig,

    /// Process counts along X and Y. Their product must equal the MPI
    /// world size. Z is never decomposed.
    pub np_x: usize,
    pub np_y: usize,

    /// V-cycle depth `D`. Level 0 is finest, level `D` is the bottom solve.
    pub vc_depth: usize,
    /// Maximum number of V-cycles before giving up (`ConvergenceWarning`).
    pub vc_count: usize,

    pub pre_smooth: usize,
    pub post_smooth: usize,
    /// Extra smoothing sweeps applied on the ascent at each level, indexed
    /// by level 0..vc_depth-1. Must have length >= `vc_depth`.
    pub inter_smooth: Vec<usize>,

    /// Infinity-norm convergence threshold.
    pub tolerance: f64,
}

impl AxisConfig {
    pub fn stretch_mode(&self) -> MgResult<StretchMode> {
        StretchMode::from_code(self.grid_mode)
            .ok_or_else(|| MgError::Config(format!("invalid grid mode {}", self.grid_mode)))
    }

    pub fn global_extent(&self) -> usize {
        1usize << self.log2_extent
    }
}

impl Config {
    /// Checks every rule that does not require knowing the MPI world size
    /// or any rank's local extents (those are checked where the topology
    /// and mesh hierarchy are actually built, since only they know the
    /// numbers involved). Called first, always, before `mg_solve` touches
    /// MPI.
    pub fn validate_static(&self, dimensionality: Dimensionality) -> MgResult<()> {
        if self.lx <= 0.0 || self.ly <= 0.0 || self.lz <= 0.0 {
            return Err(MgError::Config(
                "domain extents Lx, Ly, Lz must be positive".into(),
            ));
        }

        let planar = self.y.log2_extent == 0;
        match (planar, dimensionality) {
            (true, Dimensionality::Planar2D) | (false, Dimensionality::ThreeD) => {}
            (true, Dimensionality::ThreeD) => {
                return Err(MgError::Config(
                    "yInd = 0 selects 2-D planar mode, but the solver was built for 3-D".into(),
                ));
            }
            (false, Dimensionality::Planar2D) => {
                return Err(MgError::Config(
                    "yInd != 0 requires 3-D mode, but the solver was built planar".into(),
                ));
            }
        }

        for (name, axis) in [("x", &self.x), ("y", &self.y), ("z", &self.z)] {
            axis.stretch_mode().map_err(|_| {
                MgError::Config(format!(
                    "{name}Grid must be 0 (uniform), 1 (single tanh) or 2 (double tanh), got {}",
                    axis.grid_mode
                ))
            })?;
        }

        if self.np_x == 0 || self.np_y == 0 {
            return Err(MgError::Config("npX and npY must be positive".into()));
        }

        if self.vc_depth == 0 {
            return Err(MgError::Config("vcDepth must be positive".into()));
        }
        if self.vc_count == 0 {
            return Err(MgError::Config("vcCount must be positive".into()));
        }
        if self.inter_smooth.len() < self.vc_depth {
            return Err(MgError::Config(format!(
                "interSmooth must have at least vcDepth ({}) entries, got {}",
                self.vc_depth,
                self.inter_smooth.len()
            )));
        }

        if SINGLE_PRECISION && self.tolerance < 5e-6 {
            return Err(MgError::Config(format!(
                "tolerance {} is tighter than the single-precision floor of 5e-6",
                self.tolerance
            )));
        }
        if self.tolerance <= 0.0 {
            return Err(MgError::Config("tolerance must be positive".into()));
        }

        // The finest level must itself be at least as deep as the V-cycle:
        // halving vc_depth times must leave at least one node.
        for (name, axis) in [("x", &self.x), ("y", &self.y), ("z", &self.z)] {
            if axis.global_extent() >> self.vc_depth == 0 {
                return Err(MgError::Config(format!(
                    "{name}Ind = {} is too small for vcDepth = {}",
                    axis.log2_extent, self.vc_depth
                )));
            }
        }

        Ok(())
    }

    pub fn dimensionality(&self) -> Dimensionality {
        if self.y.log2_extent == 0 {
            Dimensionality::Planar2D
        } else {
            Dimensionality::ThreeD
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_axis() -> AxisConfig {
        AxisConfig {
            log2_extent: 5,
            grid_mode: 0,
            beta: 0.0,
            periodic: true,
        }
    }

    fn base_config() -> Config {
        Config {
            lx: 1.0,
            ly: 1.0,
            lz: 1.0,
            x: base_axis(),
            y: base_axis(),
            z: base_axis(),
            np_x: 1,
            np_y: 1,
            vc_depth: 3,
            vc_count: 10,
            pre_smooth: 2,
            post_smooth: 2,
            inter_smooth: vec![0, 0, 0],
            tolerance: 1e-6,
        }
    }

    #[test]
    fn accepts_well_formed_config() {
        let cfg = base_config();
        assert!(cfg.validate_static(Dimensionality::ThreeD).is_ok());
    }

    #[test]
    fn rejects_negative_domain() {
        let mut cfg = base_config();
        cfg.lx = -1.0;
        assert!(cfg.validate_static(Dimensionality::ThreeD).is_err());
    }

    #[test]
    fn rejects_mismatched_dimensionality() {
        let mut cfg = base_config();
        cfg.y.log2_extent = 0;
        assert!(cfg.validate_static(Dimensionality::ThreeD).is_err());
        assert!(cfg.validate_static(Dimensionality::Planar2D).is_ok());
    }

    #[test]
    fn rejects_short_inter_smooth() {
        let mut cfg = base_config();
        cfg.inter_smooth = vec![0, 0];
        assert!(cfg.validate_static(Dimensionality::ThreeD).is_err());
    }

    #[test]
    fn rejects_too_deep_vcycle() {
        let mut cfg = base_config();
        cfg.vc_depth = 10;
        cfg.inter_smooth = vec![0; 10];
        assert!(cfg.validate_static(Dimensionality::ThreeD).is_err());
    }

    #[test]
    fn rejects_bad_grid_mode() {
        let mut cfg = base_config();
        cfg.x.grid_mode = 9;
        assert!(cfg.validate_static(Dimensionality::ThreeD).is_err());
    }

    #[test]
    fn round_trips_through_json() {
        let cfg = base_config();
        let json = serde_json::to_string(&cfg).unwrap();
        let back: Config = serde_json::from_str(&json).unwrap();
        assert_eq!(cfg, back);
    }
}
