//! The V-cycle driver and its per-cycle state machine.
//!
//! `MgSolver` owns the full level hierarchy, one [`HaloExchanger`] per
//! level (built once at construction and reused for the solver's
//! lifetime — MPI sub-array descriptors are created once per level and
//! reused, never rebuilt per cycle), and the single scratch buffer the
//! bottom solve needs. [`MgSolver::mg_solve`] is the one public entry
//! point this crate exposes.

use ndarray::Array3;
use tracing::{debug, info};

use gmg_core::{Config, Dimensionality, MgResult, Real};
use gmg_halo::HaloExchanger;
use gmg_mesh::{build_hierarchy, Level};
use gmg_topology::ProcessGrid;

use crate::boundary::{apply_boundary_conditions, apply_z_boundary};
use crate::bottom_solve::bottom_solve;
use crate::operators::{prolong, residual, restrict, smooth_colour, Colour};
use crate::operators::residual::global_residual_norm;

/// One full V-cycle's progress through descent, bottom solve, and ascent.
/// `run_v_cycle` walks these in order; the convergence check's outcome
/// (loop again or stop) is the outer [`MgSolver::mg_solve`] loop's call,
/// not this function's, so a terminal `Done` state has no representation
/// here.
#[derive(Debug, Clone, Copy)]
enum State {
    Descend(usize),
    Bottom,
    Ascend(usize),
    Check,
}

/// What `mg_solve` returns: an exhausted `vcCount` is represented as the
/// `NotConverged` case rather than an error. It is not fatal — the last
/// `phi` is returned, and it is up to the caller whether to warn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SolveOutcome {
    Converged { residual_norm: Real, cycles: usize },
    NotConverged { residual_norm: Real, cycles: usize },
}

pub struct MgSolver {
    config: Config,
    grid: ProcessGrid,
    dimensionality: Dimensionality,
    levels: Vec<Level>,
    halo: Vec<HaloExchanger>,
    bottom_scratch: Array3<Real>,
}

impl MgSolver {
    pub fn new(config: Config, grid: ProcessGrid) -> MgResult<Self> {
        config.validate_static(config.dimensionality())?;
        let dimensionality = config.dimensionality();
        let levels = build_hierarchy(&config, &grid, dimensionality)?;

        let halo = levels
            .iter()
            .map(|level| HaloExchanger::new(&grid, level.shape(), level.pad, false))
            .collect();

        let bottom_shape = levels[config.vc_depth].shape();
        let bottom_scratch = Array3::zeros(bottom_shape);

        Ok(Self {
            config,
            grid,
            dimensionality,
            levels,
            halo,
            bottom_scratch,
        })
    }

    fn axes(&self) -> [&gmg_core::AxisConfig; 2] {
        [&self.config.x, &self.config.y]
    }

    fn sync_and_apply_bc(&mut self, level: usize) -> MgResult<()> {
        self.halo[level].sync(&mut self.levels[level].phi, &self.grid)?;
        apply_boundary_conditions(&mut self.levels[level], &self.grid, self.axes());
        // Z is never decomposed, so HaloExchanger never touches it; its own
        // periodic wrap or Dirichlet-zero happens entirely within this
        // rank's buffer.
        apply_z_boundary(&mut self.levels[level], &self.config.z);
        Ok(())
    }

    fn smooth_sweeps(&mut self, level: usize, count: usize) -> MgResult<()> {
        for _ in 0..count {
            smooth_colour(&mut self.levels[level], self.dimensionality, Colour::Red);
            self.sync_and_apply_bc(level)?;
            smooth_colour(&mut self.levels[level], self.dimensionality, Colour::Black);
            self.sync_and_apply_bc(level)?;
        }
        Ok(())
    }

    fn descend(&mut self, level: usize) -> MgResult<()> {
        self.sync_and_apply_bc(level)?;
        self.smooth_sweeps(level, self.config.pre_smooth)?;

        residual(&mut self.levels[level], self.dimensionality);

        let (fine, rest) = self.levels.split_at_mut(level + 1);
        restrict(&fine[level], &mut rest[0], self.dimensionality);
        rest[0].zero_phi();
        Ok(())
    }

    fn ascend(&mut self, level: usize) -> MgResult<()> {
        {
            let (fine, rest) = self.levels.split_at_mut(level + 1);
            fine[level].zero_correction();
            prolong(&rest[0], &mut fine[level], self.dimensionality);
        }
        self.levels[level].phi += &self.levels[level].correction;
        self.levels[level].zero_correction();

        self.sync_and_apply_bc(level)?;
        self.smooth_sweeps(level, self.config.post_smooth)?;

        let extra = self.config.inter_smooth.get(level).copied().unwrap_or(0);
        if extra > 0 {
            self.smooth_sweeps(level, extra)?;
        }
        Ok(())
    }

    fn run_v_cycle(&mut self) -> MgResult<Real> {
        let depth = self.config.vc_depth;
        let mut state = State::Descend(0);
        loop {
            debug!(?state, "v-cycle state");
            state = match state {
                State::Descend(l) if l < depth => {
                    self.descend(l)?;
                    State::Descend(l + 1)
                }
                State::Descend(_) => State::Bottom,
                State::Bottom => {
                    self.sync_and_apply_bc(depth)?;
                    let axes = self.axes();
                    let iterations = bottom_solve(
                        &mut self.levels[depth],
                        self.dimensionality,
                        axes,
                        &self.config.z,
                        &self.grid,
                        &self.halo[depth],
                        self.config.tolerance,
                        &mut self.bottom_scratch,
                    )?;
                    debug!(iterations, "bottom solve finished");
                    if depth == 0 {
                        State::Check
                    } else {
                        State::Ascend(depth - 1)
                    }
                }
                State::Ascend(l) => {
                    self.ascend(l)?;
                    if l == 0 {
                        State::Check
                    } else {
                        State::Ascend(l - 1)
                    }
                }
                State::Check => {
                    residual(&mut self.levels[0], self.dimensionality);
                    let norm = global_residual_norm(&self.levels[0], self.grid.world());
                    return Ok(norm);
                }
            };
        }
    }

    /// `mgSolve(phi, F)`: runs up to `vcCount` V-cycles starting from
    /// `phi` as the initial guess and `rhs` as the finest-level right-hand
    /// side, stopping early once the residual infinity norm is at most
    /// `tolerance`. On return `phi` holds the solver's best estimate
    /// regardless of whether it converged.
    pub fn mg_solve(&mut self, phi: &mut Array3<Real>, rhs: &Array3<Real>) -> MgResult<SolveOutcome> {
        self.levels[0].phi.assign(phi);
        self.levels[0].rhs.assign(rhs);

        let mut last_norm = Real::INFINITY;
        for cycle in 1..=self.config.vc_count {
            last_norm = self.run_v_cycle()?;
            info!(cycle, residual_norm = last_norm as f64, "v-cycle complete");
            if last_norm <= self.config.tolerance as Real {
                phi.assign(&self.levels[0].phi);
                return Ok(SolveOutcome::Converged {
                    residual_norm: last_norm,
                    cycles: cycle,
                });
            }
        }

        phi.assign(&self.levels[0].phi);
        Ok(SolveOutcome::NotConverged {
            residual_norm: last_norm,
            cycles: self.config.vc_count,
        })
    }
}
