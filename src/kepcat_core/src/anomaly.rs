//! # Anomaly conversions
//!
//! Conversions between mean, eccentric, and true anomaly of an elliptical orbit,
//! along with the solvers for Kepler's equation `M = E - e sin(E)`.
//!
//! Two solvers exist and are used at different stages of propagation. A Newton
//! solve with a starting guess offset by half the eccentricity, and a short fixed
//! point iteration. Both are selected through [`KeplerMethod`] so the choice is
//! explicit in the propagation configuration.
//!
//! Only closed orbits are supported, eccentricity must be in `[0, 1)`.
// BSD 3-Clause License
//
// Copyright (c) 2026, Dar Dahlen
//
// Redistribution and use in source and binary forms, with or without
// modification, are permitted provided that the following conditions are met:
//
// 1. Redistributions of source code must retain the above copyright notice, this
//    list of conditions and the following disclaimer.
//
// 2. Redistributions in binary form must reproduce the above copyright notice,
//    this list of conditions and the following disclaimer in the documentation
//    and/or other materials provided with the distribution.
//
// 3. Neither the name of the copyright holder nor the names of its
//    contributors may be used to endorse or promote products derived from
//    this software without specific prior written permission.
//
// THIS SOFTWARE IS PROVIDED BY THE COPYRIGHT HOLDERS AND CONTRIBUTORS "AS IS"
// AND ANY EXPRESS OR IMPLIED WARRANTIES, INCLUDING, BUT NOT LIMITED TO, THE
// IMPLIED WARRANTIES OF MERCHANTABILITY AND FITNESS FOR A PARTICULAR PURPOSE ARE
// DISCLAIMED. IN NO EVENT SHALL THE COPYRIGHT HOLDER OR CONTRIBUTORS BE LIABLE
// FOR ANY DIRECT, INDIRECT, INCIDENTAL, SPECIAL, EXEMPLARY, OR CONSEQUENTIAL
// DAMAGES (INCLUDING, BUT NOT LIMITED TO, PROCUREMENT OF SUBSTITUTE GOODS OR
// SERVICES; LOSS OF USE, DATA, OR PROFITS; OR BUSINESS INTERRUPTION) HOWEVER
// CAUSED AND ON ANY THEORY OF LIABILITY, WHETHER IN CONTRACT, STRICT LIABILITY,
// OR TORT (INCLUDING NEGLIGENCE OR OTHERWISE) ARISING IN ANY WAY OUT OF THE USE
// OF THIS SOFTWARE, EVEN IF ADVISED OF THE POSSIBILITY OF SUCH DAMAGE.

use std::f64::consts::{PI, TAU};

use kepcat_fitting::fitting::{fixed_point, newton_raphson};
use serde::{Deserialize, Serialize};

use crate::constants::{
    FIXED_POINT_ITERATIONS, FIXED_POINT_TOLERANCE, NEWTON_MAX_ITERATIONS, newton_tolerance,
};
use crate::prelude::{Error, KepcatResult};

/// Method used to solve Kepler's equation for the eccentric anomaly.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "method", rename_all = "snake_case")]
pub enum KeplerMethod {
    /// Newton-Raphson, stopping once the step is at most `tolerance`.
    Newton {
        /// Step size tolerance in radians.
        tolerance: f64,

        /// Iterations allowed before the solve is reported as a failure.
        max_iterations: usize,
    },

    /// Fixed point iteration `E = M + e sin(E)` capped at `iterations` steps.
    FixedPoint {
        /// Maximum number of iterations, the last iterate is always accepted.
        iterations: usize,
    },
}

impl KeplerMethod {
    /// Newton solver with the default tolerance and iteration cap.
    pub fn newton() -> Self {
        Self::Newton {
            tolerance: newton_tolerance(),
            max_iterations: NEWTON_MAX_ITERATIONS,
        }
    }

    /// Fixed point solver with the default iteration count.
    pub fn fixed_point() -> Self {
        Self::FixedPoint {
            iterations: FIXED_POINT_ITERATIONS,
        }
    }

    /// Solve Kepler's equation for the eccentric anomaly.
    ///
    /// # Errors
    /// [`Error::Convergence`] if the Newton solve does not converge.
    pub fn solve(&self, mean_anom: f64, ecc: f64) -> KepcatResult<f64> {
        match *self {
            Self::Newton {
                tolerance,
                max_iterations,
            } => solve_kepler_newton(mean_anom, ecc, tolerance, max_iterations),
            Self::FixedPoint { iterations } => {
                Ok(eccentric_from_mean_capped(mean_anom, ecc, iterations))
            }
        }
    }

    /// Check that the solver parameters are usable.
    ///
    /// # Errors
    /// [`Error::ValueError`] if the tolerance is not finite and positive, or if no
    /// iterations are allowed.
    pub fn validate(&self) -> KepcatResult<()> {
        match *self {
            Self::Newton {
                tolerance,
                max_iterations,
            } => {
                if !tolerance.is_finite() || tolerance <= 0.0 {
                    return Err(Error::ValueError(
                        "Newton tolerance must be finite and positive.".into(),
                    ));
                }
                if max_iterations == 0 {
                    return Err(Error::ValueError(
                        "Newton solver must allow at least one iteration.".into(),
                    ));
                }
            }
            Self::FixedPoint { iterations } => {
                if iterations == 0 {
                    return Err(Error::ValueError(
                        "Fixed point solver must allow at least one iteration.".into(),
                    ));
                }
            }
        }
        Ok(())
    }
}

/// Mean motion in radians per second, `sqrt(GM / a^3)`.
#[must_use]
pub fn mean_motion(gm: f64, semi_major_axis: f64) -> f64 {
    (gm / semi_major_axis).sqrt() / semi_major_axis
}

/// Solve Kepler's equation with Newton-Raphson.
///
/// The solve runs on `M` reduced into `[0, 2pi)`, and the removed whole turns are
/// added back to the result. The starting guess is `M + e/2` when the reduced `M`
/// is below pi, otherwise `M - e/2`.
///
/// ```
///     use kepcat_core::anomaly::{mean_from_eccentric, solve_kepler_newton};
///     let ecc_anom = solve_kepler_newton(1.0, 0.3, 1e-12, 50).unwrap();
///     assert!((mean_from_eccentric(ecc_anom, 0.3) - 1.0).abs() < 1e-10);
/// ```
///
/// # Errors
/// [`Error::Convergence`] if the solve exceeds `max_iterations`, or encounters
/// non-finite values.
pub fn solve_kepler_newton(
    mean_anom: f64,
    ecc: f64,
    tolerance: f64,
    max_iterations: usize,
) -> KepcatResult<f64> {
    let reduced = mean_anom.rem_euclid(TAU);
    let turns = mean_anom - reduced;
    let start = if reduced < PI {
        reduced + ecc / 2.0
    } else {
        reduced - ecc / 2.0
    };
    let ecc_anom = newton_raphson(
        |e_anom: f64| e_anom - ecc * e_anom.sin() - reduced,
        |e_anom: f64| 1.0 - ecc * e_anom.cos(),
        start,
        tolerance,
        max_iterations,
    )
    .map_err(|err| {
        log::trace!("Kepler Newton solve failed for M={mean_anom}, e={ecc}: {err}");
        Error::from(err)
    })?;
    Ok(ecc_anom + turns)
}

/// Mean anomaly from eccentric anomaly, Kepler's equation.
#[must_use]
pub fn mean_from_eccentric(ecc_anom: f64, ecc: f64) -> f64 {
    ecc_anom - ecc * ecc_anom.sin()
}

/// Eccentric anomaly from mean anomaly, using four fixed point iterations.
///
/// The error of the result is bounded by `e^5`, so this is only accurate for
/// small eccentricities.
#[must_use]
pub fn eccentric_from_mean(mean_anom: f64, ecc: f64) -> f64 {
    eccentric_from_mean_capped(mean_anom, ecc, FIXED_POINT_ITERATIONS)
}

/// Eccentric anomaly from mean anomaly using at most `iterations` fixed point
/// iterations starting from `E = M`.
#[must_use]
pub fn eccentric_from_mean_capped(mean_anom: f64, ecc: f64, iterations: usize) -> f64 {
    fixed_point(
        |e_anom: f64| mean_anom + ecc * e_anom.sin(),
        mean_anom,
        FIXED_POINT_TOLERANCE,
        iterations,
    )
}

/// True anomaly from eccentric anomaly, in the range `[0, 2pi)`.
#[must_use]
pub fn true_from_eccentric(ecc_anom: f64, ecc: f64) -> f64 {
    // Both terms omit the common 1 / (1 - e cos(E)) factor, which cancels in atan2.
    let sin_true = (1.0 - ecc * ecc).sqrt() * ecc_anom.sin();
    let cos_true = ecc_anom.cos() - ecc;
    wrap_positive(sin_true.atan2(cos_true))
}

/// Eccentric anomaly from true anomaly, in the range `[0, 2pi)`.
#[must_use]
pub fn eccentric_from_true(ecc: f64, true_anom: f64) -> f64 {
    // Both terms omit the common 1 / (1 + e cos(nu)) factor, which cancels in atan2.
    let sin_ecc = (1.0 - ecc * ecc).sqrt() * true_anom.sin();
    let cos_ecc = true_anom.cos() + ecc;
    wrap_positive(sin_ecc.atan2(cos_ecc))
}

/// Shift the output of atan2 into `[0, 2pi)`.
fn wrap_positive(angle: f64) -> f64 {
    if angle < 0.0 { angle + TAU } else { angle }
}
