//! # Two-body propagation of a single object.
//!
//! An [`OrbitPropagator`] is built for one query, advanced to the requested time,
//! read once through [`OrbitPropagator::state_vector`], and then dropped.
//!
//! Propagation is performed in three steps:
//! - The eccentric anomaly at epoch is found, giving the mean anomaly at epoch.
//! - The mean anomaly is advanced linearly by the mean motion.
//! - The eccentric anomaly at the requested time is solved for, and converted to a
//!   true anomaly which is stored as the propagated anomaly.
//!
//! How the stored quantities are combined into a state is controlled by
//! [`Compatibility`], see [`OrbitPropagator::state_vector`].
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

use crate::anomaly::{
    KeplerMethod, eccentric_from_true, mean_from_eccentric, mean_motion, true_from_eccentric,
};
use crate::config::{Compatibility, EpochAnomaly, PerigeeSlot, PropagationConfig, ShapeAnchor};
use crate::elements::KeplerianElements;
use crate::prelude::KepcatResult;
use nalgebra::Vector3;

/// Lifecycle of an [`OrbitPropagator`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropagatorStage {
    /// Elements are loaded, the propagated anomaly still holds the argument of
    /// perigee.
    Initialized,

    /// The propagated anomaly holds the true anomaly at the requested time.
    Advanced,
}

/// Elements of one object along with its propagated anomaly.
#[derive(Debug, Clone)]
pub struct OrbitPropagator {
    elements: KeplerianElements,

    gm: f64,

    /// Starts as the argument of perigee, replaced by the true anomaly at the
    /// requested time on [`OrbitPropagator::advance`].
    propagated_anomaly: f64,

    stage: PropagatorStage,

    epoch_solver: KeplerMethod,

    propagation_solver: KeplerMethod,

    compat: Compatibility,
}

impl OrbitPropagator {
    /// Construct a propagator for the provided elements.
    pub fn new(elements: &KeplerianElements, config: &PropagationConfig) -> Self {
        Self {
            elements: *elements,
            gm: config.central_body.gm,
            propagated_anomaly: elements.argument_of_perigee,
            stage: PropagatorStage::Initialized,
            epoch_solver: config.epoch_solver,
            propagation_solver: config.propagation_solver,
            compat: config.compat,
        }
    }

    /// Elements this propagator was built from.
    pub fn elements(&self) -> &KeplerianElements {
        &self.elements
    }

    /// Recorded argument of perigee, never modified.
    #[must_use]
    pub fn argument_of_perigee(&self) -> f64 {
        self.elements.argument_of_perigee
    }

    /// Current value of the propagated anomaly slot.
    #[must_use]
    pub fn propagated_anomaly(&self) -> f64 {
        self.propagated_anomaly
    }

    /// Current lifecycle stage.
    #[must_use]
    pub fn stage(&self) -> PropagatorStage {
        self.stage
    }

    /// Mean motion in radians per second.
    #[must_use]
    pub fn mean_motion(&self) -> f64 {
        mean_motion(self.gm, self.elements.semi_major_axis)
    }

    /// Orbital period in seconds.
    #[must_use]
    pub fn period(&self) -> f64 {
        self.elements.period(self.gm)
    }

    /// Advance the orbit by `dt` seconds from epoch, negative values propagate
    /// backward.
    ///
    /// Every call starts from the epoch elements, so repeated calls do not
    /// accumulate.
    ///
    /// # Errors
    /// [`crate::errors::Error::Convergence`] if the epoch or propagation Kepler
    /// solve fails to converge.
    pub fn advance(&mut self, dt: f64) -> KepcatResult<()> {
        let ecc = self.elements.eccentricity;
        let n = self.mean_motion();

        let ecc_anom = match self.compat.epoch_anomaly {
            EpochAnomaly::AsMean => self.epoch_solver.solve(self.elements.true_anomaly, ecc)?,
            EpochAnomaly::AsTrue => eccentric_from_true(ecc, self.elements.true_anomaly),
        };
        let mean_anom = mean_from_eccentric(ecc_anom, ecc) + n * dt;

        let ecc_anom_t = self.propagation_solver.solve(mean_anom, ecc)?;
        self.propagated_anomaly = true_from_eccentric(ecc_anom_t, ecc);
        self.stage = PropagatorStage::Advanced;

        log::trace!(
            "Advanced {dt} s: M={mean_anom}, E={ecc_anom_t}, nu={}",
            self.propagated_anomaly
        );
        Ok(())
    }

    /// Cartesian state `[x, y, z, vx, vy, vz]` in km and km/s.
    ///
    /// The object is placed on its ellipse in the perifocal frame using the anomaly
    /// selected by [`ShapeAnchor`], then rotated into the inertial frame using the
    /// inclination, the RAAN, and the angle selected by [`PerigeeSlot`].
    ///
    /// With the default configuration this places the object at its epoch
    /// anomaly, and orients the basis with the propagated anomaly.
    #[must_use]
    pub fn state_vector(&self) -> [f64; 6] {
        let a = self.elements.semi_major_axis;
        let ecc = self.elements.eccentricity;

        let anchor = match (self.compat.shape_anchor, self.stage) {
            (ShapeAnchor::Propagated, PropagatorStage::Advanced) => self.propagated_anomaly,
            _ => self.elements.true_anomaly,
        };
        let arg_peri = match self.compat.perigee_slot {
            PerigeeSlot::Propagated => self.propagated_anomaly,
            PerigeeSlot::Fixed => self.elements.argument_of_perigee,
        };

        let sqrt1me2 = (1.0 - ecc * ecc).sqrt();
        let (sin_ecan, cos_ecan) = eccentric_from_true(ecc, anchor).sin_cos();

        // Perifocal position and velocity
        let gauss_x = a * (cos_ecan - ecc);
        let gauss_y = a * sqrt1me2 * sin_ecan;
        let xy_dot_common = (self.gm / a).sqrt() / (1.0 - ecc * cos_ecan);
        let gauss_x_dot = -sin_ecan * xy_dot_common;
        let gauss_y_dot = cos_ecan * sqrt1me2 * xy_dot_common;

        let (p_vec, q_vec) =
            perifocal_basis(self.elements.inclination, self.elements.raan, arg_peri);
        let p_vec = Vector3::from(p_vec);
        let q_vec = Vector3::from(q_vec);

        let pos = gauss_x * p_vec + gauss_y * q_vec;
        let vel = gauss_x_dot * p_vec + gauss_y_dot * q_vec;
        [pos.x, pos.y, pos.z, vel.x, vel.y, vel.z]
    }
}

/// Inertial frame directions of the perifocal P (toward perigee) and Q axes.
#[must_use]
pub fn perifocal_basis(inclination: f64, raan: f64, arg_peri: f64) -> ([f64; 3], [f64; 3]) {
    let (sin_inc, cos_inc) = inclination.sin_cos();
    let (sin_argp, cos_argp) = arg_peri.sin_cos();
    let (sin_raan, cos_raan) = raan.sin_cos();

    let cc = cos_argp * cos_raan;
    let cs = cos_argp * sin_raan;
    let sc = sin_argp * cos_raan;
    let ss = sin_argp * sin_raan;

    let p_vec = [cc - ss * cos_inc, cs + sc * cos_inc, sin_argp * sin_inc];
    let q_vec = [-sc - cs * cos_inc, -ss + cc * cos_inc, cos_argp * sin_inc];
    (p_vec, q_vec)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::anomaly::solve_kepler_newton;
    use crate::constants::GMS_EARTH;
    use crate::errors::Error;

    fn scenario() -> KeplerianElements {
        KeplerianElements::try_new(7000.0, 0.001, 0.9, 1.2, 0.5, 0.0).unwrap()
    }

    fn split(state: [f64; 6]) -> (Vector3<f64>, Vector3<f64>) {
        (
            Vector3::new(state[0], state[1], state[2]),
            Vector3::new(state[3], state[4], state[5]),
        )
    }

    #[test]
    fn test_basis_orthonormal() {
        for (inc, raan, argp) in [(0.0, 0.0, 0.0), (0.9, 1.2, 0.5), (3.0, 5.0, 2.0)] {
            let (p_vec, q_vec) = perifocal_basis(inc, raan, argp);
            let p_vec = Vector3::from(p_vec);
            let q_vec = Vector3::from(q_vec);
            assert!((p_vec.norm() - 1.0).abs() < 1e-14);
            assert!((q_vec.norm() - 1.0).abs() < 1e-14);
            assert!(p_vec.dot(&q_vec).abs() < 1e-14);
            // Orbit normal has the requested inclination.
            let w_vec = p_vec.cross(&q_vec);
            assert!((w_vec.z - inc.cos()).abs() < 1e-14);
        }
    }

    #[test]
    fn test_basis_identity() {
        let (p_vec, q_vec) = perifocal_basis(0.0, 0.0, 0.0);
        assert_eq!(p_vec, [1.0, 0.0, 0.0]);
        assert_eq!(q_vec, [0.0, 1.0, 0.0]);
    }

    #[test]
    fn test_initialized_stage() {
        let prop = OrbitPropagator::new(&scenario(), &PropagationConfig::default());
        assert_eq!(prop.stage(), PropagatorStage::Initialized);
        assert_eq!(prop.propagated_anomaly(), 0.5);
        assert_eq!(prop.argument_of_perigee(), 0.5);
        assert!((prop.mean_motion() - (GMS_EARTH / 7000.0_f64.powi(3)).sqrt()).abs() < 1e-15);
    }

    #[test]
    fn test_scenario_advance_zero() {
        let mut prop = OrbitPropagator::new(&scenario(), &PropagationConfig::default());
        prop.advance(0.0).unwrap();
        assert_eq!(prop.stage(), PropagatorStage::Advanced);

        // The epoch true anomaly of 0 is fed to the Newton solve as a mean anomaly,
        // the result overwrites the slot initialized with the argument of perigee.
        assert!(prop.propagated_anomaly() < 1e-3);
        assert_eq!(prop.argument_of_perigee(), 0.5);

        let (pos, _) = split(prop.state_vector());
        assert!((pos.norm() - 7000.0).abs() <= 7000.0 * 0.001 + 1e-9);
        // Placed at the epoch anomaly, which is perigee.
        assert!((pos.norm() - 6993.0).abs() < 1e-9);
    }

    #[test]
    fn test_near_circular_radius() {
        let elem = KeplerianElements::try_new(7000.0, 1e-5, 0.9, 1.2, 0.5, 0.3).unwrap();
        for cfg in [PropagationConfig::default(), PropagationConfig::physical()] {
            for dt in [-1e6, -3600.0, 0.0, 1.0, 1234.5, 86_400.0, 1e7] {
                let mut prop = OrbitPropagator::new(&elem, &cfg);
                prop.advance(dt).unwrap();
                let (pos, _) = split(prop.state_vector());
                assert!((pos.norm() - 7000.0).abs() < 1.0, "dt={dt}, r={}", pos.norm());
            }
        }
    }

    #[test]
    fn test_vis_viva_of_raw_state() {
        let elem = KeplerianElements::try_new(12_000.0, 0.3, 0.4, 2.0, 1.0, 2.5).unwrap();
        for cfg in [PropagationConfig::default(), PropagationConfig::physical()] {
            let mut prop = OrbitPropagator::new(&elem, &cfg);
            prop.advance(5000.0).unwrap();
            let (pos, vel) = split(prop.state_vector());
            let energy = vel.norm_squared() / 2.0 - GMS_EARTH / pos.norm();
            assert!((energy + GMS_EARTH / (2.0 * 12_000.0)).abs() < 1e-9);
        }
    }

    #[test]
    fn test_physical_quarter_orbit() {
        let elem = KeplerianElements::try_new(7000.0, 0.0, 0.9, 1.2, 0.5, 0.0).unwrap();
        let cfg = PropagationConfig::physical();

        let mut prop = OrbitPropagator::new(&elem, &cfg);
        prop.advance(0.0).unwrap();
        let (pos0, vel0) = split(prop.state_vector());

        prop.advance(prop.period() / 4.0).unwrap();
        let (pos1, _) = split(prop.state_vector());

        assert!(pos0.dot(&pos1).abs() < 1e-6 * 7000.0 * 7000.0);
        // Quarter of an orbit later the object is where the velocity pointed.
        assert!((pos1.normalize() - vel0.normalize()).norm() < 1e-9);

        prop.advance(prop.period()).unwrap();
        let (pos2, _) = split(prop.state_vector());
        assert!((pos2 - pos0).norm() < 1e-6);
    }

    #[test]
    fn test_physical_advance_moves_along_orbit() {
        let elem = KeplerianElements::try_new(8000.0, 0.05, 0.3, 0.2, 1.1, 0.7).unwrap();
        let cfg = PropagationConfig::physical();
        let mut prop = OrbitPropagator::new(&elem, &cfg);
        prop.advance(0.0).unwrap();
        assert!((prop.propagated_anomaly() - 0.7).abs() < 1e-3);
        let (pos0, vel0) = split(prop.state_vector());

        // Small step follows the velocity.
        prop.advance(1.0).unwrap();
        let (pos1, _) = split(prop.state_vector());
        assert!(((pos1 - pos0) - vel0).norm() < 1e-2);
    }

    #[test]
    fn test_literal_velocity_is_unaffected_by_time() {
        // The shape anchor stays at the epoch anomaly, so speed never changes.
        let elem = KeplerianElements::try_new(9000.0, 0.2, 0.3, 0.2, 1.1, 0.7).unwrap();
        let cfg = PropagationConfig::default();
        let speeds: Vec<f64> = [0.0, 100.0, 2000.0]
            .into_iter()
            .map(|dt| {
                let mut prop = OrbitPropagator::new(&elem, &cfg);
                prop.advance(dt).unwrap();
                split(prop.state_vector()).1.norm()
            })
            .collect();
        assert!((speeds[0] - speeds[1]).abs() < 1e-12);
        assert!((speeds[0] - speeds[2]).abs() < 1e-12);
    }

    #[test]
    fn test_deterministic() {
        let cfg = PropagationConfig::default();
        let run = || {
            let mut prop = OrbitPropagator::new(&scenario(), &cfg);
            prop.advance(12_345.678).unwrap();
            prop.state_vector()
        };
        assert_eq!(run(), run());
    }

    #[test]
    fn test_advance_does_not_accumulate() {
        let cfg = PropagationConfig::default();
        let mut prop = OrbitPropagator::new(&scenario(), &cfg);
        prop.advance(500.0).unwrap();
        prop.advance(500.0).unwrap();
        let twice = prop.state_vector();

        let mut fresh = OrbitPropagator::new(&scenario(), &cfg);
        fresh.advance(500.0).unwrap();
        assert_eq!(twice, fresh.state_vector());
    }

    #[test]
    fn test_shape_anchor_before_advance() {
        let cfg = PropagationConfig::default().with_compat(Compatibility {
            shape_anchor: ShapeAnchor::Propagated,
            ..Compatibility::literal()
        });
        let prop = OrbitPropagator::new(&scenario(), &cfg);
        let literal = OrbitPropagator::new(&scenario(), &PropagationConfig::default());
        assert_eq!(prop.state_vector(), literal.state_vector());
    }

    #[test]
    fn test_propagation_failure() {
        let elem = KeplerianElements::try_new(7000.0, 0.9, 0.0, 0.0, 0.0, 5.0).unwrap();
        let cfg = PropagationConfig {
            epoch_solver: KeplerMethod::Newton {
                tolerance: 1e-15,
                max_iterations: 1,
            },
            ..PropagationConfig::default()
        };
        let mut prop = OrbitPropagator::new(&elem, &cfg);
        assert!(matches!(prop.advance(10.0), Err(Error::Convergence(_))));
        assert_eq!(prop.stage(), PropagatorStage::Initialized);
    }

    /// Position from an independent, fully converged solve of Kepler's equation.
    fn converged_position(elem: &KeplerianElements, dt: f64) -> Vector3<f64> {
        let a = elem.semi_major_axis;
        let ecc = elem.eccentricity;
        let mean0 = mean_from_eccentric(eccentric_from_true(ecc, elem.true_anomaly), ecc);
        let mean = mean0 + mean_motion(GMS_EARTH, a) * dt;
        let ecc_anom = solve_kepler_newton(mean, ecc, 1e-13, 100).unwrap();
        let (p_vec, q_vec) =
            perifocal_basis(elem.inclination, elem.raan, elem.argument_of_perigee);
        a * (ecc_anom.cos() - ecc) * Vector3::from(p_vec)
            + a * (1.0 - ecc * ecc).sqrt() * ecc_anom.sin() * Vector3::from(q_vec)
    }

    #[test]
    fn test_physical_matches_converged_solve() {
        for ecc in [0.3, 0.6, 0.9] {
            let elem = KeplerianElements::try_new(12_000.0, ecc, 0.9, 1.2, 0.5, 0.4).unwrap();
            let mut prop = OrbitPropagator::new(&elem, &PropagationConfig::physical());
            for step in 1..=15 {
                let dt = 600.0 * f64::from(step);
                prop.advance(dt).unwrap();
                let (pos, _) = split(prop.state_vector());
                let err = (pos - converged_position(&elem, dt)).norm();
                assert!(err < 1e-6, "e={ecc}, dt={dt}, error {err} km");
            }
        }
    }

    #[test]
    fn test_fixed_point_drifts_at_high_ecc() {
        let elem = KeplerianElements::try_new(12_000.0, 0.6, 0.9, 1.2, 0.5, 0.4).unwrap();
        let cfg = PropagationConfig {
            propagation_solver: KeplerMethod::fixed_point(),
            ..PropagationConfig::physical()
        };
        let mut prop = OrbitPropagator::new(&elem, &cfg);
        let worst = (1..=15)
            .map(|step| {
                let dt = 600.0 * f64::from(step);
                prop.advance(dt).unwrap();
                let (pos, _) = split(prop.state_vector());
                (pos - converged_position(&elem, dt)).norm()
            })
            .fold(0.0, f64::max);
        assert!(worst > 1.0, "worst error {worst} km");
    }
}
