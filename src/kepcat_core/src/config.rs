//! # Propagation configuration
//!
//! The central body, the Kepler solvers, and a set of compatibility switches.
//!
//! The default configuration reproduces the propagation behaviour of existing
//! catalogue tooling exactly, including several quirks of that pipeline. Each
//! quirk has its own switch in [`Compatibility`], and
//! [`Compatibility::physical`] turns all of them into the textbook two-body
//! behaviour.
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

use serde::{Deserialize, Serialize};

use crate::anomaly::KeplerMethod;
use crate::constants::{GMS_EARTH, GMS_MARS, GMS_MOON, GMS_SUN, NEWTON_MAX_ITERATIONS};
use crate::prelude::{Error, KepcatResult};
use crate::state::VelocityFill;

/// The single body all catalogue objects orbit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CentralBody {
    /// Name of the body.
    pub name: String,

    /// Gravitational parameter GM in km^3/s^2.
    pub gm: f64,
}

impl CentralBody {
    /// Construct a new central body.
    pub fn new(name: impl Into<String>, gm: f64) -> Self {
        Self {
            name: name.into(),
            gm,
        }
    }

    /// The Earth.
    pub fn earth() -> Self {
        Self::new("Earth", GMS_EARTH)
    }

    /// The Moon.
    pub fn moon() -> Self {
        Self::new("Moon", GMS_MOON)
    }

    /// Mars.
    pub fn mars() -> Self {
        Self::new("Mars", GMS_MARS)
    }

    /// The Sun.
    pub fn sun() -> Self {
        Self::new("Sun", GMS_SUN)
    }
}

impl Default for CentralBody {
    fn default() -> Self {
        Self::earth()
    }
}

/// How the recorded epoch anomaly is turned into the mean anomaly at epoch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EpochAnomaly {
    /// The recorded true anomaly is used directly as the mean anomaly input of the
    /// epoch Kepler solve.
    #[default]
    AsMean,

    /// The recorded true anomaly is converted through the eccentric anomaly.
    AsTrue,
}

/// Which angle orients the perifocal basis during state vector construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PerigeeSlot {
    /// The propagated true anomaly is used in place of the argument of perigee.
    #[default]
    Propagated,

    /// The recorded argument of perigee is used.
    Fixed,
}

/// Which true anomaly places the object on its ellipse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShapeAnchor {
    /// The true anomaly recorded at epoch, regardless of elapsed time.
    #[default]
    Epoch,

    /// The propagated true anomaly.
    Propagated,
}

/// Switches between the established catalogue pipeline and two-body physics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Compatibility {
    /// Interpretation of the recorded epoch anomaly.
    pub epoch_anomaly: EpochAnomaly,

    /// Angle used as argument of perigee in the rotation basis.
    pub perigee_slot: PerigeeSlot,

    /// Anomaly used to locate the object on the ellipse.
    pub shape_anchor: ShapeAnchor,

    /// How velocity is filled in the returned state.
    pub velocity: VelocityFill,
}

impl Compatibility {
    /// Reproduce the established catalogue pipeline, this is the default.
    pub fn literal() -> Self {
        Self::default()
    }

    /// Textbook two-body propagation.
    pub fn physical() -> Self {
        Self {
            epoch_anomaly: EpochAnomaly::AsTrue,
            perigee_slot: PerigeeSlot::Fixed,
            shape_anchor: ShapeAnchor::Propagated,
            velocity: VelocityFill::Propagated,
        }
    }
}

/// Everything a catalogue needs to propagate its records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PropagationConfig {
    /// Central body of every orbit.
    pub central_body: CentralBody,

    /// Solver for the eccentric anomaly at epoch.
    pub epoch_solver: KeplerMethod,

    /// Solver for the eccentric anomaly at the requested time.
    pub propagation_solver: KeplerMethod,

    /// Compatibility switches.
    pub compat: Compatibility,
}

impl Default for PropagationConfig {
    fn default() -> Self {
        Self {
            central_body: CentralBody::default(),
            epoch_solver: KeplerMethod::newton(),
            propagation_solver: KeplerMethod::fixed_point(),
            compat: Compatibility::literal(),
        }
    }
}

impl PropagationConfig {
    /// Textbook two-body behaviour, with Kepler's equation solved to convergence
    /// at the requested time.
    pub fn physical() -> Self {
        Self {
            propagation_solver: KeplerMethod::Newton {
                tolerance: 1e-12,
                max_iterations: NEWTON_MAX_ITERATIONS,
            },
            compat: Compatibility::physical(),
            ..Self::default()
        }
    }

    /// Replace the central body.
    pub fn with_central_body(mut self, central_body: CentralBody) -> Self {
        self.central_body = central_body;
        self
    }

    /// Replace the compatibility switches.
    pub fn with_compat(mut self, compat: Compatibility) -> Self {
        self.compat = compat;
        self
    }

    /// Read a configuration from JSON, missing fields take their default value.
    ///
    /// ```
    ///     use kepcat_core::config::{PropagationConfig, ShapeAnchor};
    ///     let cfg = PropagationConfig::from_json(
    ///         r#"{"central_body": {"name": "Mars", "gm": 42828.37},
    ///             "compat": {"shape_anchor": "propagated"}}"#,
    ///     ).unwrap();
    ///     assert_eq!(cfg.central_body.name, "Mars");
    ///     assert_eq!(cfg.compat.shape_anchor, ShapeAnchor::Propagated);
    /// ```
    ///
    /// # Errors
    /// [`Error::ValueError`] if the JSON is malformed or the result is invalid.
    pub fn from_json(text: &str) -> KepcatResult<Self> {
        let config: Self = serde_json::from_str(text)
            .map_err(|err| Error::ValueError(format!("Invalid configuration: {err}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Check the configuration is usable.
    ///
    /// # Errors
    /// [`Error::ValueError`] if GM is not finite and positive, or a solver is
    /// misconfigured.
    pub fn validate(&self) -> KepcatResult<()> {
        if !self.central_body.gm.is_finite() || self.central_body.gm <= 0.0 {
            return Err(Error::ValueError(format!(
                "GM of {} must be finite and positive.",
                self.central_body.name
            )));
        }
        self.epoch_solver.validate()?;
        self.propagation_solver.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{FIXED_POINT_ITERATIONS, newton_tolerance};

    #[test]
    fn test_default_is_literal() {
        let cfg = PropagationConfig::default();
        assert_eq!(cfg.central_body.gm, 398_600.441_5);
        assert_eq!(cfg.compat, Compatibility::literal());
        assert_eq!(cfg.compat.epoch_anomaly, EpochAnomaly::AsMean);
        assert_eq!(cfg.compat.perigee_slot, PerigeeSlot::Propagated);
        assert_eq!(cfg.compat.shape_anchor, ShapeAnchor::Epoch);
        assert_eq!(cfg.compat.velocity, VelocityFill::MirrorPosition);
        assert_eq!(
            cfg.epoch_solver,
            KeplerMethod::Newton {
                tolerance: newton_tolerance(),
                max_iterations: NEWTON_MAX_ITERATIONS
            }
        );
        assert_eq!(
            cfg.propagation_solver,
            KeplerMethod::FixedPoint {
                iterations: FIXED_POINT_ITERATIONS
            }
        );
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn test_from_json_defaults() {
        let cfg = PropagationConfig::from_json("{}").unwrap();
        assert_eq!(cfg, PropagationConfig::default());
    }

    #[test]
    fn test_from_json_solvers() {
        let cfg = PropagationConfig::from_json(
            r#"{
                "epoch_solver": {"method": "newton", "tolerance": 1e-12, "max_iterations": 20},
                "propagation_solver": {"method": "fixed_point", "iterations": 30}
            }"#,
        )
        .unwrap();
        assert_eq!(
            cfg.epoch_solver,
            KeplerMethod::Newton {
                tolerance: 1e-12,
                max_iterations: 20
            }
        );
        assert_eq!(
            cfg.propagation_solver,
            KeplerMethod::FixedPoint { iterations: 30 }
        );
    }

    #[test]
    fn test_from_json_invalid() {
        assert!(matches!(
            PropagationConfig::from_json(r#"{"central_body": {"name": "X", "gm": -1.0}}"#),
            Err(Error::ValueError(_))
        ));
        assert!(matches!(
            PropagationConfig::from_json("not json"),
            Err(Error::ValueError(_))
        ));
        assert!(matches!(
            PropagationConfig::from_json(
                r#"{"propagation_solver": {"method": "fixed_point", "iterations": 0}}"#
            ),
            Err(Error::ValueError(_))
        ));
    }

    #[test]
    fn test_physical_preset() {
        let cfg = PropagationConfig::physical().with_central_body(CentralBody::moon());
        assert_eq!(cfg.compat, Compatibility::physical());
        assert_eq!(cfg.central_body.name, "Moon");
        assert_eq!(
            cfg.propagation_solver,
            KeplerMethod::Newton {
                tolerance: 1e-12,
                max_iterations: NEWTON_MAX_ITERATIONS
            }
        );
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn test_serde_round_trip() {
        let cfg = PropagationConfig::physical().with_central_body(CentralBody::sun());
        let text = serde_json::to_string(&cfg).unwrap();
        assert_eq!(PropagationConfig::from_json(&text).unwrap(), cfg);
    }
}
