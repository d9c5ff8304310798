//! # State
//! Cartesian position and velocity of an object at a single instant.
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

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

/// How the velocity of a [`PositionVelocityVector`] is filled from a propagated
/// state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VelocityFill {
    /// Velocity is a copy of the position, the propagated velocity is discarded.
    ///
    /// This matches the state vectors of existing catalogue tooling, and is the
    /// default for that reason.
    #[default]
    MirrorPosition,

    /// Velocity is the propagated velocity.
    Propagated,
}

/// Position (km) and velocity (km/s) in the inertial frame of the central body.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PositionVelocityVector {
    /// Position in km.
    pub pos: Vector3<f64>,

    /// Velocity in km/s.
    pub vel: Vector3<f64>,
}

impl PositionVelocityVector {
    /// Construct a new state from position and velocity.
    pub fn new(pos: impl Into<Vector3<f64>>, vel: impl Into<Vector3<f64>>) -> Self {
        Self {
            pos: pos.into(),
            vel: vel.into(),
        }
    }

    /// State with position and velocity all zero.
    pub fn zeros() -> Self {
        Self::default()
    }

    /// Build a state from `[x, y, z, vx, vy, vz]`.
    ///
    /// With [`VelocityFill::MirrorPosition`] the last three components are ignored
    /// and the velocity holds a copy of the position.
    ///
    /// ```
    ///     use kepcat_core::state::{PositionVelocityVector, VelocityFill};
    ///     let raw = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
    ///     let mirrored = PositionVelocityVector::from_state(raw, VelocityFill::MirrorPosition);
    ///     assert_eq!(mirrored.vel, mirrored.pos);
    ///     let state = PositionVelocityVector::from_state(raw, VelocityFill::Propagated);
    ///     assert_eq!(state.get_vector().1, [4.0, 5.0, 6.0]);
    /// ```
    pub fn from_state(state: [f64; 6], fill: VelocityFill) -> Self {
        let [px, py, pz, vx, vy, vz] = state;
        let pos = Vector3::new(px, py, pz);
        let vel = match fill {
            VelocityFill::MirrorPosition => pos,
            VelocityFill::Propagated => Vector3::new(vx, vy, vz),
        };
        Self { pos, vel }
    }

    /// Position and velocity as plain arrays.
    #[must_use]
    pub fn get_vector(&self) -> ([f64; 3], [f64; 3]) {
        (self.pos.into(), self.vel.into())
    }

    /// Distance from the central body in km.
    #[must_use]
    pub fn radius(&self) -> f64 {
        self.pos.norm()
    }

    /// Speed in km/s.
    #[must_use]
    pub fn speed(&self) -> f64 {
        self.vel.norm()
    }

    /// Specific orbital energy `v^2 / 2 - GM / r` in km^2/s^2.
    #[must_use]
    pub fn specific_energy(&self, gm: f64) -> f64 {
        self.vel.norm_squared() / 2.0 - gm / self.radius()
    }

    /// True when position and velocity are exactly zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.pos == Vector3::zeros() && self.vel == Vector3::zeros()
    }
}
