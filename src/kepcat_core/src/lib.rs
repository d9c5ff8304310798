//! # kepcat Core
//! Keplerian propagation of catalogued orbiting objects.
//!
//! A [`catalogue::Catalogue`] holds the classical orbital elements of many objects,
//! each valid at its own epoch. Querying an object at an arbitrary time advances
//! its mean anomaly from epoch, solves Kepler's equation, and builds a Cartesian
//! position and velocity in the inertial frame of the central body.
//!
//! Units are km, km/s, seconds and radians throughout.
//!
//! The default [`config::PropagationConfig`] reproduces the behaviour of existing
//! catalogue tooling, see [`config::Compatibility`] for the switches which turn
//! this into textbook two-body propagation.
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

pub mod anomaly;
pub mod catalogue;
pub mod config;
pub mod constants;
pub mod elements;
pub mod errors;
pub mod io;
pub mod propagator;
pub mod state;
pub mod time;

/// Common useful imports
pub mod prelude {
    pub use crate::anomaly::KeplerMethod;
    pub use crate::catalogue::Catalogue;
    pub use crate::config::{CentralBody, Compatibility, PropagationConfig};
    pub use crate::elements::{KeplerianElements, SatelliteRecord};
    pub use crate::errors::{Error, KepcatResult};
    pub use crate::io::{JsonFile, RawRecord, RecordSource};
    pub use crate::propagator::{OrbitPropagator, PropagatorStage};
    pub use crate::state::{PositionVelocityVector, VelocityFill};
}
