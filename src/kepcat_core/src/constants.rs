//! # Constants
//! Physical constants and numerical defaults used throughout kepcat.
//!
//! Distances are in km, time in seconds, angles in radians.
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

/// Earth gravitational parameter GM in km^3/s^2.
pub const GMS_EARTH: f64 = 398_600.441_5;

/// Moon gravitational parameter GM in km^3/s^2.
pub const GMS_MOON: f64 = 4_902.800_066;

/// Mars gravitational parameter GM in km^3/s^2.
pub const GMS_MARS: f64 = 42_828.37;

/// Sun gravitational parameter GM in km^3/s^2.
pub const GMS_SUN: f64 = 132_712_440_018.0;

/// Step tolerance of the Newton solve for the eccentric anomaly at epoch.
///
/// This is `exp(-7)`, roughly `9.119e-4` rad, and is intentionally loose. It is
/// kept so that propagated states match existing catalogue tooling.
#[must_use]
pub fn newton_tolerance() -> f64 {
    (-7.0_f64).exp()
}

/// Iteration cap on the Newton solve of Kepler's equation.
pub const NEWTON_MAX_ITERATIONS: usize = 50;

/// Number of fixed point iterations used when solving Kepler's equation during
/// propagation.
pub const FIXED_POINT_ITERATIONS: usize = 4;

/// Early exit tolerance between successive fixed point iterates.
pub const FIXED_POINT_TOLERANCE: f64 = 1e-9;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn newton_tolerance_is_exp_minus_seven() {
        assert!((newton_tolerance() - 9.118_819_655_545_162e-4).abs() < 1e-15);
        assert!(newton_tolerance() > 1e-7);
    }
}
