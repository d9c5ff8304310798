//! # Orbital Elements
//!
//! Classical Keplerian elements of a closed orbit, and the catalogue records which
//! attach them to an object id and epoch.
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

use std::f64::consts::TAU;

use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};

use crate::anomaly::mean_motion;
use crate::prelude::{Error, KepcatResult};

/// Classical Keplerian orbital elements.
///
/// Distances are in km, angles in radians.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KeplerianElements {
    /// Semi-major axis in km.
    pub semi_major_axis: f64,

    /// Eccentricity, must be in `[0, 1)`.
    pub eccentricity: f64,

    /// Inclination in radians.
    pub inclination: f64,

    /// Right ascension of the ascending node in radians.
    pub raan: f64,

    /// Argument of perigee in radians.
    pub argument_of_perigee: f64,

    /// True anomaly at epoch in radians.
    pub true_anomaly: f64,
}

impl KeplerianElements {
    /// Construct new elements, checking they describe a closed orbit.
    ///
    /// ```
    ///     use kepcat_core::elements::KeplerianElements;
    ///     let elem = KeplerianElements::try_new(7000.0, 0.001, 0.9, 1.2, 0.5, 0.0).unwrap();
    ///     assert_eq!(elem.semi_major_axis, 7000.0);
    ///     assert!(KeplerianElements::try_new(7000.0, 1.0, 0.9, 1.2, 0.5, 0.0).is_err());
    /// ```
    ///
    /// # Errors
    /// See [`KeplerianElements::validate`].
    pub fn try_new(
        semi_major_axis: f64,
        eccentricity: f64,
        inclination: f64,
        raan: f64,
        argument_of_perigee: f64,
        true_anomaly: f64,
    ) -> KepcatResult<Self> {
        let elements = Self {
            semi_major_axis,
            eccentricity,
            inclination,
            raan,
            argument_of_perigee,
            true_anomaly,
        };
        elements.validate()?;
        Ok(elements)
    }

    /// Check the elements describe a closed orbit.
    ///
    /// # Errors
    /// [`Error::ValueError`] when any element is non-finite, the semi-major axis is
    /// not positive, or the eccentricity is outside `[0, 1)`.
    pub fn validate(&self) -> KepcatResult<()> {
        let all = [
            self.semi_major_axis,
            self.eccentricity,
            self.inclination,
            self.raan,
            self.argument_of_perigee,
            self.true_anomaly,
        ];
        if all.iter().any(|x| !x.is_finite()) {
            return Err(Error::ValueError(
                "Orbital elements must all be finite.".into(),
            ));
        }
        if self.semi_major_axis <= 0.0 {
            return Err(Error::ValueError(format!(
                "Semi-major axis must be positive, got {} km.",
                self.semi_major_axis
            )));
        }
        if !(0.0..1.0).contains(&self.eccentricity) {
            return Err(Error::ValueError(format!(
                "Eccentricity must be in [0, 1), got {}.",
                self.eccentricity
            )));
        }
        Ok(())
    }

    /// Orbital period in seconds about a body with the given GM.
    #[must_use]
    pub fn period(&self, gm: f64) -> f64 {
        TAU / mean_motion(gm, self.semi_major_axis)
    }

    /// Perigee distance in km.
    #[must_use]
    pub fn perigee_distance(&self) -> f64 {
        self.semi_major_axis * (1.0 - self.eccentricity)
    }

    /// Apogee distance in km.
    #[must_use]
    pub fn apogee_distance(&self) -> f64 {
        self.semi_major_axis * (1.0 + self.eccentricity)
    }
}

/// A catalogued object, its elements and the epoch they are valid at.
#[derive(Debug, Clone, PartialEq)]
pub struct SatelliteRecord {
    /// Position of the record in its catalogue, starting at 0.
    pub id: usize,

    /// Time the elements are valid, midnight UTC.
    pub epoch: DateTime<Utc>,

    /// Orbital elements at epoch.
    pub elements: KeplerianElements,
}

impl SatelliteRecord {
    /// Zero-based month of the epoch.
    #[must_use]
    pub fn month0(&self) -> u32 {
        self.epoch.month0()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::GMS_EARTH;

    #[test]
    fn test_validate() {
        assert!(KeplerianElements::try_new(7000.0, 0.0, 0.0, 0.0, 0.0, 0.0).is_ok());
        assert!(KeplerianElements::try_new(7000.0, 0.999, 3.0, 6.0, 6.0, 6.0).is_ok());
        for (a, e) in [(0.0, 0.1), (-7000.0, 0.1), (7000.0, -0.1), (7000.0, 1.0), (7000.0, 1.5)] {
            assert!(matches!(
                KeplerianElements::try_new(a, e, 0.0, 0.0, 0.0, 0.0),
                Err(Error::ValueError(_))
            ));
        }
        assert!(KeplerianElements::try_new(7000.0, 0.1, f64::NAN, 0.0, 0.0, 0.0).is_err());
        assert!(KeplerianElements::try_new(f64::INFINITY, 0.1, 0.0, 0.0, 0.0, 0.0).is_err());
    }

    #[test]
    fn test_period_and_apsides() {
        let elem = KeplerianElements::try_new(42_164.0, 0.1, 0.0, 0.0, 0.0, 0.0).unwrap();
        // Geostationary radius has a period of one sidereal day.
        assert!((elem.period(GMS_EARTH) - 86_164.0).abs() < 10.0);
        assert!((elem.perigee_distance() - 37_947.6).abs() < 1e-6);
        assert!((elem.apogee_distance() - 46_380.4).abs() < 1e-6);
    }

    #[test]
    fn test_record_month0() {
        let record = SatelliteRecord {
            id: 0,
            epoch: crate::time::parse_epoch("2022-07-04").unwrap(),
            elements: KeplerianElements::try_new(7000.0, 0.0, 0.0, 0.0, 0.0, 0.0).unwrap(),
        };
        assert_eq!(record.month0(), 6);
    }
}
