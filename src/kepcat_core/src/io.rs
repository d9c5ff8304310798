//! # Record sources
//!
//! Catalogue records arrive from any [`RecordSource`]. The JSON layout used by
//! existing catalogue files is supported directly through [`JsonFile`] and
//! [`records_from_json`].
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

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::elements::{KeplerianElements, SatelliteRecord};
use crate::prelude::{Error, KepcatResult};
use crate::time::parse_epoch;

/// A catalogue record as provided by the data source, before validation.
///
/// Field names follow the column names of the catalogue JSON files, unknown
/// columns are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawRecord {
    /// Epoch as `YYYY-MM-DD`.
    #[serde(rename = "epoch_of_orbit")]
    pub epoch: String,

    /// Semi-major axis in km.
    #[serde(rename = "Semi-Major Axis (km)")]
    pub semi_major_axis: f64,

    /// Eccentricity.
    #[serde(rename = "Eccentricity")]
    pub eccentricity: f64,

    /// Inclination in radians.
    #[serde(rename = "Inclination (rad)")]
    pub inclination: f64,

    /// Right ascension of the ascending node in radians.
    #[serde(rename = "RAAN (rad)")]
    pub raan: f64,

    /// Argument of perigee in radians.
    #[serde(rename = "Arg of Perigee (rad)")]
    pub argument_of_perigee: f64,

    /// True anomaly at epoch in radians.
    #[serde(rename = "True Anomaly (rad)")]
    pub true_anomaly: f64,
}

impl RawRecord {
    /// Parse the epoch and validate the elements, assigning the provided id.
    ///
    /// # Errors
    /// [`Error::ParseError`] for a malformed epoch, [`Error::ValueError`] for
    /// elements which do not describe a closed orbit.
    pub fn into_record(self, id: usize) -> KepcatResult<SatelliteRecord> {
        let epoch = parse_epoch(&self.epoch)?;
        let elements = KeplerianElements::try_new(
            self.semi_major_axis,
            self.eccentricity,
            self.inclination,
            self.raan,
            self.argument_of_perigee,
            self.true_anomaly,
        )
        .map_err(|err| Error::ValueError(format!("Record {id}: {err}")))?;
        Ok(SatelliteRecord {
            id,
            epoch,
            elements,
        })
    }
}

/// Anything which can provide an ordered list of raw catalogue records.
pub trait RecordSource {
    /// Fetch all records, in catalogue order.
    ///
    /// # Errors
    /// Implementation specific, typically [`Error::IOError`].
    fn records(&self) -> KepcatResult<Vec<RawRecord>>;
}

impl RecordSource for [RawRecord] {
    fn records(&self) -> KepcatResult<Vec<RawRecord>> {
        Ok(self.to_vec())
    }
}

impl RecordSource for Vec<RawRecord> {
    fn records(&self) -> KepcatResult<Vec<RawRecord>> {
        Ok(self.clone())
    }
}

/// JSON file containing an array of records, read on every call to
/// [`RecordSource::records`].
#[derive(Debug, Clone)]
pub struct JsonFile {
    path: PathBuf,
}

impl JsonFile {
    /// Records will be read from the provided path.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Path of the file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RecordSource for JsonFile {
    fn records(&self) -> KepcatResult<Vec<RawRecord>> {
        log::info!("Loading catalogue records from {:?}", self.path);
        let file = File::open(&self.path).map_err(|err| {
            Error::IOError(format!("Failed to open {}: {err}", self.path.display()))
        })?;
        records_from_reader(BufReader::new(file))
    }
}

/// Parse a JSON array of records.
///
/// ```
///     use kepcat_core::io::records_from_json;
///     let records = records_from_json(r#"[{
///         "epoch_of_orbit": "2021-06-01",
///         "Semi-Major Axis (km)": 7000.0,
///         "Eccentricity": 0.001,
///         "Inclination (rad)": 0.9,
///         "RAAN (rad)": 1.2,
///         "Arg of Perigee (rad)": 0.5,
///         "True Anomaly (rad)": 0.0
///     }]"#).unwrap();
///     assert_eq!(records.len(), 1);
///     assert_eq!(records[0].semi_major_axis, 7000.0);
/// ```
///
/// # Errors
/// [`Error::IOError`] if the text is not a JSON array of records.
pub fn records_from_json(text: &str) -> KepcatResult<Vec<RawRecord>> {
    Ok(serde_json::from_str(text)?)
}

/// Read a JSON array of records.
///
/// # Errors
/// [`Error::IOError`] if reading fails or the content is not a JSON array of
/// records.
pub fn records_from_reader<R: Read>(reader: R) -> KepcatResult<Vec<RawRecord>> {
    Ok(serde_json::from_reader(reader)?)
}
