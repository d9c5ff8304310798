//! # Catalogue
//!
//! An ordered, immutable collection of [`SatelliteRecord`]s which can be queried
//! for the state of any object at any time.
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

use chrono::{DateTime, Utc};
use itertools::Itertools;
use rayon::iter::{IntoParallelRefIterator, ParallelIterator};

use crate::config::PropagationConfig;
use crate::elements::SatelliteRecord;
use crate::io::{RawRecord, RecordSource};
use crate::prelude::KepcatResult;
use crate::propagator::OrbitPropagator;
use crate::state::PositionVelocityVector;
use crate::time::elapsed_seconds;

/// Collection of catalogued objects sharing one propagation configuration.
///
/// ```
///     use kepcat_core::prelude::*;
///     use kepcat_core::io::records_from_json;
///     use kepcat_core::time::from_iso;
///
///     let raw = records_from_json(r#"[{
///         "epoch_of_orbit": "2021-06-01",
///         "Semi-Major Axis (km)": 7000.0,
///         "Eccentricity": 0.001,
///         "Inclination (rad)": 0.9,
///         "RAAN (rad)": 1.2,
///         "Arg of Perigee (rad)": 0.5,
///         "True Anomaly (rad)": 0.0
///     }]"#).unwrap();
///     let catalogue = Catalogue::load(raw, PropagationConfig::default()).unwrap();
///
///     let at = from_iso("2021-06-01T06:00:00Z").unwrap();
///     let state = catalogue.query(0, &at).unwrap();
///     assert!((state.radius() - 7000.0).abs() < 7.1);
///
///     // Unknown objects give a zero state.
///     assert!(catalogue.query(5, &at).unwrap().is_zero());
/// ```
#[derive(Debug, Clone)]
pub struct Catalogue {
    records: Vec<SatelliteRecord>,

    config: PropagationConfig,
}

impl Catalogue {
    /// Build a catalogue from raw records, ids are assigned from 0 in input order.
    ///
    /// # Errors
    /// Fails if the configuration is invalid, or any record has a malformed epoch
    /// or invalid elements.
    pub fn load(
        raw: impl IntoIterator<Item = RawRecord>,
        config: PropagationConfig,
    ) -> KepcatResult<Self> {
        config.validate()?;
        let records = raw
            .into_iter()
            .enumerate()
            .map(|(id, record)| record.into_record(id))
            .process_results(|records| records.collect_vec())?;
        log::info!(
            "Loaded {} catalogue records orbiting {}",
            records.len(),
            config.central_body.name
        );
        Ok(Self { records, config })
    }

    /// Build a catalogue from all records of a source.
    ///
    /// # Errors
    /// Fails if the source fails, or for the reasons listed in [`Catalogue::load`].
    pub fn from_source<S>(source: &S, config: PropagationConfig) -> KepcatResult<Self>
    where
        S: RecordSource + ?Sized,
    {
        Self::load(source.records()?, config)
    }

    /// Number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True if the catalogue has no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// All records, in id order.
    #[must_use]
    pub fn records(&self) -> &[SatelliteRecord] {
        &self.records
    }

    /// Record with the given id.
    #[must_use]
    pub fn get(&self, id: usize) -> Option<&SatelliteRecord> {
        self.records.get(id).filter(|record| record.id == id)
    }

    /// Propagation configuration shared by all records.
    #[must_use]
    pub fn config(&self) -> &PropagationConfig {
        &self.config
    }

    /// State of an object at the given time, zero if there is no such object.
    ///
    /// # Errors
    /// [`crate::errors::Error::Convergence`] if propagation of an existing object
    /// fails.
    pub fn query(&self, id: usize, at: &DateTime<Utc>) -> KepcatResult<PositionVelocityVector> {
        Ok(self.find_state(id, at)?.unwrap_or_else(|| {
            log::warn!(
                "No object {id} in a catalogue of {}, returning a zero state.",
                self.len()
            );
            PositionVelocityVector::zeros()
        }))
    }

    /// State of an object at the given time, `None` if there is no such object.
    ///
    /// # Errors
    /// [`crate::errors::Error::Convergence`] if propagation fails.
    pub fn find_state(
        &self,
        id: usize,
        at: &DateTime<Utc>,
    ) -> KepcatResult<Option<PositionVelocityVector>> {
        self.get(id)
            .map(|record| self.propagate_record(record, at))
            .transpose()
    }

    /// State of every object at the given time, in id order.
    ///
    /// Objects are propagated in parallel, a failure for one object does not
    /// affect the others.
    #[must_use]
    pub fn query_all(&self, at: &DateTime<Utc>) -> Vec<KepcatResult<PositionVelocityVector>> {
        self.records
            .par_iter()
            .map(|record| {
                let state = self.propagate_record(record, at);
                if let Err(err) = &state {
                    log::error!("Failed to propagate object {}: {err}", record.id);
                }
                state
            })
            .collect()
    }

    fn propagate_record(
        &self,
        record: &SatelliteRecord,
        at: &DateTime<Utc>,
    ) -> KepcatResult<PositionVelocityVector> {
        let elapsed = elapsed_seconds(&record.epoch, at);
        log::debug!("Propagating object {} by {elapsed} s", record.id);

        let mut propagator = OrbitPropagator::new(&record.elements, &self.config);
        propagator.advance(elapsed)?;
        Ok(PositionVelocityVector::from_state(
            propagator.state_vector(),
            self.config.compat.velocity,
        ))
    }
}
