//! Composition root: owns the active collection and wires the store,
//! generator and filter engine together.
//!
//! ```text
//! store.load() ──┬── records ─────────────────┐
//!                └── absent/malformed         │
//!                      │                      ▼
//!                generate(seed_count)   apply_filter(records, spec)
//!                      │                      │
//!                store.save() ──► records     ▼
//!                                       derived view
//! ```

use std::path::Path;

use chrono::NaiveDate;
use rand::rngs::StdRng;
use thiserror::Error;

use crate::config::RegistryConfig;
use crate::filter::{self, FilterSpec, Page, PatientRow};
use crate::generator::{Generator, GeneratorError};
use crate::models::{NewPatient, Patient, ValidationError};
use crate::store::{PatientStore, SqliteStore, StoreError};

/// Registry errors.
#[derive(Error, Debug)]
pub enum RegistryError {
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Generator error: {0}")]
    Generator(#[from] GeneratorError),
}

pub type RegistryResult<T> = Result<T, RegistryError>;

/// The active patient collection backed by a [`PatientStore`].
///
/// The collection is append-only for now; every mutation is written through
/// to the store before it becomes visible.
pub struct PatientRegistry<S: PatientStore> {
    store: S,
    records: Vec<Patient>,
    generator: Generator<StdRng>,
}

impl PatientRegistry<SqliteStore> {
    /// Open a SQLite-backed registry at `path`.
    pub fn open<P: AsRef<Path>>(path: P, config: RegistryConfig) -> RegistryResult<Self> {
        let store = SqliteStore::open(path)?.with_key(config.storage_key.clone());
        Self::bootstrap(store, config)
    }

    /// Open an in-memory SQLite-backed registry (for testing).
    pub fn open_in_memory(config: RegistryConfig) -> RegistryResult<Self> {
        let store = SqliteStore::open_in_memory()?.with_key(config.storage_key.clone());
        Self::bootstrap(store, config)
    }
}

impl<S: PatientStore> PatientRegistry<S> {
    /// Load the stored collection, seeding the store when there is none.
    ///
    /// Malformed stored data is treated like absent data and replaced with a
    /// freshly generated collection. Other storage failures are returned.
    pub fn bootstrap(store: S, config: RegistryConfig) -> RegistryResult<Self> {
        Self::bootstrap_on(store, config, chrono::Local::now().date_naive())
    }

    /// [`Self::bootstrap`] with validation relative to `today`.
    pub fn bootstrap_on(
        store: S,
        config: RegistryConfig,
        today: NaiveDate,
    ) -> RegistryResult<Self> {
        let mut generator = match config.rng_seed {
            Some(seed) => Generator::with_seed(seed),
            None => Generator::new(),
        };

        let records = match load_valid(&store, today)? {
            Some(records) => {
                tracing::info!(count = records.len(), "loaded stored patients");
                records
            }
            None => {
                let seeded = generator.generate(config.seed_count);
                store.save(&seeded)?;
                tracing::info!(count = seeded.len(), "seeded store with generated patients");
                seeded
            }
        };

        Ok(Self {
            store,
            records,
            generator,
        })
    }

    /// The full collection in insertion order.
    pub fn records(&self) -> &[Patient] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Get a patient by ID.
    pub fn get(&self, id: &str) -> Option<&Patient> {
        self.records.iter().find(|p| p.id == id)
    }

    /// Get the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Records matching `spec`, with ages relative to today.
    pub fn filtered(&self, spec: &FilterSpec) -> Vec<Patient> {
        filter::apply_filter(&self.records, spec)
    }

    /// Records matching `spec`, with ages relative to `today`.
    pub fn filtered_on(&self, spec: &FilterSpec, today: NaiveDate) -> Vec<Patient> {
        filter::apply_filter_on(&self.records, spec, today)
    }

    /// One page of table rows for the records matching `spec`.
    pub fn rows(
        &self,
        spec: &FilterSpec,
        page: usize,
        page_size: usize,
        today: NaiveDate,
    ) -> Page<PatientRow> {
        let rows: Vec<PatientRow> = filter::filter_refs(&self.records, spec, today)
            .into_iter()
            .map(|p| PatientRow::project(p, today))
            .collect();
        filter::paginate(&rows, page, page_size)
    }

    /// Validate and append a submitted patient, then persist the collection.
    ///
    /// The record gets a fresh UUID and equal creation/update timestamps. If
    /// the save fails the record is dropped again and the error returned.
    pub fn create_patient(&mut self, new: NewPatient) -> RegistryResult<Patient> {
        new.validate(chrono::Local::now().date_naive())?;

        let now = chrono::Utc::now().to_rfc3339();
        let patient = new.into_patient(uuid::Uuid::new_v4().to_string(), &now);
        self.records.push(patient.clone());

        if let Err(e) = self.store.save(&self.records) {
            self.records.pop();
            tracing::warn!(error = %e, "failed to persist new patient");
            return Err(e.into());
        }

        tracing::info!(id = %patient.id, "created patient");
        Ok(patient)
    }

    /// Generate a filled-in submission for the "add patient" form.
    pub fn generate_mock_patient(&mut self) -> NewPatient {
        self.generator.generate_one()
    }

    /// Append `count` generated records with fresh ids and persist.
    ///
    /// Generated ids restart at 1 per batch, so they are replaced before the
    /// merge.
    pub fn append_generated(&mut self, count: i64) -> RegistryResult<usize> {
        let now = chrono::Utc::now().to_rfc3339();
        let batch: Vec<Patient> = self
            .generator
            .generate_checked(count)?
            .into_iter()
            .map(|p| p.details().into_patient(uuid::Uuid::new_v4().to_string(), &now))
            .collect();

        let added = batch.len();
        let previous_len = self.records.len();
        self.records.extend(batch);

        if let Err(e) = self.store.save(&self.records) {
            self.records.truncate(previous_len);
            return Err(e.into());
        }

        tracing::info!(count = added, "appended generated patients");
        Ok(added)
    }
}

/// Load the stored collection, mapping empty or malformed data to `None`.
fn load_valid<S: PatientStore>(
    store: &S,
    today: NaiveDate,
) -> RegistryResult<Option<Vec<Patient>>> {
    let records = match store.load() {
        Ok(Some(records)) if !records.is_empty() => records,
        Ok(_) => return Ok(None),
        Err(e) if e.is_malformed() => {
            tracing::warn!(error = %e, "stored patients are malformed, re-seeding");
            return Ok(None);
        }
        Err(e) => return Err(e.into()),
    };

    for patient in &records {
        if let Err(e) = patient.validate(today) {
            tracing::warn!(
                id = %patient.id,
                error = %e,
                "stored patient failed validation, re-seeding"
            );
            return Ok(None);
        }
    }

    Ok(Some(records))
}
