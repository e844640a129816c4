//! Patient Records Core Library
//!
//! Local-first patient record manager: a client-side collection of patient
//! records, a multi-field filter engine and a synthetic data generator.
//!
//! # Architecture
//!
//! ```text
//!             PatientStore (SQLite / memory)
//!                        │
//!            load ───────┴──────── absent or malformed?
//!              │                          │
//!              │                  Generator::generate(20)
//!              │                          │
//!              │                        save
//!              ▼                          │
//!       PatientRegistry ◄─────────────────┘
//!              │
//!              │   FilterSpec (search, gender, state,
//!              │               insurance, blood type, age range)
//!              ▼
//!        apply_filter ──► derived view ──► PatientRow pages
//! ```
//!
//! # Core Principle
//!
//! **Filtering never mutates the collection.** The derived view is a pure
//! function of the records and the filter snapshot, in input order.
//!
//! # Modules
//!
//! - [`models`]: Domain types (Patient, NewPatient, Gender, BloodType)
//! - [`generator`]: Synthetic patient generator and its vocabularies
//! - [`filter`]: Filter specification, engine and display projections
//! - [`store`]: Persistence adapters (SQLite key-value, in-memory)
//! - [`registry`]: Composition root with bootstrap seeding
//! - [`config`]: Registry configuration

pub mod config;
pub mod filter;
pub mod generator;
pub mod models;
pub mod registry;
pub mod store;

#[cfg(test)]
mod test_support;

// Re-export commonly used types
pub use config::RegistryConfig;
pub use filter::{
    age_on, apply_filter, apply_filter_on, full_name, paginate, AgeRange, FilterSpec, Page,
    PatientRow,
};
pub use generator::{generate, generate_one, Generator, GeneratorError};
pub use models::{BloodType, Gender, NewPatient, Patient, ValidationError};
pub use registry::{PatientRegistry, RegistryError};
pub use store::{MemoryStore, PatientStore, SqliteStore, StoreError};

// UniFFI setup - using proc macros
uniffi::setup_scaffolding!();

use std::sync::{Arc, Mutex};

use chrono::NaiveDate;

// =========================================================================
// FFI Error Type
// =========================================================================

#[derive(Debug, thiserror::Error, uniffi::Error)]
pub enum PatientRecordsError {
    #[error("Storage error: {0}")]
    StorageError(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Not found: {0}")]
    NotFound(String),
}

impl From<StoreError> for PatientRecordsError {
    fn from(e: StoreError) -> Self {
        PatientRecordsError::StorageError(e.to_string())
    }
}

impl From<RegistryError> for PatientRecordsError {
    fn from(e: RegistryError) -> Self {
        match e {
            RegistryError::Store(e) => e.into(),
            other => PatientRecordsError::InvalidInput(other.to_string()),
        }
    }
}

impl From<ValidationError> for PatientRecordsError {
    fn from(e: ValidationError) -> Self {
        PatientRecordsError::InvalidInput(e.to_string())
    }
}

impl From<serde_json::Error> for PatientRecordsError {
    fn from(e: serde_json::Error) -> Self {
        PatientRecordsError::InvalidInput(e.to_string())
    }
}

impl<T> From<std::sync::PoisonError<T>> for PatientRecordsError {
    fn from(e: std::sync::PoisonError<T>) -> Self {
        PatientRecordsError::StorageError(format!("Lock poisoned: {}", e))
    }
}

// =========================================================================
// Factory Functions (exported to FFI)
// =========================================================================

/// Open or create a registry at the given path, seeding it on first use.
#[uniffi::export]
pub fn open_registry(path: String) -> Result<Arc<PatientRecordsCore>, PatientRecordsError> {
    let registry = PatientRegistry::open(&path, RegistryConfig::default())?;
    Ok(PatientRecordsCore::wrap(registry))
}

/// Open a registry with a JSON-encoded [`RegistryConfig`].
#[uniffi::export]
pub fn open_registry_with_config(
    path: String,
    config_json: String,
) -> Result<Arc<PatientRecordsCore>, PatientRecordsError> {
    let config = RegistryConfig::from_json(&config_json)?;
    let registry = PatientRegistry::open(&path, config)?;
    Ok(PatientRecordsCore::wrap(registry))
}

/// Create an in-memory registry (for testing).
#[uniffi::export]
pub fn open_registry_in_memory() -> Result<Arc<PatientRecordsCore>, PatientRecordsError> {
    let registry = PatientRegistry::open_in_memory(RegistryConfig::default())?;
    Ok(PatientRecordsCore::wrap(registry))
}

// =========================================================================
// Main API Object
// =========================================================================

/// Thread-safe registry wrapper for FFI.
#[derive(uniffi::Object)]
pub struct PatientRecordsCore {
    registry: Arc<Mutex<PatientRegistry<SqliteStore>>>,
}

impl PatientRecordsCore {
    fn wrap(registry: PatientRegistry<SqliteStore>) -> Arc<Self> {
        Arc::new(Self {
            registry: Arc::new(Mutex::new(registry)),
        })
    }
}

#[uniffi::export]
impl PatientRecordsCore {
    // =========================================================================
    // Patient Operations
    // =========================================================================

    /// All patients in insertion order.
    pub fn list_patients(&self) -> Result<Vec<FfiPatient>, PatientRecordsError> {
        let registry = self.registry.lock()?;
        Ok(registry.records().iter().cloned().map(Into::into).collect())
    }

    /// Number of stored patients.
    pub fn patient_count(&self) -> Result<u32, PatientRecordsError> {
        let registry = self.registry.lock()?;
        Ok(registry.len() as u32)
    }

    /// Get a patient by ID.
    pub fn get_patient(&self, id: String) -> Result<FfiPatient, PatientRecordsError> {
        let registry = self.registry.lock()?;
        registry
            .get(&id)
            .cloned()
            .map(Into::into)
            .ok_or(PatientRecordsError::NotFound(id))
    }

    /// Validate, store and return a submitted patient.
    pub fn create_patient(
        &self,
        patient: FfiNewPatient,
    ) -> Result<FfiPatient, PatientRecordsError> {
        let new = NewPatient::try_from(patient)?;
        let mut registry = self.registry.lock()?;
        let created = registry.create_patient(new)?;
        Ok(created.into())
    }

    /// A generated submission for prefilling the creation form.
    pub fn generate_mock_patient(&self) -> Result<FfiNewPatient, PatientRecordsError> {
        let mut registry = self.registry.lock()?;
        Ok(registry.generate_mock_patient().into())
    }

    /// Append generated demo patients; returns the number added.
    pub fn append_generated(&self, count: i64) -> Result<u32, PatientRecordsError> {
        let mut registry = self.registry.lock()?;
        Ok(registry.append_generated(count)? as u32)
    }

    // =========================================================================
    // Filter Operations
    // =========================================================================

    /// Patients matching the filter, in insertion order.
    pub fn filter_patients(
        &self,
        spec: FfiFilterSpec,
    ) -> Result<Vec<FfiPatient>, PatientRecordsError> {
        let registry = self.registry.lock()?;
        let spec = FilterSpec::from(spec);
        Ok(registry.filtered(&spec).into_iter().map(Into::into).collect())
    }

    /// One page of table rows for the patients matching the filter.
    pub fn patient_rows(
        &self,
        spec: FfiFilterSpec,
        page: u32,
        page_size: u32,
    ) -> Result<FfiPatientPage, PatientRecordsError> {
        let registry = self.registry.lock()?;
        let spec = FilterSpec::from(spec);
        let today = chrono::Local::now().date_naive();
        let page = registry.rows(&spec, page as usize, page_size as usize, today);
        Ok(page.into())
    }
}

// =========================================================================
// FFI Types
// =========================================================================

/// FFI-safe patient.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiPatient {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: String,
    pub gender: String,
    pub phone_number: String,
    pub email: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub insurance_provider: String,
    pub insurance_id: String,
    pub emergency_contact_name: String,
    pub emergency_contact_phone: String,
    pub primary_physician: String,
    pub medical_history: String,
    pub allergies: String,
    pub medications: String,
    pub blood_type: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Patient> for FfiPatient {
    fn from(patient: Patient) -> Self {
        Self {
            id: patient.id,
            first_name: patient.first_name,
            last_name: patient.last_name,
            date_of_birth: patient.date_of_birth.to_string(),
            gender: patient.gender.to_string(),
            phone_number: patient.phone_number,
            email: patient.email,
            address: patient.address,
            city: patient.city,
            state: patient.state,
            zip_code: patient.zip_code,
            insurance_provider: patient.insurance_provider,
            insurance_id: patient.insurance_id,
            emergency_contact_name: patient.emergency_contact_name,
            emergency_contact_phone: patient.emergency_contact_phone,
            primary_physician: patient.primary_physician,
            medical_history: patient.medical_history,
            allergies: patient.allergies,
            medications: patient.medications,
            blood_type: patient.blood_type.to_string(),
            created_at: patient.created_at,
            updated_at: patient.updated_at,
        }
    }
}

/// FFI-safe patient submission (no identity or audit fields).
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiNewPatient {
    pub first_name: String,
    pub last_name: String,
    /// YYYY-MM-DD
    pub date_of_birth: String,
    pub gender: String,
    pub phone_number: String,
    pub email: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub insurance_provider: String,
    pub insurance_id: String,
    pub emergency_contact_name: String,
    pub emergency_contact_phone: String,
    pub primary_physician: String,
    pub medical_history: String,
    pub allergies: String,
    pub medications: String,
    pub blood_type: String,
}

impl From<NewPatient> for FfiNewPatient {
    fn from(patient: NewPatient) -> Self {
        Self {
            first_name: patient.first_name,
            last_name: patient.last_name,
            date_of_birth: patient.date_of_birth.to_string(),
            gender: patient.gender.to_string(),
            phone_number: patient.phone_number,
            email: patient.email,
            address: patient.address,
            city: patient.city,
            state: patient.state,
            zip_code: patient.zip_code,
            insurance_provider: patient.insurance_provider,
            insurance_id: patient.insurance_id,
            emergency_contact_name: patient.emergency_contact_name,
            emergency_contact_phone: patient.emergency_contact_phone,
            primary_physician: patient.primary_physician,
            medical_history: patient.medical_history,
            allergies: patient.allergies,
            medications: patient.medications,
            blood_type: patient.blood_type.to_string(),
        }
    }
}

impl TryFrom<FfiNewPatient> for NewPatient {
    type Error = ValidationError;

    fn try_from(patient: FfiNewPatient) -> Result<Self, Self::Error> {
        let date_of_birth = NaiveDate::parse_from_str(&patient.date_of_birth, "%Y-%m-%d")
            .map_err(|_| ValidationError::InvalidDate(patient.date_of_birth.clone()))?;

        Ok(NewPatient {
            gender: patient.gender.parse()?,
            blood_type: patient.blood_type.parse()?,
            date_of_birth,
            first_name: patient.first_name,
            last_name: patient.last_name,
            phone_number: patient.phone_number,
            email: patient.email,
            address: patient.address,
            city: patient.city,
            state: patient.state,
            zip_code: patient.zip_code,
            insurance_provider: patient.insurance_provider,
            insurance_id: patient.insurance_id,
            emergency_contact_name: patient.emergency_contact_name,
            emergency_contact_phone: patient.emergency_contact_phone,
            primary_physician: patient.primary_physician,
            medical_history: patient.medical_history,
            allergies: patient.allergies,
            medications: patient.medications,
        })
    }
}

/// FFI-safe filter snapshot.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiFilterSpec {
    pub search: String,
    pub gender: String,
    pub state: String,
    pub insurance_provider: String,
    pub blood_type: String,
    pub age_min: i32,
    pub age_max: i32,
}

impl From<FfiFilterSpec> for FilterSpec {
    fn from(spec: FfiFilterSpec) -> Self {
        FilterSpec {
            search: spec.search,
            gender: spec.gender,
            state: spec.state,
            insurance_provider: spec.insurance_provider,
            blood_type: spec.blood_type,
            age_range: AgeRange::new(spec.age_min, spec.age_max),
        }
    }
}

impl From<FilterSpec> for FfiFilterSpec {
    fn from(spec: FilterSpec) -> Self {
        Self {
            search: spec.search,
            gender: spec.gender,
            state: spec.state,
            insurance_provider: spec.insurance_provider,
            blood_type: spec.blood_type,
            age_min: spec.age_range.min,
            age_max: spec.age_range.max,
        }
    }
}

/// FFI-safe table row.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiPatientRow {
    pub id: String,
    pub full_name: String,
    pub age: i32,
    pub gender: String,
    pub phone_number: String,
    pub email: String,
    pub state: String,
    pub insurance_provider: String,
    pub blood_type: String,
    pub primary_physician: String,
}

impl From<PatientRow> for FfiPatientRow {
    fn from(row: PatientRow) -> Self {
        Self {
            id: row.id,
            full_name: row.full_name,
            age: row.age,
            gender: row.gender,
            phone_number: row.phone_number,
            email: row.email,
            state: row.state,
            insurance_provider: row.insurance_provider,
            blood_type: row.blood_type,
            primary_physician: row.primary_physician,
        }
    }
}

/// FFI-safe page of table rows.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiPatientPage {
    pub rows: Vec<FfiPatientRow>,
    pub page: u32,
    pub page_size: u32,
    pub total: u32,
    pub page_count: u32,
}

impl From<Page<PatientRow>> for FfiPatientPage {
    fn from(page: Page<PatientRow>) -> Self {
        let page_count = page.page_count() as u32;
        Self {
            page: page.page as u32,
            page_size: page.page_size as u32,
            total: page.total as u32,
            page_count,
            rows: page.items.into_iter().map(Into::into).collect(),
        }
    }
}
