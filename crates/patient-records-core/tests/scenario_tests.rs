//! End-to-end scenarios: generate, persist, reload and filter.

use chrono::NaiveDate;

use patient_records_core::filter::{apply_filter, apply_filter_on, FilterSpec};
use patient_records_core::generator::{self, Generator, STATES};
use patient_records_core::models::{BloodType, Gender, Patient};
use patient_records_core::registry::PatientRegistry;
use patient_records_core::store::{MemoryStore, PatientStore, SqliteStore};
use patient_records_core::RegistryConfig;

fn make_patient(id: &str, dob: NaiveDate, state: &str) -> Patient {
    let mut patient = Generator::with_seed(1)
        .generate_one()
        .into_patient(id.to_string(), "2024-01-01T00:00:00+00:00");
    patient.date_of_birth = dob;
    patient.state = state.to_string();
    patient
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn test_age_range_scenario() {
    let now = date(2024, 6, 1);
    let records = vec![
        make_patient("20", date(2004, 5, 1), "CA"),
        make_patient("45", date(1979, 5, 1), "CA"),
        make_patient("70", date(1954, 5, 1), "CA"),
    ];

    let spec = FilterSpec::new().with_age_range(30, 60);
    let out = apply_filter_on(&records, &spec, now);

    assert_eq!(out.len(), 1);
    assert_eq!(out[0].id, "45");
}

#[test]
fn test_state_scenario() {
    let now = date(2024, 6, 1);
    let records = vec![
        make_patient("1", date(1980, 1, 1), "CA"),
        make_patient("2", date(1981, 1, 1), "CA"),
        make_patient("3", date(1982, 1, 1), "NY"),
    ];

    let out = apply_filter_on(&records, &FilterSpec::new().with_state("CA"), now);
    let ids: Vec<_> = out.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, vec!["1", "2"]);
}

#[test]
fn test_generate_then_default_filter_returns_all() {
    let patients = generator::generate(20);
    assert_eq!(patients.len(), 20);

    let out = apply_filter(&patients, &FilterSpec::default());
    assert_eq!(out, patients);
}

#[test]
fn test_generated_field_vocabularies() {
    for p in Generator::with_seed(2024).generate(300) {
        assert!(Gender::ALL.contains(&p.gender));
        assert!(BloodType::ALL.contains(&p.blood_type));
        assert!(STATES.contains(&p.state.as_str()));
        assert!(p.zip_code.len() == 5 && p.zip_code.chars().all(|c| c.is_ascii_digit()));
        assert!(p.email.contains('@'));
    }
}

#[test]
fn test_generated_records_survive_json_roundtrip() {
    let store = MemoryStore::new();
    let patients = Generator::with_seed(5).generate(20);
    store.save(&patients).unwrap();

    let raw: serde_json::Value = serde_json::from_str(&store.raw().unwrap()).unwrap();
    let first = &raw.as_array().unwrap()[0];
    for field in [
        "id",
        "firstName",
        "lastName",
        "dateOfBirth",
        "gender",
        "phoneNumber",
        "email",
        "address",
        "city",
        "state",
        "zipCode",
        "insuranceProvider",
        "insuranceId",
        "emergencyContactName",
        "emergencyContactPhone",
        "primaryPhysician",
        "medicalHistory",
        "allergies",
        "medications",
        "bloodType",
        "createdAt",
        "updatedAt",
    ] {
        assert!(first[field].is_string(), "missing string field {}", field);
    }

    assert_eq!(store.load().unwrap(), Some(patients));
}

#[test]
fn test_registry_bootstrap_and_filter_over_sqlite() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("records.db");
    let config = RegistryConfig::default().with_rng_seed(77);

    let mut registry = PatientRegistry::open(&path, config.clone()).unwrap();
    assert_eq!(registry.len(), 20);

    let new = registry.generate_mock_patient();
    let created = registry.create_patient(new).unwrap();

    let spec = FilterSpec::new().with_search(created.email.to_uppercase());
    let found = registry.filtered(&spec);
    assert!(found.iter().any(|p| p.id == created.id));
    drop(registry);

    // Second open loads the persisted collection instead of seeding again.
    let store = SqliteStore::open(&path).unwrap();
    let stored = store.load().unwrap().unwrap();
    assert_eq!(stored.len(), 21);
    assert_eq!(stored.last().map(|p| p.id.as_str()), Some(created.id.as_str()));

    let reopened = PatientRegistry::bootstrap(store, config).unwrap();
    assert_eq!(reopened.records(), stored.as_slice());
}
