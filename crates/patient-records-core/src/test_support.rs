//! Shared fixtures for unit tests.

use chrono::NaiveDate;

use crate::models::{BloodType, Gender, NewPatient, Patient};

pub(crate) fn sample_new_patient() -> NewPatient {
    NewPatient {
        first_name: "Jane".into(),
        last_name: "Smith".into(),
        date_of_birth: NaiveDate::from_ymd_opt(1980, 6, 15).unwrap(),
        gender: Gender::Female,
        phone_number: "(555) 123-4567".into(),
        email: "jane.smith@gmail.com".into(),
        address: "12 Oak St".into(),
        city: "Boston".into(),
        state: "MA".into(),
        zip_code: "02115".into(),
        insurance_provider: "Aetna".into(),
        insurance_id: "AB12345678".into(),
        emergency_contact_name: "John Smith".into(),
        emergency_contact_phone: "(555) 765-4321".into(),
        primary_physician: "Dr. Jones".into(),
        medical_history: "None".into(),
        allergies: "Penicillin".into(),
        medications: "None".into(),
        blood_type: BloodType::ONegative,
    }
}

/// A stored patient with the given id, name and birth date.
pub(crate) fn patient(id: &str, first: &str, last: &str, dob: (i32, u32, u32)) -> Patient {
    let mut new = sample_new_patient();
    new.first_name = first.into();
    new.last_name = last.into();
    new.email = format!("{}.{}@gmail.com", first.to_lowercase(), last.to_lowercase());
    new.date_of_birth = NaiveDate::from_ymd_opt(dob.0, dob.1, dob.2).unwrap();
    new.into_patient(id.into(), "2024-01-01T00:00:00+00:00")
}
