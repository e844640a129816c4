//! Patient models.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, FixedOffset, NaiveDate};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Structural validation failures for a patient record.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Invalid email address: {0}")]
    InvalidEmail(String),

    #[error("Date of birth {0} is in the future")]
    FutureDateOfBirth(NaiveDate),

    #[error("updatedAt ({updated_at}) precedes createdAt ({created_at})")]
    AuditOrder {
        created_at: String,
        updated_at: String,
    },

    #[error("Unknown gender: {0}")]
    UnknownGender(String),

    #[error("Unknown blood type: {0}")]
    UnknownBloodType(String),

    #[error("Invalid date of birth: {0}")]
    InvalidDate(String),

    #[error("Invalid {field} timestamp: {value}")]
    InvalidTimestamp { field: &'static str, value: String },
}

/// Administrative gender.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    pub const ALL: [Gender; 3] = [Gender::Male, Gender::Female, Gender::Other];

    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
            Gender::Other => "Other",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Gender {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Gender::ALL
            .into_iter()
            .find(|g| g.as_str() == s)
            .ok_or_else(|| ValidationError::UnknownGender(s.to_string()))
    }
}

/// ABO group with Rh factor.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum BloodType {
    #[serde(rename = "A+")]
    APositive,
    #[serde(rename = "A-")]
    ANegative,
    #[serde(rename = "B+")]
    BPositive,
    #[serde(rename = "B-")]
    BNegative,
    #[serde(rename = "AB+")]
    AbPositive,
    #[serde(rename = "AB-")]
    AbNegative,
    #[serde(rename = "O+")]
    OPositive,
    #[serde(rename = "O-")]
    ONegative,
}

impl BloodType {
    pub const ALL: [BloodType; 8] = [
        BloodType::APositive,
        BloodType::ANegative,
        BloodType::BPositive,
        BloodType::BNegative,
        BloodType::AbPositive,
        BloodType::AbNegative,
        BloodType::OPositive,
        BloodType::ONegative,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BloodType::APositive => "A+",
            BloodType::ANegative => "A-",
            BloodType::BPositive => "B+",
            BloodType::BNegative => "B-",
            BloodType::AbPositive => "AB+",
            BloodType::AbNegative => "AB-",
            BloodType::OPositive => "O+",
            BloodType::ONegative => "O-",
        }
    }
}

impl fmt::Display for BloodType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BloodType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BloodType::ALL
            .into_iter()
            .find(|b| b.as_str() == s)
            .ok_or_else(|| ValidationError::UnknownBloodType(s.to_string()))
    }
}

/// A stored patient record.
///
/// Records are replaced wholesale rather than edited in place. Field names
/// serialize in camelCase, matching the persisted collection format.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Patient {
    /// Unique identifier, assigned at insertion
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    /// Calendar date, serialized as YYYY-MM-DD
    pub date_of_birth: NaiveDate,
    pub gender: Gender,
    /// Formatted as (AAA) PPP-NNNN
    pub phone_number: String,
    pub email: String,
    pub address: String,
    pub city: String,
    /// Two-letter state code
    pub state: String,
    /// 5-digit zip code
    pub zip_code: String,
    pub insurance_provider: String,
    /// Two uppercase letters followed by eight digits
    pub insurance_id: String,
    pub emergency_contact_name: String,
    pub emergency_contact_phone: String,
    pub primary_physician: String,
    pub medical_history: String,
    pub allergies: String,
    pub medications: String,
    pub blood_type: BloodType,
    /// Creation timestamp (RFC 3339)
    pub created_at: String,
    /// Last update timestamp (RFC 3339)
    pub updated_at: String,
}

impl Patient {
    /// Check the structural contract of a record against `today`.
    pub fn validate(&self, today: NaiveDate) -> Result<(), ValidationError> {
        if self.id.trim().is_empty() {
            return Err(ValidationError::MissingField("id"));
        }
        self.details().validate(today)?;

        let created = parse_timestamp("createdAt", &self.created_at)?;
        let updated = parse_timestamp("updatedAt", &self.updated_at)?;
        if updated < created {
            return Err(ValidationError::AuditOrder {
                created_at: self.created_at.clone(),
                updated_at: self.updated_at.clone(),
            });
        }

        Ok(())
    }

    /// Strip identity and audit fields.
    pub fn details(&self) -> NewPatient {
        NewPatient {
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            date_of_birth: self.date_of_birth,
            gender: self.gender,
            phone_number: self.phone_number.clone(),
            email: self.email.clone(),
            address: self.address.clone(),
            city: self.city.clone(),
            state: self.state.clone(),
            zip_code: self.zip_code.clone(),
            insurance_provider: self.insurance_provider.clone(),
            insurance_id: self.insurance_id.clone(),
            emergency_contact_name: self.emergency_contact_name.clone(),
            emergency_contact_phone: self.emergency_contact_phone.clone(),
            primary_physician: self.primary_physician.clone(),
            medical_history: self.medical_history.clone(),
            allergies: self.allergies.clone(),
            medications: self.medications.clone(),
            blood_type: self.blood_type,
        }
    }
}

fn parse_timestamp(
    field: &'static str,
    value: &str,
) -> Result<DateTime<FixedOffset>, ValidationError> {
    DateTime::parse_from_rfc3339(value).map_err(|_| ValidationError::InvalidTimestamp {
        field,
        value: value.to_string(),
    })
}

/// A patient without identity or audit fields.
///
/// Produced by single-record generation and by user submission; the caller
/// assigns `id`, `createdAt` and `updatedAt` at insertion time.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewPatient {
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: NaiveDate,
    pub gender: Gender,
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
    pub blood_type: BloodType,
}

impl NewPatient {
    /// Validate the submitted fields against `today`.
    pub fn validate(&self, today: NaiveDate) -> Result<(), ValidationError> {
        if self.first_name.trim().is_empty() {
            return Err(ValidationError::MissingField("firstName"));
        }
        if self.last_name.trim().is_empty() {
            return Err(ValidationError::MissingField("lastName"));
        }
        if !self.email.contains('@') {
            return Err(ValidationError::InvalidEmail(self.email.clone()));
        }
        if self.date_of_birth > today {
            return Err(ValidationError::FutureDateOfBirth(self.date_of_birth));
        }
        Ok(())
    }

    /// Stamp identity and audit fields; both timestamps are set to `now`.
    pub fn into_patient(self, id: String, now: &str) -> Patient {
        Patient {
            id,
            first_name: self.first_name,
            last_name: self.last_name,
            date_of_birth: self.date_of_birth,
            gender: self.gender,
            phone_number: self.phone_number,
            email: self.email,
            address: self.address,
            city: self.city,
            state: self.state,
            zip_code: self.zip_code,
            insurance_provider: self.insurance_provider,
            insurance_id: self.insurance_id,
            emergency_contact_name: self.emergency_contact_name,
            emergency_contact_phone: self.emergency_contact_phone,
            primary_physician: self.primary_physician,
            medical_history: self.medical_history,
            allergies: self.allergies,
            medications: self.medications,
            blood_type: self.blood_type,
            created_at: now.to_string(),
            updated_at: now.to_string(),
        }
    }
}
