//! Synthetic patient generator.
//!
//! Every record is sampled independently: names, categorical fields and
//! clinical entries are drawn uniformly from the fixed vocabularies, and the
//! formatted fields (phone, zip, insurance id, address) are synthesized from
//! uniformly sampled digits and letters.

mod vocabulary;

pub use vocabulary::*;

use chrono::{Duration, NaiveDate};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use thiserror::Error;

use crate::models::{BloodType, Gender, NewPatient, Patient};

/// Generator errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeneratorError {
    #[error("Record count must be non-negative, got {0}")]
    NegativeCount(i64),
}

pub type GeneratorResult<T> = Result<T, GeneratorError>;

/// Earliest generated date of birth.
pub const MIN_BIRTH_DATE: (i32, u32, u32) = (1930, 1, 1);
/// Latest generated date of birth (inclusive).
pub const MAX_BIRTH_DATE: (i32, u32, u32) = (2010, 12, 31);

/// Produces realistic but fictional patient records.
pub struct Generator<R: Rng = StdRng> {
    rng: R,
}

impl Default for Generator<StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl Generator<StdRng> {
    /// Create a generator seeded from OS entropy.
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Create a deterministic generator (reproducible data sets).
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl<R: Rng> Generator<R> {
    /// Wrap an existing random source.
    pub fn from_rng(rng: R) -> Self {
        Self { rng }
    }

    /// Generate `count` records stamped with the current instant.
    ///
    /// Ids are the 1-based generation index, so they are only unique within a
    /// single call. Callers merging batches must re-number.
    pub fn generate(&mut self, count: usize) -> Vec<Patient> {
        let now = chrono::Utc::now().to_rfc3339();
        self.generate_at(count, &now)
    }

    /// Generate `count` records with both audit timestamps set to `now`.
    pub fn generate_at(&mut self, count: usize, now: &str) -> Vec<Patient> {
        let patients: Vec<Patient> = (1..=count)
            .map(|index| self.generate_one().into_patient(index.to_string(), now))
            .collect();

        tracing::debug!(count = patients.len(), "generated synthetic patients");
        patients
    }

    /// Generate from a signed count, rejecting negative values.
    pub fn generate_checked(&mut self, count: i64) -> GeneratorResult<Vec<Patient>> {
        let count = usize::try_from(count).map_err(|_| GeneratorError::NegativeCount(count))?;
        Ok(self.generate(count))
    }

    /// Generate a single record without identity or audit fields.
    pub fn generate_one(&mut self) -> NewPatient {
        let first_name = self.pick(FIRST_NAMES);
        let last_name = self.pick(LAST_NAMES);
        let email = self.email(first_name, last_name);
        let emergency_contact_name = format!("{} {}", self.pick(FIRST_NAMES), self.pick(LAST_NAMES));

        NewPatient {
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            date_of_birth: self.date_of_birth(),
            gender: self.pick(&Gender::ALL),
            phone_number: self.phone_number(),
            email,
            address: self.address(),
            city: self.pick(CITIES).to_string(),
            state: self.pick(STATES).to_string(),
            zip_code: self.zip_code(),
            insurance_provider: self.pick(INSURANCE_PROVIDERS).to_string(),
            insurance_id: self.insurance_id(),
            emergency_contact_name,
            emergency_contact_phone: self.phone_number(),
            primary_physician: self.pick(PHYSICIANS).to_string(),
            medical_history: self.pick(MEDICAL_CONDITIONS).to_string(),
            allergies: self.pick(ALLERGIES).to_string(),
            medications: self.pick(MEDICATIONS).to_string(),
            blood_type: self.pick(&BloodType::ALL),
        }
    }

    /// Uniform choice from a non-empty vocabulary.
    fn pick<T: Copy>(&mut self, items: &[T]) -> T {
        items[self.rng.gen_range(0..items.len())]
    }

    fn email(&mut self, first_name: &str, last_name: &str) -> String {
        let domain = self.pick(EMAIL_DOMAINS);
        format!(
            "{}.{}@{}",
            first_name.to_lowercase(),
            last_name.to_lowercase(),
            domain
        )
    }

    /// `(AAA) PPP-NNNN` with no leading zeros in any group.
    fn phone_number(&mut self) -> String {
        let area: u32 = self.rng.gen_range(100..=999);
        let prefix: u32 = self.rng.gen_range(100..=999);
        let line: u32 = self.rng.gen_range(1000..=9999);
        format!("({}) {}-{}", area, prefix, line)
    }

    fn date_of_birth(&mut self) -> NaiveDate {
        let (start, end) = birth_date_bounds();
        let span = (end - start).num_days();
        start + Duration::days(self.rng.gen_range(0..=span))
    }

    fn zip_code(&mut self) -> String {
        self.rng.gen_range(10000..=99999u32).to_string()
    }

    fn insurance_id(&mut self) -> String {
        let mut id = String::with_capacity(10);
        for _ in 0..2 {
            id.push(char::from(self.rng.gen_range(b'A'..=b'Z')));
        }
        for _ in 0..8 {
            id.push(char::from(self.rng.gen_range(b'0'..=b'9')));
        }
        id
    }

    fn address(&mut self) -> String {
        let number: u32 = self.rng.gen_range(1..=9999);
        format!(
            "{} {} {}",
            number,
            self.pick(STREET_NAMES),
            self.pick(STREET_SUFFIXES)
        )
    }
}

/// Inclusive date-of-birth bounds for generated records.
pub fn birth_date_bounds() -> (NaiveDate, NaiveDate) {
    let date = |(y, m, d): (i32, u32, u32)| NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default();
    (date(MIN_BIRTH_DATE), date(MAX_BIRTH_DATE))
}

/// Generate `count` records with a fresh entropy-seeded generator.
pub fn generate(count: usize) -> Vec<Patient> {
    Generator::new().generate(count)
}

/// Generate one record without identity or audit fields.
pub fn generate_one() -> NewPatient {
    Generator::new().generate_one()
}
