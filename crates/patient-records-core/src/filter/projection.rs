//! Derived columns shared by the filter engine and the table view.
//!
//! Filtering and display must agree on age at year boundaries, so both go
//! through [`age_on`].

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::models::Patient;

/// Default table page size.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Whole years elapsed between `date_of_birth` and `today`.
///
/// One is subtracted when this year's birthday has not happened yet. A birth
/// date after `today` yields a negative age.
pub fn age_on(date_of_birth: NaiveDate, today: NaiveDate) -> i32 {
    let mut age = today.year() - date_of_birth.year();
    if (today.month(), today.day()) < (date_of_birth.month(), date_of_birth.day()) {
        age -= 1;
    }
    age
}

/// `firstName lastName`.
pub fn full_name(patient: &Patient) -> String {
    format!("{} {}", patient.first_name, patient.last_name)
}

/// One row of the patient table.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PatientRow {
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

impl PatientRow {
    pub fn project(patient: &Patient, today: NaiveDate) -> Self {
        Self {
            id: patient.id.clone(),
            full_name: full_name(patient),
            age: age_on(patient.date_of_birth, today),
            gender: patient.gender.to_string(),
            phone_number: patient.phone_number.clone(),
            email: patient.email.clone(),
            state: patient.state.clone(),
            insurance_provider: patient.insurance_provider.clone(),
            blood_type: patient.blood_type.to_string(),
            primary_physician: patient.primary_physician.clone(),
        }
    }
}

/// A page of items plus the size of the full result.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub items: Vec<T>,
    /// Zero-based page index
    pub page: usize,
    pub page_size: usize,
    pub total: usize,
}

impl<T> Page<T> {
    pub fn page_count(&self) -> usize {
        if self.page_size == 0 {
            0
        } else {
            self.total.div_ceil(self.page_size)
        }
    }
}

/// Slice `items` into the zero-based `page` of `page_size` entries.
///
/// Pages past the end are empty; a zero page size yields no items.
pub fn paginate<T: Clone>(items: &[T], page: usize, page_size: usize) -> Page<T> {
    let start = page.saturating_mul(page_size).min(items.len());
    let end = start.saturating_add(page_size).min(items.len());
    Page {
        items: items[start..end].to_vec(),
        page,
        page_size,
        total: items.len(),
    }
}
