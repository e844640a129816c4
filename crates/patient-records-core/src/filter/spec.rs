//! Filter specification value object.

use serde::{Deserialize, Serialize};

/// Inclusive age bounds in whole years.
///
/// `min > max` is a legal value that matches nothing.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct AgeRange {
    pub min: i32,
    pub max: i32,
}

impl AgeRange {
    pub const DEFAULT_MIN: i32 = 0;
    pub const DEFAULT_MAX: i32 = 100;

    pub fn new(min: i32, max: i32) -> Self {
        Self { min, max }
    }

    /// Check whether `age` lies within both bounds.
    pub fn contains(&self, age: i32) -> bool {
        self.min <= age && age <= self.max
    }

    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }
}

impl Default for AgeRange {
    fn default() -> Self {
        Self {
            min: Self::DEFAULT_MIN,
            max: Self::DEFAULT_MAX,
        }
    }
}

impl From<(i32, i32)> for AgeRange {
    fn from((min, max): (i32, i32)) -> Self {
        Self { min, max }
    }
}

/// Snapshot of the active query.
///
/// Empty strings mean "no constraint" for the categorical fields; the age
/// range is always applied.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct FilterSpec {
    /// Case-insensitive substring over name and email, raw substring over phone
    pub search: String,
    pub gender: String,
    pub state: String,
    pub insurance_provider: String,
    pub blood_type: String,
    pub age_range: AgeRange,
}

impl FilterSpec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    pub fn with_gender(mut self, gender: impl Into<String>) -> Self {
        self.gender = gender.into();
        self
    }

    pub fn with_state(mut self, state: impl Into<String>) -> Self {
        self.state = state.into();
        self
    }

    pub fn with_insurance_provider(mut self, provider: impl Into<String>) -> Self {
        self.insurance_provider = provider.into();
        self
    }

    pub fn with_blood_type(mut self, blood_type: impl Into<String>) -> Self {
        self.blood_type = blood_type.into();
        self
    }

    pub fn with_age_range(mut self, min: i32, max: i32) -> Self {
        self.age_range = AgeRange::new(min, max);
        self
    }

    /// The trimmed search term, or `None` when the field is blank.
    ///
    /// This only decides whether the search predicate is active; matching
    /// uses the raw `search` field.
    pub fn search_term(&self) -> Option<&str> {
        let term = self.search.trim();
        (!term.is_empty()).then_some(term)
    }

    /// Number of fields that differ from their defaults.
    ///
    /// The search field counts when non-empty (untrimmed), matching what the
    /// filter panel shows as active.
    pub fn active_count(&self) -> usize {
        let text_fields = [
            &self.search,
            &self.gender,
            &self.state,
            &self.insurance_provider,
            &self.blood_type,
        ];
        let active_text = text_fields.iter().filter(|f| !f.is_empty()).count();
        active_text + usize::from(!self.age_range.is_default())
    }

    pub fn is_default(&self) -> bool {
        self.active_count() == 0
    }

    /// Reset every field to its default.
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
