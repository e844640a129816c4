//! Filter engine.
//!
//! A pure function of `(records, spec)`: the source collection is never
//! modified and the result keeps the input order. Every active predicate must
//! pass (logical AND across fields).

mod projection;
mod spec;

pub use projection::*;
pub use spec::*;

use chrono::NaiveDate;

use crate::models::Patient;

/// Apply `spec` to `records` using today's local date for ages.
pub fn apply_filter(records: &[Patient], spec: &FilterSpec) -> Vec<Patient> {
    apply_filter_on(records, spec, chrono::Local::now().date_naive())
}

/// Apply `spec` to `records`, computing ages relative to `today`.
pub fn apply_filter_on(records: &[Patient], spec: &FilterSpec, today: NaiveDate) -> Vec<Patient> {
    filter_refs(records, spec, today).into_iter().cloned().collect()
}

/// Borrowing variant of [`apply_filter_on`].
pub fn filter_refs<'a>(
    records: &'a [Patient],
    spec: &FilterSpec,
    today: NaiveDate,
) -> Vec<&'a Patient> {
    let search = lowered_search(spec);
    records
        .iter()
        .filter(|p| matches_with(p, spec, search.as_deref(), today))
        .collect()
}

/// Evaluate every active predicate of `spec` against one record.
pub fn matches(patient: &Patient, spec: &FilterSpec, today: NaiveDate) -> bool {
    let search = lowered_search(spec);
    matches_with(patient, spec, search.as_deref(), today)
}

/// The raw search field, lower-cased, when the predicate is active.
///
/// Only the activity check trims; surrounding spaces stay part of the term.
fn lowered_search(spec: &FilterSpec) -> Option<String> {
    spec.search_term().map(|_| spec.search.to_lowercase())
}

/// `search` is the already lower-cased term.
fn matches_with(
    patient: &Patient,
    spec: &FilterSpec,
    search: Option<&str>,
    today: NaiveDate,
) -> bool {
    search.map_or(true, |term| matches_search(patient, term))
        && exact(&spec.gender, patient.gender.as_str())
        && exact(&spec.state, &patient.state)
        && exact(&spec.insurance_provider, &patient.insurance_provider)
        && exact(&spec.blood_type, patient.blood_type.as_str())
        && spec
            .age_range
            .contains(age_on(patient.date_of_birth, today))
}

/// Case-insensitive over names and email; the phone is matched raw.
fn matches_search(patient: &Patient, term: &str) -> bool {
    patient.first_name.to_lowercase().contains(term)
        || patient.last_name.to_lowercase().contains(term)
        || patient.email.to_lowercase().contains(term)
        || patient.phone_number.contains(term)
}

/// Empty filter values impose no constraint.
fn exact(wanted: &str, actual: &str) -> bool {
    wanted.is_empty() || wanted == actual
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BloodType, Gender};
    use crate::test_support::patient;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
    }

    fn ids(records: &[Patient]) -> Vec<&str> {
        records.iter().map(|p| p.id.as_str()).collect()
    }

    #[test]
    fn test_default_spec_returns_everything_in_order() {
        let records = vec![
            patient("1", "Amy", "Lee", (1950, 1, 1)),
            patient("2", "Bob", "Ray", (2000, 1, 1)),
            patient("3", "Cat", "Moe", (1980, 1, 1)),
        ];
        let out = apply_filter_on(&records, &FilterSpec::default(), today());
        assert_eq!(out, records);
    }

    #[test]
    fn test_age_range_selects_middle_record() {
        let records = vec![
            patient("young", "Amy", "Lee", (2004, 1, 1)),
            patient("middle", "Bob", "Ray", (1979, 1, 1)),
            patient("old", "Cat", "Moe", (1954, 1, 1)),
        ];
        let spec = FilterSpec::new().with_age_range(30, 60);
        assert_eq!(ids(&apply_filter_on(&records, &spec, today())), vec!["middle"]);
    }

    #[test]
    fn test_age_range_bounds_are_inclusive() {
        // Turns 30 on the reference date.
        let records = vec![patient("1", "Amy", "Lee", (1994, 6, 1))];
        let spec = FilterSpec::new().with_age_range(30, 30);
        assert_eq!(apply_filter_on(&records, &spec, today()).len(), 1);

        // One day short of 30.
        let records = vec![patient("2", "Amy", "Lee", (1994, 6, 2))];
        assert!(apply_filter_on(&records, &spec, today()).is_empty());
    }

    #[test]
    fn test_inverted_age_range_matches_nothing() {
        let records = vec![
            patient("1", "Amy", "Lee", (1950, 1, 1)),
            patient("2", "Bob", "Ray", (2000, 1, 1)),
        ];
        let spec = FilterSpec::new().with_age_range(60, 30);
        assert!(apply_filter_on(&records, &spec, today()).is_empty());
    }

    #[test]
    fn test_state_filter_preserves_order() {
        let mut a = patient("a", "Amy", "Lee", (1980, 1, 1));
        let mut b = patient("b", "Bob", "Ray", (1980, 1, 1));
        let mut c = patient("c", "Cat", "Moe", (1980, 1, 1));
        a.state = "CA".into();
        b.state = "CA".into();
        c.state = "NY".into();
        let records = vec![a, c, b];

        let out = apply_filter_on(&records, &FilterSpec::new().with_state("CA"), today());
        assert_eq!(ids(&out), vec!["a", "b"]);
    }

    #[test]
    fn test_search_is_case_insensitive_on_names_and_email() {
        let mut a = patient("a", "Maria", "Lopez", (1980, 1, 1));
        a.email = "MLOPEZ@Example.com".into();
        let b = patient("b", "John", "Smith", (1980, 1, 1));
        let records = vec![a, b];

        let by_first = FilterSpec::new().with_search("MARIA");
        assert_eq!(ids(&apply_filter_on(&records, &by_first, today())), vec!["a"]);

        let by_last = FilterSpec::new().with_search("smi");
        assert_eq!(ids(&apply_filter_on(&records, &by_last, today())), vec!["b"]);

        let by_email = FilterSpec::new().with_search("example.COM");
        assert_eq!(ids(&apply_filter_on(&records, &by_email, today())), vec!["a"]);
    }

    #[test]
    fn test_search_matches_phone_substring() {
        let mut a = patient("a", "Amy", "Lee", (1980, 1, 1));
        a.phone_number = "(312) 555-7788".into();
        let mut b = patient("b", "Bob", "Ray", (1980, 1, 1));
        b.phone_number = "(212) 444-1234".into();
        let records = vec![a, b];

        let spec = FilterSpec::new().with_search("555-77");
        assert_eq!(ids(&apply_filter_on(&records, &spec, today())), vec!["a"]);

        let spec = FilterSpec::new().with_search("(212)");
        assert_eq!(ids(&apply_filter_on(&records, &spec, today())), vec!["b"]);

        let spec = FilterSpec::new().with_search(") 444");
        assert_eq!(ids(&apply_filter_on(&records, &spec, today())), vec!["b"]);
    }

    #[test]
    fn test_padded_search_does_not_match_unpadded_name() {
        let records = vec![patient("a", "Maria", "Smith", (1980, 1, 1))];

        let spec = FilterSpec::new().with_search(" smith");
        assert!(apply_filter_on(&records, &spec, today()).is_empty());
        assert!(!matches(&records[0], &spec, today()));

        let spec = FilterSpec::new().with_search("smith");
        assert_eq!(ids(&apply_filter_on(&records, &spec, today())), vec!["a"]);
    }

    #[test]
    fn test_whitespace_search_is_inactive() {
        let records = vec![patient("a", "Amy", "Lee", (1980, 1, 1))];
        let spec = FilterSpec::new().with_search("   ");
        assert_eq!(apply_filter_on(&records, &spec, today()).len(), 1);
    }

    #[test]
    fn test_predicates_are_conjunctive() {
        let mut a = patient("a", "Amy", "Lee", (1980, 1, 1));
        a.gender = Gender::Female;
        a.blood_type = BloodType::APositive;
        a.insurance_provider = "Cigna".into();
        let mut b = a.clone();
        b.id = "b".into();
        b.blood_type = BloodType::BPositive;
        let mut c = a.clone();
        c.id = "c".into();
        c.gender = Gender::Male;
        let records = vec![a, b, c];

        let spec = FilterSpec::new()
            .with_gender("Female")
            .with_blood_type("A+")
            .with_insurance_provider("Cigna");
        assert_eq!(ids(&apply_filter_on(&records, &spec, today())), vec!["a"]);

        let spec = spec.with_insurance_provider("Aetna");
        assert!(apply_filter_on(&records, &spec, today()).is_empty());
    }

    #[test]
    fn test_exact_match_is_case_sensitive() {
        let records = vec![patient("a", "Amy", "Lee", (1980, 1, 1))];
        let spec = FilterSpec::new().with_gender("female");
        assert!(apply_filter_on(&records, &spec, today()).is_empty());
    }

    #[test]
    fn test_source_is_not_mutated_and_calls_are_idempotent() {
        let records = vec![
            patient("1", "Amy", "Lee", (1950, 1, 1)),
            patient("2", "Bob", "Ray", (2000, 1, 1)),
        ];
        let before = records.clone();
        let spec = FilterSpec::new().with_search("a");

        let first = apply_filter_on(&records, &spec, today());
        let second = apply_filter_on(&records, &spec, today());
        assert_eq!(first, second);
        assert_eq!(records, before);
    }

    #[test]
    fn test_matches_agrees_with_apply() {
        let records = vec![
            patient("1", "Amy", "Lee", (1950, 1, 1)),
            patient("2", "Bob", "Ray", (2000, 1, 1)),
        ];
        let spec = FilterSpec::new().with_age_range(0, 40);
        let kept: Vec<_> = records
            .iter()
            .filter(|p| matches(p, &spec, today()))
            .cloned()
            .collect();
        assert_eq!(kept, apply_filter_on(&records, &spec, today()));
        assert_eq!(ids(&kept), vec!["2"]);
    }
}
