//! Fixed vocabularies sampled by the synthetic generator.
//!
//! "None" in the clinical lists is a real entry, not a marker for absence.

pub const FIRST_NAMES: &[&str] = &[
    "John", "Jane", "Michael", "Sarah", "David", "Emily", "Robert", "Jessica",
    "William", "Ashley", "James", "Amanda", "Christopher", "Stephanie", "Daniel",
    "Melissa", "Matthew", "Nicole", "Anthony", "Elizabeth", "Mark", "Helen",
    "Donald", "Deborah", "Steven", "Rachel", "Paul", "Carolyn", "Andrew", "Janet",
];

pub const LAST_NAMES: &[&str] = &[
    "Smith", "Johnson", "Williams", "Brown", "Jones", "Garcia", "Miller", "Davis",
    "Rodriguez", "Martinez", "Hernandez", "Lopez", "Gonzalez", "Wilson", "Anderson",
    "Thomas", "Taylor", "Moore", "Jackson", "Martin", "Lee", "Perez", "Thompson",
    "White", "Harris", "Sanchez", "Clark", "Ramirez", "Lewis", "Robinson",
];

pub const CITIES: &[&str] = &[
    "New York", "Los Angeles", "Chicago", "Houston", "Phoenix", "Philadelphia",
    "San Antonio", "San Diego", "Dallas", "San Jose", "Austin", "Jacksonville",
    "Fort Worth", "Columbus", "Charlotte", "San Francisco", "Indianapolis",
    "Seattle", "Denver", "Washington", "Boston", "El Paso", "Nashville", "Detroit",
];

/// The 50 US state codes.
pub const STATES: &[&str] = &[
    "AL", "AK", "AZ", "AR", "CA", "CO", "CT", "DE", "FL", "GA",
    "HI", "ID", "IL", "IN", "IA", "KS", "KY", "LA", "ME", "MD",
    "MA", "MI", "MN", "MS", "MO", "MT", "NE", "NV", "NH", "NJ",
    "NM", "NY", "NC", "ND", "OH", "OK", "OR", "PA", "RI", "SC",
    "SD", "TN", "TX", "UT", "VT", "VA", "WA", "WV", "WI", "WY",
];

pub const INSURANCE_PROVIDERS: &[&str] = &[
    "Aetna", "Anthem", "Blue Cross Blue Shield", "Cigna", "Humana",
    "Kaiser Permanente", "Medicaid", "Medicare", "UnitedHealth", "Other",
];

pub const PHYSICIANS: &[&str] = &[
    "Dr. Smith", "Dr. Johnson", "Dr. Williams", "Dr. Brown", "Dr. Jones",
    "Dr. Garcia", "Dr. Miller", "Dr. Davis", "Dr. Rodriguez", "Dr. Martinez",
];

pub const MEDICAL_CONDITIONS: &[&str] = &[
    "Hypertension", "Diabetes Type 2", "Asthma", "High Cholesterol",
    "Arthritis", "Depression", "Anxiety", "COPD", "Heart Disease", "None",
];

pub const ALLERGIES: &[&str] = &[
    "None", "Penicillin", "Shellfish", "Peanuts", "Latex", "Pollen",
    "Dust Mites", "Pet Dander", "Bee Stings", "Eggs", "Milk",
];

pub const MEDICATIONS: &[&str] = &[
    "None", "Lisinopril", "Metformin", "Albuterol", "Atorvastatin",
    "Ibuprofen", "Aspirin", "Omeprazole", "Sertraline", "Levothyroxine",
];

pub const EMAIL_DOMAINS: &[&str] = &[
    "gmail.com", "yahoo.com", "outlook.com", "hotmail.com", "aol.com",
];

pub const STREET_NAMES: &[&str] = &[
    "Main", "Oak", "Pine", "Maple", "Cedar", "Elm", "Washington", "Park",
    "Lincoln", "Roosevelt",
];

pub const STREET_SUFFIXES: &[&str] = &["St", "Ave", "Blvd", "Dr", "Ln", "Rd"];

/// Check whether `code` is one of the 50 state codes.
pub fn is_state_code(code: &str) -> bool {
    STATES.contains(&code)
}
