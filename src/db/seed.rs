//! Idempotent startup seeding: the category taxonomy plus demo patients
//! and cases. A table that already has rows is left alone, so restarting
//! the service never duplicates reference data.

use chrono::{Datelike, TimeZone, Utc};
use rusqlite::Connection;
use uuid::Uuid;

use crate::db::{repository, DatabaseError};
use crate::models::{Case, ComplaintCategory, Patient};

const CATEGORIES: &[(&str, &str)] = &[
    ("Clinical", "Diagnosis"),
    ("Clinical", "Medication"),
    ("Clinical", "Quality of Care"),
    ("Administrative", "Billing"),
    ("Administrative", "Appointment"),
    ("Administrative", "Communication"),
    ("Technical", "Website Issue"),
    ("Technical", "Equipment"),
];

const PATIENTS: &[(&str, (i32, u32, u32))] = &[
    ("John Smith", (1985, 3, 15)),
    ("Sarah Johnson", (1990, 7, 22)),
    ("Michael Brown", (1978, 11, 8)),
    ("Emily Davis", (1995, 1, 30)),
    ("Robert Wilson", (1982, 9, 12)),
    ("Lisa Garcia", (1987, 5, 18)),
];

/// Cases per seeded patient.
const CASES_PER_PATIENT: u32 = 2;

pub fn seed_initial_data(conn: &Connection) -> Result<(), DatabaseError> {
    seed_categories(conn)?;
    seed_patients_and_cases(conn)?;
    Ok(())
}

fn seed_categories(conn: &Connection) -> Result<(), DatabaseError> {
    let existing = repository::category::count_categories(conn)?;
    if existing > 0 {
        tracing::info!(existing, "categories already seeded, skipping");
        return Ok(());
    }

    for (main_category, sub_category) in CATEGORIES {
        repository::category::insert_category(
            conn,
            &ComplaintCategory {
                id: Uuid::new_v4(),
                main_category: (*main_category).to_string(),
                sub_category: (*sub_category).to_string(),
            },
        )?;
    }

    tracing::info!(count = CATEGORIES.len(), "seeded complaint categories");
    Ok(())
}

fn seed_patients_and_cases(conn: &Connection) -> Result<(), DatabaseError> {
    let existing = repository::patient::count_patients(conn)?;
    if existing > 0 {
        tracing::info!(existing, "patients already seeded, skipping");
        return Ok(());
    }

    let year = Utc::now().year();

    for (patient_num, (name, (y, m, d))) in PATIENTS.iter().enumerate() {
        let patient = Patient {
            id: Uuid::new_v4(),
            name: (*name).to_string(),
            date_of_birth: Utc
                .with_ymd_and_hms(*y, *m, *d, 0, 0, 0)
                .single()
                .expect("static seed date is valid"),
        };
        repository::patient::insert_patient(conn, &patient)?;

        for case_num in 1..=CASES_PER_PATIENT {
            repository::case::insert_case(
                conn,
                &Case {
                    id: Uuid::new_v4(),
                    case_reference: format!("CASE-{year}-{:03}-{case_num:03}", patient_num + 1),
                    patient_id: patient.id,
                },
            )?;
        }
    }

    tracing::info!(
        patients = PATIENTS.len(),
        cases = PATIENTS.len() * CASES_PER_PATIENT as usize,
        "seeded patients and cases"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::db::open_memory_database;

    use super::*;

    #[test]
    fn seeds_expected_row_counts() {
        let conn = open_memory_database().unwrap();
        seed_initial_data(&conn).unwrap();

        assert_eq!(repository::category::count_categories(&conn).unwrap(), 8);
        assert_eq!(repository::patient::count_patients(&conn).unwrap(), 6);
        assert_eq!(repository::case::count_cases(&conn).unwrap(), 12);
    }

    #[test]
    fn seeding_is_idempotent() {
        let conn = open_memory_database().unwrap();
        seed_initial_data(&conn).unwrap();
        seed_initial_data(&conn).unwrap();

        assert_eq!(repository::category::count_categories(&conn).unwrap(), 8);
        assert_eq!(repository::patient::count_patients(&conn).unwrap(), 6);
        assert_eq!(repository::case::count_cases(&conn).unwrap(), 12);
    }

    #[test]
    fn seeded_cases_belong_to_seeded_patients() {
        let conn = open_memory_database().unwrap();
        seed_initial_data(&conn).unwrap();

        let patients = repository::patient::list_patients(&conn, None).unwrap();
        for case in repository::case::list_cases(&conn, None).unwrap() {
            assert!(patients.iter().any(|p| p.id == case.patient_id));
            assert!(case.case_reference.starts_with("CASE-"));
        }
    }
}
