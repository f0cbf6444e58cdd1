//! The single required-field gate in front of preview and PDF generation.
//!
//! Only the company name, the employee name and each letter type's mandatory
//! dates/amounts block generation. Every other field degrades to placeholder
//! text inside the document model.

use thiserror::Error;

use crate::models::letter::{FormData, LetterFields};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Please fill in all required fields: {}", .missing.join(", "))]
pub struct MissingFields {
    pub missing: Vec<&'static str>,
}

pub fn validate_required(form: &FormData) -> Result<(), MissingFields> {
    let mut missing = Vec::new();

    if form.company.name.trim().is_empty() {
        missing.push("Company Name");
    }
    if form.employee.name.trim().is_empty() {
        missing.push("Employee Name");
    }

    match &form.fields {
        LetterFields::Relieving(f) => {
            require(&mut missing, &f.joining_date, "Joining Date");
            require(&mut missing, &f.relieving_date, "Relieving Date");
        }
        LetterFields::Termination(f) => {
            require(&mut missing, &f.joining_date, "Joining Date");
            require(&mut missing, &f.termination_date, "Termination Date");
        }
        LetterFields::Increment(f) => {
            require(&mut missing, &f.date, "Effective Date");
            if f.current_salary.is_none() {
                missing.push("Current Salary");
            }
            if f.new_salary.is_none() {
                missing.push("New Salary");
            }
        }
    }

    if missing.is_empty() {
        Ok(())
    } else {
        Err(MissingFields { missing })
    }
}

fn require(missing: &mut Vec<&'static str>, value: &str, label: &'static str) {
    if value.trim().is_empty() {
        missing.push(label);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::company::CompanyProfile;
    use crate::models::letter::{EmployeeInfo, IncrementFields, RelievingFields, TerminationFields};

    fn form(fields: LetterFields) -> FormData {
        FormData {
            company: CompanyProfile {
                name: "Acme".to_string(),
                ..Default::default()
            },
            employee: EmployeeInfo {
                name: "Jane Doe".to_string(),
                ..Default::default()
            },
            fields,
        }
    }

    #[test]
    fn test_complete_relieving_form_passes() {
        let f = form(LetterFields::Relieving(RelievingFields {
            joining_date: "2020-01-01".to_string(),
            relieving_date: "2023-01-01".to_string(),
            ..Default::default()
        }));
        assert_eq!(validate_required(&f), Ok(()));
    }

    #[test]
    fn test_missing_names_are_reported() {
        let mut f = form(LetterFields::Relieving(RelievingFields {
            joining_date: "2020-01-01".to_string(),
            relieving_date: "2023-01-01".to_string(),
            ..Default::default()
        }));
        f.company.name.clear();
        f.employee.name = "  ".to_string();
        let err = validate_required(&f).unwrap_err();
        assert_eq!(err.missing, vec!["Company Name", "Employee Name"]);
    }

    #[test]
    fn test_increment_without_new_salary_is_refused() {
        let f = form(LetterFields::Increment(IncrementFields {
            date: "2024-04-01".to_string(),
            current_salary: Some(40000.0),
            new_salary: None,
            reason: String::new(),
        }));
        let err = validate_required(&f).unwrap_err();
        assert_eq!(err.missing, vec!["New Salary"]);
        assert!(err.to_string().contains("New Salary"));
    }

    #[test]
    fn test_relieving_without_relieving_date_is_refused() {
        let f = form(LetterFields::Relieving(RelievingFields {
            joining_date: "2020-01-01".to_string(),
            ..Default::default()
        }));
        assert_eq!(validate_required(&f).unwrap_err().missing, vec!["Relieving Date"]);
    }

    #[test]
    fn test_termination_without_dates_is_refused() {
        let f = form(LetterFields::Termination(TerminationFields {
            joining_date: String::new(),
            termination_date: " ".to_string(),
            ..Default::default()
        }));
        let err = validate_required(&f).unwrap_err();
        assert_eq!(err.missing, vec!["Joining Date", "Termination Date"]);
        assert!(err.to_string().contains("Termination Date"));
    }

    #[test]
    fn test_complete_termination_form_passes() {
        let f = form(LetterFields::Termination(TerminationFields {
            joining_date: "2021-01-01".to_string(),
            termination_date: "2021-03-02".to_string(),
            ..Default::default()
        }));
        assert!(validate_required(&f).is_ok());
    }

    #[test]
    fn test_increment_without_date_or_current_salary_is_refused() {
        let f = form(LetterFields::Increment(IncrementFields {
            date: String::new(),
            current_salary: None,
            new_salary: Some(50000.0),
            reason: String::new(),
        }));
        let err = validate_required(&f).unwrap_err();
        assert_eq!(err.missing, vec!["Effective Date", "Current Salary"]);
    }

    #[test]
    fn test_optional_fields_do_not_block() {
        // No address, department, reason or letter date: still valid.
        let f = form(LetterFields::Relieving(RelievingFields {
            joining_date: "2020-01-01".to_string(),
            relieving_date: "2023-01-01".to_string(),
            letter_date: String::new(),
            reason_for_leaving: String::new(),
        }));
        assert!(validate_required(&f).is_ok());
    }
}
