//! Assembles a typed `FormData` from named form fields.
//!
//! The collector never touches transport concerns: anything that can answer
//! "what is the value of field X" implements `FieldSource`. Values are trimmed;
//! a missing field and a blank field are the same thing.

use std::collections::HashMap;

use chrono::NaiveDate;

use crate::models::company::CompanyProfile;
use crate::models::letter::{
    EmployeeInfo, FormData, IncrementFields, LetterFields, LetterType, RelievingFields,
    TerminationFields, DEFAULT_NOTICE_PERIOD,
};
use crate::letters::format::parse_amount;

// Field names, as the letter forms submit them.
pub const COMPANY_NAME: &str = "companyName";
pub const COMPANY_ADDRESS: &str = "companyAddress";
pub const COMPANY_EMAIL: &str = "companyEmail";
pub const COMPANY_PHONE: &str = "companyPhone";
pub const SIGNATORY_NAME: &str = "signatoryName";
pub const SIGNATORY_DESIGNATION: &str = "signatoryDesignation";
pub const EMPLOYEE_NAME: &str = "employeeName";
pub const EMPLOYEE_ID: &str = "employeeId";
pub const EMPLOYEE_DESIGNATION: &str = "employeeDesignation";
pub const DEPARTMENT: &str = "department";
pub const JOINING_DATE: &str = "joiningDate";
pub const RELIEVING_DATE: &str = "relievingDate";
pub const TERMINATION_DATE: &str = "terminationDate";
pub const LETTER_DATE: &str = "letterDate";
pub const REASON_FOR_LEAVING: &str = "reasonForLeaving";
pub const REASON: &str = "reason";
pub const NOTICE_PERIOD: &str = "noticePeriod";
pub const INCREMENT_DATE: &str = "incrementDate";
pub const CURRENT_SALARY: &str = "currentSalary";
pub const NEW_SALARY: &str = "newSalary";
pub const INCREMENT_REASON: &str = "incrementReason";
/// Selects a saved company instead of (or on top of) typed company fields.
pub const COMPANY_INDEX: &str = "companyIndex";

/// Read access to named input fields.
pub trait FieldSource {
    fn field(&self, name: &str) -> Option<&str>;

    /// Trimmed value, or an empty string when the field is absent.
    fn text(&self, name: &str) -> String {
        self.field(name).map(str::trim).unwrap_or_default().to_string()
    }

    fn has(&self, name: &str) -> bool {
        !self.text(name).is_empty()
    }
}

impl FieldSource for HashMap<String, String> {
    fn field(&self, name: &str) -> Option<&str> {
        self.get(name).map(String::as_str)
    }
}

pub fn collect_company(source: &dyn FieldSource) -> CompanyProfile {
    CompanyProfile {
        name: source.text(COMPANY_NAME),
        address: source.text(COMPANY_ADDRESS),
        email: source.text(COMPANY_EMAIL),
        phone: source.text(COMPANY_PHONE),
        signatory: source.text(SIGNATORY_NAME),
        designation: source.text(SIGNATORY_DESIGNATION),
    }
}

pub fn collect_employee(source: &dyn FieldSource) -> EmployeeInfo {
    EmployeeInfo {
        name: source.text(EMPLOYEE_NAME),
        id: source.text(EMPLOYEE_ID),
        designation: source.text(EMPLOYEE_DESIGNATION),
        department: source.text(DEPARTMENT),
    }
}

/// Builds the full record for one generation action.
///
/// A blank letter date falls back to `today`; a blank notice period falls back
/// to 30 days. Nothing here rejects input: the required-field gate lives in
/// `validation`.
pub fn collect_form(
    letter_type: LetterType,
    source: &dyn FieldSource,
    today: NaiveDate,
) -> FormData {
    let letter_date = or_today(source.text(LETTER_DATE), today);

    let fields = match letter_type {
        LetterType::Relieving => LetterFields::Relieving(RelievingFields {
            joining_date: source.text(JOINING_DATE),
            relieving_date: source.text(RELIEVING_DATE),
            letter_date,
            reason_for_leaving: source.text(REASON_FOR_LEAVING),
        }),
        LetterType::Termination => {
            let notice_period = source.text(NOTICE_PERIOD);
            LetterFields::Termination(TerminationFields {
                joining_date: source.text(JOINING_DATE),
                termination_date: source.text(TERMINATION_DATE),
                letter_date,
                reason: source.text(REASON),
                notice_period: if notice_period.is_empty() {
                    DEFAULT_NOTICE_PERIOD.to_string()
                } else {
                    notice_period
                },
            })
        }
        LetterType::Increment => LetterFields::Increment(IncrementFields {
            date: source.text(INCREMENT_DATE),
            current_salary: parse_amount(&source.text(CURRENT_SALARY)),
            new_salary: parse_amount(&source.text(NEW_SALARY)),
            reason: source.text(INCREMENT_REASON),
        }),
    };

    FormData {
        company: collect_company(source),
        employee: collect_employee(source),
        fields,
    }
}

fn or_today(value: String, today: NaiveDate) -> String {
    if value.is_empty() {
        today.format("%Y-%m-%d").to_string()
    } else {
        value
    }
}
