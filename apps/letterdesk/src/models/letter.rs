use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::models::company::CompanyProfile;

/// The three letter templates. Selects the storage key, the field variant and
/// the block sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LetterType {
    Relieving,
    Termination,
    Increment,
}

impl LetterType {
    /// Key under which this letter type's company list is stored.
    pub fn storage_key(self) -> &'static str {
        match self {
            LetterType::Relieving => "relievingLetterCompanies",
            LetterType::Termination => "terminationLetterCompanies",
            LetterType::Increment => "incrementLetterCompanies",
        }
    }

    /// Capitalized label used in generated filenames.
    pub fn label(self) -> &'static str {
        match self {
            LetterType::Relieving => "Relieving",
            LetterType::Termination => "Termination",
            LetterType::Increment => "Increment",
        }
    }

    /// Heading printed on the letter.
    pub fn title(self) -> &'static str {
        match self {
            LetterType::Relieving => "RELIEVING LETTER",
            LetterType::Termination => "TERMINATION LETTER",
            LetterType::Increment => "SALARY INCREMENT LETTER",
        }
    }
}

impl fmt::Display for LetterType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            LetterType::Relieving => "relieving",
            LetterType::Termination => "termination",
            LetterType::Increment => "increment",
        })
    }
}

impl FromStr for LetterType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "relieving" => Ok(LetterType::Relieving),
            "termination" => Ok(LetterType::Termination),
            "increment" => Ok(LetterType::Increment),
            other => Err(format!(
                "unknown letter type `{other}`; expected relieving|termination|increment"
            )),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeInfo {
    pub name: String,
    pub id: String,
    pub designation: String,
    pub department: String,
}

/// Dates are kept as the raw `YYYY-MM-DD` strings the form submitted; they are
/// parsed only where arithmetic needs them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelievingFields {
    pub joining_date: String,
    pub relieving_date: String,
    pub letter_date: String,
    pub reason_for_leaving: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TerminationFields {
    pub joining_date: String,
    pub termination_date: String,
    pub letter_date: String,
    pub reason: String,
    pub notice_period: String,
}

pub const DEFAULT_NOTICE_PERIOD: &str = "30 days";

impl Default for TerminationFields {
    fn default() -> Self {
        Self {
            joining_date: String::new(),
            termination_date: String::new(),
            letter_date: String::new(),
            reason: String::new(),
            notice_period: DEFAULT_NOTICE_PERIOD.to_string(),
        }
    }
}

/// Salary revision. `None` amounts mean the field was left blank.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IncrementFields {
    pub date: String,
    pub current_salary: Option<f64>,
    pub new_salary: Option<f64>,
    pub reason: String,
}

impl IncrementFields {
    pub fn increment_amount(&self) -> f64 {
        self.new_salary.unwrap_or(0.0) - self.current_salary.unwrap_or(0.0)
    }

    /// Percentage rise over the current salary; 0 when there is no current salary.
    pub fn increment_percentage(&self) -> f64 {
        match self.current_salary {
            Some(current) if current > 0.0 => self.increment_amount() / current * 100.0,
            _ => 0.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "letter_type", rename_all = "lowercase")]
pub enum LetterFields {
    Relieving(RelievingFields),
    Termination(TerminationFields),
    Increment(IncrementFields),
}

impl LetterFields {
    pub fn letter_type(&self) -> LetterType {
        match self {
            LetterFields::Relieving(_) => LetterType::Relieving,
            LetterFields::Termination(_) => LetterType::Termination,
            LetterFields::Increment(_) => LetterType::Increment,
        }
    }
}

/// Everything one generation action needs. Discarded after the response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormData {
    pub company: CompanyProfile,
    pub employee: EmployeeInfo,
    pub fields: LetterFields,
}

impl FormData {
    pub fn letter_type(&self) -> LetterType {
        self.fields.letter_type()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_keys_are_distinct_per_letter_type() {
        assert_eq!(LetterType::Relieving.storage_key(), "relievingLetterCompanies");
        assert_eq!(
            LetterType::Termination.storage_key(),
            "terminationLetterCompanies"
        );
        assert_eq!(LetterType::Increment.storage_key(), "incrementLetterCompanies");
    }

    #[test]
    fn test_letter_type_parses_case_insensitively() {
        assert_eq!("Relieving".parse::<LetterType>(), Ok(LetterType::Relieving));
        assert_eq!(" increment ".parse::<LetterType>(), Ok(LetterType::Increment));
        assert!("offer".parse::<LetterType>().is_err());
    }

    #[test]
    fn test_termination_defaults_notice_period() {
        assert_eq!(TerminationFields::default().notice_period, "30 days");
    }

    #[test]
    fn test_increment_derivations() {
        let fields = IncrementFields {
            date: "2024-04-01".to_string(),
            current_salary: Some(40000.0),
            new_salary: Some(50000.0),
            reason: String::new(),
        };
        assert_eq!(fields.increment_amount(), 10000.0);
        assert!((fields.increment_percentage() - 25.0).abs() < 1e-9);
    }

    #[test]
    fn test_increment_percentage_without_current_salary_is_zero() {
        let fields = IncrementFields {
            new_salary: Some(50000.0),
            ..Default::default()
        };
        assert_eq!(fields.increment_percentage(), 0.0);
    }
}
