//! Letter document model: the block sequence both renderers consume.
//!
//! The HTML preview and the PDF paginator walk the same `Vec<Block>` in order,
//! so the preview and the exported file never disagree about content.
//!
//! # Placeholders
//! Missing values never fail here. They render as "Employee Name",
//! "Company Name", "Designation", "Authorized Signatory" or "N/A". Optional
//! fields (address, email, phone, department, reason) add their clause only
//! when present.

use serde::Serialize;

use crate::letters::format::{
    format_currency, format_date, format_percentage, tenure_between,
};
use crate::models::company::CompanyProfile;
use crate::models::letter::{
    EmployeeInfo, FormData, IncrementFields, LetterFields, LetterType, RelievingFields,
    TerminationFields,
};

const NOT_AVAILABLE: &str = "N/A";

// ────────────────────────────────────────────────────────────────────────────
// Types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Letterhead {
    pub name: String,
    /// Address lines followed by the contact line, each only when non-empty.
    pub lines: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DetailItem {
    pub label: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DetailList {
    pub title: String,
    pub items: Vec<DetailItem>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Signature {
    pub closing: String,
    pub company_line: String,
    pub signatory: String,
    pub designation: String,
}

/// One labeled unit of letter content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "content", rename_all = "snake_case")]
pub enum Block {
    AddressBlock(Letterhead),
    DateLine(String),
    Heading(String),
    Salutation(String),
    Paragraph(String),
    DetailList(DetailList),
    SignatureBlock(Signature),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LetterDocument {
    pub letter_type: LetterType,
    pub blocks: Vec<Block>,
}

impl LetterDocument {
    /// The letter's heading text, if the sequence has one.
    pub fn heading(&self) -> Option<&str> {
        self.blocks.iter().find_map(|b| match b {
            Block::Heading(text) => Some(text.as_str()),
            _ => None,
        })
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Assembly
// ────────────────────────────────────────────────────────────────────────────

/// Assembles the fixed block sequence for the form's letter type.
pub fn build_document(form: &FormData) -> LetterDocument {
    let names = Names::new(&form.company, &form.employee);
    let blocks = match &form.fields {
        LetterFields::Relieving(f) => relieving_blocks(form, &names, f),
        LetterFields::Termination(f) => termination_blocks(form, &names, f),
        LetterFields::Increment(f) => increment_blocks(form, &names, f),
    };
    LetterDocument {
        letter_type: form.letter_type(),
        blocks,
    }
}

fn relieving_blocks(form: &FormData, names: &Names, f: &RelievingFields) -> Vec<Block> {
    let joining = date_or_na(&f.joining_date);
    let relieving = date_or_na(&f.relieving_date);
    let tenure =
        tenure_between(&f.joining_date, &f.relieving_date).unwrap_or_else(|| NOT_AVAILABLE.into());

    let mut blocks = vec![
        letterhead(&form.company, names),
        Block::DateLine(format!("Date: {}", date_or_na(&f.letter_date))),
        Block::Heading(LetterType::Relieving.title().to_string()),
        Block::Salutation("To Whom It May Concern,".to_string()),
        Block::Paragraph(format!(
            "This is to certify that {}{} was employed with {} as {}{} from {} to {}.",
            names.employee,
            employee_id_clause(&form.employee),
            names.company,
            names.designation,
            department_clause(&form.employee),
            joining,
            relieving,
        )),
        Block::DetailList(DetailList {
            title: "Employment Details".to_string(),
            items: vec![
                item("Employee Name", &names.employee),
                item("Employee ID", or_na(&form.employee.id)),
                item("Designation", &names.designation),
                item("Department", or_na(&form.employee.department)),
                item("Date of Joining", &joining),
                item("Date of Relieving", &relieving),
                item("Total Tenure", &tenure),
            ],
        }),
    ];

    if !f.reason_for_leaving.is_empty() {
        blocks.push(Block::Paragraph(format!(
            "{} resigned from the organization citing the following reason: {}.",
            names.employee,
            f.reason_for_leaving.trim_end_matches('.'),
        )));
    }

    blocks.push(Block::Paragraph(format!(
        "During the tenure with us, {} was found to be sincere and dedicated. {} has been \
         relieved of all duties and responsibilities with effect from {}. We wish {} all the \
         best in future endeavors.",
        names.employee, names.employee, relieving, names.employee,
    )));
    blocks.push(signature(&form.company, names));
    blocks
}

fn termination_blocks(form: &FormData, names: &Names, f: &TerminationFields) -> Vec<Block> {
    let joining = date_or_na(&f.joining_date);
    let terminated = date_or_na(&f.termination_date);
    let tenure = tenure_between(&f.joining_date, &f.termination_date)
        .unwrap_or_else(|| NOT_AVAILABLE.into());

    let mut blocks = vec![
        letterhead(&form.company, names),
        Block::DateLine(format!("Date: {}", date_or_na(&f.letter_date))),
        Block::Heading(LetterType::Termination.title().to_string()),
        Block::Salutation(format!("Dear {},", names.employee)),
        Block::Paragraph(format!(
            "This letter is to inform you that your employment with {} as {}{} is terminated \
             with effect from {}.",
            names.company,
            names.designation,
            department_clause(&form.employee),
            terminated,
        )),
    ];

    if !f.reason.is_empty() {
        blocks.push(Block::Paragraph(format!(
            "This decision has been taken for the following reason: {}.",
            f.reason.trim_end_matches('.'),
        )));
    }

    blocks.push(Block::DetailList(DetailList {
        title: "Employment Details".to_string(),
        items: vec![
            item("Employee Name", &names.employee),
            item("Employee ID", or_na(&form.employee.id)),
            item("Designation", &names.designation),
            item("Department", or_na(&form.employee.department)),
            item("Date of Joining", &joining),
            item("Termination Date", &terminated),
            item("Notice Period", or_na(&f.notice_period)),
            item("Total Tenure", &tenure),
        ],
    }));
    blocks.push(Block::Paragraph(
        "You are requested to return all company property in your possession and complete the \
         exit formalities. Your full and final settlement will be processed as per company \
         policy."
            .to_string(),
    ));
    blocks.push(signature(&form.company, names));
    blocks
}

fn increment_blocks(form: &FormData, names: &Names, f: &IncrementFields) -> Vec<Block> {
    let effective = date_or_na(&f.date);

    let mut blocks = vec![
        letterhead(&form.company, names),
        Block::DateLine(format!("Date: {effective}")),
        Block::Heading(LetterType::Increment.title().to_string()),
        Block::Salutation(format!("Dear {},", names.employee)),
        Block::Paragraph(format!(
            "We are pleased to inform you that, in recognition of your performance as {}{}, \
             your salary has been revised with effect from {}.",
            names.designation,
            department_clause(&form.employee),
            effective,
        )),
        Block::DetailList(DetailList {
            title: "Salary Revision".to_string(),
            items: vec![
                item(
                    "Current Salary",
                    &format_currency(f.current_salary.unwrap_or(0.0)),
                ),
                item("New Salary", &format_currency(f.new_salary.unwrap_or(0.0))),
                item("Increment Amount", &format_currency(f.increment_amount())),
                item(
                    "Increment Percentage",
                    &format_percentage(f.increment_percentage()),
                ),
                item("Effective Date", &effective),
            ],
        }),
    ];

    if !f.reason.is_empty() {
        blocks.push(Block::Paragraph(format!(
            "This revision recognizes {}.",
            f.reason.trim_end_matches('.'),
        )));
    }

    blocks.push(Block::Paragraph(format!(
        "All other terms and conditions of your employment remain unchanged. We appreciate \
         your contributions to {} and look forward to your continued success.",
        names.company,
    )));
    blocks.push(signature(&form.company, names));
    blocks
}

// ────────────────────────────────────────────────────────────────────────────
// Internal helpers
// ────────────────────────────────────────────────────────────────────────────

/// Display names with placeholders already substituted.
struct Names {
    company: String,
    employee: String,
    designation: String,
}

impl Names {
    fn new(company: &CompanyProfile, employee: &EmployeeInfo) -> Self {
        Self {
            company: or_placeholder(&company.name, "Company Name"),
            employee: or_placeholder(&employee.name, "Employee Name"),
            designation: or_placeholder(&employee.designation, "Designation"),
        }
    }
}

fn letterhead(company: &CompanyProfile, names: &Names) -> Block {
    let mut lines: Vec<String> = company
        .address
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(str::to_string)
        .collect();

    let mut contact = Vec::new();
    if !company.email.is_empty() {
        contact.push(format!("Email: {}", company.email));
    }
    if !company.phone.is_empty() {
        contact.push(format!("Phone: {}", company.phone));
    }
    if !contact.is_empty() {
        lines.push(contact.join(" | "));
    }

    Block::AddressBlock(Letterhead {
        name: names.company.clone(),
        lines,
    })
}

fn signature(company: &CompanyProfile, names: &Names) -> Block {
    Block::SignatureBlock(Signature {
        closing: "Sincerely,".to_string(),
        company_line: format!("For {}", names.company),
        signatory: or_placeholder(&company.signatory, "Authorized Signatory"),
        designation: or_placeholder(&company.designation, "Designation"),
    })
}

fn employee_id_clause(employee: &EmployeeInfo) -> String {
    if employee.id.is_empty() {
        String::new()
    } else {
        format!(" (Employee ID: {})", employee.id)
    }
}

fn department_clause(employee: &EmployeeInfo) -> String {
    if employee.department.is_empty() {
        String::new()
    } else {
        format!(" in the {} department", employee.department)
    }
}

fn item(label: &str, value: &str) -> DetailItem {
    DetailItem {
        label: label.to_string(),
        value: value.to_string(),
    }
}

fn or_placeholder(value: &str, placeholder: &str) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        placeholder.to_string()
    } else {
        trimmed.to_string()
    }
}

fn or_na(value: &str) -> &str {
    if value.trim().is_empty() {
        NOT_AVAILABLE
    } else {
        value.trim()
    }
}

fn date_or_na(value: &str) -> String {
    let formatted = format_date(value);
    if formatted.is_empty() {
        NOT_AVAILABLE.to_string()
    } else {
        formatted
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
