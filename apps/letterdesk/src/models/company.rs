use serde::{Deserialize, Serialize};

/// A saved company letterhead. Identity is the position in the stored list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyProfile {
    pub name: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub signatory: String,
    #[serde(default)]
    pub designation: String,
}
