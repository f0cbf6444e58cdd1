use std::collections::HashMap;

use crate::companies::repository::CompanyRepository;
use crate::companies::store::StoreError;
use crate::letters::collector::{
    COMPANY_ADDRESS, COMPANY_EMAIL, COMPANY_NAME, COMPANY_PHONE, SIGNATORY_DESIGNATION,
    SIGNATORY_NAME,
};
use crate::models::company::CompanyProfile;

/// The companies loaded for one form plus the one currently selected.
#[derive(Debug, Clone, Default)]
pub struct CompanySession {
    companies: Vec<CompanyProfile>,
    current: Option<usize>,
}

impl CompanySession {
    pub fn new(companies: Vec<CompanyProfile>) -> Self {
        Self {
            companies,
            current: None,
        }
    }

    pub async fn load(repository: &CompanyRepository) -> Result<Self, StoreError> {
        Ok(Self::new(repository.list().await?))
    }

    #[cfg(test)]
    pub fn companies(&self) -> &[CompanyProfile] {
        &self.companies
    }

    /// Selects by position. An unknown index clears the selection.
    pub fn select(&mut self, index: usize) -> Option<&CompanyProfile> {
        self.current = (index < self.companies.len()).then_some(index);
        self.current()
    }

    pub fn current(&self) -> Option<&CompanyProfile> {
        self.current.and_then(|i| self.companies.get(i))
    }

    /// Writes the selected company's values over the company fields, the same
    /// way picking a saved company fills in the form.
    pub fn apply_to(&self, fields: &mut HashMap<String, String>) {
        let Some(company) = self.current() else {
            return;
        };
        for (name, value) in [
            (COMPANY_NAME, &company.name),
            (COMPANY_ADDRESS, &company.address),
            (COMPANY_EMAIL, &company.email),
            (COMPANY_PHONE, &company.phone),
            (SIGNATORY_NAME, &company.signatory),
            (SIGNATORY_DESIGNATION, &company.designation),
        ] {
            fields.insert(name.to_string(), value.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::companies::store::MemoryKeyValueStore;
    use crate::models::letter::LetterType;

    fn acme() -> CompanyProfile {
        CompanyProfile {
            name: "Acme".to_string(),
            address: "1 Main St".to_string(),
            signatory: "R. Rao".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_select_and_clear() {
        let mut session = CompanySession::new(vec![acme()]);
        assert!(session.current().is_none());
        assert_eq!(session.select(0).map(|c| c.name.as_str()), Some("Acme"));
        assert!(session.select(3).is_none());
        assert!(session.current().is_none());
    }

    #[test]
    fn test_apply_overwrites_company_fields_only() {
        let mut session = CompanySession::new(vec![acme()]);
        session.select(0);

        let mut fields = HashMap::from([
            (COMPANY_NAME.to_string(), "Typed Ltd".to_string()),
            ("employeeName".to_string(), "Jane".to_string()),
        ]);
        session.apply_to(&mut fields);

        assert_eq!(fields[COMPANY_NAME], "Acme");
        assert_eq!(fields[COMPANY_ADDRESS], "1 Main St");
        assert_eq!(fields[SIGNATORY_NAME], "R. Rao");
        assert_eq!(fields[COMPANY_EMAIL], "");
        assert_eq!(fields["employeeName"], "Jane");
    }

    #[test]
    fn test_apply_without_selection_is_noop() {
        let session = CompanySession::new(vec![acme()]);
        let mut fields = HashMap::new();
        session.apply_to(&mut fields);
        assert!(fields.is_empty());
    }

    #[tokio::test]
    async fn test_load_snapshots_repository() {
        let store = Arc::new(MemoryKeyValueStore::new());
        let repo = CompanyRepository::for_letter(store, LetterType::Termination);
        repo.save(acme(), None).await.unwrap();

        let session = CompanySession::load(&repo).await.unwrap();
        assert_eq!(session.companies(), &[acme()]);
    }
}
