//! Seed companies for the sample store, embedded from TOML at compile time.

use std::collections::HashSet;
use std::path::Path;

use respkit_core::ValidationErrors;
use serde::Deserialize;

use crate::company::{Address, CompanyInput};
use crate::validation;

#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    #[error("Failed to read seed file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse seed TOML: {0}")]
    TomlParse(String),
    #[error("Seed entry {index} is invalid: {reason}")]
    InvalidEntry { index: usize, reason: String },
}

#[derive(Debug, Deserialize)]
struct SeedFile {
    #[serde(default)]
    company: Vec<SeedCompany>,
}

#[derive(Debug, Deserialize)]
struct SeedCompany {
    name: String,
    year_founded: i32,
    city: Option<String>,
    country: Option<String>,
}

impl SeedCompany {
    fn into_input(self, index: usize) -> Result<CompanyInput, SeedError> {
        let address = match (self.city, self.country) {
            (Some(city), Some(country)) => Some(Address { city, country }),
            (None, None) => None,
            _ => {
                return Err(SeedError::InvalidEntry {
                    index,
                    reason: "city and country must be given together".to_string(),
                })
            }
        };
        Ok(CompanyInput {
            name: self.name,
            year_founded: self.year_founded,
            address,
        })
    }
}

/// Parses seed entries from TOML text (`[[company]]` tables).
///
/// Entries pass the same validation as created companies, and names must be
/// unique across the file.
pub fn parse_seed(toml_content: &str) -> Result<Vec<CompanyInput>, SeedError> {
    let file: SeedFile =
        toml::from_str(toml_content).map_err(|e| SeedError::TomlParse(e.to_string()))?;

    let mut names = HashSet::new();
    let mut seed = Vec::with_capacity(file.company.len());
    for (index, entry) in file.company.into_iter().enumerate() {
        let input = validation::validate_company(&entry.into_input(index)?).map_err(|errors| {
            SeedError::InvalidEntry {
                index,
                reason: describe(&errors),
            }
        })?;
        if !names.insert(input.name.clone()) {
            return Err(SeedError::InvalidEntry {
                index,
                reason: format!("duplicate company name '{}'", input.name),
            });
        }
        seed.push(input);
    }
    Ok(seed)
}

fn describe(errors: &ValidationErrors) -> String {
    errors
        .iter()
        .map(|(field, messages)| format!("{}: {}", field, messages.join("; ")))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load seed data from the embedded TOML file.
pub fn load_seed_data() -> Result<Vec<CompanyInput>, SeedError> {
    parse_seed(include_str!("../../seed_data/companies.toml"))
}

/// Load seed data from a TOML file on disk.
pub fn load_seed_file(path: &Path) -> Result<Vec<CompanyInput>, SeedError> {
    let content = std::fs::read_to_string(path)?;
    parse_seed(&content)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_seed_parses() {
        let seed = load_seed_data().unwrap();
        assert_eq!(seed.len(), 5);
        assert_eq!(seed[0].name, "Compannny 1");
        assert_eq!(seed[3].address.as_ref().unwrap().city, "Aarhus");
        assert!(seed[4].address.is_none());
    }

    #[test]
    fn half_an_address_is_rejected() {
        let toml = r#"
[[company]]
name = "Half"
year_founded = 2000
city = "Oslo"
"#;
        let err = parse_seed(toml).unwrap_err();
        assert!(matches!(err, SeedError::InvalidEntry { index: 0, .. }));
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let toml = r#"
[[company]]
name = "Acme"
year_founded = 2000

[[company]]
name = " Acme "
year_founded = 2001
"#;
        let err = parse_seed(toml).unwrap_err();
        match err {
            SeedError::InvalidEntry { index, reason } => {
                assert_eq!(index, 1);
                assert!(reason.contains("duplicate"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn invalid_fields_are_rejected() {
        let toml = r#"
[[company]]
name = "Old Guild"
year_founded = 1200
"#;
        let err = parse_seed(toml).unwrap_err();
        match err {
            SeedError::InvalidEntry { index, reason } => {
                assert_eq!(index, 0);
                assert!(reason.contains("yearFounded"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn entries_are_sanitized() {
        let toml = r#"
[[company]]
name = "  Trim Co "
year_founded = 1999
city = "Oslo"
country = "no"
"#;
        let seed = parse_seed(toml).unwrap();
        assert_eq!(seed[0].name, "Trim Co");
        assert_eq!(seed[0].address.as_ref().unwrap().country, "NO");
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        assert!(matches!(
            parse_seed("[[company]\nname ="),
            Err(SeedError::TomlParse(_))
        ));
    }

    #[test]
    fn empty_file_has_no_companies() {
        assert!(parse_seed("").unwrap().is_empty());
    }
}
