use chrono::{Datelike, Utc};
use respkit_core::ValidationErrors;

use crate::company::{Address, CompanyInput};
use crate::error::ServiceError;

pub const MAX_NAME_LENGTH: usize = 100;
pub const MAX_SEARCH_LENGTH: usize = 100;
pub const MAX_CITY_LENGTH: usize = 80;
pub const MIN_YEAR_FOUNDED: i32 = 1600;

/// Strip ASCII control characters (0x00-0x1F except space 0x20), trim whitespace,
/// and enforce a byte-length limit.
pub fn sanitize_text(input: &str, max_len: usize) -> Result<String, ServiceError> {
    if input.len() > max_len {
        return Err(ServiceError::InvalidInput(format!(
            "input exceeds maximum length of {} bytes",
            max_len
        )));
    }
    let sanitized: String = input
        .chars()
        .filter(|c| !c.is_ascii_control() || *c == ' ')
        .collect::<String>()
        .trim()
        .to_string();
    if sanitized.is_empty() {
        return Err(ServiceError::InvalidInput(
            "input is empty after sanitization".to_string(),
        ));
    }
    Ok(sanitized)
}

/// Validate a search string: enforce length, strip control chars, trim.
pub fn validate_search(input: &str) -> Result<String, ServiceError> {
    sanitize_text(input, MAX_SEARCH_LENGTH)
}

pub fn validate_name(input: &str) -> Result<String, ServiceError> {
    sanitize_text(input, MAX_NAME_LENGTH)
}

/// Founding year must lie between 1600 and the current year.
pub fn validate_year_founded(year: i32) -> Result<i32, ServiceError> {
    let current = Utc::now().year();
    if (MIN_YEAR_FOUNDED..=current).contains(&year) {
        Ok(year)
    } else {
        Err(ServiceError::InvalidInput(format!(
            "year founded {} outside {}..={}",
            year, MIN_YEAR_FOUNDED, current
        )))
    }
}

/// Validates every field of `input`, collecting all violations.
///
/// Returns the sanitized input, or the per-field errors keyed by the
/// camelCase field names the transport uses.
pub fn validate_company(input: &CompanyInput) -> Result<CompanyInput, ValidationErrors> {
    let mut errors = ValidationErrors::new();

    let name = validate_name(&input.name)
        .map_err(|e| errors.add("name", e.to_string()))
        .ok();
    let year_founded = validate_year_founded(input.year_founded)
        .map_err(|e| errors.add("yearFounded", e.to_string()))
        .ok();

    let address = match &input.address {
        None => None,
        Some(address) => {
            let city = sanitize_text(&address.city, MAX_CITY_LENGTH)
                .map_err(|e| errors.add("address.city", e.to_string()))
                .ok();
            let country = validate_country(&address.country)
                .map_err(|e| errors.add("address.country", e.to_string()))
                .ok();
            city.zip(country)
                .map(|(city, country)| Address { city, country })
        }
    };

    match (name, year_founded) {
        (Some(name), Some(year_founded)) if errors.is_empty() => Ok(CompanyInput {
            name,
            year_founded,
            address,
        }),
        _ => Err(errors),
    }
}

/// Two-letter ISO country code, uppercased.
pub fn validate_country(input: &str) -> Result<String, ServiceError> {
    let upper = input.trim().to_uppercase();
    if upper.len() == 2 && upper.chars().all(|c| c.is_ascii_uppercase()) {
        Ok(upper)
    } else {
        Err(ServiceError::InvalidInput(format!(
            "country '{}' is not a two-letter code",
            input
        )))
    }
}
