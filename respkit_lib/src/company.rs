//! The sample record type and its sortable projection.

use once_cell::sync::Lazy;
use respkit_core::{Schema, Sortable};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    pub city: String,
    pub country: String,
}

/// A stored company.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    pub id: i64,
    pub name: String,
    pub year_founded: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<Address>,
}

/// Fields a caller supplies to create or update a company.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyInput {
    pub name: String,
    pub year_founded: i32,
    #[serde(default)]
    pub address: Option<Address>,
}

/// What list and get operations return.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyView {
    pub id: i64,
    pub name: String,
    pub year_founded: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<Address>,
}

impl From<&Company> for CompanyView {
    fn from(company: &Company) -> Self {
        CompanyView {
            id: company.id,
            name: company.name.clone(),
            year_founded: company.year_founded,
            address: company.address.clone(),
        }
    }
}

impl Sortable for Address {
    fn schema() -> &'static Schema<Self> {
        static SCHEMA: Lazy<Schema<Address>> = Lazy::new(|| {
            Schema::builder("Address")
                .text("city", |a: &Address| a.city.as_str())
                .text("country", |a: &Address| a.country.as_str())
                .build()
        });
        &SCHEMA
    }
}

impl Sortable for CompanyView {
    fn schema() -> &'static Schema<Self> {
        static SCHEMA: Lazy<Schema<CompanyView>> = Lazy::new(|| {
            Schema::builder("Company")
                .field("id", |c: &CompanyView| c.id)
                .text("name", |c: &CompanyView| c.name.as_str())
                .field("yearFounded", |c: &CompanyView| c.year_founded)
                .nested_opt("address", |c: &CompanyView| c.address.as_ref())
                .build()
        });
        &SCHEMA
    }
}

#[cfg(test)]
mod tests {
    use respkit_core::SortKey;

    use super::*;

    fn view(address: Option<Address>) -> CompanyView {
        CompanyView {
            id: 9,
            name: "Acme".to_string(),
            year_founded: 1999,
            address,
        }
    }

    #[test]
    fn view_schema_covers_every_column() {
        let v = view(Some(Address {
            city: "Oslo".to_string(),
            country: "NO".to_string(),
        }));
        let schema = CompanyView::schema();
        assert_eq!(schema.resolve("id").unwrap()(&v), SortKey::Int(9));
        assert_eq!(schema.resolve("year_founded").unwrap()(&v), SortKey::Int(1999));
        assert_eq!(schema.resolve("address.country").unwrap()(&v), SortKey::from("NO"));
    }

    #[test]
    fn missing_address_sorts_as_null() {
        let v = view(None);
        let key = CompanyView::schema().resolve("address.city").unwrap();
        assert_eq!(key(&v), SortKey::Null);
    }

    #[test]
    fn view_serializes_camel_case() {
        let json = serde_json::to_value(view(None)).unwrap();
        assert_eq!(json["yearFounded"], 1999);
        assert!(json.get("address").is_none());
    }
}
