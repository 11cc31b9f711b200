use anyhow::Result;
use respkit_lib::CompanyView;
use serde::Serialize;
use tabled::settings::Style;
use tabled::{Table, Tabled};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Json,
    Csv,
    Markdown,
}

impl OutputFormat {
    pub fn parse(value: &str) -> Self {
        match value {
            "json" => OutputFormat::Json,
            "csv" => OutputFormat::Csv,
            "markdown" | "md" => OutputFormat::Markdown,
            _ => OutputFormat::Table,
        }
    }
}

#[derive(Tabled, Serialize)]
struct CompanyRow {
    #[tabled(rename = "ID")]
    #[serde(rename = "ID")]
    id: i64,
    #[tabled(rename = "Name")]
    #[serde(rename = "Name")]
    name: String,
    #[tabled(rename = "Founded")]
    #[serde(rename = "Founded")]
    year_founded: i32,
    #[tabled(rename = "City")]
    #[serde(rename = "City")]
    city: String,
    #[tabled(rename = "Country")]
    #[serde(rename = "Country")]
    country: String,
}

fn build_company_rows(companies: &[CompanyView]) -> Vec<CompanyRow> {
    companies
        .iter()
        .map(|c| CompanyRow {
            id: c.id,
            name: c.name.clone(),
            year_founded: c.year_founded,
            city: c
                .address
                .as_ref()
                .map(|a| a.city.clone())
                .unwrap_or_default(),
            country: c
                .address
                .as_ref()
                .map(|a| a.country.clone())
                .unwrap_or_default(),
        })
        .collect()
}

pub fn print_companies_table(companies: &[CompanyView]) {
    println!("{}", Table::new(build_company_rows(companies)));
}

pub fn print_companies_markdown(companies: &[CompanyView]) {
    let mut table = Table::new(build_company_rows(companies));
    table.with(Style::markdown());
    println!("{}", table);
}

pub fn print_companies_csv(companies: &[CompanyView]) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(std::io::stdout());
    for row in build_company_rows(companies) {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn print_companies(companies: &[CompanyView], format: &OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Table => print_companies_table(companies),
        OutputFormat::Json => print_json(&companies),
        OutputFormat::Csv => print_companies_csv(companies)?,
        OutputFormat::Markdown => print_companies_markdown(companies),
    }
    Ok(())
}

pub fn print_json<T: serde::Serialize>(data: &T) {
    match serde_json::to_string_pretty(data) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Failed to serialize to JSON: {}", e),
    }
}
