//! CLI subcommand implementations.

pub mod companies;

use respkit_lib::{CompanyService, ServiceConfig};

use crate::output::OutputFormat;

/// What every subcommand runs against.
pub struct Context<'a> {
    pub service: &'a CompanyService,
    pub config: ServiceConfig,
    pub format: &'a OutputFormat,
    pub trace_id: Option<&'a str>,
}
