use anyhow::Result;
use clap::{Args, Subcommand};
use respkit_lib::validation;
use respkit_lib::respkit_core::Error as CoreError;
use respkit_lib::{Address, CompanyInput, ListFilter, Response, SortDirection};
use serde::Serialize;

use super::Context;
use crate::output::{print_companies, print_json, OutputFormat};

#[derive(Args)]
pub struct CompaniesArgs {
    #[command(subcommand)]
    pub command: CompaniesCommand,
}

#[derive(Subcommand)]
pub enum CompaniesCommand {
    /// List companies with optional search, sort, and paging
    List(ListArgs),
    /// Get a single company by ID
    Get(GetArgs),
    /// Create a company
    Create(CreateArgs),
}

#[derive(Args)]
pub struct ListArgs {
    /// Case-insensitive substring match on the company name
    #[arg(long)]
    pub search: Option<String>,

    /// Sort column, dot paths allowed (e.g. name, yearFounded, address.city)
    #[arg(long)]
    pub sort_by: Option<String>,

    /// Sort descending instead of ascending
    #[arg(long)]
    pub desc: bool,

    /// Page number (1-based)
    #[arg(long)]
    pub page: Option<i64>,

    /// Results per page
    #[arg(long)]
    pub page_size: Option<i64>,
}

#[derive(Args)]
pub struct GetArgs {
    /// Company ID
    pub id: i64,
}

#[derive(Args)]
pub struct CreateArgs {
    /// Company name
    #[arg(long)]
    pub name: String,

    /// Year the company was founded
    #[arg(long)]
    pub year: i32,

    /// City of the head office (requires --country)
    #[arg(long, requires = "country")]
    pub city: Option<String>,

    /// Two-letter country code of the head office (requires --city)
    #[arg(long, requires = "city")]
    pub country: Option<String>,
}

pub fn run(args: &CompaniesArgs, ctx: &Context<'_>) -> Result<()> {
    match &args.command {
        CompaniesCommand::List(list) => run_list(list, ctx),
        CompaniesCommand::Get(get) => run_get(get, ctx),
        CompaniesCommand::Create(create) => run_create(create, ctx),
    }
}

/// Builds the filter a list invocation asks for. Paging applies when either
/// paging flag is given; the missing half falls back to page 1 or the
/// configured default size.
pub fn build_filter(args: &ListArgs, default_page_size: i64) -> Result<ListFilter> {
    let mut filter = ListFilter::default();

    if let Some(search) = &args.search {
        let validated = validation::validate_search(search)?;
        filter = filter.with_search(&validated);
    }

    if let Some(column) = &args.sort_by {
        filter = filter.with_sort_by_column(column);
    }

    if args.desc {
        filter = filter.with_sort_direction(SortDirection::Desc);
    }

    if args.page.is_some() || args.page_size.is_some() {
        filter = filter
            .with_page_index(args.page.unwrap_or(1))
            .with_page_size(args.page_size.unwrap_or(default_page_size));
    }

    Ok(filter)
}

fn run_list(args: &ListArgs, ctx: &Context<'_>) -> Result<()> {
    let filter = build_filter(args, ctx.config.default_page_size)?;

    let mut list = ctx.service.list_companies(&filter);
    if let Some(trace_id) = ctx.trace_id {
        list = list.with_trace_id(trace_id);
    }

    if !list.is_success() {
        return fail(&list, list.ensure_success());
    }

    eprintln!(
        "Page {}/{} ({} total companies)",
        list.page_index(),
        list.total_pages(),
        list.total()
    );

    match ctx.format {
        OutputFormat::Json => print_json(&list),
        format => print_companies(list.items(), format)?,
    }

    Ok(())
}

fn run_get(args: &GetArgs, ctx: &Context<'_>) -> Result<()> {
    let resp = traced(ctx.service.get_company(args.id), ctx.trace_id);

    if !resp.is_success() {
        return fail(&resp, resp.ensure_success());
    }

    match (ctx.format, resp.data()) {
        (OutputFormat::Json, _) => print_json(&resp),
        (format, Some(company)) => print_companies(std::slice::from_ref(company), format)?,
        (_, None) => {}
    }

    Ok(())
}

fn run_create(args: &CreateArgs, ctx: &Context<'_>) -> Result<()> {
    let address = match (&args.city, &args.country) {
        (Some(city), Some(country)) => Some(Address {
            city: city.clone(),
            country: country.clone(),
        }),
        _ => None,
    };
    let input = CompanyInput {
        name: args.name.clone(),
        year_founded: args.year,
        address,
    };

    let resp = traced(ctx.service.create_company(&input), ctx.trace_id);

    if !resp.is_success() {
        return fail(&resp, resp.ensure_success());
    }

    match ctx.format {
        OutputFormat::Json => print_json(&resp),
        _ => {
            if let Some(id) = resp.data() {
                println!("Created company {}", id);
            }
        }
    }

    Ok(())
}

fn traced<T: Clone>(resp: Response<T>, trace_id: Option<&str>) -> Response<T> {
    match trace_id {
        Some(id) => resp.with_trace_id(id),
        None => resp,
    }
}

/// Prints a failure envelope as JSON regardless of the output format, then
/// turns the outcome into the process error.
fn fail<E: Serialize>(envelope: &E, outcome: Result<(), CoreError>) -> Result<()> {
    print_json(envelope);
    outcome?;
    anyhow::bail!("request failed")
}
