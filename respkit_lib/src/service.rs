//! Company operations answering with envelopes.

use std::sync::Mutex;

use respkit_core::{shape_list, ListEnvelope, ListFilter, Response};

use crate::company::{CompanyInput, CompanyView};
use crate::config::ServiceConfig;
use crate::error::ServiceError;
use crate::seed;
use crate::store::CompanyStore;
use crate::validation;

/// Company catalogue over an in-memory store.
///
/// Domain outcomes (not found, conflict, invalid input) come back as failure
/// envelopes; nothing here returns `Err` for them.
pub struct CompanyService {
    store: CompanyStore,
    config: ServiceConfig,
    /// Serializes the check-then-write sequences of create and update.
    writes: Mutex<()>,
}

impl CompanyService {
    pub fn new(store: CompanyStore, config: ServiceConfig) -> Self {
        Self {
            store,
            config,
            writes: Mutex::new(()),
        }
    }

    /// A service over the embedded seed companies.
    pub fn seeded(config: ServiceConfig) -> Result<Self, ServiceError> {
        let seed = seed::load_seed_data()?;
        Ok(Self::new(CompanyStore::with_seed(seed), config))
    }

    pub fn store(&self) -> &CompanyStore {
        &self.store
    }

    /// Lists companies: search on name, order by any registered column, page.
    pub fn list_companies(&self, filter: &ListFilter) -> ListEnvelope<CompanyView> {
        if let Some(size) = filter.page_size() {
            if size > self.config.max_page_size {
                return ListEnvelope::failure(Response::<()>::create_bad_request(format!(
                    "page size {} exceeds maximum of {}",
                    size, self.config.max_page_size
                )));
            }
        }

        let views: Vec<CompanyView> = self.store.snapshot().iter().map(CompanyView::from).collect();
        match shape_list(views, filter, |v: &CompanyView| v.name.as_str()) {
            Ok(list) => {
                tracing::debug!(
                    "listed {} of {} companies",
                    list.items().len(),
                    list.total()
                );
                list
            }
            Err(e) => {
                tracing::warn!("Rejected company list request: {}", e);
                e.into()
            }
        }
    }

    pub fn get_company(&self, id: i64) -> Response<CompanyView> {
        match self.store.get(id) {
            Some(company) => Response::success(CompanyView::from(&company)),
            None => Response::not_found().with_message(format!("company {} not found", id)),
        }
    }

    /// Creates a company; the payload is the new id.
    pub fn create_company(&self, input: &CompanyInput) -> Response<i64> {
        let input = match validation::validate_company(input) {
            Ok(input) => input,
            Err(errors) => return Response::validation_failed(errors),
        };

        let _guard = self.writes.lock().unwrap_or_else(|e| e.into_inner());
        if self.store.name_taken(&input.name, None) {
            return Response::conflict()
                .with_message(format!("a company named '{}' already exists", input.name));
        }
        let company = self.store.insert(input);
        tracing::info!("Created company {} ({})", company.id, company.name);
        Response::success(company.id)
    }

    pub fn update_company(&self, id: i64, input: &CompanyInput) -> Response {
        let input = match validation::validate_company(input) {
            Ok(input) => input,
            Err(errors) => return Response::validation_failed(errors),
        };

        let _guard = self.writes.lock().unwrap_or_else(|e| e.into_inner());
        if self.store.get(id).is_none() {
            return Response::not_found().with_message(format!("company {} not found", id));
        }
        if self.store.name_taken(&input.name, Some(id)) {
            return Response::conflict()
                .with_message(format!("a company named '{}' already exists", input.name));
        }
        match self.store.update(id, input) {
            Some(_) => Response::ok(),
            None => Response::not_found().with_message(format!("company {} not found", id)),
        }
    }

    pub fn delete_company(&self, id: i64) -> Response {
        let _guard = self.writes.lock().unwrap_or_else(|e| e.into_inner());
        match self.store.remove(id) {
            Some(company) => {
                tracing::info!("Deleted company {} ({})", company.id, company.name);
                Response::ok()
            }
            None => Response::not_found().with_message(format!("company {} not found", id)),
        }
    }
}
