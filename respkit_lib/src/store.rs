//! In-memory company store backed by `DashMap` for concurrent access.

use std::sync::atomic::{AtomicI64, Ordering};

use dashmap::DashMap;

use crate::company::{Company, CompanyInput};

/// Thread-safe company storage.
///
/// Ids come from a monotonically increasing sequence starting at 1, so
/// ordering a snapshot by id reproduces insertion order.
pub struct CompanyStore {
    rows: DashMap<i64, Company>,
    next_id: AtomicI64,
}

impl Default for CompanyStore {
    fn default() -> Self {
        Self::new()
    }
}

impl CompanyStore {
    pub fn new() -> Self {
        Self {
            rows: DashMap::new(),
            next_id: AtomicI64::new(1),
        }
    }

    /// Creates a store holding `seed`, ids assigned in order.
    pub fn with_seed(seed: Vec<CompanyInput>) -> Self {
        let store = Self::new();
        for input in seed {
            store.insert(input);
        }
        store
    }

    pub fn insert(&self, input: CompanyInput) -> Company {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let company = Company {
            id,
            name: input.name,
            year_founded: input.year_founded,
            address: input.address,
        };
        self.rows.insert(id, company.clone());
        company
    }

    pub fn get(&self, id: i64) -> Option<Company> {
        self.rows.get(&id).map(|entry| entry.value().clone())
    }

    /// Replaces the fields of an existing company. `None` if the id is unknown.
    pub fn update(&self, id: i64, input: CompanyInput) -> Option<Company> {
        let mut entry = self.rows.get_mut(&id)?;
        entry.name = input.name;
        entry.year_founded = input.year_founded;
        entry.address = input.address;
        Some(entry.value().clone())
    }

    pub fn remove(&self, id: i64) -> Option<Company> {
        self.rows.remove(&id).map(|(_, company)| company)
    }

    /// True when another company (not `except`) already uses `name`.
    pub fn name_taken(&self, name: &str, except: Option<i64>) -> bool {
        self.rows
            .iter()
            .any(|entry| entry.name == name && Some(entry.id) != except)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// All companies in insertion order.
    pub fn snapshot(&self) -> Vec<Company> {
        let mut rows: Vec<Company> = self.rows.iter().map(|entry| entry.value().clone()).collect();
        rows.sort_by_key(|c| c.id);
        rows
    }
}
