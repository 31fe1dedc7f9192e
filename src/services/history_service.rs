// src/services/history_service.rs
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::costing::CostBreakdown;
use crate::domain::history::HistoryEntry;
use crate::error::AppResult;
use crate::repositories::HistoryRepository;

/// Thin orchestration over the append-only pricing ledger.
pub struct HistoryService {
    repo: Arc<dyn HistoryRepository>,
}

impl HistoryService {
    pub fn new(repo: Arc<dyn HistoryRepository>) -> Self {
        Self { repo }
    }

    /// Archive a completed breakdown, stamped now.
    pub fn record(&self, breakdown: &CostBreakdown) -> AppResult<Uuid> {
        let entry = HistoryEntry::from_breakdown(breakdown);
        self.repo.append(&entry)?;
        Ok(entry.id)
    }

    /// All archived computations, oldest first.
    pub fn list(&self) -> AppResult<Vec<HistoryEntry>> {
        self.repo.list_all()
    }

    /// Irreversibly wipe the ledger.
    pub fn clear(&self) -> AppResult<()> {
        self.repo.clear()
    }
}
