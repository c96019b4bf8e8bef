//! Indicator Catalog
//!
//! Read-only collection of indicator records, loaded once per process from
//! the offline index build. Provides id lookup for result assembly and is
//! never mutated at query time.

mod record;

pub use record::{derive_group_code, IndicatorId, IndicatorRecord, GROUP_CODE_LEN};

use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Utc};

// ============================================================================
// ERROR TYPES
// ============================================================================

/// Catalog error type
#[non_exhaustive]
#[derive(Debug, Clone, thiserror::Error)]
pub enum CatalogError {
    /// Id not present in the loaded catalog (stale index/catalog pairing)
    #[error("Indicator not found: {0}")]
    NotFound(String),
}

// ============================================================================
// CATALOG
// ============================================================================

/// Summary statistics for a loaded catalog
#[derive(Debug, Clone)]
pub struct CatalogStats {
    /// Total number of records
    pub total_records: usize,
    /// Number of distinct indicator families
    pub distinct_groups: usize,
    /// Number of distinct top-level domains
    pub distinct_domains: usize,
    /// When this catalog instance was materialized
    pub built_at: DateTime<Utc>,
}

/// Ordered, read-only indicator catalog with id lookup
pub struct IndicatorCatalog {
    records: Vec<IndicatorRecord>,
    by_id: HashMap<IndicatorId, usize>,
    built_at: DateTime<Utc>,
}

impl IndicatorCatalog {
    /// Build a catalog from records produced by the offline index build.
    ///
    /// Record order is preserved. A duplicated id keeps the first occurrence;
    /// later duplicates are logged and skipped so lookup stays unambiguous.
    pub fn from_records(records: Vec<IndicatorRecord>) -> Self {
        let mut kept = Vec::with_capacity(records.len());
        let mut by_id = HashMap::with_capacity(records.len());

        for record in records {
            if by_id.contains_key(&record.id) {
                tracing::warn!(id = %record.id, "duplicate indicator id in catalog, skipping");
                continue;
            }
            by_id.insert(record.id.clone(), kept.len());
            kept.push(record);
        }

        Self {
            records: kept,
            by_id,
            built_at: Utc::now(),
        }
    }

    /// Look up a record by id
    pub fn get(&self, id: &str) -> Result<&IndicatorRecord, CatalogError> {
        self.by_id
            .get(id)
            .map(|&idx| &self.records[idx])
            .ok_or_else(|| CatalogError::NotFound(id.to_string()))
    }

    /// Whether the catalog contains an id
    pub fn contains(&self, id: &str) -> bool {
        self.by_id.contains_key(id)
    }

    /// Number of records
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the catalog is empty
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Iterate records in catalog order
    pub fn iter(&self) -> impl Iterator<Item = &IndicatorRecord> {
        self.records.iter()
    }

    /// All records in catalog order
    pub fn records(&self) -> &[IndicatorRecord] {
        &self.records
    }

    /// Catalog summary
    pub fn stats(&self) -> CatalogStats {
        let distinct_groups: HashSet<&str> = self
            .records
            .iter()
            .filter_map(|r| r.group_code.as_deref())
            .collect();
        let distinct_domains: HashSet<&str> =
            self.records.iter().map(|r| r.domain.as_str()).collect();

        CatalogStats {
            total_records: self.records.len(),
            distinct_groups: distinct_groups.len(),
            distinct_domains: distinct_domains.len(),
            built_at: self.built_at,
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
