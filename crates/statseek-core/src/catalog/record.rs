//! Indicator Record - one entry of the statistics catalog
//!
//! Each record describes a single published indicator with:
//! - A stable indicator code (the id)
//! - The canonical display name shown to the user
//! - Classification fields (domain, major/minor class)
//! - Definition and source survey text
//! - A derived family group code and keyword-searchable text

use serde::{Deserialize, Serialize};

/// Stable unique key of an indicator within the loaded catalog
pub type IndicatorId = String;

/// Number of leading id characters that identify an indicator family.
///
/// Indicator codes group related breakdowns (total / male / female / per
/// capita) under a shared prefix; one family is one statistic.
pub const GROUP_CODE_LEN: usize = 5;

// ============================================================================
// INDICATOR RECORD
// ============================================================================

/// One catalog entry. Immutable after the catalog is built.
#[non_exhaustive]
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndicatorRecord {
    /// Indicator code (e.g. "A110101")
    pub id: IndicatorId,
    /// Canonical display name, the string pasted into the reporting tool
    pub name: String,
    /// Top-level statistical domain (population, education, ...)
    pub domain: String,
    /// Major classification within the domain
    pub major_class: String,
    /// Minor classification within the domain
    pub minor_class: String,
    /// Definition text explaining what the indicator measures
    pub definition: String,
    /// Name of the survey the values come from
    pub source_stat: String,
    /// Indicator family key, derived from the id prefix
    pub group_code: Option<String>,
    /// Concatenated text fields, the corpus for keyword retrieval
    pub searchable_text: String,
}

impl IndicatorRecord {
    /// Build a record, deriving `group_code` and `searchable_text`
    pub fn new(
        id: impl Into<IndicatorId>,
        name: impl Into<String>,
        domain: impl Into<String>,
        major_class: impl Into<String>,
        minor_class: impl Into<String>,
        definition: impl Into<String>,
        source_stat: impl Into<String>,
    ) -> Self {
        let id = id.into();
        let name = name.into();
        let domain = domain.into();
        let major_class = major_class.into();
        let minor_class = minor_class.into();
        let definition = definition.into();
        let source_stat = source_stat.into();

        let group_code = derive_group_code(&id);
        let searchable_text = format!(
            "{} {} {} {} {} {}",
            name, domain, major_class, minor_class, definition, source_stat
        );

        Self {
            id,
            name,
            domain,
            major_class,
            minor_class,
            definition,
            source_stat,
            group_code,
            searchable_text,
        }
    }

    /// The individual text fields, in catalog column order.
    ///
    /// The reranker scores each field separately; keyword indices use the
    /// concatenated `searchable_text` instead.
    pub fn text_fields(&self) -> [&str; 6] {
        [
            &self.name,
            &self.domain,
            &self.major_class,
            &self.minor_class,
            &self.definition,
            &self.source_stat,
        ]
    }
}

/// Derive the family group code from an indicator id.
///
/// Returns `None` for ids shorter than the prefix; those records never
/// participate in family deduplication.
pub fn derive_group_code(id: &str) -> Option<String> {
    let mut chars = id.char_indices();
    match chars.nth(GROUP_CODE_LEN - 1) {
        Some((idx, ch)) => Some(id[..idx + ch.len_utf8()].to_string()),
        None => None,
    }
}

// ============================================================================
// TESTS
// ============================================================================
