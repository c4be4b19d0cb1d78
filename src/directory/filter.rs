use std::collections::{BTreeSet, HashSet};

use tracing::debug;

use super::types::{AlumniRecord, DirectoryView, FacetField, Facets, FilterCriteria};
use crate::utils::PortalError;

/// Keep the records that satisfy every present criterion, in input order
pub fn filter(records: &[AlumniRecord], criteria: &FilterCriteria) -> Vec<AlumniRecord> {
    records
        .iter()
        .filter(|record| criteria.matches(record))
        .cloned()
        .collect()
}

/// Distinct values of `field`, sorted ascending
pub fn distinct_values(records: &[AlumniRecord], field: FacetField) -> Vec<String> {
    records
        .iter()
        .map(|record| field.value_of(record).to_string())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

impl Facets {
    pub fn from_records(records: &[AlumniRecord]) -> Self {
        Self {
            classes: distinct_values(records, FacetField::Class),
            industries: distinct_values(records, FacetField::Industry),
            locations: distinct_values(records, FacetField::Location),
        }
    }
}

/// The authoritative alumni collection for one session
#[derive(Debug, Clone, Default)]
pub struct Directory {
    records: Vec<AlumniRecord>,
    facets: Facets,
}

impl Directory {
    /// Build a directory, rejecting collections with duplicate ids
    pub fn new(records: Vec<AlumniRecord>) -> Result<Self, PortalError> {
        let mut seen = HashSet::with_capacity(records.len());
        for record in &records {
            if !seen.insert(record.id) {
                return Err(PortalError::InitError(format!(
                    "duplicate alumni id {}",
                    record.id
                )));
            }
        }

        let facets = Facets::from_records(&records);
        debug!(records = records.len(), "directory loaded");
        Ok(Self { records, facets })
    }

    pub fn records(&self) -> &[AlumniRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn facets(&self) -> &Facets {
        &self.facets
    }

    pub fn find(&self, id: u64) -> Option<&AlumniRecord> {
        self.records.iter().find(|record| record.id == id)
    }

    pub fn view(&self, criteria: &FilterCriteria) -> DirectoryView {
        if self.records.is_empty() {
            return DirectoryView::NoData;
        }
        let matches = filter(&self.records, criteria);
        if matches.is_empty() {
            DirectoryView::NoMatches
        } else {
            DirectoryView::Matches(matches)
        }
    }
}
