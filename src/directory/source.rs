use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::info;

use super::types::AlumniRecord;
use crate::utils::PortalError;

/// Bulk loader for the authoritative record set, called once at startup
#[async_trait]
pub trait RecordSource: Send + Sync {
    async fn load(&self) -> Result<Vec<AlumniRecord>, PortalError>;

    /// Short label for logs and the status line
    fn describe(&self) -> String;
}

/// Built-in demo directory
#[derive(Debug, Default, Clone, Copy)]
pub struct StaticRecordSource;

#[async_trait]
impl RecordSource for StaticRecordSource {
    async fn load(&self) -> Result<Vec<AlumniRecord>, PortalError> {
        Ok(sample_records())
    }

    fn describe(&self) -> String {
        "built-in sample directory".to_string()
    }
}

/// Reads a JSON array of records from disk
#[derive(Debug, Clone)]
pub struct JsonFileRecordSource {
    path: PathBuf,
}

impl JsonFileRecordSource {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

#[async_trait]
impl RecordSource for JsonFileRecordSource {
    async fn load(&self) -> Result<Vec<AlumniRecord>, PortalError> {
        let json = tokio::fs::read_to_string(&self.path).await.map_err(|e| {
            PortalError::InitError(format!("cannot read {}: {}", self.path.display(), e))
        })?;
        let records: Vec<AlumniRecord> = serde_json::from_str(&json)?;
        info!(path = %self.path.display(), count = records.len(), "loaded alumni records");
        Ok(records)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

#[allow(clippy::too_many_arguments)]
fn record(
    id: u64,
    name: &str,
    class: &str,
    company: &str,
    position: &str,
    industry: &str,
    location: &str,
    handle: &str,
) -> AlumniRecord {
    let initials = name
        .split_whitespace()
        .filter_map(|part| part.chars().next())
        .collect::<String>()
        .to_uppercase();
    AlumniRecord {
        id,
        name: name.to_string(),
        class: class.to_string(),
        company: company.to_string(),
        position: position.to_string(),
        industry: industry.to_string(),
        location: location.to_string(),
        email: format!("{}@example.com", name.to_lowercase().replace(' ', ".")),
        contact_handle: format!("linkedin.com/in/{}", handle),
        initials,
    }
}

/// The five demo alumni
pub fn sample_records() -> Vec<AlumniRecord> {
    vec![
        record(1, "Sarah Johnson", "2018", "Google", "Software Engineer", "Technology", "San Francisco, CA", "sarahjohnson"),
        record(2, "Michael Chen", "2016", "McKinsey & Company", "Senior Consultant", "Consulting", "New York, NY", "michaelchen"),
        record(3, "Emily Rodriguez", "2019", "Doctors Without Borders", "Program Manager", "Non-profit", "Geneva, Switzerland", "emilyrodriguez"),
        record(4, "David Kim", "2015", "Goldman Sachs", "Vice President", "Finance", "London, UK", "davidkim"),
        record(5, "Lisa Wang", "2020", "Tesla", "Design Engineer", "Automotive", "Austin, TX", "lisawang"),
    ]
}
