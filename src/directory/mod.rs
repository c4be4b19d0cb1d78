// Gateway module for the alumni directory - follows the Train Station Pattern
// All external access must go through this gateway

// Private submodules - not directly accessible from outside
mod filter;
mod source;
mod types;

// Public re-exports - the ONLY way to access directory functionality
pub use filter::{distinct_values, filter, Directory};
pub use source::{sample_records, JsonFileRecordSource, RecordSource, StaticRecordSource};
pub use types::{AlumniRecord, DirectoryView, FacetField, Facets, FilterCriteria};
