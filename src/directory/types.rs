use serde::{Deserialize, Serialize};

/// One alumni entry in the directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlumniRecord {
    pub id: u64,
    pub name: String,
    /// Graduation year, kept as text
    pub class: String,
    pub company: String,
    pub position: String,
    pub industry: String,
    pub location: String,
    pub email: String,
    #[serde(alias = "linkedin")]
    pub contact_handle: String,
    pub initials: String,
}

/// Optional predicates applied conjunctively. `None` and `Some("")` both mean "no constraint".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterCriteria {
    pub search: Option<String>,
    pub class: Option<String>,
    pub industry: Option<String>,
    pub location: Option<String>,
}

impl FilterCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_search(mut self, query: impl Into<String>) -> Self {
        self.search = Some(query.into());
        self
    }

    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.class = Some(class.into());
        self
    }

    pub fn with_industry(mut self, industry: impl Into<String>) -> Self {
        self.industry = Some(industry.into());
        self
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    /// True when no field constrains the result
    pub fn is_empty(&self) -> bool {
        self.search_query().is_none()
            && present(&self.class).is_none()
            && present(&self.industry).is_none()
            && present(&self.location).is_none()
    }

    /// Normalized search query: trimmed and lowercased, `None` when blank
    pub(crate) fn search_query(&self) -> Option<String> {
        self.search
            .as_deref()
            .map(str::trim)
            .filter(|q| !q.is_empty())
            .map(str::to_lowercase)
    }

    /// Does `record` satisfy every present predicate?
    pub fn matches(&self, record: &AlumniRecord) -> bool {
        if let Some(query) = self.search_query() {
            let hit = [
                &record.name,
                &record.company,
                &record.position,
                &record.industry,
            ]
            .iter()
            .any(|field| field.to_lowercase().contains(&query));
            if !hit {
                return false;
            }
        }

        if let Some(class) = present(&self.class) {
            if record.class != class {
                return false;
            }
        }

        if let Some(industry) = present(&self.industry) {
            if record.industry != industry {
                return false;
            }
        }

        if let Some(location) = present(&self.location) {
            if !record
                .location
                .to_lowercase()
                .contains(&location.to_lowercase())
            {
                return false;
            }
        }

        true
    }
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

/// Fields that can be offered as filter options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FacetField {
    Class,
    Industry,
    Location,
}

impl FacetField {
    pub const ALL: [FacetField; 3] = [FacetField::Class, FacetField::Industry, FacetField::Location];

    pub fn value_of<'a>(&self, record: &'a AlumniRecord) -> &'a str {
        match self {
            Self::Class => &record.class,
            Self::Industry => &record.industry,
            Self::Location => &record.location,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Self::Class => "Class",
            Self::Industry => "Industry",
            Self::Location => "Location",
        }
    }
}

/// Sorted, deduplicated option lists for every facet
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Facets {
    pub classes: Vec<String>,
    pub industries: Vec<String>,
    pub locations: Vec<String>,
}

impl Facets {
    pub fn options(&self, field: FacetField) -> &[String] {
        match field {
            FacetField::Class => &self.classes,
            FacetField::Industry => &self.industries,
            FacetField::Location => &self.locations,
        }
    }
}

/// Result of filtering a loaded directory, keeping "nothing loaded" apart from "nothing matched"
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DirectoryView {
    NoData,
    NoMatches,
    Matches(Vec<AlumniRecord>),
}

impl DirectoryView {
    pub fn records(&self) -> &[AlumniRecord] {
        match self {
            Self::Matches(records) => records,
            Self::NoData | Self::NoMatches => &[],
        }
    }

    /// Message to show in place of an empty list
    pub fn empty_message(&self) -> Option<&'static str> {
        match self {
            Self::NoData => Some("No alumni records are loaded."),
            Self::NoMatches => Some("No alumni found matching your criteria."),
            Self::Matches(_) => None,
        }
    }
}
