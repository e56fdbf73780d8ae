use serde::{Deserialize, Serialize};

/// Fixed enumeration of work categories the analyzer can recognize.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceCategory {
    Diagnostics,
    Repair,
    Replacement,
    Maintenance,
    Painting,
    Rustproofing,
    Brakes,
    Suspension,
    Engine,
    Transmission,
    Bodywork,
    Electrical,
    Tires,
    Oil,
    Filters,
}

impl ServiceCategory {
    pub const ALL: [ServiceCategory; 15] = [
        Self::Diagnostics,
        Self::Repair,
        Self::Replacement,
        Self::Maintenance,
        Self::Painting,
        Self::Rustproofing,
        Self::Brakes,
        Self::Suspension,
        Self::Engine,
        Self::Transmission,
        Self::Bodywork,
        Self::Electrical,
        Self::Tires,
        Self::Oil,
        Self::Filters,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Diagnostics => "Diagnostics",
            Self::Repair => "Repair",
            Self::Replacement => "Replacement",
            Self::Maintenance => "Maintenance",
            Self::Painting => "Painting",
            Self::Rustproofing => "Rustproofing",
            Self::Brakes => "Brakes",
            Self::Suspension => "Suspension",
            Self::Engine => "Engine",
            Self::Transmission => "Transmission",
            Self::Bodywork => "Bodywork",
            Self::Electrical => "Electrical",
            Self::Tires => "Tires",
            Self::Oil => "Oil",
            Self::Filters => "Filters",
        }
    }
}

/// Deduplicated set of service labels in first-seen order. The analyzer
/// only ever inserts canonical category labels; fallback paths may carry
/// free-form names from the upstream tool call.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceTagSet {
    tags: Vec<String>,
}

impl ServiceTagSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a label unless an equal one is already present. Returns
    /// whether the label was added.
    pub fn insert(&mut self, tag: impl Into<String>) -> bool {
        let tag = tag.into();
        if self.tags.contains(&tag) {
            return false;
        }
        self.tags.push(tag);
        true
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.tags.iter().map(String::as_str)
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.tags.iter().any(|existing| existing == tag)
    }
}

impl FromIterator<String> for ServiceTagSet {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        let mut set = Self::new();
        for tag in iter {
            set.insert(tag);
        }
        set
    }
}

impl FromIterator<ServiceCategory> for ServiceTagSet {
    fn from_iter<I: IntoIterator<Item = ServiceCategory>>(iter: I) -> Self {
        iter.into_iter().map(|category| category.label().to_string()).collect()
    }
}

impl<'a> FromIterator<&'a str> for ServiceTagSet {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        iter.into_iter().map(str::to_string).collect()
    }
}
