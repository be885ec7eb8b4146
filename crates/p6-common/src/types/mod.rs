//! Domain types shared by the parser, the normalizers and the dispatcher

mod record;

pub use record::{FieldValue, NormalizedRecord};

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::P6Error;

/// Structural category of a project-management export element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Project,
    Wbs,
    Activity,
    Resource,
    ResourceAssignment,
    Calendar,
}

impl EntityKind {
    /// All kinds, in declaration order
    pub const ALL: [EntityKind; 6] = [
        EntityKind::Project,
        EntityKind::Wbs,
        EntityKind::Activity,
        EntityKind::Resource,
        EntityKind::ResourceAssignment,
        EntityKind::Calendar,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Project => "project",
            EntityKind::Wbs => "wbs",
            EntityKind::Activity => "activity",
            EntityKind::Resource => "resource",
            EntityKind::ResourceAssignment => "resource_assignment",
            EntityKind::Calendar => "calendar",
        }
    }

    /// Element name that carries this kind in the XML export
    pub fn tag_name(&self) -> &'static str {
        match self {
            EntityKind::Project => "Project",
            EntityKind::Wbs => "WBS",
            EntityKind::Activity => "Activity",
            EntityKind::Resource => "Resource",
            EntityKind::ResourceAssignment => "ResourceAssignment",
            EntityKind::Calendar => "Calendar",
        }
    }

    /// Whether a baseline snapshot of this kind can exist
    pub fn supports_baseline(&self) -> bool {
        !matches!(self, EntityKind::Calendar)
    }
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for EntityKind {
    type Err = P6Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "project" => Ok(EntityKind::Project),
            "wbs" => Ok(EntityKind::Wbs),
            "activity" => Ok(EntityKind::Activity),
            "resource" => Ok(EntityKind::Resource),
            "resource_assignment" | "resourceassignment" => Ok(EntityKind::ResourceAssignment),
            "calendar" => Ok(EntityKind::Calendar),
            _ => Err(P6Error::UnknownEntityKind(s.to_string())),
        }
    }
}

/// Whether a record comes from the live schedule or a frozen baseline copy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Snapshot {
    Current,
    Baseline,
}

impl Snapshot {
    pub fn as_str(&self) -> &'static str {
        match self {
            Snapshot::Current => "Current",
            Snapshot::Baseline => "Baseline",
        }
    }
}

impl std::fmt::Display for Snapshot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Date stamped on every record of one run
///
/// Resolved once per run and threaded into every normalizer call, so all
/// records produced by a run carry the same value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct UploadDate(NaiveDate);

impl UploadDate {
    pub fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    /// Today's date (UTC)
    pub fn today() -> Self {
        Self(Utc::now().date_naive())
    }

    /// Resolve an operator-chosen date against `today`
    ///
    /// `None` selects `today`; a date after `today` is capped to `today`.
    pub fn resolve(requested: Option<NaiveDate>, today: NaiveDate) -> Self {
        match requested {
            Some(date) if date > today => {
                tracing::warn!(requested = %date, today = %today, "Upload date is in the future, using today");
                Self(today)
            },
            Some(date) => Self(date),
            None => Self(today),
        }
    }

    pub fn date(&self) -> NaiveDate {
        self.0
    }
}

impl std::fmt::Display for UploadDate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

impl std::str::FromStr for UploadDate {
    type Err = P6Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
            .map(Self)
            .map_err(|_| P6Error::InvalidUploadDate(s.to_string()))
    }
}
