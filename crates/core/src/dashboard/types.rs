//! Dashboard data types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Entity counts shown on the dashboard cards.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardStats {
    /// Employees, drivers included.
    pub funcionarios: u64,
    /// Employees holding the driver role.
    pub motoristas: u64,
    /// Sellers.
    pub vendedores: u64,
    /// Cities.
    pub cidades: u64,
    /// Vehicles.
    pub veiculos: u64,
    /// Routes.
    pub rotas: u64,
    /// Time-off requests.
    pub folgas: u64,
}

/// Display color tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorTag {
    /// Green.
    Green,
    /// Blue.
    Blue,
    /// Orange.
    Orange,
    /// Purple.
    Purple,
    /// Red.
    Red,
    /// Gray.
    Gray,
}

/// One slice of a status breakdown chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusBreakdown {
    /// Bucket display name.
    pub name: String,
    /// Number of records in the bucket. Never zero.
    pub value: u64,
    /// Slice color.
    pub color: ColorTag,
}

/// Kind of record an activity entry was synthesized from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityKind {
    /// A route was created.
    Route,
    /// A time-off request was filed or decided.
    TimeOff,
    /// A driver was registered.
    Driver,
    /// A vehicle was registered.
    Vehicle,
    /// An employee was registered.
    Employee,
    /// A city was registered.
    City,
    /// A seller was registered.
    Seller,
}

impl ActivityKind {
    /// Stable prefix used for entry ids.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Route => "route",
            Self::TimeOff => "time_off",
            Self::Driver => "driver",
            Self::Vehicle => "vehicle",
            Self::Employee => "employee",
            Self::City => "city",
            Self::Seller => "seller",
        }
    }
}

/// Icon tag for an activity entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ActivityIcon {
    /// Map.
    Map,
    /// Calendar.
    Calendar,
    /// Car.
    Car,
    /// Truck.
    Truck,
    /// Users.
    Users,
    /// Building.
    Building,
    /// User with check mark.
    UserCheck,
}

/// One activity feed item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityEntry {
    /// Entry id, `{kind}-{document key}`.
    pub id: String,
    /// Source record kind.
    #[serde(rename = "type")]
    pub kind: ActivityKind,
    /// Headline.
    pub title: String,
    /// Detail line.
    pub description: String,
    /// When the event happened.
    pub timestamp: DateTime<Utc>,
    /// Icon tag.
    pub icon: ActivityIcon,
    /// Color tag.
    pub color: ColorTag,
}

/// Outcome of one independently fetched dashboard section.
///
/// A failed section still carries its zero-value data so it can be rendered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Section<T> {
    /// The section was computed from the store.
    Loaded {
        /// Computed data.
        data: T,
    },
    /// The section failed; `data` is the fallback.
    Failed {
        /// Fallback data.
        data: T,
        /// Failure message.
        error: String,
    },
}

impl<T> Section<T> {
    /// Returns the section data, loaded or fallback.
    #[must_use]
    pub const fn data(&self) -> &T {
        match self {
            Self::Loaded { data } | Self::Failed { data, .. } => data,
        }
    }

    /// Consumes the section and returns its data.
    #[must_use]
    pub fn into_data(self) -> T {
        match self {
            Self::Loaded { data } | Self::Failed { data, .. } => data,
        }
    }

    /// Returns the failure message, if the section failed.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Loaded { .. } => None,
            Self::Failed { error, .. } => Some(error),
        }
    }

    /// Returns true if the section failed.
    #[must_use]
    pub const fn is_failed(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }
}

impl<T: Default> Section<T> {
    /// A failed section holding the zero value.
    #[must_use]
    pub fn fallback(error: impl Into<String>) -> Self {
        Self::Failed {
            data: T::default(),
            error: error.into(),
        }
    }
}

/// Everything the dashboard renders, computed in one pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardSnapshot {
    /// Entity counts.
    pub stats: Section<DashboardStats>,
    /// Driver status chart.
    pub driver_status: Section<Vec<StatusBreakdown>>,
    /// Vehicle status chart.
    pub vehicle_status: Section<Vec<StatusBreakdown>>,
    /// Recent activity, newest first, at most ten entries.
    pub activities: Section<Vec<ActivityEntry>>,
    /// When the snapshot was computed.
    pub generated_at: DateTime<Utc>,
}

impl DashboardSnapshot {
    /// A snapshot where every section failed with `error`.
    #[must_use]
    pub fn fallback(error: &str, generated_at: DateTime<Utc>) -> Self {
        Self {
            stats: Section::fallback(error),
            driver_status: Section::fallback(error),
            vehicle_status: Section::fallback(error),
            activities: Section::fallback(error),
            generated_at,
        }
    }
}
