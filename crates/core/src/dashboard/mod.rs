//! Operations dashboard: entity counts, status charts and the activity feed.
//!
//! - `stats` - counts per collection, drivers derived from employees
//! - `status` - status buckets for the driver and vehicle charts
//! - `feed` - merged, time-ordered recent activity
//! - `service` - snapshot assembly with per-section fallbacks

pub mod entity;
pub mod error;
pub mod feed;
pub mod service;
pub mod stats;
pub mod status;
pub mod timestamp;
pub mod types;


pub use error::DashboardError;
pub use feed::{FEED_LIMIT, FeedOptions, FeedSources, RECENT_WINDOW_DAYS, build_feed};
pub use service::{Clock, DashboardService, FixedClock, SystemClock};
pub use status::{PERSON_STATUS, StatusFamily, VEHICLE_STATUS};
pub use types::{
    ActivityEntry, ActivityIcon, ActivityKind, ColorTag, DashboardSnapshot, DashboardStats,
    Section, StatusBreakdown,
};
