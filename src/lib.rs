//! A typed, blocking Rust client for the eBird API 2.0.
//!
//! Each API call is a method on [`Client`]: path parameters (region codes,
//! species codes, dates, submission IDs) are positional arguments, and query
//! parameters are passed as a slice of validated [`RequestOption`]s.
//!
//! ## Quick start
//! - Get an API token from <https://ebird.org/api/keygen>.
//! - Pass it to [`Client::new`], or set `EBIRD_API_KEY` (or a `.ebirdrc`
//!   file with `key: <token>`) and use [`Client::from_env`].
//!
//! ```no_run
//! use ebird_api::{Client, RequestOption};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = Client::from_env()?;
//!     let observations = client.recent_observations_in_region(
//!         "US-NY",
//!         &[RequestOption::max_results(10)?, RequestOption::hotspot(true)],
//!     )?;
//!     for obs in observations {
//!         println!("{} at {}", obs.com_name, obs.loc_name);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Errors
//! Invalid option values are rejected when the option is built. Empty path
//! parameters and a missing `lat`/`lng` pair on nearby lookups are rejected
//! before any request is sent. Failures reported by the API come back as
//! [`Error::Api`] carrying an [`ApiError`] with the HTTP status.

#![forbid(unsafe_code)]

mod client;
mod config;
mod endpoint;
mod error;
mod observations;
mod options;
mod product;
mod reference;
mod types;
mod util;

pub use client::{API_KEY_HEADER, Client, DEFAULT_BASE_URL, DEFAULT_TIMEOUT};
pub use config::ClientConfig;
pub use endpoint::Operation;
pub use error::{ApiError, Error, OptionError, Result};
pub use options::{Category, QueryParams, RankedBy, RegionNameFormat, RequestOption, SortKey};
pub use types::{
    AdjacentRegion, Bounds, Checklist, ChecklistFeedEntry, ChecklistObservation, Hotspot,
    HotspotInfo, Location, Observation, RegionInfo, RegionalStatistics, SubAux, SubRegion,
    TaxaLocale, Taxon, TaxonomicGroup, TaxonomyVersion, TopContributor,
};

/// Re-exported so callers can build dates for the date-based endpoints.
pub use chrono::NaiveDate;
