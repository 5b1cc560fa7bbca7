//! Download party logos listed in a spreadsheet and save them as circular PNGs.

pub mod config;
pub mod error;
pub mod fetch;
pub mod logo;
pub mod run;
pub mod sheet;

pub use config::Config;
pub use error::{FetchError, LogoError, ResolveError, RunError};
pub use fetch::{Fetcher, HttpFetcher};
pub use run::{run, Outcome, RunSummary};
