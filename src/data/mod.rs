//! # Data Access
//!
//! Everything that retrieves boards, catalogs and threads. The core never talks to
//! the network directly: it asks for a `FetchRequest` and receives `Fetched` data.

pub mod markup;
pub mod provider;
pub mod providers;
pub mod types;

pub use provider::{DataProvider, ProviderError, fetch_with_timeout};
pub use providers::ChanApiProvider;
pub use types::{CatalogEntry, DataSnapshot, FetchRequest, Fetched, Post};
