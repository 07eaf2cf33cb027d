mod chan_api;

pub use chan_api::{ChanApiProvider, DEFAULT_API_BASE_URL};
