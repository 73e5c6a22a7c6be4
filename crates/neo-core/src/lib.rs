//! `neo-core`: near-earth-object statistics pipeline.
//!
//! ```text
//! DateRange ──► NeoClient::fetch_all ──► Datasets
//!                 (3 concurrent GETs)        │
//!                                            ▼
//!                              RenderContext (3 stacked panels)
//!                                            │
//!                                            ▼
//!                          <plot_dir>/plot_{start}_to_{end}.png
//! ```

pub mod client;
pub mod config;
pub mod dates;
pub mod error;
pub mod io;
pub mod paths;
pub mod pipeline;
pub mod render;
pub mod types;

pub use error::{NeoError, Result};
