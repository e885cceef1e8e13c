//! Content emission for tola: AMP pages, search and site indexes, page lists.
//!
//! Takes the parsed document collection of a site and writes derived
//! artifacts through a [`Sink`]:
//!
//! | Artifact | Generator |
//! |----------|-----------|
//! | `<slug>/amp.html` | [`amp::page`] |
//! | `search-index.json` | [`generator::search`] |
//! | `site-index.json` | [`generator::site`] |
//! | `pages.txt` | [`generator::pages`] |
//!
//! # Example
//!
//! ```ignore
//! let config = SiteConfig::from_path(Path::new("emit.toml"))?;
//! let sink = FsSink::from_config(&config);
//! let report = emit_site(&documents, &config, &sink)?;
//! ```

pub mod amp;
pub mod config;
pub mod content;
pub mod error;
pub mod filter;
pub mod generator;
pub mod logger;
pub mod pipeline;
pub mod sink;
pub mod utils;

pub use amp::to_amp_html;
pub use config::SiteConfig;
pub use content::{ContentTree, Dates, Document, Frontmatter};
pub use error::EmitError;
pub use generator::{Artifact, EmitContext};
pub use pipeline::{EmitReport, emit_site};
pub use sink::{FsSink, MemorySink, Sink};
