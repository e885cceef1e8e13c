//! Build driver: runs every enabled generator and hands results to a sink.
//!
//! ```text
//! emit_site(documents, config, sink)
//!   ├── normalize + validate config
//!   ├── EmitContext (one timestamp for the whole build)
//!   └── rayon::join
//!         ├── AMP pages, one rayon task per candidate document
//!         └── search-index.json, site-index.json, pages.txt
//! ```
//!
//! A failing artifact is logged and recorded in the [`EmitReport`]; it never
//! stops the other artifacts from being written.

use crate::{
    amp::{is_amp_candidate, render_amp_page},
    config::SiteConfig,
    content::Document,
    error::EmitError,
    generator::{
        Artifact, EmitContext, PAGES_SLUG, SEARCH_INDEX_SLUG, SITE_INDEX_SLUG,
        pages::build_page_list, search::build_search_index, site::build_site_index,
    },
    log,
    sink::Sink,
};
use anyhow::{Context, Result};
use rayon::prelude::*;

/// One artifact that could not be produced or written.
#[derive(Debug)]
pub struct EmitFailure {
    /// What was being produced (`notes/rust/amp`, `search-index`).
    pub artifact: String,
    pub error: anyhow::Error,
}

/// Outcome of a build.
#[derive(Debug, Default)]
pub struct EmitReport {
    /// Names (`slug + ext`) of artifacts written, AMP pages first.
    pub written: Vec<String>,
    pub failures: Vec<EmitFailure>,
    pub warnings: Vec<String>,
}

impl EmitReport {
    pub fn is_ok(&self) -> bool {
        self.failures.is_empty()
    }

    fn record(&mut self, outcome: Outcome) {
        match outcome {
            Ok(name) => self.written.push(name),
            Err(failure) => {
                log!("error"; "{}: {:#}", failure.artifact, failure.error);
                self.failures.push(failure);
            }
        }
    }

    fn warn(&mut self, message: String) {
        log!("warn"; "{}", message);
        self.warnings.push(message);
    }
}

type Outcome = std::result::Result<String, EmitFailure>;

// ============================================================================
// Public API
// ============================================================================

/// Emit every enabled artifact for `documents`.
///
/// Fails only on invalid configuration; per-artifact failures are collected
/// in the returned report.
pub fn emit_site(
    documents: &[Document],
    config: &SiteConfig,
    sink: &dyn Sink,
) -> Result<EmitReport> {
    let mut config = config.clone();
    config.normalize();
    config
        .validate()
        .context("Invalid configuration, nothing emitted")?;

    let ctx = EmitContext::new(&config);
    Ok(emit_with_context(&ctx, documents, sink))
}

/// Emit with a prepared context (fixed timestamp or custom filter).
///
/// The context's config is used as given.
pub fn emit_with_context(
    ctx: &EmitContext<'_>,
    documents: &[Document],
    sink: &dyn Sink,
) -> EmitReport {
    let mut report = EmitReport::default();

    // ampUrl in site-index.json is always written, even without AMP pages.
    if ctx.config.index.site && !ctx.config.amp.enable {
        report.warn("amp is disabled but site-index.json still lists ampUrl for every page".into());
    }

    let (amp, indexes) = rayon::join(
        || emit_amp(ctx, documents, sink),
        || emit_indexes(ctx, documents, sink),
    );

    let amp_pages = amp.iter().filter(|outcome| outcome.is_ok()).count();
    if ctx.config.amp.enable {
        log!("amp"; "{} pages", amp_pages);
    }

    for outcome in amp.into_iter().chain(indexes) {
        report.record(outcome);
    }

    log!(
        "emit";
        "{} written, {} failed",
        report.written.len(),
        report.failures.len()
    );
    report
}

// ============================================================================
// Generators
// ============================================================================

fn emit_amp(ctx: &EmitContext<'_>, documents: &[Document], sink: &dyn Sink) -> Vec<Outcome> {
    documents
        .par_iter()
        .filter(|doc| is_amp_candidate(ctx, doc))
        .map(|doc| write_artifact(sink, format!("{}/amp", doc.slug), render_amp_page(ctx, doc)))
        .collect()
}

fn emit_indexes(ctx: &EmitContext<'_>, documents: &[Document], sink: &dyn Sink) -> Vec<Outcome> {
    let index = &ctx.config.index;
    let mut outcomes = Vec::with_capacity(3);

    if index.search {
        let outcome = write_artifact(sink, SEARCH_INDEX_SLUG.into(), build_search_index(ctx, documents));
        if let Ok(name) = &outcome {
            log!("search"; "{}", name);
        }
        outcomes.push(outcome);
    }

    if index.site {
        let outcome = write_artifact(sink, SITE_INDEX_SLUG.into(), build_site_index(ctx, documents));
        if let Ok(name) = &outcome {
            log!("site"; "{}", name);
        }
        outcomes.push(outcome);
    }

    if index.pages {
        let outcome = write_artifact(sink, PAGES_SLUG.into(), Ok(build_page_list(ctx, documents)));
        if let Ok(name) = &outcome {
            log!("pages"; "{}", name);
        }
        outcomes.push(outcome);
    }

    outcomes
}

fn write_artifact(
    sink: &dyn Sink,
    label: String,
    built: std::result::Result<Artifact, EmitError>,
) -> Outcome {
    let result = built.map_err(anyhow::Error::from).and_then(|artifact| {
        let name = artifact.name();
        sink.write(&artifact)
            .with_context(|| format!("Failed to write {name}"))?;
        Ok(name)
    });

    result.map_err(|error| EmitFailure {
        artifact: label,
        error,
    })
}
