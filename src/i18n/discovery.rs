//! Language availability: which candidate languages actually have a locale
//! resource behind them.
//!
//! Two variants exist. A fixed list trusts configuration as-is. Discovery
//! probes every candidate concurrently and waits for *all* probes to settle;
//! one failing probe never affects its siblings. The result keeps the
//! original candidate order regardless of which probe finished first.

use crate::i18n::{LanguageDescriptor, LocaleSource};
use futures::future::join_all;
use tracing::{info, warn};

/// The languages offered for the session, in candidate order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AvailabilitySet {
    languages: Vec<LanguageDescriptor>,
}

impl AvailabilitySet {
    /// Statically configured availability (no probing).
    pub fn fixed(languages: Vec<LanguageDescriptor>) -> Self {
        Self { languages }
    }

    pub fn contains(&self, code: &str) -> bool {
        self.languages.iter().any(|lang| lang.code == code)
    }

    pub fn get(&self, code: &str) -> Option<&LanguageDescriptor> {
        self.languages.iter().find(|lang| lang.code == code)
    }

    pub fn languages(&self) -> &[LanguageDescriptor] {
        &self.languages
    }

    pub fn codes(&self) -> Vec<&str> {
        self.languages.iter().map(|lang| lang.code.as_str()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.languages.is_empty()
    }

    pub fn len(&self) -> usize {
        self.languages.len()
    }
}

/// Probe every candidate and keep the ones whose resource is reachable.
///
/// An unreachable source yields an empty set; the session falls back to its
/// default language in that case.
pub async fn discover_available<L>(source: &L, candidates: &[LanguageDescriptor]) -> AvailabilitySet
where
    L: LocaleSource + ?Sized,
{
    info!(
        "Probing {} candidate languages at {}",
        candidates.len(),
        source.describe()
    );

    let probes = candidates.iter().map(|lang| async move {
        let outcome = source.probe(&lang.code).await;
        (lang, outcome)
    });

    // All-settled join: output order follows input order, not completion order
    let settled = join_all(probes).await;

    let mut languages = Vec::with_capacity(settled.len());
    for (lang, outcome) in settled {
        match outcome {
            Ok(()) => languages.push(lang.clone()),
            Err(e) => warn!("✗ Language '{}' not offered: {}", lang.code, e),
        }
    }

    info!(
        "Language discovery complete: {}/{} available ({})",
        languages.len(),
        candidates.len(),
        languages
            .iter()
            .map(|l| l.code.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    );

    if languages.is_empty() && !candidates.is_empty() {
        warn!("No locale resources reachable at {}", source.describe());
    }

    AvailabilitySet { languages }
}

/// Build the session's availability set for either variant.
pub async fn resolve_availability<L>(
    source: &L,
    candidates: Vec<LanguageDescriptor>,
    discover: bool,
) -> AvailabilitySet
where
    L: LocaleSource + ?Sized,
{
    if discover {
        discover_available(source, &candidates).await
    } else {
        info!(
            "Using fixed language list: {}",
            candidates
                .iter()
                .map(|l| l.code.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        );
        AvailabilitySet::fixed(candidates)
    }
}
