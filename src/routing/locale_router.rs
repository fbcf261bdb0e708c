//! Locale-prefix routing
//!
//! Decides, for a request path, whether it may pass through untouched or
//! must be redirected to a locale-prefixed equivalent. The decision is pure:
//! it depends only on the path and the router's configuration.

use regex::Regex;
use crate::config::{RoutingConfig, Settings};
use crate::models::locale::{Locale, LocaleSet};
use crate::utils::errors::Result;

/// Path patterns that are never redirected
#[derive(Debug, Clone, Default)]
pub struct ExclusionRules {
    prefixes: Vec<String>,
    patterns: Vec<Regex>,
}

impl ExclusionRules {
    /// Compile exclusion rules; fails on an invalid regular expression
    pub fn new(prefixes: Vec<String>, patterns: &[String]) -> Result<Self> {
        let patterns = patterns
            .iter()
            .map(|p| Regex::new(p))
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(Self { prefixes, patterns })
    }

    pub fn from_config(config: &RoutingConfig) -> Result<Self> {
        Self::new(config.excluded_prefixes.clone(), &config.excluded_patterns)
    }

    /// A prefix ending in `/` matches everything below it and the bare
    /// directory (`/api/` matches `/api`). Any other prefix matches only at a
    /// segment boundary: `/health` matches `/health` and `/health/live`, not
    /// `/healthy-living`.
    pub fn is_excluded(&self, path: &str) -> bool {
        let prefix_match = self.prefixes.iter().any(|prefix| match prefix.strip_suffix('/') {
            Some(dir) => path.starts_with(prefix.as_str()) || (!dir.is_empty() && path == dir),
            None => path
                .strip_prefix(prefix.as_str())
                .is_some_and(|rest| rest.is_empty() || rest.starts_with('/')),
        });

        prefix_match || self.patterns.iter().any(|re| re.is_match(path))
    }
}

/// Why a path was let through
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PassReason {
    Excluded,
    LocalePrefixed,
}

/// Outcome of routing one path
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteDecision {
    PassThrough(PassReason),
    /// Redirect to this path (HTTP 307)
    Redirect(String),
}

impl RouteDecision {
    pub fn is_redirect(&self) -> bool {
        matches!(self, RouteDecision::Redirect(_))
    }
}

/// Stateless locale router built from an explicit locale set and exclusion rules
#[derive(Debug, Clone)]
pub struct LocaleRouter {
    locales: LocaleSet,
    exclusions: ExclusionRules,
}

impl LocaleRouter {
    pub fn new(locales: LocaleSet, exclusions: ExclusionRules) -> Self {
        Self { locales, exclusions }
    }

    pub fn from_settings(settings: &Settings) -> Result<Self> {
        Ok(Self::new(
            LocaleSet::from_config(&settings.locales)?,
            ExclusionRules::from_config(&settings.routing)?,
        ))
    }

    pub fn locales(&self) -> &LocaleSet {
        &self.locales
    }

    /// Route `path`, redirecting locale-less paths to the default locale
    pub fn route(&self, path: &str) -> RouteDecision {
        self.route_with(path, self.locales.default_locale())
    }

    /// Route `path`, redirecting locale-less paths to `target`
    pub fn route_with(&self, path: &str, target: &Locale) -> RouteDecision {
        if self.exclusions.is_excluded(path) {
            return RouteDecision::PassThrough(PassReason::Excluded);
        }

        if self.locale_of(path).is_some() {
            return RouteDecision::PassThrough(PassReason::LocalePrefixed);
        }

        RouteDecision::Redirect(localized_path(target, path))
    }

    /// Locale whose prefix `path` carries (`/<tag>` or `/<tag>/...`)
    pub fn locale_of(&self, path: &str) -> Option<&Locale> {
        self.strip_locale(path).map(|(locale, _)| locale)
    }

    /// Split a locale-prefixed path into its locale and the remainder.
    ///
    /// The remainder always starts with `/` (`/en` yields `/`).
    pub fn strip_locale<'p>(&self, path: &'p str) -> Option<(&Locale, &'p str)> {
        let rest = path.strip_prefix('/')?;
        let (segment, remainder) = match rest.find('/') {
            Some(idx) => (&rest[..idx], &rest[idx..]),
            None => (rest, "/"),
        };

        self.locales.get(segment).map(|locale| (locale, remainder))
    }
}

/// Prefix `path` with `/<tag>`; the root maps to `/<tag>` without a trailing slash
pub fn localized_path(locale: &Locale, path: &str) -> String {
    match path {
        "" | "/" => format!("/{}", locale.tag),
        p if p.starts_with('/') => format!("/{}{}", locale.tag, p),
        p => format!("/{}/{}", locale.tag, p),
    }
}
