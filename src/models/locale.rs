//! Locale model
//!
//! Supported locales, their text direction, and `Accept-Language` negotiation.

use serde::{Deserialize, Serialize};
use crate::config::LocalesConfig;
use crate::utils::errors::{MinbarError, Result};

/// Text direction of a locale
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Ltr,
    Rtl,
}

impl Direction {
    /// Value for the HTML `dir` attribute
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Ltr => "ltr",
            Direction::Rtl => "rtl",
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A supported locale
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Locale {
    pub tag: String,
    pub direction: Direction,
}

impl Locale {
    pub fn new(tag: impl Into<String>, direction: Direction) -> Self {
        Self {
            tag: tag.into(),
            direction,
        }
    }
}

/// Ordered set of supported locales with a designated default
#[derive(Debug, Clone)]
pub struct LocaleSet {
    locales: Vec<Locale>,
    default_index: usize,
}

impl LocaleSet {
    /// Build a locale set, failing when the default is not in `locales`
    pub fn new(locales: Vec<Locale>, default_tag: &str) -> Result<Self> {
        let default_index = locales
            .iter()
            .position(|l| l.tag == default_tag)
            .ok_or_else(|| {
                MinbarError::Config(format!("Default locale {} is not supported", default_tag))
            })?;

        Ok(Self {
            locales,
            default_index,
        })
    }

    /// Build from the `[locales]` configuration section
    pub fn from_config(config: &LocalesConfig) -> Result<Self> {
        let locales = config
            .supported
            .iter()
            .map(|entry| Locale::new(entry.tag.clone(), entry.direction))
            .collect();
        Self::new(locales, &config.default_locale)
    }

    pub fn get(&self, tag: &str) -> Option<&Locale> {
        self.locales.iter().find(|l| l.tag == tag)
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.get(tag).is_some()
    }

    pub fn default_locale(&self) -> &Locale {
        &self.locales[self.default_index]
    }

    /// Direction of `tag`, or of the default locale for unknown tags
    pub fn direction_of(&self, tag: &str) -> Direction {
        self.get(tag)
            .unwrap_or_else(|| self.default_locale())
            .direction
    }

    pub fn iter(&self) -> impl Iterator<Item = &Locale> {
        self.locales.iter()
    }

    /// Pick the best supported locale for an `Accept-Language` header value.
    ///
    /// Ranges are tried by descending q-weight (ties keep header order). Each
    /// range matches a supported tag exactly (case-insensitive) or by its
    /// primary subtag. Falls back to the default locale.
    pub fn negotiate(&self, accept_language: Option<&str>) -> &Locale {
        let Some(header) = accept_language else {
            return self.default_locale();
        };

        let mut ranges: Vec<(String, f32)> = header
            .split(',')
            .filter_map(|raw| {
                let mut parts = raw.split(';');
                let tag = parts.next()?.trim().to_ascii_lowercase();
                if tag.is_empty() || tag == "*" {
                    return None;
                }
                let quality = parts
                    .find_map(|p| p.trim().strip_prefix("q="))
                    .and_then(|q| q.trim().parse::<f32>().ok())
                    .unwrap_or(1.0);
                (quality > 0.0).then_some((tag, quality))
            })
            .collect();

        ranges.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

        for (tag, _) in &ranges {
            if let Some(locale) = self.locales.iter().find(|l| l.tag.eq_ignore_ascii_case(tag)) {
                return locale;
            }
            let primary = tag.split('-').next().unwrap_or(tag);
            if let Some(locale) = self.locales.iter().find(|l| l.tag.eq_ignore_ascii_case(primary)) {
                return locale;
            }
        }

        self.default_locale()
    }
}
