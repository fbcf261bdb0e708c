//! Request routing module
//!
//! Locale-prefix routing decisions, independent of the HTTP framework.

pub mod locale_router;

pub use locale_router::{localized_path, ExclusionRules, LocaleRouter, PassReason, RouteDecision};
