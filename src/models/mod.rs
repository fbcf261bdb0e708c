//! Data models module
//!
//! This module contains the locale model and the content types served by
//! the read endpoints.

pub mod audio;
pub mod locale;
pub mod video;

pub use audio::{AudioLibrary, Reciter, Revelation, Surah, Track};
pub use locale::{Direction, Locale, LocaleSet};
pub use video::{Video, VideoCategory, VideoLibrary, VideoMetadata};
