//! HTTP handlers module
//!
//! This module contains the handlers for the read endpoints, the audio proxy
//! and the locale-aware pages.

pub mod audio;
pub mod common;
pub mod pages;
pub mod proxy;
pub mod videos;

pub use audio::get_audio_library_handler;
pub use common::{health_handler, not_found_handler};
pub use pages::{locale_home_handler, locale_page_handler, root_handler};
pub use proxy::audio_proxy_handler;
pub use videos::get_video_library_handler;
