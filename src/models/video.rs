//! Video library models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A YouTube video entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Video {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub category: String,
    pub thumbnail: String,
    pub published_at: DateTime<Utc>,
    /// ISO-8601 duration as reported by YouTube, e.g. `PT12M3S`
    #[serde(default)]
    pub duration: Option<String>,
}

/// A video category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoCategory {
    pub id: String,
    pub name: String,
}

/// Catalogue-level metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoMetadata {
    pub total: usize,
    pub last_updated: DateTime<Utc>,
    #[serde(default)]
    pub channel: Option<String>,
}

/// Response body of `GET /api/videos`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoLibrary {
    pub videos: Vec<Video>,
    pub categories: Vec<VideoCategory>,
    pub metadata: VideoMetadata,
}
