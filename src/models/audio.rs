//! Audio library models

use serde::{Deserialize, Serialize};

/// A Quran reciter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reciter {
    pub id: String,
    pub name: String,
    pub name_ar: String,
    #[serde(default)]
    pub style: Option<String>,
}

/// Place of revelation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Revelation {
    Meccan,
    Medinan,
}

/// A surah of the Quran
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Surah {
    pub id: String,
    pub number: u16,
    pub name: String,
    pub name_ar: String,
    pub verses: u16,
    pub revelation: Revelation,
}

/// A playable recitation of one surah by one reciter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    pub id: String,
    pub reciter_id: String,
    pub surah_id: String,
    pub title: String,
    pub url: String,
    #[serde(default)]
    pub duration_seconds: Option<u32>,
}

/// Response body of `GET /api/audio`
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AudioLibrary {
    pub tracks: Vec<Track>,
    pub reciters: Vec<Reciter>,
    pub surahs: Vec<Surah>,
}
