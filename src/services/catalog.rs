//! Content catalogue
//!
//! Holds the audio and video libraries served by the read endpoints. Data is
//! loaded once at startup from `audio.json` and `videos.json` in the data
//! directory; a missing file falls back to a small built-in seed set.

use std::path::Path;
use chrono::{TimeZone, Utc};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tokio::fs;
use tracing::{info, warn};
use crate::models::{
    AudioLibrary, Reciter, Revelation, Surah, Track, Video, VideoCategory, VideoLibrary, VideoMetadata,
};
use crate::utils::errors::{MinbarError, Result};
use super::filters::Filters;

const AUDIO_FILE: &str = "audio.json";
const VIDEO_FILE: &str = "videos.json";

/// Query parameters of `GET /api/audio`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AudioQuery {
    pub reciter: Option<String>,
    pub surah: Option<String>,
    pub q: Option<String>,
}

/// Query parameters of `GET /api/videos`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct VideoQuery {
    pub category: Option<String>,
    pub q: Option<String>,
}

/// Active (non-sentinel, non-empty) value of an optional query parameter
fn active(value: &Option<String>) -> Option<&str> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| Filters::is_active(v))
}

fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// In-memory content catalogue
#[derive(Debug, Clone)]
pub struct Catalog {
    audio: AudioLibrary,
    videos: VideoLibrary,
}

impl Catalog {
    pub fn new(audio: AudioLibrary, videos: VideoLibrary) -> Self {
        Self { audio, videos }
    }

    /// Load both libraries from `dir`
    pub async fn load(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();
        let audio = load_or_seed(&dir.join(AUDIO_FILE), seed_audio).await?;
        let videos = load_or_seed(&dir.join(VIDEO_FILE), seed_videos).await?;

        info!(
            tracks = audio.tracks.len(),
            reciters = audio.reciters.len(),
            surahs = audio.surahs.len(),
            videos = videos.videos.len(),
            "Catalogue loaded"
        );

        Ok(Self::new(audio, videos))
    }

    /// Built-in sample content
    pub fn seed() -> Self {
        Self::new(seed_audio(), seed_videos())
    }

    /// Audio library with tracks narrowed by `query`; reciters and surahs are always complete
    pub fn audio_library(&self, query: &AudioQuery) -> AudioLibrary {
        let reciter = active(&query.reciter);
        let surah = active(&query.surah);
        let text = active(&query.q);

        let tracks = self
            .audio
            .tracks
            .iter()
            .filter(|t| reciter.map_or(true, |r| t.reciter_id == r))
            .filter(|t| surah.map_or(true, |s| self.track_matches_surah(t, s)))
            .filter(|t| text.map_or(true, |q| contains_ci(&t.title, q)))
            .cloned()
            .collect();

        AudioLibrary {
            tracks,
            reciters: self.audio.reciters.clone(),
            surahs: self.audio.surahs.clone(),
        }
    }

    /// `surah` may be a surah id or its number
    fn track_matches_surah(&self, track: &Track, surah: &str) -> bool {
        if track.surah_id == surah {
            return true;
        }
        let Ok(number) = surah.parse::<u16>() else {
            return false;
        };
        self.audio
            .surahs
            .iter()
            .any(|s| s.number == number && s.id == track.surah_id)
    }

    /// Video library narrowed by `query`; `metadata.total` counts returned videos
    pub fn video_library(&self, query: &VideoQuery) -> VideoLibrary {
        let category = active(&query.category);
        let text = active(&query.q);

        let videos: Vec<Video> = self
            .videos
            .videos
            .iter()
            .filter(|v| category.map_or(true, |c| v.category == c))
            .filter(|v| text.map_or(true, |q| contains_ci(&v.title, q) || contains_ci(&v.description, q)))
            .cloned()
            .collect();

        VideoLibrary {
            metadata: VideoMetadata {
                total: videos.len(),
                ..self.videos.metadata.clone()
            },
            videos,
            categories: self.videos.categories.clone(),
        }
    }
}

async fn load_or_seed<T: DeserializeOwned>(path: &Path, seed: fn() -> T) -> Result<T> {
    match fs::read_to_string(path).await {
        Ok(content) => serde_json::from_str(&content).map_err(|e| {
            MinbarError::Config(format!("Invalid catalogue file {}: {}", path.display(), e))
        }),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            warn!("Catalogue file not found, using built-in seed data: {}", path.display());
            Ok(seed())
        }
        Err(e) => Err(e.into()),
    }
}

fn reciter(id: &str, name: &str, name_ar: &str, style: &str) -> Reciter {
    Reciter {
        id: id.to_string(),
        name: name.to_string(),
        name_ar: name_ar.to_string(),
        style: Some(style.to_string()),
    }
}

fn surah(number: u16, name: &str, name_ar: &str, verses: u16, revelation: Revelation) -> Surah {
    Surah {
        id: format!("surah-{}", number),
        number,
        name: name.to_string(),
        name_ar: name_ar.to_string(),
        verses,
        revelation,
    }
}

fn seed_audio() -> AudioLibrary {
    let reciters = vec![
        reciter("alafasy", "Mishary Rashid Alafasy", "مشاري راشد العفاسي", "murattal"),
        reciter("abdulbasit", "Abdul Basit Abdul Samad", "عبد الباسط عبد الصمد", "mujawwad"),
        reciter("sudais", "Abdul Rahman Al-Sudais", "عبد الرحمن السديس", "murattal"),
    ];
    let surahs = vec![
        surah(1, "Al-Fatiha", "الفاتحة", 7, Revelation::Meccan),
        surah(2, "Al-Baqarah", "البقرة", 286, Revelation::Medinan),
        surah(36, "Ya-Sin", "يس", 83, Revelation::Meccan),
        surah(67, "Al-Mulk", "الملك", 30, Revelation::Meccan),
    ];

    let hosts = [
        ("alafasy", "https://server8.mp3quran.net/afs"),
        ("abdulbasit", "https://server7.mp3quran.net/basit"),
        ("sudais", "https://server11.mp3quran.net/sds"),
    ];
    let tracks = hosts
        .iter()
        .flat_map(|(reciter_id, base)| {
            surahs.iter().map(move |s| Track {
                id: format!("{}-{:03}", reciter_id, s.number),
                reciter_id: reciter_id.to_string(),
                surah_id: s.id.clone(),
                title: format!("{} - {}", s.name, reciter_id),
                url: format!("{}/{:03}.mp3", base, s.number),
                duration_seconds: None,
            })
        })
        .collect();

    AudioLibrary {
        tracks,
        reciters,
        surahs,
    }
}

fn seed_videos() -> VideoLibrary {
    let published = Utc.with_ymd_and_hms(2024, 3, 11, 18, 0, 0).single().unwrap_or_else(Utc::now);
    let categories = vec![
        VideoCategory { id: "recitation".to_string(), name: "Recitation".to_string() },
        VideoCategory { id: "tafsir".to_string(), name: "Tafsir".to_string() },
        VideoCategory { id: "lectures".to_string(), name: "Lectures".to_string() },
    ];
    let videos = vec![
        Video {
            id: "yt-fatiha-recitation".to_string(),
            title: "Surah Al-Fatiha recitation".to_string(),
            description: "Full recitation of the opening chapter".to_string(),
            category: "recitation".to_string(),
            thumbnail: "/images/videos/fatiha.jpg".to_string(),
            published_at: published,
            duration: Some("PT1M12S".to_string()),
        },
        Video {
            id: "yt-mulk-tafsir".to_string(),
            title: "Tafsir of Surah Al-Mulk".to_string(),
            description: "Verse by verse explanation".to_string(),
            category: "tafsir".to_string(),
            thumbnail: "/images/videos/mulk.jpg".to_string(),
            published_at: published,
            duration: Some("PT45M".to_string()),
        },
        Video {
            id: "yt-ramadan-lecture".to_string(),
            title: "Preparing for Ramadan".to_string(),
            description: "A lecture on fasting and its virtues".to_string(),
            category: "lectures".to_string(),
            thumbnail: "/images/videos/ramadan.jpg".to_string(),
            published_at: published,
            duration: Some("PT32M10S".to_string()),
        },
    ];

    VideoLibrary {
        metadata: VideoMetadata {
            total: videos.len(),
            last_updated: published,
            channel: None,
        },
        videos,
        categories,
    }
}
