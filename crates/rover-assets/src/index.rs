use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

use serde::Serialize;
use walkdir::WalkDir;

use crate::error::AssetError;
use crate::key::ClipKey;
use crate::manifest::Manifest;

/// File extensions picked up by a clip directory scan.
pub const PLAYABLE_EXTENSIONS: &[&str] = &["mp3", "wav", "ogg"];

/// A resolved clip: its identifier and where it lives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AssetHandle {
    pub clip_id: String,
    pub path: PathBuf,
}

/// Read-only clip table built once at startup.
///
/// Clips are addressable by full identifier, grouped by `(event, tier)` for
/// variant-agnostic lookup, and by the transcript text the manifest declares.
#[derive(Debug, Clone, PartialEq)]
pub struct AssetIndex {
    clips: BTreeMap<String, PathBuf>,
    transcripts: HashMap<String, String>,
    fallback_tts: bool,
}

impl Default for AssetIndex {
    fn default() -> Self {
        Self {
            clips: BTreeMap::new(),
            transcripts: HashMap::new(),
            fallback_tts: true,
        }
    }
}

impl AssetIndex {
    /// Load the manifest and scan the clip directory.
    ///
    /// A missing or malformed manifest and a missing directory are logged and
    /// leave the index partial or empty; this never fails.
    pub fn load(clips_dir: &Path, manifest_path: &Path) -> Self {
        let manifest = match Manifest::load(manifest_path) {
            Ok(manifest) => {
                tracing::debug!("Loaded manifest with {} entries", manifest.clips.len());
                Some(manifest)
            }
            Err(e) => {
                tracing::warn!("No manifest at {}: {e}", manifest_path.display());
                None
            }
        };

        let files = if clips_dir.is_dir() {
            scan_clip_files(clips_dir).unwrap_or_else(|e| {
                tracing::warn!("Error scanning clips in {}: {e}", clips_dir.display());
                Vec::new()
            })
        } else {
            tracing::warn!("Clips directory not found: {}", clips_dir.display());
            Vec::new()
        };

        let index = Self::build(manifest.as_ref(), files);
        tracing::info!(
            "Loaded {} clips from {}",
            index.len(),
            clips_dir.display()
        );
        index
    }

    /// Index `files`, naming each by its manifest identifier when the
    /// manifest lists its file name, else by its upper-cased stem.
    pub fn build(manifest: Option<&Manifest>, files: Vec<PathBuf>) -> Self {
        let mut index = Self {
            fallback_tts: manifest.map_or(true, |m| m.fallback_tts),
            ..Self::default()
        };

        for path in &files {
            let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };
            for (id, entry) in manifest.into_iter().flat_map(|m| m.clips.iter()) {
                if entry.file_name() != name {
                    continue;
                }
                let id = id.to_uppercase();
                if let Some(text) = entry.text() {
                    index.transcripts.insert(text.to_string(), id.clone());
                }
                index.insert(id, path.clone());
            }
        }

        for path in files {
            let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            let id = stem.to_uppercase();
            if !index.clips.contains_key(&id) {
                index.insert(id, path);
            }
        }

        index
    }

    /// Index explicit `(identifier, path)` pairs. Identifiers are upper-cased.
    pub fn from_entries<I, S>(entries: I, fallback_tts: bool) -> Self
    where
        I: IntoIterator<Item = (S, PathBuf)>,
        S: AsRef<str>,
    {
        let mut index = Self {
            fallback_tts,
            ..Self::default()
        };
        for (id, path) in entries {
            index.insert(id.as_ref().to_uppercase(), path);
        }
        index
    }

    fn insert(&mut self, id: String, path: PathBuf) {
        self.clips.insert(id, path);
    }

    pub fn get(&self, clip_id: &str) -> Option<AssetHandle> {
        self.clips.get_key_value(clip_id).map(|(id, path)| AssetHandle {
            clip_id: id.clone(),
            path: path.clone(),
        })
    }

    /// Every identifier for `(event, tier)`, with or without a variant.
    pub fn tier_group(&self, event: &str, tier: u8) -> Vec<&str> {
        let key = ClipKey::new(event, Some(tier), None);
        self.clips
            .range::<str, _>((std::ops::Bound::Included(event), std::ops::Bound::Unbounded))
            .map(|(id, _)| id.as_str())
            .take_while(|id| id.starts_with(event))
            .filter(|id| key.covers(id))
            .collect()
    }

    /// Clip whose manifest transcript is exactly `text`.
    pub fn by_transcript(&self, text: &str) -> Option<AssetHandle> {
        self.transcripts.get(text).and_then(|id| self.get(id))
    }

    pub fn fallback_tts(&self) -> bool {
        self.fallback_tts
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Path)> {
        self.clips.iter().map(|(id, path)| (id.as_str(), path.as_path()))
    }

    pub fn len(&self) -> usize {
        self.clips.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clips.is_empty()
    }
}

/// Playable files directly inside `dir`, sorted by name.
pub(crate) fn scan_clip_files(dir: &Path) -> Result<Vec<PathBuf>, AssetError> {
    let mut files = Vec::new();
    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let playable = entry
            .path()
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|ext| {
                PLAYABLE_EXTENSIONS
                    .iter()
                    .any(|p| p.eq_ignore_ascii_case(ext))
            });
        if playable {
            files.push(entry.into_path());
        }
    }
    Ok(files)
}
