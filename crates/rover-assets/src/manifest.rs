use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::AssetError;
use crate::index::scan_clip_files;

/// Declarative clip table, stored as `clip_manifest.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Manifest {
    #[serde(default)]
    pub clips: BTreeMap<String, ManifestEntry>,
    /// Synthesize speech when no clip resolves.
    #[serde(default = "default_fallback_tts")]
    pub fallback_tts: bool,
}

fn default_fallback_tts() -> bool {
    true
}

impl Default for Manifest {
    fn default() -> Self {
        Self {
            clips: BTreeMap::new(),
            fallback_tts: default_fallback_tts(),
        }
    }
}

/// A clip's file, either bare or with the transcript it was recorded from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ManifestEntry {
    File(String),
    Detailed {
        file: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        text: Option<String>,
    },
}

impl ManifestEntry {
    pub fn file(&self) -> &str {
        match self {
            Self::File(file) | Self::Detailed { file, .. } => file,
        }
    }

    /// Just the file name, so entries written with a directory prefix still
    /// match scanned files.
    pub fn file_name(&self) -> &str {
        let file = self.file();
        Path::new(file)
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or(file)
    }

    pub fn text(&self) -> Option<&str> {
        match self {
            Self::File(_) => None,
            Self::Detailed { text, .. } => text.as_deref(),
        }
    }
}

impl Manifest {
    pub fn load(path: &Path) -> Result<Self, AssetError> {
        let bytes = std::fs::read(path)?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    pub fn save(&self, path: &Path) -> Result<(), AssetError> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}

/// Build a manifest from every playable file in `dir`, keyed by the
/// upper-cased file stem.
pub fn generate_manifest(dir: &Path) -> Result<Manifest, AssetError> {
    let mut manifest = Manifest::default();
    for path in scan_clip_files(dir)? {
        let (Some(stem), Some(name)) = (
            path.file_stem().and_then(|s| s.to_str()),
            path.file_name().and_then(|s| s.to_str()),
        ) else {
            tracing::debug!("Skipping non-UTF-8 clip name {}", path.display());
            continue;
        };
        manifest
            .clips
            .entry(stem.to_uppercase())
            .or_insert_with(|| ManifestEntry::File(name.to_string()));
    }
    Ok(manifest)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_parse_mixed_entries() {
        let manifest: Manifest = serde_json::from_str(
            r#"{
                "clips": {
                    "COLLISION_2_2": {"file": "assets/audio/collision_2_2.mp3", "text": "This is malarkey!"},
                    "STUCK_2_1": "stuck_2_1.mp3"
                },
                "fallback_tts": false
            }"#,
        )
        .unwrap();
        assert!(!manifest.fallback_tts);
        let collision = &manifest.clips["COLLISION_2_2"];
        assert_eq!(collision.file_name(), "collision_2_2.mp3");
        assert_eq!(collision.text(), Some("This is malarkey!"));
        assert_eq!(manifest.clips["STUCK_2_1"].text(), None);
    }

    #[test]
    fn test_fallback_defaults_to_true() {
        let manifest: Manifest = serde_json::from_str("{}").unwrap();
        assert!(manifest.fallback_tts);
        assert!(manifest.clips.is_empty());
    }

    #[test]
    fn test_generate_manifest() {
        let tmp = TempDir::new().unwrap();
        for name in ["collision_2_1.mp3", "boot_0.wav", "notes.txt", "stuck.ogg"] {
            std::fs::write(tmp.path().join(name), b"").unwrap();
        }
        std::fs::create_dir(tmp.path().join("nested")).unwrap();
        std::fs::write(tmp.path().join("nested/reset_0.mp3"), b"").unwrap();

        let manifest = generate_manifest(tmp.path()).unwrap();
        let ids: Vec<_> = manifest.clips.keys().map(String::as_str).collect();
        assert_eq!(ids, vec!["BOOT_0", "COLLISION_2_1", "STUCK"]);
        assert_eq!(manifest.clips["BOOT_0"].file(), "boot_0.wav");
        assert!(manifest.fallback_tts);
    }

    #[test]
    fn test_generate_manifest_missing_dir_is_an_error() {
        let tmp = TempDir::new().unwrap();
        assert!(generate_manifest(&tmp.path().join("missing")).is_err());
    }

    #[test]
    fn test_save_then_load() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("clip_manifest.json");
        let mut manifest = Manifest::default();
        manifest.clips.insert(
            "BOOT_0".into(),
            ManifestEntry::Detailed {
                file: "boot_0.mp3".into(),
                text: Some("Systems online.".into()),
            },
        );
        manifest.save(&path).unwrap();
        assert_eq!(Manifest::load(&path).unwrap(), manifest);
    }
}
