//! Slide persistence and folder naming

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;
use std::time::{SystemTime, UNIX_EPOCH};

use log::info;

use crate::rendering::Slide;
use crate::{Error, Result};

/// Maximum length of a hotel slug, in characters
pub const SLUG_MAX_CHARS: usize = 30;

/// Destination for finished slides
pub trait SlideStore {
    /// Store `slide` as `file_name` inside `folder`, returning the reference
    /// `"{folder}/{file_name}"`.
    fn persist(&self, folder: &str, file_name: &str, slide: &Slide) -> Result<String>;
}

/// Chooses the folder that groups one carousel's slides
pub trait FolderNamer {
    fn folder_name(&self, hotel_name: &str) -> String;
}

/// Filesystem-safe identifier derived from a hotel name.
///
/// ```
/// assert_eq!(hotel_carousel::store::slugify("L'Hôtel du Parc"), "lhôtel_du_parc");
/// ```
pub fn slugify(name: &str) -> String {
    name.to_lowercase()
        .chars()
        .filter(|c| *c != '\'')
        .map(|c| if c.is_alphanumeric() { c } else { '_' })
        .take(SLUG_MAX_CHARS)
        .collect()
}

/// `{slug}_{unix_seconds}_{sequence}`; the sequence is process-wide so two
/// carousels for the same hotel in the same second still differ.
#[derive(Debug, Default, Clone, Copy)]
pub struct TimestampNamer;

static FOLDER_SEQUENCE: AtomicU64 = AtomicU64::new(0);

impl FolderNamer for TimestampNamer {
    fn folder_name(&self, hotel_name: &str) -> String {
        let secs = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);
        let seq = FOLDER_SEQUENCE.fetch_add(1, Ordering::Relaxed);
        format!("{}_{}_{}", slugify(hotel_name), secs, seq)
    }
}

/// Always returns the same folder
#[derive(Debug, Clone)]
pub struct FixedNamer(pub String);

impl FolderNamer for FixedNamer {
    fn folder_name(&self, _hotel_name: &str) -> String {
        self.0.clone()
    }
}

/// Writes PNG files under `root/{folder}/`
#[derive(Debug, Clone)]
pub struct DirectoryStore {
    root: PathBuf,
}

impl DirectoryStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of a stored reference, after sanitizing both components.
    pub fn resolve(&self, reference: &str) -> Result<PathBuf> {
        let (folder, file) = sanitize_reference(reference)?;
        Ok(self.root.join(folder).join(file))
    }
}

impl SlideStore for DirectoryStore {
    fn persist(&self, folder: &str, file_name: &str, slide: &Slide) -> Result<String> {
        let reference = format!("{}/{}", folder, file_name);
        let path = self.resolve(&reference)?;
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir)?;
        }
        std::fs::write(&path, slide.encode_png()?)?;
        info!("Stored {}", path.display());
        Ok(reference)
    }
}

/// Keeps encoded slides in memory, keyed by reference
#[derive(Debug, Default)]
pub struct MemoryStore {
    files: Mutex<BTreeMap<String, Vec<u8>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, reference: &str) -> Option<Vec<u8>> {
        self.files.lock().ok()?.get(reference).cloned()
    }

    pub fn references(&self) -> Vec<String> {
        self.files
            .lock()
            .map(|f| f.keys().cloned().collect())
            .unwrap_or_default()
    }
}

impl SlideStore for MemoryStore {
    fn persist(&self, folder: &str, file_name: &str, slide: &Slide) -> Result<String> {
        let reference = format!("{}/{}", folder, file_name);
        let png = slide.encode_png()?;
        self.files
            .lock()
            .map_err(|_| Error::StorageError("memory store lock poisoned".into()))?
            .insert(reference.clone(), png);
        Ok(reference)
    }
}

/// Split `"{folder}/{file}"` and strip unsafe characters from both parts:
/// folders keep alphanumerics, `_` and `-`; files additionally keep `.`.
pub fn sanitize_reference(reference: &str) -> Result<(String, String)> {
    let (folder, file) = reference
        .split_once('/')
        .ok_or_else(|| Error::InvalidInput(format!("malformed slide reference: {}", reference)))?;
    let folder: String = folder
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '_' || *c == '-')
        .collect();
    let file: String = file
        .chars()
        .filter(|c| c.is_alphanumeric() || matches!(*c, '_' | '-' | '.'))
        .collect();
    if folder.is_empty() || file.is_empty() || file.chars().all(|c| c == '.') {
        return Err(Error::InvalidInput(format!("unsafe slide reference: {}", reference)));
    }
    Ok((folder, file))
}

/// Public URL of a stored reference.
pub fn public_url(base_url: &str, reference: &str) -> String {
    format!("{}/generated_images/{}", base_url.trim_end_matches('/'), reference)
}
