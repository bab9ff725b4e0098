//! Image upload store: persists incoming photos under generated names.
//!
//! Independent of the classification gateway: its own config, its own
//! response contract, shared only through the served router. Stored files
//! are exposed read-only at `/images/<filename>`.

use std::path::{Path, PathBuf};

use serde::Serialize;

/// Upload store configuration.
pub struct UploadConfig {
    pub upload_dir: PathBuf,
    pub max_file_size: u64,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            upload_dir: PathBuf::from("uploads"),
            max_file_size: 5 * 1024 * 1024, // 5 MB
        }
    }
}

/// Metadata for a stored image, in the wire shape returned to clients.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredImage {
    pub original_name: String,
    pub filename: String,
    pub mimetype: String,
    pub size: u64,
    pub path: String,
    pub url: String,
}

/// Disk-backed store for uploaded images.
pub struct UploadStore {
    config: UploadConfig,
}

impl UploadStore {
    pub fn new(config: UploadConfig) -> Self {
        Self { config }
    }

    pub fn upload_dir(&self) -> &Path {
        &self.config.upload_dir
    }

    pub fn max_file_size(&self) -> u64 {
        self.config.max_file_size
    }

    /// Whether a body of this size is over the store's cap.
    pub fn exceeds_limit(&self, len: u64) -> bool {
        len > self.config.max_file_size
    }

    /// Persist one image under a generated collision-free name.
    ///
    /// The upload directory is created on demand so a fresh deployment works
    /// without setup.
    pub fn save(
        &self,
        original_name: &str,
        mimetype: &str,
        bytes: &[u8],
    ) -> std::io::Result<StoredImage> {
        std::fs::create_dir_all(&self.config.upload_dir)?;

        let filename = unique_filename(original_name);
        let dest = self.config.upload_dir.join(&filename);
        std::fs::write(&dest, bytes)?;

        Ok(StoredImage {
            original_name: original_name.to_string(),
            filename: filename.clone(),
            mimetype: mimetype.to_string(),
            size: bytes.len() as u64,
            path: dest.to_string_lossy().into_owned(),
            url: format!("/images/{filename}"),
        })
    }
}

/// Generate `image-<epoch millis>-<random><ext>`, keeping the original
/// extension so static serving gets a usable content type.
fn unique_filename(original_name: &str) -> String {
    use rand::Rng;

    let millis = chrono::Utc::now().timestamp_millis();
    let suffix: u32 = rand::thread_rng().gen_range(0..1_000_000_000);
    let ext = Path::new(original_name)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| format!(".{e}"))
        .unwrap_or_default();
    format!("image-{millis}-{suffix}{ext}")
}

/// Resolve the type to record for an upload: the declared multipart type
/// when present, otherwise a guess from the filename.
pub fn resolve_mimetype(declared: Option<&str>, original_name: &str) -> String {
    match declared {
        Some(mime) if !mime.is_empty() => mime.to_string(),
        _ => mime_guess::from_path(original_name)
            .first_raw()
            .unwrap_or("application/octet-stream")
            .to_string(),
    }
}
