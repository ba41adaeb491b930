use std::path::{Path, PathBuf};

use chrono::Utc;
use tokio::fs;
use uuid::Uuid;

/// Public URL prefix the stored files are served under.
pub const PUBLIC_PREFIX: &str = "/uploads";

/// Writes multipart file uploads into a local directory and hands back the
/// public `/uploads/<name>` path that goes into the database row.
///
/// A crash between the file write and the row write can orphan a file;
/// there is no cleanup pass.
#[derive(Clone, Debug)]
pub struct UploadStore {
    dir: PathBuf,
}

impl UploadStore {
    /// Create the store, making sure the directory exists.
    pub async fn create(dir: impl Into<PathBuf>) -> std::io::Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir).await?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Persist one upload and return its public path.
    pub async fn save(&self, original_name: &str, data: &[u8]) -> std::io::Result<String> {
        let file_name = generate_name(original_name);
        fs::write(self.dir.join(&file_name), data).await?;
        Ok(format!("{}/{}", PUBLIC_PREFIX, file_name))
    }
}

/// Collision-free on-disk name: unix millis, a random component, then the
/// client's file name stripped down to a safe character set.
fn generate_name(original: &str) -> String {
    format!(
        "{}-{}-{}",
        Utc::now().timestamp_millis(),
        Uuid::new_v4().simple(),
        sanitize(original)
    )
}

fn sanitize(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();
    if cleaned.is_empty() || cleaned.chars().all(|c| c == '.' || c == '_') {
        "upload".to_string()
    } else {
        cleaned
    }
}
