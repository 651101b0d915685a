use crate::error::ShareError;
use crate::utils::url::strip_scheme;
use derivative::Derivative;
use serde::Deserialize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

pub const SHARE_CODE_LEN: usize = 6;

/// Where a staged file's bytes live until it is sent.
#[derive(Derivative, Clone)]
#[derivative(Debug)]
pub enum FileContent {
    Path(PathBuf),
    Bytes(#[derivative(Debug = "ignore")] Arc<[u8]>),
}

/// Identity used for duplicate suppression in the staging list.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FileKey {
    pub name: String,
    pub size: u64,
}

#[derive(Debug, Clone)]
pub struct StagedFile {
    pub name: String,
    pub size: u64,
    pub content: FileContent,
}

impl StagedFile {
    pub fn from_path(path: &Path) -> Result<Self, ShareError> {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string());

        let metadata = fs::metadata(path).map_err(|source| ShareError::ReadFile {
            name: name.clone(),
            source,
        })?;
        if metadata.is_dir() {
            return Err(ShareError::ReadFile {
                name,
                source: io::Error::new(io::ErrorKind::InvalidInput, "is a directory"),
            });
        }

        Ok(Self {
            name,
            size: metadata.len(),
            content: FileContent::Path(path.to_path_buf()),
        })
    }

    pub fn from_bytes(name: impl Into<String>, bytes: impl Into<Arc<[u8]>>) -> Self {
        let bytes = bytes.into();
        Self {
            name: name.into(),
            size: bytes.len() as u64,
            content: FileContent::Bytes(bytes),
        }
    }

    pub fn key(&self) -> FileKey {
        FileKey {
            name: self.name.clone(),
            size: self.size,
        }
    }

    pub async fn read(&self) -> Result<Vec<u8>, ShareError> {
        match &self.content {
            FileContent::Bytes(bytes) => Ok(bytes.to_vec()),
            FileContent::Path(path) => {
                tokio::fs::read(path)
                    .await
                    .map_err(|source| ShareError::ReadFile {
                        name: self.name.clone(),
                        source,
                    })
            }
        }
    }
}

/// What the service hands back after a successful upload.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShareResult {
    pub share_code: String,
    pub download_url: String,
}

impl ShareResult {
    pub fn new(share_code: impl Into<String>, download_url: impl Into<String>) -> Self {
        Self {
            share_code: share_code.into(),
            download_url: download_url.into(),
        }
    }

    pub fn has_valid_code(&self) -> bool {
        is_share_code(&self.share_code)
    }

    pub fn code_slots(&self) -> [char; SHARE_CODE_LEN] {
        let mut slots = [' '; SHARE_CODE_LEN];
        for (slot, c) in slots.iter_mut().zip(self.share_code.chars()) {
            *slot = c;
        }
        slots
    }

    pub fn display_url(&self) -> &str {
        strip_scheme(&self.download_url)
    }
}

pub fn is_share_code(code: &str) -> bool {
    code.len() == SHARE_CODE_LEN && code.bytes().all(|b| b.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn key_is_name_and_size() {
        let file = StagedFile::from_bytes("a.txt", vec![0u8; 10]);
        assert_eq!(
            file.key(),
            FileKey {
                name: "a.txt".to_string(),
                size: 10
            }
        );
    }

    #[test]
    fn from_path_reads_size_from_metadata() {
        let mut tmp = tempfile::NamedTempFile::new().unwrap();
        tmp.write_all(b"hello world").unwrap();

        let file = StagedFile::from_path(tmp.path()).unwrap();
        assert_eq!(file.size, 11);
        assert!(matches!(file.content, FileContent::Path(_)));
    }

    #[test]
    fn from_path_missing_file_is_read_error() {
        let err = StagedFile::from_path(Path::new("/definitely/not/here.bin")).unwrap_err();
        assert!(matches!(err, ShareError::ReadFile { ref name, .. } if name == "here.bin"));
    }

    #[test]
    fn from_path_rejects_directories() {
        let dir = tempfile::tempdir().unwrap();
        assert!(StagedFile::from_path(dir.path()).is_err());
    }

    #[test]
    fn debug_skips_contents() {
        let file = StagedFile::from_bytes("secret.txt", b"top secret".to_vec());
        let debug = format!("{:?}", file);
        assert!(!debug.contains("116"));
        assert!(debug.contains("secret.txt"));
    }

    #[test]
    fn share_result_slots_and_display_url() {
        let result = ShareResult::new("123456", "https://x/d/123456");
        assert_eq!(result.code_slots(), ['1', '2', '3', '4', '5', '6']);
        assert_eq!(result.display_url(), "x/d/123456");
        assert!(result.has_valid_code());
    }

    #[test]
    fn share_result_deserializes_camel_case() {
        let result: ShareResult =
            serde_json::from_str(r#"{"shareCode":"000042","downloadUrl":"http://h/d/000042"}"#)
                .unwrap();
        assert_eq!(result, ShareResult::new("000042", "http://h/d/000042"));
    }

    #[test]
    fn share_code_check() {
        assert!(is_share_code("012345"));
        assert!(!is_share_code("12345"));
        assert!(!is_share_code("12345a"));
        assert!(!is_share_code("1234567"));
    }
}
