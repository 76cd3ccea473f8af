//! File selection capability. Stands in for a drop target or a file dialog:
//! it turns local paths into [`UploadCandidate`]s with a declared media type,
//! the way a host environment would before handing them to the pipeline.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use dropzone_core::UploadCandidate;
use thiserror::Error;

/// Declared when the extension is not in the table below.
pub const FALLBACK_MEDIA_TYPE: &str = "application/octet-stream";

const KNOWN_TYPES: &[(&str, &str)] = &[
    ("pdf", "application/pdf"),
    ("txt", "text/plain"),
    ("md", "text/markdown"),
    ("json", "application/json"),
    ("html", "text/html"),
    ("htm", "text/html"),
    ("png", "image/png"),
    ("jpg", "image/jpeg"),
    ("jpeg", "image/jpeg"),
    ("doc", "application/msword"),
    (
        "docx",
        "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
    ),
];

#[derive(Debug, Error)]
pub enum PickError {
    #[error("file not found: {}", .path.display())]
    NotFound { path: PathBuf },
    #[error("not a regular file: {}", .path.display())]
    NotAFile { path: PathBuf },
    #[error("cannot read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Something that can offer a file for upload, or decline to.
pub trait FilePicker {
    fn pick(&self) -> Result<Option<UploadCandidate>, PickError>;
}

/// Picks a fixed path, declaring its type from the extension unless overridden.
#[derive(Debug, Clone)]
pub struct PathPicker {
    path: Option<PathBuf>,
    media_type: Option<String>,
}

impl PathPicker {
    pub fn new(path: Option<PathBuf>, media_type: Option<String>) -> Self {
        Self { path, media_type }
    }
}

impl FilePicker for PathPicker {
    fn pick(&self) -> Result<Option<UploadCandidate>, PickError> {
        self.path
            .as_deref()
            .map(|path| candidate_from_path(path, self.media_type.as_deref()))
            .transpose()
    }
}

/// Builds candidates for every dropped path, in order.
pub fn candidates_from_paths(
    paths: &[PathBuf],
    media_type: Option<&str>,
) -> Result<Vec<UploadCandidate>, PickError> {
    paths
        .iter()
        .map(|path| candidate_from_path(path, media_type))
        .collect()
}

pub fn candidate_from_path(
    path: &Path,
    media_type: Option<&str>,
) -> Result<UploadCandidate, PickError> {
    let meta = fs::metadata(path).map_err(|err| match err.kind() {
        io::ErrorKind::NotFound => PickError::NotFound {
            path: path.to_path_buf(),
        },
        _ => PickError::Io {
            path: path.to_path_buf(),
            source: err,
        },
    })?;
    if !meta.is_file() {
        return Err(PickError::NotAFile {
            path: path.to_path_buf(),
        });
    }

    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    let declared = media_type
        .map(ToOwned::to_owned)
        .unwrap_or_else(|| declared_media_type(path).to_string());

    Ok(UploadCandidate::new(path, name, declared, meta.len()))
}

/// The type a browser-like host would declare for this file name.
pub fn declared_media_type(path: &Path) -> &'static str {
    let Some(ext) = path.extension().and_then(|ext| ext.to_str()) else {
        return FALLBACK_MEDIA_TYPE;
    };
    KNOWN_TYPES
        .iter()
        .find(|(known, _)| known.eq_ignore_ascii_case(ext))
        .map_or(FALLBACK_MEDIA_TYPE, |(_, media_type)| *media_type)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn extension_drives_declared_type() {
        assert_eq!(declared_media_type(Path::new("a/report.pdf")), "application/pdf");
        assert_eq!(declared_media_type(Path::new("REPORT.PDF")), "application/pdf");
        assert_eq!(declared_media_type(Path::new("notes.txt")), "text/plain");
        assert_eq!(declared_media_type(Path::new("archive.tar.gz")), FALLBACK_MEDIA_TYPE);
        assert_eq!(declared_media_type(Path::new("README")), FALLBACK_MEDIA_TYPE);
    }

    #[test]
    fn candidate_carries_name_size_and_type() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("doc.pdf");
        fs::write(&path, b"%PDF-1.7").unwrap();

        let candidate = candidate_from_path(&path, None).unwrap();
        assert_eq!(candidate.name, "doc.pdf");
        assert_eq!(candidate.size, 8);
        assert_eq!(candidate.media_type, "application/pdf");
        assert_eq!(candidate.path, path);
    }

    #[test]
    fn override_replaces_declared_type() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("scan.bin");
        fs::write(&path, b"%PDF").unwrap();

        let candidate = candidate_from_path(&path, Some("application/pdf")).unwrap();
        assert_eq!(candidate.media_type, "application/pdf");
    }

    #[test]
    fn missing_and_directory_paths_are_errors() {
        let temp = TempDir::new().unwrap();
        assert!(matches!(
            candidate_from_path(&temp.path().join("nope.pdf"), None),
            Err(PickError::NotFound { .. })
        ));
        assert!(matches!(
            candidate_from_path(temp.path(), None),
            Err(PickError::NotAFile { .. })
        ));
    }

    #[test]
    fn dismissed_picker_yields_none() {
        assert!(PathPicker::new(None, None).pick().unwrap().is_none());
    }
}
