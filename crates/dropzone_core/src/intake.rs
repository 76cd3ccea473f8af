use std::path::PathBuf;

/// The only media type admitted for upload.
pub const ACCEPTED_MEDIA_TYPE: &str = "application/pdf";

/// A file proposed for upload, prior to validation.
///
/// `media_type` is whatever the picking side declared; nothing here inspects
/// the file name or content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadCandidate {
    pub path: PathBuf,
    pub name: String,
    pub media_type: String,
    pub size: u64,
}

impl UploadCandidate {
    pub fn new(
        path: impl Into<PathBuf>,
        name: impl Into<String>,
        media_type: impl Into<String>,
        size: u64,
    ) -> Self {
        Self {
            path: path.into(),
            name: name.into(),
            media_type: media_type.into(),
            size,
        }
    }
}

/// Admits a candidate iff its declared media type is exactly `application/pdf`.
pub fn validate(candidate: &UploadCandidate) -> bool {
    candidate.media_type == ACCEPTED_MEDIA_TYPE
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(media_type: &str) -> UploadCandidate {
        UploadCandidate::new("/tmp/doc", "doc", media_type, 10)
    }

    #[test]
    fn pdf_is_accepted() {
        assert!(validate(&candidate("application/pdf")));
    }

    #[test]
    fn other_types_are_rejected() {
        for media_type in [
            "",
            "text/plain",
            "image/png",
            "application/octet-stream",
            "application/x-pdf",
            "Application/PDF",
            "application/pdf ",
            "application/pdf; charset=binary",
        ] {
            assert!(!validate(&candidate(media_type)), "{media_type:?}");
        }
    }

    #[test]
    fn file_name_is_not_sniffed() {
        let named_pdf = UploadCandidate::new("/tmp/report.pdf", "report.pdf", "text/plain", 10);
        assert!(!validate(&named_pdf));

        let named_txt = UploadCandidate::new("/tmp/notes.txt", "notes.txt", ACCEPTED_MEDIA_TYPE, 10);
        assert!(validate(&named_txt));
    }
}
