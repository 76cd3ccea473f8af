#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Post the candidate to the backend, tagging the result with `token`.
    SubmitUpload {
        token: crate::RequestToken,
        candidate: crate::UploadCandidate,
    },
}
