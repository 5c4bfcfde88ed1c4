/// Root sampling errors.
#[derive(Debug, thiserror::Error)]
pub enum SamplerError {
    #[error("no candidate root available for {sampler} sampler")]
    NoCandidateAvailable { sampler: String },

    #[error("unknown sampling method: {name}")]
    UnknownMethod { name: String },
}
