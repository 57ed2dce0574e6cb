pub mod credentials;
pub mod errors;
pub mod pipeline;
pub mod types;

#[cfg(test)]
pub(crate) mod test_support;

pub use credentials::CredentialStrategy;
pub use errors::CommitError;
pub use pipeline::CommitPipeline;
pub use types::{CommitIdentity, CommitTransaction, PipelineStep};
