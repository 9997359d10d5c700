//! Pipeline failure classification.

use dvf_extract::ExtractError;
use dvf_ingest::IngestError;
use dvf_load::LoadError;
use dvf_model::ModelError;
use dvf_output::OutputError;
use dvf_transform::TransformError;
use thiserror::Error;

use crate::pipeline::Stage;

/// Any error a pipeline stage can raise.
#[derive(Debug, Error)]
pub enum EtlError {
    #[error(transparent)]
    Config(#[from] ModelError),
    #[error(transparent)]
    Extract(#[from] ExtractError),
    #[error(transparent)]
    Ingest(#[from] IngestError),
    #[error(transparent)]
    Transform(#[from] TransformError),
    #[error(transparent)]
    Output(#[from] OutputError),
    #[error(transparent)]
    Load(#[from] LoadError),
}

/// Coarse failure category, mapped to the process exit status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    NotFound,
    MalformedInput,
    FieldNotFound,
    WriteFailed,
    ExternalToolFailed,
    Other,
}

impl FailureKind {
    pub fn exit_code(self) -> i32 {
        match self {
            Self::NotFound => 2,
            Self::MalformedInput => 3,
            Self::FieldNotFound => 4,
            Self::WriteFailed => 5,
            Self::ExternalToolFailed => 6,
            Self::Other => 1,
        }
    }
}

impl EtlError {
    pub fn kind(&self) -> FailureKind {
        match self {
            Self::Config(_) => FailureKind::Other,
            Self::Extract(_) => FailureKind::ExternalToolFailed,
            Self::Ingest(IngestError::FileNotFound { .. }) => FailureKind::NotFound,
            Self::Ingest(err) if err.is_malformed_input() => FailureKind::MalformedInput,
            Self::Ingest(_) => FailureKind::Other,
            Self::Transform(TransformError::FieldNotFound { .. }) => FailureKind::FieldNotFound,
            Self::Transform(_) => FailureKind::Other,
            Self::Output(OutputError::WriteFailed { .. }) => FailureKind::WriteFailed,
            Self::Output(_) => FailureKind::Other,
            Self::Load(LoadError::NotFound { .. }) => FailureKind::NotFound,
            Self::Load(LoadError::Config(_)) => FailureKind::Other,
            Self::Load(_) => FailureKind::ExternalToolFailed,
        }
    }
}

/// A stage failure: which stage, and why.
#[derive(Debug, Error)]
#[error("stage {stage} failed")]
pub struct StageError {
    pub stage: Stage,
    #[source]
    pub source: EtlError,
}

impl StageError {
    pub fn kind(&self) -> FailureKind {
        self.source.kind()
    }
}
