use std::path::{Path, PathBuf};

use tracing::info;

use super::{OracleError, OracleRequest, PredictionOracle};

enum ReplySource {
    File(PathBuf),
    Inline(String),
}

/// Answers every request with a reply captured earlier, so a response produced by a
/// remote model can be fed back through the same parsing path.
pub struct ReplayOracle {
    source: ReplySource,
}

impl ReplayOracle {
    pub fn from_file(path: impl AsRef<Path>) -> Self {
        Self {
            source: ReplySource::File(path.as_ref().to_path_buf()),
        }
    }

    pub fn from_reply(reply: impl Into<String>) -> Self {
        Self {
            source: ReplySource::Inline(reply.into()),
        }
    }
}

impl PredictionOracle for ReplayOracle {
    fn generate(&self, request: &OracleRequest) -> Result<String, OracleError> {
        match &self.source {
            ReplySource::File(path) => {
                info!(path = %path.display(), model = %request.model, "Replaying stored oracle reply");
                Ok(std::fs::read_to_string(path)?)
            }
            ReplySource::Inline(reply) => Ok(reply.clone()),
        }
    }
}
