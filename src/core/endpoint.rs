use async_trait::async_trait;

use crate::{error::Result, types::CompletionRequest};

/// A remote service that turns a prompt into generated text.
///
/// Implementations perform exactly one request per call. `Ok(None)` means the
/// endpoint answered but the first choice carried no content.
#[async_trait]
pub trait CompletionEndpoint: Send + Sync {
    async fn complete(&self, request: &CompletionRequest) -> Result<Option<String>>;
}
