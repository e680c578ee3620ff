pub mod djl;
pub mod huggingface;

use crate::{errors::QaError, types::Prediction};
use async_trait::async_trait;
use dyn_clone::DynClone;
use std::fmt::Debug;

pub use djl::DjlServingProvider;
pub use huggingface::HuggingFaceProvider;

/// A trait for interacting with a question-answering model.
///
/// The model itself (loading, tokenizing, decoding spans) lives behind the
/// provider. Implementations must be safe to call concurrently once
/// `warm_up` has returned.
#[async_trait]
pub trait QaProvider: Send + Sync + Debug + DynClone {
    /// Predicts the answer to `question` using `paragraph` as context.
    ///
    /// Errors from the underlying model call are propagated unchanged; there
    /// are no retries and no timeout.
    async fn predict(&self, question: &str, paragraph: &str) -> Result<Prediction, QaError>;

    /// Prepares the model before the first prediction.
    ///
    /// Called once when the processor is scheduled. The default does nothing.
    async fn warm_up(&self) -> Result<(), QaError> {
        Ok(())
    }
}

dyn_clone::clone_trait_object!(QaProvider);
