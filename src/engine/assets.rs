use anyhow::{anyhow, Error, Result};

/// Startup gate for preloaded assets.
///
/// ```text
/// Pending ──from(Ok)──► Loaded ──► GameLoop schedules frames
///    │
///    └─────from(Err)──► Failed ──► fatal, loop never starts
/// ```
#[derive(Debug)]
pub enum AssetState<T> {
    Pending,
    Loaded(T),
    Failed(Error),
}

impl<T> Default for AssetState<T> {
    fn default() -> Self {
        AssetState::Pending
    }
}

impl<T> From<Result<T>> for AssetState<T> {
    fn from(outcome: Result<T>) -> Self {
        match outcome {
            Ok(assets) => AssetState::Loaded(assets),
            Err(err) => AssetState::Failed(err),
        }
    }
}

impl<T> AssetState<T> {
    pub fn loaded_mut(&mut self) -> Option<&mut T> {
        match self {
            AssetState::Loaded(assets) => Some(assets),
            _ => None,
        }
    }

    /// The loaded assets, or why there are none. Keeps the error chain of a
    /// failed load.
    pub fn into_result(self) -> Result<T> {
        match self {
            AssetState::Loaded(assets) => Ok(assets),
            AssetState::Failed(err) => Err(err.context("Asset loading failed")),
            AssetState::Pending => Err(anyhow!("Assets are still loading")),
        }
    }
}
