// Application layer - Use case interactors

pub mod batch_interactor;
pub mod clip_interactor;
pub mod container;
pub mod duration_resolver;
pub mod highlight_interactor;
pub mod merge_interactor;
pub mod workspace;

// Re-export interactors
pub use batch_interactor::{BatchInteractor, BatchPolicy};
pub use clip_interactor::ClipInteractor;
pub use container::{AppContainer, DefaultAppContainer};
pub use duration_resolver::DurationResolver;
pub use highlight_interactor::HighlightInteractor;
pub use merge_interactor::MergeInteractor;
