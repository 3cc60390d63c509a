pub(crate) mod mediator;
pub(crate) mod publish;
pub(crate) mod traits;

// Re-export key components

pub use self::mediator::Mediator;
pub use publish::{CollectErrors, Concurrent, FailFast, PublishStrategy};
pub use traits::{Publisher, Sender};
