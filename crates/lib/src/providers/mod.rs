pub mod factory;
pub mod qa;

pub use factory::{create_provider, ProviderConfig};
pub use qa::QaProvider;
