pub mod claims;
pub mod error;
pub mod factory;
pub mod secret;
pub mod service;
pub mod token_extractor;
pub mod token_issuer;
pub mod token_validator;

pub use claims::Claims;
pub use error::TokenError;
pub use factory::build_auth_service;
pub use secret::Secret;
pub use service::AuthService;
pub use token_extractor::ExtractionPolicy;
