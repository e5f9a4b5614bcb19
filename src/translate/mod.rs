pub mod interface;
pub mod error;
pub mod client;
pub mod factory;

pub use interface::{TranslateInterface, TranslationOutcome, TranslationRequest};
pub use error::TranslationFailure;
pub use factory::TranslateFactory;
