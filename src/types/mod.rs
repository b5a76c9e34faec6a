//! Public types for the Solsieve API.

mod keyword;
mod request;
mod result;
mod state;

pub use keyword::KeywordBatch;
pub use request::ClassificationRequest;
pub use result::{ClassificationResult, NON_SOLAR_FIELD};
pub use state::SessionState;
