pub mod handlers;
pub mod model;

pub use model::{build_verification_view, VerificationRecord, VerificationResponse};
