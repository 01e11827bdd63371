// 人机验证与防滥用

pub mod gate;
pub mod verifier;

pub use gate::{AbuseGate, Admission, SessionIssue, VerificationOutcome};
pub use verifier::{CapVerifier, ChallengeVerifier};
