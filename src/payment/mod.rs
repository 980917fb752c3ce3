//! UPI payment flow: QR code generation and the verification wait.

mod upi;
mod verification;

pub use upi::{QrCodeError, UpiDetails};
pub use verification::{ProgressSink, VerificationTexts, run_verification};
