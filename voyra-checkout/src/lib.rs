pub mod countdown;
pub mod flow;
pub mod state;

pub use countdown::LockCountdown;
pub use flow::{AbortReason, CheckoutFlow, FlowConfig, SubmissionOutcome, SubmissionRequest};
pub use state::{SubmissionState, SubmissionTracker};
