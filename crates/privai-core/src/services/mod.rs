//! Application services.
//!
//! Services orchestrate domain logic over ports. They hold `Arc<dyn Port>`
//! handles and are shared read-only across requests.

pub mod account;
pub mod completion;
pub mod session_gate;

pub use account::AccountService;
pub use completion::CompletionService;
pub use session_gate::{GateOutcome, SessionGate};
