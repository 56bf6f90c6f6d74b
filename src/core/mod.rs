pub mod access_gate;
pub mod services;
pub mod session;
pub mod time;

pub use access_gate::{AccessGate, GateState, UnlockOutcome};
pub use session::FinanceSession;
pub use time::{Clock, FixedClock, SystemClock};
