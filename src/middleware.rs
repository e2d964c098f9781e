pub mod role_gate;
pub use role_gate::role_gate;
pub mod session;
pub use session::{session_loader, CurrentUser, SessionContext};
