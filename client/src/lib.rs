//! Login session controller for the mobile front-end.
//!
//! SYSTEM CONTEXT
//! ==============
//! A UI layer (the `cli` binary in this workspace, a GUI elsewhere) owns one
//! [`LoginController`]. It forwards form edits and submissions to it and
//! renders whatever the controller's watch channels publish. The network
//! call runs on the tokio runtime, so the UI never blocks on it.

pub mod net;
pub mod state;

pub use net::api::{AuthApi, HttpAuthApi, LoginSuccess};
pub use net::config::{ClientConfig, ClientTimeouts};
pub use net::error::{ClientBuildError, LoginError};
pub use state::login::LoginController;
pub use state::session::SessionState;
pub use state::validation::FieldError;
