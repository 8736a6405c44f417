//! Client-side login state: field validation, the session state machine and
//! the controller that drives it.

pub mod login;
pub mod session;
pub mod validation;
