//! Service layer: domain logic behind the HTTP routes.

pub mod credentials;
