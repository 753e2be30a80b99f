pub mod access_jwt;
pub mod audience;
pub mod calling_service;
pub mod factory;
pub mod roles;

pub use access_jwt::{AccessJwtError, AuthService, AuthenticatedService};
pub use factory::build_auth_service;
