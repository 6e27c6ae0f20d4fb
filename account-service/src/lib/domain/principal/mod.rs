pub mod errors;
pub mod models;
pub mod ports;
pub mod service;

pub use errors::AuthError;
pub use models::Principal;
pub use models::Role;
pub use service::AuthService;
