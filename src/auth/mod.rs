mod authenticate;
mod credentials;

pub(crate) use authenticate::{authenticate, session_headers};
pub use authenticate::LOGIN_ENDPOINT;
pub use credentials::Credentials;
