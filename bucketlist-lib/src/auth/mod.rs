//! Authentication

mod context;
mod token;

pub use context::AuthContext;
pub use context::StaticAuth;
pub use token::AccessToken;
pub use token::StaticTokenProvider;
pub use token::TokenProvider;
