pub mod model;
pub mod service;
pub mod token;

pub use service::AccountService;
pub use token::TokenIssuer;
