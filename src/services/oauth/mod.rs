pub mod factory;
pub mod resolver;
pub mod rest;
#[cfg(test)]
pub mod stub;
pub mod token;

pub use factory::build_token_resolver;
pub use resolver::TokenResolver;
pub use rest::RestTokenResolver;
pub use token::AccessToken;
