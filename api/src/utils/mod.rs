pub mod config;
pub mod constants;
pub mod extractors;
pub mod layers;
pub mod router_ext;
pub mod validator;
