/// The claims of the JWT handed out on login
pub mod access_token_data;
