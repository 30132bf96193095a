/// The ownership checks every resource specific endpoint goes through
pub mod access;
/// Storing paper attachments on disk
pub mod attachment;
/// Logging in, and creating the first editor account
pub mod auth;
pub mod password;
/// Issuing and verifying access tokens
pub mod token;
