#![forbid(unsafe_code)]

//! Types shared between the journal API server and its clients: the request
//! and response bodies of every endpoint, the error codes, and the identity
//! of an authenticated caller.
//!
//! Enabling the `server` feature adds the database row mappings and the axum
//! integration the API server needs.

pub mod api;
pub mod utils;

/// Re-exports of the types almost every consumer of this crate needs
pub mod prelude {
	pub use crate::{
		api::WithId,
		utils::{False, True},
		ApiErrorResponse,
		ApiResponseBody,
		ApiSuccessResponseBody,
		ErrorType,
		Identity,
		Role,
	};
}

mod error;
mod response;
mod user_data;

pub use self::{error::*, response::*, user_data::*};
