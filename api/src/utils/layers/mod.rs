mod authenticator;
mod role_guard;

pub use self::{authenticator::*, role_guard::*};
