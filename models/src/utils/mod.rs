mod bools;

pub use self::bools::*;
