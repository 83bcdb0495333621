pub mod permissions;
pub mod random;
pub mod validation;
