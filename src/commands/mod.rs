pub mod fun;
pub mod general;
pub mod info;
