//! Stateless repositories — every method takes `&Connection`.

pub mod contact;
pub mod message;
pub mod profile;
pub mod session;
