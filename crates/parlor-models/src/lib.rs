pub mod session;
pub mod update;
pub mod user;
