pub mod app;
pub mod verify;
