pub mod child;
pub mod command;
pub mod error_messages;
pub mod interrupt;
pub mod log;
pub mod pause;
pub mod which;
