pub mod commands;
pub mod context;
pub mod events;
pub mod members;
pub mod records;
