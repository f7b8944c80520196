pub mod announce;
pub mod buttons;
pub mod callbacks;
pub mod directory;
pub mod formatters;
pub mod handlers;
pub mod keyboards;
pub mod manager;
pub mod models;
pub mod parser;
pub mod strategies;
