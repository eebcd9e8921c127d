pub mod commands;
pub mod parser;
pub mod redirect;
pub mod state;
