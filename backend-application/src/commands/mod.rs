pub mod auth_commands;
pub mod dex_commands;
