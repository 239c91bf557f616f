pub mod auth_handlers;
pub mod dex_handlers;
pub mod ops_handlers;
