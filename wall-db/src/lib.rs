pub mod client;
pub mod listener;
pub mod record;
