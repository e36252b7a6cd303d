pub mod client;
pub mod coin;
pub mod error;
