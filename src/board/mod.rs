pub mod controller;
pub mod filter;
pub mod format;
pub mod state;
pub mod view;
