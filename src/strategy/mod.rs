pub mod filter;
pub mod panic;
