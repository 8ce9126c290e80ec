pub mod codec;
pub mod config;
pub mod meta;
pub mod persistence;
