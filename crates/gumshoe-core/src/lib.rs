pub mod clues;
pub mod config;
pub mod errors;
pub mod executor;
pub mod model;
pub mod storage;
pub mod validate;
