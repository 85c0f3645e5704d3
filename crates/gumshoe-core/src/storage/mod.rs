pub mod store;

pub use store::{CaseDb, CaseStore};
