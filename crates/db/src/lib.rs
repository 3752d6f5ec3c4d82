//! In-memory persistence for groundwork.
//!
//! All entities live in a single [`Store`] guarded by one async `RwLock`
//! (see [`Database`]). Repositories are zero-sized structs whose associated
//! functions borrow the store, so every mutating operation runs to completion
//! under a single write guard.

pub mod models;
pub mod repositories;
pub mod seed;
mod store;

pub use store::{Database, Record, Store, Table};

/// Create the shared database handle, optionally loaded with demo data.
pub fn create_database(seed_demo_data: bool) -> Database {
    let mut store = Store::default();
    if seed_demo_data {
        seed::load_demo_data(&mut store);
    }
    Database::new(store)
}
