//! Data access layer for Tireflow
//!
//! The workflow consumes persistence through the `RequestStore`/`OrderStore`
//! traits; `postgres` provides the production implementation, `memory` a
//! hashmap-backed one for tests.

pub mod memory;
pub mod postgres;
pub mod traits;

pub use memory::{MemoryOrderStore, MemoryRequestStore};
pub use postgres::{PgOrderStore, PgRequestStore};
pub use traits::{OrderStore, RequestStore};
