// Resume Store: CRUD over user-owned documents with ownership checks.

pub mod handlers;
pub mod memory;
pub mod service;
pub mod store;
