// src/repositories/mod.rs
//
// Repository layer
//
// CRITICAL RULES:
// - Repositories are DUMB data mappers
// - NO business logic
// - NO event emission
// - NO failure policy (callers decide what to swallow)

pub mod key_value_repository;

pub use key_value_repository::{KeyValueStore, SqliteKeyValueStore, StorageKey, KEY_NAMESPACE};
