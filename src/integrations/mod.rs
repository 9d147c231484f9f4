// src/integrations/mod.rs
//
// External Integrations Module

pub mod catalog;
pub mod rick_and_morty;

pub use catalog::CharacterCatalog;
#[cfg(test)]
pub use catalog::MockCharacterCatalog;
pub use rick_and_morty::RickAndMortyClient;
