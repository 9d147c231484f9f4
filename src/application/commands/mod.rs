// src/application/commands/mod.rs
//
// Command Handlers
//
// ARCHITECTURE:
// - Commands are thin adapters between UI and Services
// - Commands accept plain values, return DTOs
// - Failures leave as a JSON `ErrorResponse` string
// - Commands NEVER contain business logic

pub mod character_commands;
pub mod favorites_commands;
pub mod settings_commands;

pub use character_commands::*;
pub use favorites_commands::*;
pub use settings_commands::*;
