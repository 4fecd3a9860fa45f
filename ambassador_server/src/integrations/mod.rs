//! Adapters that connect the engine's collaborator traits to real services.
pub mod mail;
pub mod settlement;
pub mod stripe;
