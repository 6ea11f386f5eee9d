//! Repository functions for the domain layer (connection-generic).

pub mod bot_leases;
pub mod games;
