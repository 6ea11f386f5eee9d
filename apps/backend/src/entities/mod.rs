pub mod bot_leases;
pub mod games;

pub use bot_leases::Entity as BotLeases;
pub use bot_leases::Model as BotLease;
pub use games::Entity as Games;
pub use games::Model as Game;
