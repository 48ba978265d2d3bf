pub use super::exchange::Entity as Exchange;
