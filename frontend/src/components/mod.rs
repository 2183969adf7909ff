pub mod channels;
pub mod chat;
pub mod navbar;
pub mod stories;
