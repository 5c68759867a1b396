pub mod endpoint;
pub mod round_client;
pub mod scripted;
