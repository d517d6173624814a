pub mod bridge;
pub mod chat_session;
pub mod client;
pub mod companion_store;
pub mod config;
pub mod config_env;
pub mod connections;
pub mod dispatch;
pub mod ids;
pub mod knowledge;
pub mod local_responder;
pub mod models;
pub mod personas;
pub mod server_memory;
pub mod synthesizer;
