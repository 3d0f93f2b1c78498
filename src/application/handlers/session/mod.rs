//! Class registry command handlers.

mod create_session;

pub use create_session::{CreateSessionCommand, CreateSessionHandler, CreateSessionResult};
