//! Chat routing for the compliance agent
//!
//! A message goes through a fixed list of intents (documents, labour codes,
//! services, the keyword table) and the first match produces the reply. Messages
//! nothing claims are offered to an optional LLM backend and finally answered with
//! the firm's contact details.

pub mod dispatcher;
pub mod intent;
pub mod messages;
pub mod reply;

pub use dispatcher::ChatDispatcher;
pub use intent::Intent;
pub use reply::ChatReply;
