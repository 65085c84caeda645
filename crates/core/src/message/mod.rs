mod error;
mod operations;
mod types;

pub use error::MessageError;
pub use operations::validate_new_message;
pub use types::{MessageRecord, MessageType, NewMessage, RelayToken};
