pub mod path;
pub mod payload;

pub use path::ContactMessageId;
pub use payload::ContactPayload;
