pub mod contact;
pub mod request;

pub use contact::{ContactMessage, ContactMessageCreated, ContactMessageSchema, NewContactMessage};
pub use request::ApiResponse;
