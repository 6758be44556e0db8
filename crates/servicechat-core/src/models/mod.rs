pub mod conversation;
pub mod message;
pub mod response;
pub mod scenario;
