pub mod analyze;
pub mod chat;
pub mod compare;
pub mod estimate;
pub mod init;
pub mod validate;
