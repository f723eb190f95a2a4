pub mod digest;
pub mod init;
