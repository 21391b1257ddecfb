pub mod accounts;
pub mod error;
pub mod password;
pub mod posts;
pub mod repos;
