pub mod explore;
pub mod question;
