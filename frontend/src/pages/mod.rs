pub mod catalog;
pub mod checkout;
pub mod creator;
pub mod login;
pub mod not_found;
pub mod purchases;
pub mod register;
pub mod video_detail;
pub mod watch;
