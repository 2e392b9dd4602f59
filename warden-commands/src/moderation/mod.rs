pub mod ban;
pub mod clear;
pub mod deletemsg;
pub mod giverole;
pub mod kick;
pub mod movemember;
pub mod setautorole;
pub mod timeout;
pub mod unban;

mod support;
