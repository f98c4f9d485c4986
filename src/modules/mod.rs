pub mod pages;
pub mod session;
