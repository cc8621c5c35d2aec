pub mod demo;
pub mod observers;
pub mod oracle;
