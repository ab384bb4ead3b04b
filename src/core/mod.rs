pub mod content;
pub mod grammar;
pub mod resolve;
