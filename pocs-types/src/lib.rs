pub mod errors;
pub mod hangman;
pub mod messages;
pub mod records;

// Re-export all types
pub use errors::*;
pub use hangman::*;
pub use messages::*;
pub use records::*;
