pub mod chat;
pub mod riddle;
pub mod stats;

pub use riddle::{Riddle, RiddleResponse};
