pub mod errors;
pub mod game;
pub mod messages;
pub mod player;
pub mod theme;

// Re-export all types
pub use errors::*;
pub use game::*;
pub use messages::*;
pub use player::*;
pub use theme::*;
