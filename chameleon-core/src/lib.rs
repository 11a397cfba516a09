pub mod assignment;
pub mod config;
pub mod content;
pub mod game_events;
pub mod name_validation;
pub mod round;
pub mod scoring;
pub mod session;
pub mod themes;

// Re-export main components
pub use assignment::*;
pub use config::*;
pub use content::*;
pub use game_events::*;
pub use name_validation::*;
pub use round::*;
pub use scoring::*;
pub use session::*;
pub use themes::*;
