pub use beeper::Beeper;
pub use error::HostError;
pub use screen::Screen;

mod beeper;
mod error;
mod screen;
