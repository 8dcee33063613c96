pub mod artifact;
pub mod audio;
pub mod catalog;
pub mod config;
pub mod constants;
pub mod error;
pub mod events;
pub mod hotspot;
pub mod pointer;
pub mod registry;
pub mod room;
pub mod scene;
pub mod viewer;

pub use artifact::*;
pub use audio::*;
pub use catalog::*;
pub use config::*;
pub use constants::*;
pub use error::*;
pub use events::*;
pub use hotspot::*;
pub use pointer::*;
pub use registry::*;
pub use room::*;
pub use scene::*;
pub use viewer::*;
