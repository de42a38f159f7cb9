pub mod archetype;
pub mod cache;
pub mod clock;
pub mod config;
pub mod constants;
pub mod error;
pub mod reconcile;
pub mod session;
pub mod traffic;
pub mod transport;
pub mod world;

pub use archetype::*;
pub use cache::*;
pub use clock::*;
pub use config::*;
pub use constants::*;
pub use error::*;
pub use reconcile::*;
pub use session::*;
pub use traffic::*;
pub use transport::*;
pub use world::*;
