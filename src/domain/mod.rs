pub mod building;
pub mod room;

pub use building::*;
pub use room::*;
