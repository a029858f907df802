// Wire types shared between the stream client and its collaborators

pub mod control;
pub mod protocol;

pub use control::*;
pub use protocol::*;
