//! Domain events delivered over the live push channel.

pub mod push;

pub use push::PushEvent;
