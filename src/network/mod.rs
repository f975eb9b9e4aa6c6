//! Network subsystem for UDP pixel transport and the event channel

pub mod events;
pub mod sender;
pub mod udp;

pub use events::EventListener;
pub use sender::FrameSender;
pub use udp::create_socket;
