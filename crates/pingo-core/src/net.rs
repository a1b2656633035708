/// A network socket.
mod socket;

/// The `socket2` backed socket implementation.
mod platform;

pub use platform::SocketImpl;
pub use socket::{Recv, Socket};

#[cfg(test)]
pub use socket::MockSocket;
