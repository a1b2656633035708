use thiserror::Error;

/// A packet error result.
pub type Result<T> = std::result::Result<T, Error>;

/// A packet error.
#[derive(Error, Debug, Eq, PartialEq)]
pub enum Error {
    /// The buffer is shorter than the fixed header of the packet.
    #[error("{packet} needs at least {minimum} bytes but only {provided} were given")]
    InsufficientPacketBuffer {
        packet: &'static str,
        minimum: usize,
        provided: usize,
    },
}
