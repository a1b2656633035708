use derive_more::{Add, AddAssign, Display};

/// `Sequence` number newtype.
///
/// Sequence numbers are 1-based within a probe session.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Ord, PartialOrd, Hash, Add, AddAssign, Display,
)]
pub struct Sequence(pub u16);

/// `TraceId` newtype.
///
/// The `ICMP` identifier carried by every echo request of a probe session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Ord, PartialOrd, Hash, Display)]
pub struct TraceId(pub u16);

impl From<Sequence> for usize {
    fn from(sequence: Sequence) -> Self {
        sequence.0 as Self
    }
}
