/// A byte buffer over either a mutable or an immutable byte slice.
///
/// Packet views read through the buffer in both cases, writes are only valid
/// for the `Mutable` variant.
#[derive(Debug)]
pub enum Buffer<'a> {
    Immutable(&'a [u8]),
    Mutable(&'a mut [u8]),
}

impl Buffer<'_> {
    /// Access the buffer as an immutable slice of bytes.
    pub fn as_slice(&self) -> &[u8] {
        match self {
            Buffer::Immutable(packet) => packet,
            Buffer::Mutable(packet) => packet,
        }
    }

    /// Access the buffer as a mutable slice of bytes.
    pub fn as_slice_mut(&mut self) -> &mut [u8] {
        match self {
            Buffer::Immutable(_) => panic!("write operation called on readonly buffer"),
            Buffer::Mutable(packet) => packet,
        }
    }

    /// Read the byte at `offset`.
    pub fn read(&self, offset: usize) -> u8 {
        self.as_slice()[offset]
    }

    /// Get a mutable reference to the byte at `offset`.
    pub fn write(&mut self, offset: usize) -> &mut u8 {
        &mut self.as_slice_mut()[offset]
    }

    /// Read a big-endian `u16` starting at `offset`.
    pub fn read_u16(&self, offset: usize) -> u16 {
        u16::from_be_bytes([self.read(offset), self.read(offset + 1)])
    }

    /// Write `val` as a big-endian `u16` starting at `offset`.
    pub fn write_u16(&mut self, offset: usize, val: u16) {
        self.as_slice_mut()[offset..offset + 2].copy_from_slice(&val.to_be_bytes());
    }
}
