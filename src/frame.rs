use crate::{Error, Result};

/// Number of 16-bit samples in one frame.
pub const BUFFER_SIZE: usize = 16384;

/// Number of raw bytes in one frame on the wire (two bytes per sample).
pub const PACKET_SIZE: usize = BUFFER_SIZE * 2;

/// Upper end of the displayed sample range. The sample devices carry a
/// 12-bit ADC, so values sit in `0..=4095`.
pub const SAMPLE_MAX: u16 = 4096;

/// Request line written once after connecting. Some firmwares only start
/// streaming after seeing an HTTP-shaped request.
pub const GREETING: &[u8] = b"GET / HTTP/1.0\r\n\r\n";

/// One decoded frame of samples.
///
/// A `Frame` is only ever constructed from a complete [`PACKET_SIZE`]-byte
/// buffer; there is no partially-filled state.
///
/// # Examples
///
/// ```
/// use streamscope::frame::{Frame, BUFFER_SIZE, PACKET_SIZE};
///
/// // Alternating 0x00, 0x01 bytes decode to the value 256 everywhere.
/// let mut bytes = Vec::with_capacity(PACKET_SIZE);
/// for _ in 0..BUFFER_SIZE {
///     bytes.extend_from_slice(&[0x00, 0x01]);
/// }
///
/// let frame = Frame::decode(&bytes).unwrap();
/// assert_eq!(frame.samples().len(), BUFFER_SIZE);
/// assert!(frame.samples().iter().all(|&v| v == 256));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    samples: Vec<u16>,
}

impl Frame {
    /// Decodes exactly [`PACKET_SIZE`] bytes into [`BUFFER_SIZE`] samples.
    ///
    /// Samples are little-endian on the wire. A buffer of any other length
    /// is rejected with [`Error::FrameLength`]; the transport reader never
    /// produces one.
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != PACKET_SIZE {
            return Err(Error::FrameLength {
                len: bytes.len(),
                expected: PACKET_SIZE,
            });
        }

        let samples = bytes
            .chunks_exact(2)
            .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
            .collect();

        Ok(Self { samples })
    }

    /// The decoded samples, in wire order.
    pub fn samples(&self) -> &[u16] {
        &self.samples
    }

    /// Up to the first `n` samples.
    pub fn first(&self, n: usize) -> &[u16] {
        &self.samples[..n.min(self.samples.len())]
    }

    /// Up to the last `n` samples.
    pub fn last(&self, n: usize) -> &[u16] {
        &self.samples[self.samples.len() - n.min(self.samples.len())..]
    }

    /// Smallest sample in the frame.
    pub fn min(&self) -> u16 {
        self.samples.iter().copied().min().unwrap_or(0)
    }

    /// Largest sample in the frame.
    pub fn max(&self) -> u16 {
        self.samples.iter().copied().max().unwrap_or(0)
    }
}
