use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("connection failed: {0}")]
    Connect(String),

    #[error("connection closed by peer after {received} of {expected} bytes")]
    ConnectionClosed { received: usize, expected: usize },

    #[error("frame length mismatch: got {len} bytes, expected {expected}")]
    FrameLength { len: usize, expected: usize },
}

pub type Result<T> = std::result::Result<T, Error>;
