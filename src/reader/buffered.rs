//! Reading XML from any `Read` source
//!
//! The tree is built from a complete in-memory document, so streaming input
//! is drained up front and then decoded to a `String`.

use crate::core::encoding::decode_input;
use crate::error::Result;
use std::io::Read;

/// Buffer size for reading chunks
const DEFAULT_BUFFER_SIZE: usize = 8192;

/// Read an entire XML document from a Read source
pub fn read_all<R: Read>(mut reader: R) -> std::io::Result<Vec<u8>> {
    let mut buffer = Vec::with_capacity(DEFAULT_BUFFER_SIZE);
    reader.read_to_end(&mut buffer)?;
    Ok(buffer)
}

/// Read and decode an entire XML document
pub fn read_to_string<R: Read>(reader: R) -> Result<String> {
    decode_input(read_all(reader)?)
}
