use std::{fs, io, path::Path};

/// Loads a whole file into memory. Decoding works on the complete image, there is no streaming.
pub fn read_all_bytes<P: AsRef<Path>>(path: P) -> io::Result<Vec<u8>> {
    let path = path.as_ref();
    let start = std::time::Instant::now();
    let buffer = fs::read(path)?;
    log::debug!(
        "read {} bytes from {:?} in {:?}",
        buffer.len(),
        path,
        start.elapsed()
    );
    Ok(buffer)
}
