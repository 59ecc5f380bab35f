use std::fs::File;
use std::io::{ErrorKind, Read, Write};
use std::path::Path;

use wordfreq_core::{FreqError, FreqResult, IoOp};

const COPY_CHUNK: usize = 1024;

/// Reads `reader` to the end and returns the number of bytes seen.
pub fn count_bytes<R: Read>(reader: R) -> FreqResult<u64> {
    pump(reader, None::<&mut std::io::Sink>)
}

/// Copies `reader` into `writer` and returns the number of bytes copied.
/// Read and write failures are reported separately.
pub fn copy_bytes<R: Read, W: Write>(reader: R, writer: &mut W) -> FreqResult<u64> {
    let copied = pump(reader, Some(&mut *writer))?;
    writer.flush().map_err(|e| FreqError::io(IoOp::Write, e))?;
    Ok(copied)
}

pub fn count_file_bytes(path: impl AsRef<Path>) -> FreqResult<u64> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| FreqError::io_at(IoOp::Open, path, e))?;
    count_bytes(file).map_err(|err| err.with_path(path))
}

/// Streams the file at `path` to `out`.
pub fn print_file<W: Write>(path: impl AsRef<Path>, out: &mut W) -> FreqResult<u64> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| FreqError::io_at(IoOp::Open, path, e))?;
    copy_bytes(file, out).map_err(|err| {
        // Write failures belong to `out`, not to the file.
        if matches!(err, FreqError::Io { op: IoOp::Read, .. }) {
            err.with_path(path)
        } else {
            err
        }
    })
}

fn pump<R: Read, W: Write>(mut reader: R, mut writer: Option<&mut W>) -> FreqResult<u64> {
    let mut buf = [0u8; COPY_CHUNK];
    let mut total = 0u64;
    loop {
        let n = match reader.read(&mut buf) {
            Ok(0) => return Ok(total),
            Ok(n) => n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(FreqError::io(IoOp::Read, e)),
        };
        if let Some(out) = writer.as_deref_mut() {
            out.write_all(&buf[..n])
                .map_err(|e| FreqError::io(IoOp::Write, e))?;
        }
        total += n as u64;
    }
}
