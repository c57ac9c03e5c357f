use super::LogFileRef;
use flate2::read::MultiGzDecoder;
use std::fs::File;
use std::io::{self, BufRead, BufReader};

pub struct LogReader;

impl LogReader {
    /// Open a log file for forward-only reading, decompressing `.gz` logs on the fly
    pub fn open(log: &LogFileRef) -> io::Result<Box<dyn BufRead>> {
        tracing::debug!(
            "Opening log file: {} (compressed: {})",
            log.path.display(),
            log.compressed
        );

        let file = File::open(&log.path)?;
        if log.compressed {
            Ok(Box::new(BufReader::new(MultiGzDecoder::new(file))))
        } else {
            Ok(Box::new(BufReader::new(file)))
        }
    }
}

/// Iterator over the lines of a reader with `\n`, `\r\n` or a lone `\r` terminator removed.
///
/// Invalid UTF-8 is replaced rather than rejected, so such a line simply fails the grammar.
pub struct LogLines<R> {
    reader: R,
    buf: Vec<u8>,
    // last line ended with `\r`; a following `\n` belongs to it
    skip_lf: bool,
}

impl<R: BufRead> LogLines<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            buf: Vec::with_capacity(512),
            skip_lf: false,
        }
    }

    fn take_line(&self) -> String {
        String::from_utf8_lossy(&self.buf).into_owned()
    }
}

impl<R: BufRead> Iterator for LogLines<R> {
    type Item = io::Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        self.buf.clear();
        let mut started = false;

        loop {
            let available = match self.reader.fill_buf() {
                Ok(available) => available,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Some(Err(e)),
            };
            if available.is_empty() {
                return started.then(|| Ok(self.take_line()));
            }

            if self.skip_lf {
                self.skip_lf = false;
                if available[0] == b'\n' {
                    self.reader.consume(1);
                    continue;
                }
            }
            started = true;

            match available.iter().position(|&b| b == b'\n' || b == b'\r') {
                Some(at) => {
                    self.skip_lf = available[at] == b'\r';
                    self.buf.extend_from_slice(&available[..at]);
                    self.reader.consume(at + 1);
                    return Some(Ok(self.take_line()));
                }
                None => {
                    let len = available.len();
                    self.buf.extend_from_slice(available);
                    self.reader.consume(len);
                }
            }
        }
    }
}
