use std::{cell::RefCell, io, path::PathBuf, rc::Rc};

/// In-memory io::Write target, for capturing reports and csv output.
#[derive(Default)]
pub struct StringBuffer {
    s: String,
}

impl StringBuffer {
    pub fn new() -> StringBuffer {
        StringBuffer::default()
    }

    pub fn as_str(&self) -> &str {
        &self.s
    }
}

impl io::Write for StringBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let text = std::str::from_utf8(buf)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        self.s.push_str(text);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

// The report goes to one of these and load warnings go to another.
// Clones share the same underlying stream.
#[derive(Clone)]
pub struct WriteHandle {
    w: Rc<RefCell<dyn io::Write>>,
}

impl WriteHandle {
    fn wrap<W: io::Write + 'static>(w: W) -> WriteHandle {
        WriteHandle { w: Rc::new(RefCell::new(w)) }
    }

    pub fn stdout() -> WriteHandle {
        Self::wrap(io::stdout())
    }

    pub fn stderr() -> WriteHandle {
        Self::wrap(io::stderr())
    }

    /// Discards everything written.
    pub fn sink() -> WriteHandle {
        Self::wrap(io::sink())
    }

    /// Returns the handle along with the buffer it writes into.
    pub fn string_buff() -> (WriteHandle, Rc<RefCell<StringBuffer>>) {
        let buff = Rc::new(RefCell::new(StringBuffer::new()));
        (WriteHandle { w: buff.clone() }, buff)
    }
}

impl io::Write for WriteHandle {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.w.borrow_mut().write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.w.borrow_mut().flush()
    }
}

enum LotSource {
    Text(String),
    File(PathBuf),
}

/// A lot csv to be read, along with how to name it in messages
/// (eg. "Error on row 3 of lots.csv").
pub struct DescribedReader {
    desc: String,
    source: LotSource,
}

impl DescribedReader {
    pub fn from_string(desc: String, data: String) -> DescribedReader {
        DescribedReader { desc, source: LotSource::Text(data) }
    }

    pub fn from_file_path(path: PathBuf) -> DescribedReader {
        DescribedReader { desc: path.display().to_string(), source: LotSource::File(path) }
    }

    pub fn desc(&self) -> &str {
        &self.desc
    }

    /// Opens the source for reading. A failure keeps its io::ErrorKind,
    /// with the description prepended to the message.
    pub fn open<'a>(&'a self) -> io::Result<Box<dyn io::Read + 'a>> {
        match &self.source {
            LotSource::Text(text) => Ok(Box::new(io::Cursor::new(text.as_bytes()))),
            LotSource::File(path) => match std::fs::File::open(path) {
                Ok(f) => Ok(Box::new(f)),
                Err(e) => Err(io::Error::new(
                    e.kind(),
                    format!("Unable to open {}: {}", self.desc, e),
                )),
            },
        }
    }
}
