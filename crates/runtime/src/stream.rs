//! Text streams a program reads from and writes to

use std::cell::RefCell;
use std::io::{self, BufRead, Write};
use std::rc::Rc;

pub trait Stream {
    fn write(&self, text: &str) -> io::Result<()>;

    /// The next line of input, without its terminator; `None` at end of input.
    fn read_line(&self) -> io::Result<Option<String>> {
        Ok(None)
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct StdoutStream;

impl Stream for StdoutStream {
    fn write(&self, text: &str) -> io::Result<()> {
        let mut stdout = io::stdout().lock();
        stdout.write_all(text.as_bytes())?;
        stdout.flush()
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct StderrStream;

impl Stream for StderrStream {
    fn write(&self, text: &str) -> io::Result<()> {
        io::stderr().lock().write_all(text.as_bytes())
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct StdinStream;

impl Stream for StdinStream {
    fn write(&self, _text: &str) -> io::Result<()> {
        Err(io::Error::new(
            io::ErrorKind::Unsupported,
            "stdin is not writable",
        ))
    }

    fn read_line(&self) -> io::Result<Option<String>> {
        let mut line = String::new();
        if io::stdin().lock().read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let trimmed = line.trim_end_matches(['\n', '\r']).len();
        line.truncate(trimmed);
        Ok(Some(line))
    }
}

/// An in-memory stream; collects output and serves queued input lines.
#[derive(Debug, Default)]
pub struct BufferStream {
    output: RefCell<String>,
    input: RefCell<Vec<String>>,
}

impl BufferStream {
    pub fn new() -> Self {
        Self::default()
    }

    /// A stream that yields `lines` in order.
    pub fn with_input<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut input: Vec<String> = lines.into_iter().map(Into::into).collect();
        input.reverse();
        Self {
            output: RefCell::default(),
            input: RefCell::new(input),
        }
    }

    pub fn contents(&self) -> String {
        self.output.borrow().clone()
    }

    pub fn take(&self) -> String {
        std::mem::take(&mut *self.output.borrow_mut())
    }
}

impl Stream for BufferStream {
    fn write(&self, text: &str) -> io::Result<()> {
        self.output.borrow_mut().push_str(text);
        Ok(())
    }

    fn read_line(&self) -> io::Result<Option<String>> {
        Ok(self.input.borrow_mut().pop())
    }
}

/// The three standard streams handed to a program.
#[derive(Clone)]
pub struct Streams {
    pub stdin: Rc<dyn Stream>,
    pub stdout: Rc<dyn Stream>,
    pub stderr: Rc<dyn Stream>,
}

impl Streams {
    pub fn new(stdin: Rc<dyn Stream>, stdout: Rc<dyn Stream>, stderr: Rc<dyn Stream>) -> Self {
        Self {
            stdin,
            stdout,
            stderr,
        }
    }

    /// The process's own stdin, stdout and stderr.
    pub fn stdio() -> Self {
        Self::new(
            Rc::new(StdinStream),
            Rc::new(StdoutStream),
            Rc::new(StderrStream),
        )
    }
}

impl Default for Streams {
    fn default() -> Self {
        Self::stdio()
    }
}
