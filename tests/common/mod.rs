use std::cell::RefCell;
use std::io::{self, Write};
use std::rc::Rc;

use rocks_lang::rocks;

/// An in-memory `Write` sink shared between the test and the interpreter it
/// drives, so a test can run a script and then read back everything it
/// printed.
#[derive(Clone, Default)]
pub struct SharedBuffer(Rc<RefCell<Vec<u8>>>);

impl SharedBuffer {
    pub fn new() -> Self {
        SharedBuffer::default()
    }

    pub fn contents(&self) -> String {
        String::from_utf8(self.0.borrow().clone()).expect("captured output to be valid UTF-8")
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.borrow_mut().write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Runs `source` through the public pipeline and returns everything it
/// printed together with the driver, so callers can also assert on the
/// diagnostics reporter's error state via `had_error`/`had_runtime_error`.
#[allow(dead_code)]
pub fn run(source: &str) -> (String, rocks) {
    let buffer = SharedBuffer::new();
    let mut driver = rocks::new_with_output(Box::new(buffer.clone()));
    driver.run_source(source);
    (buffer.contents(), driver)
}
