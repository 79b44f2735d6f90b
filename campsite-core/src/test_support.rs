//! Test-only, in-memory bucket sinks used by unit and behaviour tests.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::io::{self, Write};
use std::rc::Rc;

use crate::SinkProvider;

type Files = Rc<RefCell<BTreeMap<String, Vec<u8>>>>;

/// In-memory `SinkProvider` recording every opened file.
///
/// Clones share the same file table, so a test can keep one handle and pass
/// the other to a router.
#[derive(Debug, Clone, Default)]
pub struct MemorySinks {
    files: Files,
}

impl MemorySinks {
    /// Names of every opened file in lexical order.
    #[must_use]
    pub fn file_names(&self) -> Vec<String> {
        self.files.borrow().keys().cloned().collect()
    }

    /// Contents of a file as UTF-8 text.
    #[must_use]
    pub fn contents(&self, file_name: &str) -> Option<String> {
        self.files
            .borrow()
            .get(file_name)
            .map(|bytes| String::from_utf8_lossy(bytes).into_owned())
    }
}

impl SinkProvider for MemorySinks {
    type Sink = MemorySink;

    fn open(&mut self, file_name: &str) -> io::Result<MemorySink> {
        self.files
            .borrow_mut()
            .insert(file_name.to_owned(), Vec::new());
        Ok(MemorySink {
            files: Rc::clone(&self.files),
            file_name: file_name.to_owned(),
        })
    }
}

/// Stream appending to one entry of a [`MemorySinks`] table.
#[derive(Debug)]
pub struct MemorySink {
    files: Files,
    file_name: String,
}

impl Write for MemorySink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.files
            .borrow_mut()
            .entry(self.file_name.clone())
            .or_default()
            .extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
