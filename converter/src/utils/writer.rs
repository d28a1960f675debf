// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

use std::fs::File;
use std::io::{Read, Seek, SeekFrom, Stderr, Write};
use std::string::FromUtf8Error;

///
/// Sink for the diagnostic stream of a conversion run. Converted documents go to files;
/// everything a user watches scroll by (progress lines, the final error) goes through
/// here so tests can capture it.
///
pub struct Writer {
    err: WriteBuffer,
}

impl Writer {
    pub fn new(err: WriteBuffer) -> Self {
        Self { err }
    }

    pub fn write_err(&mut self, s: String) -> std::io::Result<()> {
        writeln!(self.err, "{s}")
    }

    pub fn err_to_string(self) -> Result<String, FromUtf8Error> {
        self.err.into_string()
    }

    /// Captured output with any terminal escape sequences removed.
    pub fn err_to_stripped(self) -> Result<String, FromUtf8Error> {
        let raw = self.err.into_bytes();
        String::from_utf8(strip_ansi_escapes::strip(&raw).unwrap_or(raw))
    }
}

impl Write for Writer {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.err.write(buf)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.err.flush()
    }
}

pub enum WriteBuffer {
    Stderr(Stderr),
    Vec(Vec<u8>),
    File(File),
}

impl WriteBuffer {
    fn into_bytes(self) -> Vec<u8> {
        match self {
            WriteBuffer::Stderr(..) => vec![],
            WriteBuffer::Vec(vec) => vec,
            WriteBuffer::File(mut file) => {
                let mut data = vec![];
                let _ = file
                    .seek(SeekFrom::Start(0))
                    .and_then(|_| file.read_to_end(&mut data));
                data
            }
        }
    }

    fn into_string(self) -> Result<String, FromUtf8Error> {
        String::from_utf8(self.into_bytes())
    }
}

impl Write for WriteBuffer {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        match self {
            WriteBuffer::Stderr(stderr) => stderr.write(buf),
            WriteBuffer::Vec(vec) => vec.write(buf),
            WriteBuffer::File(file) => file.write(buf),
        }
    }

    fn flush(&mut self) -> std::io::Result<()> {
        match self {
            WriteBuffer::Stderr(stderr) => stderr.flush(),
            WriteBuffer::Vec(vec) => vec.flush(),
            WriteBuffer::File(file) => file.flush(),
        }
    }
}
