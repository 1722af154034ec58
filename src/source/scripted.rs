//! In-memory scripted source
//!
//! Menyajikan data dalam potongan yang ditentukan, dengan jeda "nothing"
//! dan error di titik tertentu. Dipakai untuk tests dan benchmarks.

use std::collections::VecDeque;
use std::io;

use super::{ByteSource, Fill};

/// One scripted source event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// Bytes delivered over one or more reads (a read never crosses steps)
    Bytes(Vec<u8>),
    /// One read reporting nothing available
    Nothing,
    /// One read failing with this error kind
    Error(io::ErrorKind),
}

impl Step {
    pub fn bytes(data: &[u8]) -> Self {
        Step::Bytes(data.to_vec())
    }

    pub fn error(kind: io::ErrorKind) -> Self {
        Step::Error(kind)
    }
}

/// Source replaying a list of `Step`s, then EOF
#[derive(Debug, Default)]
pub struct ScriptedSource {
    steps: VecDeque<Step>,
    reads: usize,
    closed: bool,
}

impl ScriptedSource {
    pub fn new(steps: Vec<Step>) -> Self {
        Self {
            steps: steps.into(),
            reads: 0,
            closed: false,
        }
    }

    /// `data` split into `chunk`-sized reads
    pub fn chunked(data: &[u8], chunk: usize) -> Self {
        let chunk = chunk.max(1);
        Self::new(data.chunks(chunk).map(Step::bytes).collect())
    }

    pub fn push(&mut self, step: Step) {
        self.steps.push_back(step);
    }

    /// Number of `read_into` calls so far
    pub fn reads(&self) -> usize {
        self.reads
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }
}

impl ByteSource for ScriptedSource {
    fn read_into(&mut self, buf: &mut [u8]) -> io::Result<Fill> {
        self.reads += 1;

        if self.closed {
            return Err(io::Error::new(io::ErrorKind::NotConnected, "source closed"));
        }

        match self.steps.pop_front() {
            None => Ok(Fill::Eof),
            Some(Step::Nothing) => Ok(Fill::Nothing),
            Some(Step::Error(kind)) => Err(io::Error::new(kind, "scripted failure")),
            Some(Step::Bytes(mut data)) => {
                let n = data.len().min(buf.len());
                buf[..n].copy_from_slice(&data[..n]);
                if n < data.len() {
                    // Sisa chunk tetap di depan antrian
                    data.drain(..n);
                    self.steps.push_front(Step::Bytes(data));
                }
                Ok(Fill::Bytes(n))
            }
        }
    }

    /// Bytes in the leading run of `Bytes` steps
    fn available(&self) -> io::Result<usize> {
        Ok(self
            .steps
            .iter()
            .map_while(|step| match step {
                Step::Bytes(data) => Some(data.len()),
                _ => None,
            })
            .sum())
    }

    fn close(&mut self) -> io::Result<()> {
        self.closed = true;
        Ok(())
    }
}
