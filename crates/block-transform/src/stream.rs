//! `io::Write` adapter that pushes bytes through a [`CryptoTransform`].

use std::io::{self, Write};

use zeroize::Zeroizing;

use crate::error::Result;
use crate::transform::CryptoTransform;

/// Buffers writes into whole blocks, transforms them and forwards the result
/// to `inner`. Call [`finish`](Self::finish) to emit the final block;
/// dropping the writer without it loses the tail of the message.
///
/// Once `write` returns `Ok`, its bytes have been transformed. Output the
/// inner writer did not take yet is kept and delivered before anything else
/// on the next `write`, `flush` or `finish`; errors from that delivery are
/// returned unchanged and consume none of the new input.
pub struct CryptoWriter<W: Write, T: CryptoTransform> {
    inner: W,
    transform: T,
    pending: Zeroizing<Vec<u8>>,
    output: Vec<u8>,
}

impl<W: Write, T: CryptoTransform> CryptoWriter<W, T> {
    /// Wraps `inner`.
    pub fn new(inner: W, transform: T) -> Self {
        Self {
            inner,
            transform,
            pending: Zeroizing::new(Vec::new()),
            output: Vec::new(),
        }
    }

    /// The wrapped writer.
    pub fn get_ref(&self) -> &W {
        &self.inner
    }

    /// The transform in use.
    pub fn transform(&self) -> &T {
        &self.transform
    }

    /// Transforms the buffered tail, writes it and returns the inner writer.
    pub fn finish(mut self) -> Result<W> {
        self.write_output()?;
        let tail = self
            .transform
            .transform_final_block(&self.pending, 0, self.pending.len())?;
        self.output.extend_from_slice(&tail);
        self.write_output()?;
        self.inner.flush()?;
        self.transform.dispose();
        Ok(self.inner)
    }

    /// Hands transformed bytes to `inner`, keeping whatever it did not take.
    fn write_output(&mut self) -> io::Result<()> {
        while !self.output.is_empty() {
            match self.inner.write(&self.output) {
                Ok(0) => return Err(io::ErrorKind::WriteZero.into()),
                Ok(n) => {
                    self.output.drain(..n);
                }
                Err(err) if err.kind() == io::ErrorKind::Interrupted => {}
                Err(err) => return Err(err),
            }
        }
        Ok(())
    }

    /// Moves `buf` into the transform. On error nothing is consumed.
    fn accept(&mut self, buf: &[u8]) -> Result<()> {
        let kept = self.pending.len();
        self.pending.extend_from_slice(buf);

        let block = self.transform.input_block_size();
        let whole = self.pending.len() / block * block;
        if whole == 0 {
            return Ok(());
        }
        let start = self.output.len();
        self.output.resize(start + whole, 0);
        match self
            .transform
            .transform_block(&self.pending, 0, whole, &mut self.output, start)
        {
            Ok(written) => {
                self.output.truncate(start + written);
                self.pending.drain(..whole);
                Ok(())
            }
            Err(err) => {
                self.output.truncate(start);
                self.pending.truncate(kept);
                Err(err)
            }
        }
    }
}

impl<W: Write, T: CryptoTransform> Write for CryptoWriter<W, T> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.write_output()?;
        self.accept(buf)?;
        // The input is committed; undelivered output surfaces on the next call.
        let _ = self.write_output();
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.write_output()?;
        self.inner.flush()
    }
}
