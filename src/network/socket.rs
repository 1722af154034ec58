//! Socket source dengan non-blocking reads
//!
//! `WouldBlock` dari socket menjadi `Fill::Nothing`, `Ok(0)` menjadi EOF.
//! `available()` memakai `FIONREAD` sehingga `packets_available()` bisa
//! melihat data di kernel buffer tanpa membaca.

use std::io::{self, Read};
use std::net::TcpStream;
use std::os::unix::io::AsRawFd;

use crate::source::{fill_from_read, ByteSource, Fill};

/// Byte source over a readable socket (std or mio `TcpStream`, `UnixStream`, ...)
#[derive(Debug)]
pub struct SocketSource<S> {
    stream: S,
}

impl SocketSource<TcpStream> {
    /// Wrap TcpStream dalam mode non-blocking
    pub fn from_tcp(stream: TcpStream) -> io::Result<Self> {
        stream.set_nonblocking(true)?;

        // Disable Nagle's algorithm untuk lower latency
        stream.set_nodelay(true)?;

        Ok(Self { stream })
    }
}

impl<S: Read + AsRawFd> SocketSource<S> {
    /// Wrap stream as-is (blocking mode is left to the caller)
    pub fn new(stream: S) -> Self {
        Self { stream }
    }

    /// Get underlying stream untuk polling
    pub fn get_ref(&self) -> &S {
        &self.stream
    }

    pub fn get_mut(&mut self) -> &mut S {
        &mut self.stream
    }

    pub fn into_inner(self) -> S {
        self.stream
    }
}

impl<S: Read + AsRawFd> ByteSource for SocketSource<S> {
    #[inline(always)]
    fn read_into(&mut self, buf: &mut [u8]) -> io::Result<Fill> {
        fill_from_read(&mut self.stream, buf)
    }

    fn available(&self) -> io::Result<usize> {
        let fd = self.stream.as_raw_fd();
        let mut pending: libc::c_int = 0;

        // SAFETY: FIONREAD hanya menulis satu c_int ke pointer yang valid
        let ret = unsafe { libc::ioctl(fd, libc::FIONREAD, &mut pending as *mut libc::c_int) };
        if ret < 0 {
            return Err(io::Error::last_os_error());
        }

        Ok(pending.max(0) as usize)
    }

    /// Menutup sisi baca socket; sisi tulis tetap terbuka
    fn close(&mut self) -> io::Result<()> {
        let fd = self.stream.as_raw_fd();

        // SAFETY: fd dimiliki oleh stream yang masih hidup
        let ret = unsafe { libc::shutdown(fd, libc::SHUT_RD) };
        if ret < 0 {
            let err = io::Error::last_os_error();
            // Peer sudah menutup koneksi: tidak ada yang perlu di-shutdown
            if err.kind() != io::ErrorKind::NotConnected {
                return Err(err);
            }
        }

        Ok(())
    }
}
