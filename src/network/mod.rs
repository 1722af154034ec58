//! Network Layer: sockets sebagai byte source
//!
//! Bekerja dengan `std::net::TcpStream`, `mio::net::TcpStream`, dan
//! `UnixStream` selama stream tersebut `Read + AsRawFd`.
//! Untuk event loop berbasis mio, lihat `src/bin/kurir_tap.rs`.

mod socket;

pub use socket::SocketSource;
