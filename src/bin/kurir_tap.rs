//! Kurir Tap - packetize a file or TCP stream and report packet stats
//!
//! Menggunakan:
//! - `MmapSource` untuk file (zero-copy view)
//! - mio readiness polling + `SocketSource` untuk TCP
//! - `packets_available()` untuk membaca packet penuh tanpa blocking
//!
//! # Usage
//!
//! ```text
//! cargo run --release --bin kurir_tap -- --file data.bin --packet-size 4096
//! cargo run --release --bin kurir_tap -- --host 127.0.0.1:9999 --no-delay
//! ```

use std::io;
use std::time::{Duration, Instant};

use kurir::source::MmapSource;
use kurir::{ByteSource, Packet, PacketReader, ReaderConfig, DEFAULT_PACKET_SIZE};

/// Tap configuration
struct TapConfig {
    host: Option<String>,
    file: Option<String>,
    packet_size: usize,
    no_delay: bool,
    verbose: bool,
}

impl Default for TapConfig {
    fn default() -> Self {
        Self {
            host: None,
            file: None,
            packet_size: DEFAULT_PACKET_SIZE,
            no_delay: false,
            verbose: false,
        }
    }
}

impl TapConfig {
    fn reader_config(&self) -> ReaderConfig {
        ReaderConfig::new(self.packet_size, self.no_delay)
    }
}

/// Packet statistics
#[derive(Default)]
struct TapStats {
    packets: u64,
    bytes: u64,
    short_packets: u64,
    empty_packets: u64,
}

impl TapStats {
    fn record(&mut self, packet: &Packet, packet_size: usize, verbose: bool) {
        match packet {
            Packet::Data(bytes) => {
                self.packets += 1;
                self.bytes += bytes.len() as u64;
                if bytes.len() < packet_size {
                    self.short_packets += 1;
                }
                if verbose {
                    println!("   packet #{}: {} bytes", self.packets, bytes.len());
                }
            }
            Packet::Empty => self.empty_packets += 1,
            Packet::Eof => {}
        }
    }

    fn print_stats(&self, elapsed: Duration) {
        let secs = elapsed.as_secs_f64().max(f64::EPSILON);

        println!("\n📊 Tap Stats (elapsed: {:.3}s)", elapsed.as_secs_f64());
        println!("   Packets:       {}", self.packets);
        println!("   Bytes:         {}", self.bytes);
        println!("   Short packets: {}", self.short_packets);
        println!("   Empty reads:   {}", self.empty_packets);
        println!(
            "   Throughput:    {:.2} MB/sec ({:.1} packets/sec)",
            self.bytes as f64 / secs / 1_000_000.0,
            self.packets as f64 / secs
        );
    }
}

/// Drain a reader that never reports `Packet::Empty` (files)
fn drain<S: ByteSource>(
    reader: &mut PacketReader<S>,
    stats: &mut TapStats,
    config: &TapConfig,
) -> io::Result<()> {
    loop {
        let packet = reader.read_next()?;
        if packet.is_eof() {
            return Ok(());
        }
        stats.record(&packet, reader.packet_size(), config.verbose);
    }
}

fn run_file(path: &str, config: &TapConfig) -> kurir::Result<TapStats> {
    let source = MmapSource::open(path)?;
    println!("📂 {} ({} bytes)", path, source.len());

    let mut reader = PacketReader::with_config(source, config.reader_config())?;
    let mut stats = TapStats::default();
    drain(&mut reader, &mut stats, config)?;

    Ok(stats)
}

#[cfg(unix)]
fn run_tcp(host: &str, config: &TapConfig) -> kurir::Result<TapStats> {
    use std::net::ToSocketAddrs;

    use kurir::network::SocketSource;
    use mio::net::TcpStream;
    use mio::{Events, Interest, Poll, Token};

    const CLIENT: Token = Token(0);

    let addr = host.to_socket_addrs()?.next().ok_or_else(|| {
        io::Error::new(io::ErrorKind::InvalidInput, format!("cannot resolve {host}"))
    })?;

    let mut poll = Poll::new()?;
    let mut events = Events::with_capacity(16);

    let mut stream = TcpStream::connect(addr)?;
    poll.registry()
        .register(&mut stream, CLIENT, Interest::READABLE)?;
    println!("🔌 Connected to {}", addr);

    let mut reader = PacketReader::with_config(SocketSource::new(stream), config.reader_config())?;
    let packet_size = reader.packet_size();
    let mut stats = TapStats::default();

    while !reader.is_eof() {
        poll.poll(&mut events, Some(Duration::from_millis(100)))?;

        for event in events.iter() {
            if event.token() != CLIENT {
                continue;
            }

            if event.is_read_closed() {
                // Peer selesai mengirim: sisa data lalu EOF, tanpa blocking
                drain(&mut reader, &mut stats, config)?;
                break;
            }

            if config.no_delay {
                // Edge-triggered: baca sampai Empty
                loop {
                    let packet = reader.read_packet(true)?;
                    stats.record(&packet, packet_size, config.verbose);
                    // Empty atau EOF
                    if packet.is_empty() {
                        break;
                    }
                }
            } else {
                for _ in 0..reader.packets_available() {
                    let packet = reader.read_packet(false)?;
                    stats.record(&packet, packet_size, config.verbose);
                }
            }
        }
    }

    Ok(stats)
}

#[cfg(not(unix))]
fn run_tcp(_host: &str, _config: &TapConfig) -> kurir::Result<TapStats> {
    Err(io::Error::new(io::ErrorKind::Unsupported, "TCP tap requires a unix platform").into())
}

fn parse_args() -> TapConfig {
    let args: Vec<String> = std::env::args().collect();
    let mut config = TapConfig::default();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--host" | "-H" => {
                if i + 1 < args.len() {
                    config.host = Some(args[i + 1].clone());
                    i += 1;
                }
            }
            "--file" | "-f" => {
                if i + 1 < args.len() {
                    config.file = Some(args[i + 1].clone());
                    i += 1;
                }
            }
            "--packet-size" | "-p" => {
                if i + 1 < args.len() {
                    config.packet_size = args[i + 1].parse().unwrap_or(DEFAULT_PACKET_SIZE);
                    i += 1;
                }
            }
            "--no-delay" | "-n" => {
                config.no_delay = true;
            }
            "--verbose" | "-v" => {
                config.verbose = true;
            }
            "--help" | "-h" => {
                println!("Kurir Tap - packet reader statistics\n");
                println!("Usage: kurir_tap (--file <PATH> | --host <ADDR>) [OPTIONS]\n");
                println!("Options:");
                println!("  -f, --file <PATH>         Packetize a file (memory-mapped)");
                println!("  -H, --host <ADDR>         Packetize a TCP stream");
                println!("  -p, --packet-size <N>     Packet size in bytes (default: 1024)");
                println!("  -n, --no-delay            Accept partial packets");
                println!("  -v, --verbose             Print every packet");
                println!("  -h, --help                Show this help");
                std::process::exit(0);
            }
            _ => {}
        }
        i += 1;
    }

    config
}

fn main() {
    env_logger::init();
    let config = parse_args();

    println!(
        "🚀 Kurir Tap (packet size: {}, no-delay: {})",
        config.packet_size, config.no_delay
    );

    let start = Instant::now();
    let result = match (&config.file, &config.host) {
        (Some(path), _) => run_file(path, &config),
        (None, Some(host)) => run_tcp(host, &config),
        (None, None) => {
            eprintln!("❌ Either --file or --host is required (see --help)");
            std::process::exit(2);
        }
    };

    match result {
        Ok(stats) => stats.print_stats(start.elapsed()),
        Err(e) => {
            eprintln!("❌ Tap error: {}", e);
            std::process::exit(1);
        }
    }
}
