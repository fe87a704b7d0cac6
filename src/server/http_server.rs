//! Server lifecycle: bind, wait until the health route answers, stop.

use may::coroutine::JoinHandle;
use may_minihttp::HttpService;
use std::io::{self, Read, Write};
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr, TcpStream, ToSocketAddrs};
use std::thread;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Route polled by [`ServerHandle::wait_ready`].
pub const READY_PATH: &str = "/api/health";

const READY_TIMEOUT: Duration = Duration::from_secs(2);
const POLL_INTERVAL: Duration = Duration::from_millis(10);
const IO_TIMEOUT: Duration = Duration::from_millis(250);

/// Wrapper around may_minihttp's HTTP server
pub struct HttpServer<T>(pub T);

/// Handle to a running HTTP server
pub struct ServerHandle {
    addr: SocketAddr,
    handle: JoinHandle<()>,
}

impl ServerHandle {
    /// Address the server is bound to.
    #[must_use]
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Wait until `GET /api/health` answers 200.
    ///
    /// # Errors
    ///
    /// `TimedOut` if the health route does not answer within two seconds.
    pub fn wait_ready(&self) -> io::Result<()> {
        self.wait_ready_on(READY_PATH, READY_TIMEOUT)
    }

    /// Wait until `GET path` answers 200, polling until `timeout` elapses.
    ///
    /// # Errors
    ///
    /// `TimedOut` if no 200 arrives in time.
    pub fn wait_ready_on(&self, path: &str, timeout: Duration) -> io::Result<()> {
        let deadline = Instant::now() + timeout;
        let mut attempts = 0u32;
        loop {
            attempts += 1;
            if responds_ok(&self.addr, path) {
                debug!(addr = %self.addr, path, attempts, "Server ready");
                return Ok(());
            }
            if Instant::now() >= deadline {
                return Err(io::Error::new(
                    io::ErrorKind::TimedOut,
                    format!("GET {path} did not answer 200 within {timeout:?}"),
                ));
            }
            thread::sleep(POLL_INTERVAL);
        }
    }

    /// Cancel the server coroutine and wait for it to finish.
    pub fn stop(self) {
        // SAFETY: the service holds no resources that must outlive the coroutine.
        #[allow(unsafe_code)]
        unsafe {
            self.handle.coroutine().cancel();
        }
        if self.handle.join().is_err() {
            warn!(addr = %self.addr, "Server coroutine ended with a panic");
        }
        info!(addr = %self.addr, "Server stopped");
    }

    /// Block until the server coroutine finishes.
    ///
    /// # Errors
    ///
    /// Returns an error if the server thread panicked.
    pub fn join(self) -> std::thread::Result<()> {
        self.handle.join()
    }
}

impl<T: HttpService + Clone + Send + Sync + 'static> HttpServer<T> {
    /// Start the HTTP server on the given address
    ///
    /// # Errors
    ///
    /// Returns an error if the address is invalid or the port cannot be bound.
    pub fn start<A: ToSocketAddrs>(self, addr: A) -> io::Result<ServerHandle> {
        let addr = addr
            .to_socket_addrs()?
            .next()
            .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "invalid address"))?;
        let handle = may_minihttp::HttpServer(self.0).start(addr)?;
        info!(addr = %addr, "Server listening");
        Ok(ServerHandle { addr, handle })
    }
}

/// Whether `GET path` on the server at `addr` answers with status 200.
///
/// Wildcard bind addresses are reached through loopback.
#[must_use]
pub fn responds_ok(addr: &SocketAddr, path: &str) -> bool {
    let target = dial_addr(*addr);
    let Ok(mut stream) = TcpStream::connect_timeout(&target, IO_TIMEOUT) else {
        return false;
    };
    if stream.set_read_timeout(Some(IO_TIMEOUT)).is_err() {
        return false;
    }
    let req = format!("GET {path} HTTP/1.1\r\nHost: {target}\r\nConnection: close\r\n\r\n");
    if stream.write_all(req.as_bytes()).is_err() {
        return false;
    }
    let mut head = [0u8; 32];
    let mut read = 0;
    while read < head.len() {
        match stream.read(&mut head[read..]) {
            Ok(0) | Err(_) => break,
            Ok(n) => read += n,
        }
    }
    status_is_ok(&head[..read])
}

fn status_is_ok(head: &[u8]) -> bool {
    std::str::from_utf8(head)
        .ok()
        .and_then(|s| s.split_whitespace().nth(1))
        .is_some_and(|code| code == "200")
}

fn dial_addr(addr: SocketAddr) -> SocketAddr {
    match addr.ip() {
        IpAddr::V4(ip) if ip.is_unspecified() => {
            SocketAddr::new(IpAddr::V4(Ipv4Addr::LOCALHOST), addr.port())
        }
        IpAddr::V6(ip) if ip.is_unspecified() => {
            SocketAddr::new(IpAddr::V6(Ipv6Addr::LOCALHOST), addr.port())
        }
        _ => addr,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_is_ok() {
        assert!(status_is_ok(b"HTTP/1.1 200 OK\r\n"));
        assert!(!status_is_ok(b"HTTP/1.1 404 Not Found\r\n"));
        assert!(!status_is_ok(b"HTTP/1.1 2000"));
        assert!(!status_is_ok(b""));
    }

    #[test]
    fn test_wildcard_dials_loopback() {
        let v4: SocketAddr = "0.0.0.0:3000".parse().unwrap();
        assert_eq!(dial_addr(v4), "127.0.0.1:3000".parse().unwrap());
        let v6: SocketAddr = "[::]:3000".parse().unwrap();
        assert_eq!(dial_addr(v6), "[::1]:3000".parse().unwrap());
        let bound: SocketAddr = "10.0.0.5:8080".parse().unwrap();
        assert_eq!(dial_addr(bound), bound);
    }

    #[test]
    fn test_closed_port_is_not_ok() {
        let port = std::net::TcpListener::bind("127.0.0.1:0")
            .unwrap()
            .local_addr()
            .unwrap()
            .port();
        let addr: SocketAddr = format!("127.0.0.1:{port}").parse().unwrap();
        assert!(!responds_ok(&addr, READY_PATH));
    }
}
