use std::time::Duration;

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;
use tokio::time::timeout;

use irc_server::net::core_loop;
use irc_server::state::ServerState;

pub const PASSWORD: &str = "secret";

/// Starts a real server on an ephemeral loopback port and returns its
/// address plus a handle callers can `abort()` at teardown.
pub async fn start_server() -> (std::net::SocketAddr, JoinHandle<()>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let state = ServerState::new("ft_irc".to_string(), PASSWORD.to_string());
    let handle = tokio::spawn(core_loop::run(listener, state));
    (addr, handle)
}

pub async fn connect(addr: std::net::SocketAddr) -> BufReader<TcpStream> {
    let stream = TcpStream::connect(addr).await.unwrap();
    BufReader::new(stream)
}

pub async fn send(conn: &mut BufReader<TcpStream>, line: &str) {
    conn.get_mut().write_all(format!("{line}\r\n").as_bytes()).await.unwrap();
}

/// Reads one CRLF-terminated line with a generous timeout, panicking if
/// none arrives (a silent protocol violation in these tests).
pub async fn recv_line(conn: &mut BufReader<TcpStream>) -> String {
    let mut line = String::new();
    timeout(Duration::from_secs(2), conn.read_line(&mut line)).await.expect("timed out waiting for a reply").unwrap();
    line
}

pub async fn register(conn: &mut BufReader<TcpStream>, nick: &str) {
    send(conn, &format!("PASS {PASSWORD}")).await;
    send(conn, &format!("NICK {nick}")).await;
    send(conn, &format!("USER {nick} 0 * :{nick} Example")).await;
    for _ in 0..4 {
        recv_line(conn).await; // 001..004
    }
}
