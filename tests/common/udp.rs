//! A fake UDP tracker (BEP 15) on the loopback interface.
use std::net::SocketAddr;

use tokio::net::UdpSocket;
use tokio::task::JoinHandle;

/// The connection id the fake tracker hands out.
pub const CONNECTION_ID: i64 = 0x1234_5678;

#[derive(Debug, Clone, Copy)]
pub enum Behaviour {
    /// Completes the handshake and announces one peer.
    Announce { interval: i32 },
    /// Answers the connect request with the first 8 bytes only.
    TruncatedConnect,
    /// Answers the connect request with another transaction id.
    WrongTransactionId,
    /// Answers every request with an error message.
    Error(&'static str),
    /// Never answers.
    Silent,
}

pub struct FakeUdpTracker {
    pub addr: SocketAddr,
    handle: JoinHandle<()>,
}

impl FakeUdpTracker {
    pub async fn start(behaviour: Behaviour) -> Self {
        let socket = UdpSocket::bind("127.0.0.1:0").await.unwrap();
        let addr = socket.local_addr().unwrap();

        let handle = tokio::spawn(async move {
            let mut buf = [0u8; 1496];

            while let Ok((len, from)) = socket.recv_from(&mut buf).await {
                if let Some(response) = respond(behaviour, &buf[..len]) {
                    drop(socket.send_to(&response, from).await);
                }
            }
        });

        Self { addr, handle }
    }
}

impl Drop for FakeUdpTracker {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

fn respond(behaviour: Behaviour, request: &[u8]) -> Option<Vec<u8>> {
    if request.len() < 16 {
        return None;
    }

    let action = i32::from_be_bytes(request[8..12].try_into().unwrap());
    let transaction_id = u32::from_be_bytes(request[12..16].try_into().unwrap());

    let mut response = vec![];

    match (behaviour, action) {
        (Behaviour::Silent, _) => return None,
        (Behaviour::Error(message), _) => {
            response.extend_from_slice(&3_i32.to_be_bytes());
            response.extend_from_slice(&transaction_id.to_be_bytes());
            response.extend_from_slice(message.as_bytes());
        }
        (Behaviour::TruncatedConnect, 0) => {
            response.extend_from_slice(&0_i32.to_be_bytes());
            response.extend_from_slice(&transaction_id.to_be_bytes());
        }
        (Behaviour::WrongTransactionId, 0) => {
            response.extend_from_slice(&0_i32.to_be_bytes());
            response.extend_from_slice(&transaction_id.wrapping_add(1).to_be_bytes());
            response.extend_from_slice(&CONNECTION_ID.to_be_bytes());
        }
        (_, 0) => {
            response.extend_from_slice(&0_i32.to_be_bytes());
            response.extend_from_slice(&transaction_id.to_be_bytes());
            response.extend_from_slice(&CONNECTION_ID.to_be_bytes());
        }
        (Behaviour::Announce { interval }, 1) => {
            if request[0..8] != CONNECTION_ID.to_be_bytes() {
                return None;
            }
            response.extend_from_slice(&1_i32.to_be_bytes());
            response.extend_from_slice(&transaction_id.to_be_bytes());
            response.extend_from_slice(&interval.to_be_bytes());
            response.extend_from_slice(&1_i32.to_be_bytes()); // leechers
            response.extend_from_slice(&2_i32.to_be_bytes()); // seeders
            response.extend_from_slice(&crate::common::fixtures::COMPACT_PEER);
        }
        _ => return None,
    }

    Some(response)
}
