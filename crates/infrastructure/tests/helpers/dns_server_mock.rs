#![allow(dead_code)]
use hickory_proto::op::{Message, MessageType, ResponseCode};
use hickory_proto::rr::rdata::{A, AAAA, MX, TXT};
use hickory_proto::rr::{Name, RData, Record, RecordType};
use hickory_proto::serialize::binary::{BinEncodable, BinEncoder};
use std::net::{Ipv4Addr, Ipv6Addr, SocketAddr};
use std::str::FromStr;
use tokio::net::UdpSocket;
use tokio::sync::oneshot;

pub const MOCK_A_ADDRESS: Ipv4Addr = Ipv4Addr::new(93, 184, 216, 34);
pub const MOCK_AAAA_ADDRESS: Ipv6Addr = Ipv6Addr::new(0x2001, 0xdb8, 0, 0, 0, 0, 0, 0x34);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MockMode {
    /// A, MX and TXT questions get one record; everything else gets none.
    Answer,
    /// NOERROR with an empty answer section for every question.
    Empty,
    /// Every question is answered with this response code.
    Rcode(ResponseCode),
}

/// Loopback UDP DNS server. Besides its mode, a few names behave specially:
/// `nxdomain.test.` gets NXDOMAIN, `servfail.test.` SERVFAIL and
/// `silent.test.` no reply at all. `partial.test.` answers A and stays
/// silent for every other type. `split.test.` is NXDOMAIN for A but has an
/// AAAA record.
pub struct MockDnsServer {
    addr: SocketAddr,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl MockDnsServer {
    pub async fn start() -> Result<Self, std::io::Error> {
        Self::start_with(MockMode::Answer).await
    }

    pub async fn start_with(mode: MockMode) -> Result<Self, std::io::Error> {
        let socket = UdpSocket::bind(SocketAddr::from(([127, 0, 0, 1], 0))).await?;
        let addr = socket.local_addr()?;

        let (shutdown_tx, mut shutdown_rx) = oneshot::channel();

        tokio::spawn(async move {
            let mut buf = vec![0u8; 4096];

            loop {
                tokio::select! {
                    _ = &mut shutdown_rx => {
                        break;
                    }
                    result = socket.recv_from(&mut buf) => {
                        if let Ok((len, peer)) = result {
                            if let Some(response) = Self::build_mock_response(&buf[..len], mode) {
                                let _ = socket.send_to(&response, peer).await;
                            }
                        }
                    }
                }
            }
        });

        Ok(Self {
            addr,
            shutdown_tx: Some(shutdown_tx),
        })
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// `udp://127.0.0.1:PORT`
    pub fn spec(&self) -> String {
        format!("udp://{}", self.addr)
    }

    fn build_mock_response(query: &[u8], mode: MockMode) -> Option<Vec<u8>> {
        let request = Message::from_vec(query).ok()?;
        let question = request.queries().first()?.clone();
        let qname = question.name().to_utf8();

        let mut response = Message::new(request.id(), MessageType::Response, request.op_code());
        response.set_recursion_desired(request.recursion_desired());
        response.set_recursion_available(true);
        response.add_query(question.clone());

        let qtype = question.query_type();
        let rcode = match (qname.as_str(), mode) {
            ("silent.test.", _) => return None,
            ("partial.test.", _) if qtype != RecordType::A => return None,
            ("split.test.", _) if qtype == RecordType::A => ResponseCode::NXDomain,
            ("nxdomain.test.", _) => ResponseCode::NXDomain,
            ("servfail.test.", _) => ResponseCode::ServFail,
            (_, MockMode::Rcode(code)) => code,
            _ => ResponseCode::NoError,
        };
        response.set_response_code(rcode);

        if rcode == ResponseCode::NoError && mode == MockMode::Answer {
            let owner = question.name().clone();
            let rdata = match qtype {
                RecordType::A => Some(RData::A(A(MOCK_A_ADDRESS))),
                RecordType::AAAA if qname == "split.test." => {
                    Some(RData::AAAA(AAAA(MOCK_AAAA_ADDRESS)))
                }
                RecordType::MX => Some(RData::MX(MX::new(
                    10,
                    Name::from_str("mail.example.com.").ok()?,
                ))),
                RecordType::TXT => Some(RData::TXT(TXT::new(vec!["hello world".to_string()]))),
                _ => None,
            };
            if let Some(rdata) = rdata {
                response.add_answer(Record::from_rdata(owner, 300, rdata));
            }
        }

        let mut buf = Vec::with_capacity(512);
        let mut encoder = BinEncoder::new(&mut buf);
        response.emit(&mut encoder).ok()?;
        Some(buf)
    }

    pub fn shutdown(mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

impl Drop for MockDnsServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}
