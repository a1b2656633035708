use crate::codec;
use crate::config::{PingConfig, MAX_PACKET_SIZE};
use crate::error::{Error, IoError, IoOperation, Result};
use crate::net::{Recv, Socket, SocketImpl};
use crate::{Builder, PingRecord, ProbeError, ProbeOutcome, Sequence, SharedRepository, TraceId};
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::thread;
use std::thread::JoinHandle;
use std::time::Instant;
use tracing::{debug, instrument, trace};

/// An `ICMP` echo probe session for a single target.
///
/// Use the [`crate::Builder`] type to create a [`Pinger`].
#[derive(Debug, Clone)]
pub struct Pinger {
    config: PingConfig,
}

impl Pinger {
    pub(crate) const fn new(config: PingConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub const fn config(&self) -> &PingConfig {
        &self.config
    }

    /// Run the probe session on the current thread.
    ///
    /// This method blocks until every echo request has either been answered or
    /// has timed out and returns a record with exactly one outcome per request.
    ///
    /// A failure to open the socket, or to send a request, or to receive,
    /// aborts the session and no record is produced.
    ///
    /// # Example
    ///
    /// ```no_run
    /// # fn main() -> anyhow::Result<()> {
    /// use pingo_core::Builder;
    ///
    /// let record = Builder::new(std::net::Ipv4Addr::LOCALHOST).build()?.run()?;
    /// println!("received {} of {}", record.received_count(), record.len());
    /// # Ok(())
    /// # }
    /// ```
    pub fn run(&self) -> Result<PingRecord> {
        self.run_with_socket::<SocketImpl>()
    }

    /// Run the probe session on a new thread.
    ///
    /// The record may be retrieved by joining the returned handle.
    pub fn spawn(self) -> Result<JoinHandle<Result<PingRecord>>> {
        self.spawn_with_socket::<SocketImpl>()
    }

    pub(crate) fn spawn_with_socket<S: Socket + 'static>(
        self,
    ) -> Result<JoinHandle<Result<PingRecord>>> {
        thread::Builder::new()
            .name(format!("pinger-{}", self.config.target))
            .spawn(move || self.run_with_socket::<S>())
            .map_err(|err| Error::Transport(IoError::Other(err, IoOperation::SpawnThread)))
    }

    #[instrument(skip(self), fields(target = %self.config.target, count = self.config.count), level = "debug")]
    pub(crate) fn run_with_socket<S: Socket>(&self) -> Result<PingRecord> {
        let mut socket = S::new_icmp_dgram_socket_ipv4()?;
        let identifier = socket
            .local_identifier()?
            .map_or(self.config.trace_identifier, TraceId);
        debug!(%identifier, "socket opened");
        let addr = SocketAddr::new(IpAddr::V4(self.config.target), 0);
        let mut record = PingRecord::new(self.config.target);
        let mut buf = [0_u8; MAX_PACKET_SIZE];
        for seq in 1..=self.config.count {
            let outcome = self.probe(&mut socket, identifier, Sequence(seq), addr, &mut buf)?;
            debug!(sequence = seq, ?outcome);
            record.push(outcome)?;
            if seq < self.config.count {
                thread::sleep(self.config.interval);
            }
        }
        debug!(
            received = record.received_count(),
            errors = record.error_count(),
            "session complete"
        );
        Ok(record)
    }

    /// Send a single echo request and wait for the matching reply.
    fn probe<S: Socket>(
        &self,
        socket: &mut S,
        identifier: TraceId,
        sequence: Sequence,
        addr: SocketAddr,
        buf: &mut [u8],
    ) -> Result<ProbeOutcome> {
        let request = codec::encode(identifier, sequence, &self.config.payload)?;
        let sent_at = Instant::now();
        socket.set_read_deadline(sent_at + self.config.read_timeout)?;
        let sent = socket.send_to(&request, addr)?;
        if sent != request.len() {
            return Err(Error::ShortWrite {
                addr,
                sent,
                expected: request.len(),
            });
        }
        loop {
            match socket.recv_from(buf)? {
                Recv::Timeout => return Ok(ProbeOutcome::Error(ProbeError::Timeout)),
                Recv::Data(bytes_read, peer) => {
                    let offset = codec::icmp_offset(bytes_read, request.len());
                    match codec::decode(&buf[offset..bytes_read]) {
                        Ok(header) if header.is_reply_to(identifier, sequence) => {
                            return Ok(ProbeOutcome::Success(sent_at.elapsed()));
                        }
                        Ok(header) => trace!(?header, ?peer, "discarding unrelated packet"),
                        Err(err) => {
                            return Ok(ProbeOutcome::Error(ProbeError::Decode(err.to_string())))
                        }
                    }
                }
            }
        }
    }
}

/// Probe every target concurrently and append the records to a repository.
///
/// One session, with its own socket, is run on a new thread per target using
/// the configuration of `builder`.  Records are appended in the order of
/// `targets` regardless of the order in which the sessions complete.
///
/// Returns, for each target, the repository index of its record or the error
/// which aborted its session.
pub fn probe_all(
    builder: &Builder,
    targets: &[Ipv4Addr],
    repository: &SharedRepository,
) -> Vec<Result<usize>> {
    probe_all_with_socket::<SocketImpl>(builder, targets, repository)
}

pub(crate) fn probe_all_with_socket<S: Socket + 'static>(
    builder: &Builder,
    targets: &[Ipv4Addr],
    repository: &SharedRepository,
) -> Vec<Result<usize>> {
    let handles = targets
        .iter()
        .map(|&target| -> Result<_> {
            let handle = builder
                .clone()
                .target(target)
                .build()?
                .spawn_with_socket::<S>()?;
            Ok((target, handle))
        })
        .collect::<Vec<_>>();
    handles
        .into_iter()
        .map(|handle| -> Result<usize> {
            let (target, handle) = handle?;
            let record = handle
                .join()
                .map_err(|_| Error::SessionPanicked(target))??;
            Ok(repository.append(record))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::IoResult;
    use crate::mocket_recv_from;
    use crate::net::MockSocket;
    use mockall::predicate;
    use pingo_packet::icmpv4::IcmpType;
    use pingo_packet::IPV4_HEADER_LEN;
    use std::io;
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    static MTX: Mutex<()> = Mutex::new(());

    const TRACE_ID: u16 = 1234;
    const PAYLOAD: &[u8] = b"HELLO-R-U-THERE";

    fn builder(count: usize) -> Builder {
        Builder::new(Ipv4Addr::LOCALHOST)
            .count(count)
            .interval(Duration::ZERO)
            .trace_identifier(TRACE_ID)
    }

    fn peer() -> SocketAddr {
        SocketAddr::new(IpAddr::V4(Ipv4Addr::LOCALHOST), 0)
    }

    fn reply(identifier: u16, sequence: u16) -> Vec<u8> {
        let mut packet = codec::encode(TraceId(identifier), Sequence(sequence), PAYLOAD).unwrap();
        packet[0] = IcmpType::EchoReply.id();
        packet
    }

    // A socket which answers every echo request it is sent.
    fn echo_mocket(count: usize) -> MockSocket {
        let last_sent = Arc::new(Mutex::new(Vec::new()));
        let mut mocket = MockSocket::new();
        mocket
            .expect_local_identifier()
            .times(1)
            .returning(|| Ok(None));
        mocket
            .expect_set_read_deadline()
            .times(count)
            .returning(|_| Ok(()));
        let sent = last_sent.clone();
        mocket
            .expect_send_to()
            .times(count)
            .returning(move |buf, _| {
                *sent.lock().unwrap() = buf.to_vec();
                Ok(buf.len())
            });
        mocket.expect_recv_from().times(count).returning(move |buf| {
            let mut packet = last_sent.lock().unwrap().clone();
            packet[0] = IcmpType::EchoReply.id();
            buf[..packet.len()].copy_from_slice(&packet);
            Ok(Recv::Data(packet.len(), Some(peer())))
        });
        mocket
    }

    // A socket which sends a single request and then receives `packets` in turn.
    fn single_probe_mocket(packets: Vec<Vec<u8>>) -> MockSocket {
        let mut seq = mockall::Sequence::new();
        let mut mocket = MockSocket::new();
        mocket
            .expect_local_identifier()
            .times(1)
            .returning(|| Ok(None));
        mocket
            .expect_set_read_deadline()
            .times(1)
            .returning(|_| Ok(()));
        mocket
            .expect_send_to()
            .times(1)
            .returning(|buf, _| Ok(buf.len()));
        for packet in packets {
            mocket
                .expect_recv_from()
                .times(1)
                .in_sequence(&mut seq)
                .returning(mocket_recv_from!(packet, peer()));
        }
        mocket
    }

    #[test]
    fn test_all_replies_received() -> anyhow::Result<()> {
        let _m = MTX.lock();
        let ctx = MockSocket::new_icmp_dgram_socket_ipv4_context();
        ctx.expect().times(1).returning(|| Ok(echo_mocket(5)));
        let record = builder(5).build()?.run_with_socket::<MockSocket>()?;
        assert_eq!(5, record.len());
        assert_eq!(5, record.received_count());
        assert_eq!(0, record.error_count());
        let sequences = record
            .probes()
            .iter()
            .map(|probe| probe.sequence().0)
            .collect::<Vec<_>>();
        assert_eq!(vec![1, 2, 3, 4, 5], sequences);
        Ok(())
    }

    #[test]
    fn test_request_sent_to_target() -> anyhow::Result<()> {
        let _m = MTX.lock();
        let expected_send_to_buf = codec::encode(TraceId(TRACE_ID), Sequence(1), PAYLOAD)?;
        let expected_send_to_addr = SocketAddr::new(IpAddr::V4(Ipv4Addr::new(192, 0, 2, 1)), 0);
        let ctx = MockSocket::new_icmp_dgram_socket_ipv4_context();
        ctx.expect().times(1).returning(move || {
            let mut mocket = MockSocket::new();
            mocket
                .expect_local_identifier()
                .times(1)
                .returning(|| Ok(None));
            mocket
                .expect_set_read_deadline()
                .times(1)
                .returning(|_| Ok(()));
            mocket
                .expect_send_to()
                .with(
                    predicate::eq(expected_send_to_buf.clone()),
                    predicate::eq(expected_send_to_addr),
                )
                .times(1)
                .returning(|buf, _| Ok(buf.len()));
            mocket
                .expect_recv_from()
                .times(1)
                .returning(|_| Ok(Recv::Timeout));
            Ok(mocket)
        });
        let record = builder(1)
            .target(Ipv4Addr::new(192, 0, 2, 1))
            .build()?
            .run_with_socket::<MockSocket>()?;
        assert_eq!(Ipv4Addr::new(192, 0, 2, 1), record.target());
        Ok(())
    }

    #[test]
    fn test_all_timeouts() -> anyhow::Result<()> {
        let _m = MTX.lock();
        let ctx = MockSocket::new_icmp_dgram_socket_ipv4_context();
        ctx.expect().times(1).returning(|| {
            let mut mocket = MockSocket::new();
            mocket
                .expect_local_identifier()
                .returning(|| Ok(None));
            mocket
                .expect_set_read_deadline()
                .times(3)
                .returning(|_| Ok(()));
            mocket
                .expect_send_to()
                .times(3)
                .returning(|buf, _| Ok(buf.len()));
            mocket
                .expect_recv_from()
                .times(3)
                .returning(|_| Ok(Recv::Timeout));
            Ok(mocket)
        });
        let record = builder(3).build()?.run_with_socket::<MockSocket>()?;
        assert_eq!(3, record.len());
        assert_eq!(0, record.received_count());
        assert_eq!(3, record.error_count());
        assert!(record
            .outcomes()
            .all(|outcome| *outcome == ProbeOutcome::Error(ProbeError::Timeout)));
        Ok(())
    }

    #[test]
    fn test_foreign_identifier_ignored() -> anyhow::Result<()> {
        let _m = MTX.lock();
        let ctx = MockSocket::new_icmp_dgram_socket_ipv4_context();
        ctx.expect()
            .times(1)
            .returning(|| Ok(single_probe_mocket(vec![reply(4321, 1), reply(TRACE_ID, 1)])));
        let record = builder(1).build()?.run_with_socket::<MockSocket>()?;
        assert_eq!(1, record.received_count());
        assert_eq!(0, record.error_count());
        Ok(())
    }

    #[test]
    fn test_stale_sequence_ignored() -> anyhow::Result<()> {
        let _m = MTX.lock();
        let ctx = MockSocket::new_icmp_dgram_socket_ipv4_context();
        ctx.expect()
            .times(1)
            .returning(|| Ok(single_probe_mocket(vec![reply(TRACE_ID, 9), reply(TRACE_ID, 1)])));
        let record = builder(1).build()?.run_with_socket::<MockSocket>()?;
        assert_eq!(1, record.received_count());
        Ok(())
    }

    #[test]
    fn test_echo_request_ignored() -> anyhow::Result<()> {
        let _m = MTX.lock();
        let ctx = MockSocket::new_icmp_dgram_socket_ipv4_context();
        ctx.expect().times(1).returning(|| {
            let request = codec::encode(TraceId(TRACE_ID), Sequence(1), PAYLOAD).unwrap();
            Ok(single_probe_mocket(vec![request, reply(TRACE_ID, 1)]))
        });
        let record = builder(1).build()?.run_with_socket::<MockSocket>()?;
        assert_eq!(1, record.received_count());
        Ok(())
    }

    #[test]
    fn test_ipv4_header_prefix_skipped() -> anyhow::Result<()> {
        let _m = MTX.lock();
        let ctx = MockSocket::new_icmp_dgram_socket_ipv4_context();
        ctx.expect().times(1).returning(|| {
            let mut datagram = vec![0_u8; IPV4_HEADER_LEN];
            datagram[0] = 0x45;
            datagram.extend_from_slice(&reply(TRACE_ID, 1));
            Ok(single_probe_mocket(vec![datagram]))
        });
        let record = builder(1).build()?.run_with_socket::<MockSocket>()?;
        assert_eq!(1, record.received_count());
        Ok(())
    }

    #[test]
    fn test_truncated_reply_is_decode_error() -> anyhow::Result<()> {
        let _m = MTX.lock();
        let ctx = MockSocket::new_icmp_dgram_socket_ipv4_context();
        ctx.expect()
            .times(1)
            .returning(|| Ok(single_probe_mocket(vec![vec![0x00, 0x00, 0xfb, 0x23]])));
        let record = builder(1).build()?.run_with_socket::<MockSocket>()?;
        assert_eq!(0, record.received_count());
        assert_eq!(1, record.error_count());
        assert!(matches!(
            record.probes()[0].outcome(),
            ProbeOutcome::Error(ProbeError::Decode(_))
        ));
        Ok(())
    }

    #[test]
    fn test_socket_assigned_identifier() -> anyhow::Result<()> {
        let _m = MTX.lock();
        let ctx = MockSocket::new_icmp_dgram_socket_ipv4_context();
        ctx.expect().times(1).returning(|| {
            let mut mocket = MockSocket::new();
            mocket
                .expect_local_identifier()
                .times(1)
                .returning(|| Ok(Some(777)));
            mocket
                .expect_set_read_deadline()
                .times(1)
                .returning(|_| Ok(()));
            mocket
                .expect_send_to()
                .withf(|buf, _| buf[4..6] == 777_u16.to_be_bytes())
                .times(1)
                .returning(|buf, _| Ok(buf.len()));
            let packet = reply(777, 1);
            mocket
                .expect_recv_from()
                .times(1)
                .returning(mocket_recv_from!(packet, peer()));
            Ok(mocket)
        });
        let record = builder(1).build()?.run_with_socket::<MockSocket>()?;
        assert_eq!(1, record.received_count());
        Ok(())
    }

    #[test]
    fn test_open_failure() -> anyhow::Result<()> {
        let _m = MTX.lock();
        let ctx = MockSocket::new_icmp_dgram_socket_ipv4_context();
        ctx.expect().times(1).returning(|| {
            Err(IoError::Other(
                io::Error::from(io::ErrorKind::PermissionDenied),
                IoOperation::NewSocket,
            ))
        });
        let err = builder(5).build()?.run_with_socket::<MockSocket>().unwrap_err();
        assert!(matches!(err, Error::Transport(IoError::Other(_, IoOperation::NewSocket))));
        Ok(())
    }

    #[test]
    fn test_send_failure() -> anyhow::Result<()> {
        let _m = MTX.lock();
        let ctx = MockSocket::new_icmp_dgram_socket_ipv4_context();
        ctx.expect().times(1).returning(|| {
            let mut mocket = MockSocket::new();
            mocket
                .expect_local_identifier()
                .returning(|| Ok(None));
            mocket
                .expect_set_read_deadline()
                .returning(|_| Ok(()));
            mocket.expect_send_to().times(1).returning(|_, addr| {
                Err(IoError::SendTo(
                    io::Error::from(io::ErrorKind::NetworkUnreachable),
                    addr,
                ))
            });
            mocket.expect_recv_from().never();
            Ok(mocket)
        });
        let err = builder(5).build()?.run_with_socket::<MockSocket>().unwrap_err();
        assert!(matches!(err, Error::Transport(IoError::SendTo(_, _))));
        Ok(())
    }

    #[test]
    fn test_short_write() -> anyhow::Result<()> {
        let _m = MTX.lock();
        let ctx = MockSocket::new_icmp_dgram_socket_ipv4_context();
        ctx.expect().times(1).returning(|| {
            let mut mocket = MockSocket::new();
            mocket
                .expect_local_identifier()
                .returning(|| Ok(None));
            mocket
                .expect_set_read_deadline()
                .returning(|_| Ok(()));
            mocket.expect_send_to().times(1).returning(|_, _| Ok(4));
            mocket.expect_recv_from().never();
            Ok(mocket)
        });
        let err = builder(5).build()?.run_with_socket::<MockSocket>().unwrap_err();
        assert!(matches!(
            err,
            Error::ShortWrite {
                sent: 4,
                expected: 23,
                ..
            }
        ));
        Ok(())
    }

    #[test]
    fn test_receive_failure() -> anyhow::Result<()> {
        let _m = MTX.lock();
        let ctx = MockSocket::new_icmp_dgram_socket_ipv4_context();
        ctx.expect().times(1).returning(|| {
            let mut mocket = MockSocket::new();
            mocket
                .expect_local_identifier()
                .returning(|| Ok(None));
            mocket
                .expect_set_read_deadline()
                .returning(|_| Ok(()));
            mocket
                .expect_send_to()
                .returning(|buf, _| Ok(buf.len()));
            mocket.expect_recv_from().times(1).returning(|_| {
                Err(IoError::Other(
                    io::Error::from(io::ErrorKind::ConnectionRefused),
                    IoOperation::RecvFrom,
                ))
            });
            Ok(mocket)
        });
        let err = builder(5).build()?.run_with_socket::<MockSocket>().unwrap_err();
        assert!(matches!(err, Error::Transport(IoError::Other(_, IoOperation::RecvFrom))));
        Ok(())
    }

    #[test]
    fn test_probe_all_appends_in_call_order() {
        let _m = MTX.lock();
        let ctx = MockSocket::new_icmp_dgram_socket_ipv4_context();
        ctx.expect().times(2).returning(|| Ok(echo_mocket(2)));
        let first = Ipv4Addr::new(10, 0, 0, 1);
        let second = Ipv4Addr::new(10, 0, 0, 2);
        let repository = SharedRepository::new();
        let results = probe_all_with_socket::<MockSocket>(&builder(2), &[first, second], &repository);
        assert_eq!(vec![0, 1], results.into_iter().map(Result::unwrap).collect::<Vec<_>>());
        let mut snapshot = repository.snapshot();
        assert_eq!(first, snapshot.list()[0].target());
        assert_eq!(second, snapshot.list()[1].target());
        snapshot.remove_at(0).unwrap();
        assert_eq!(second, snapshot.list()[0].target());
    }

    #[test]
    fn test_probe_all_open_failure_leaves_repository_unchanged() {
        let _m = MTX.lock();
        let ctx = MockSocket::new_icmp_dgram_socket_ipv4_context();
        ctx.expect().times(1).returning(|| {
            Err(IoError::Other(
                io::Error::from(io::ErrorKind::PermissionDenied),
                IoOperation::NewSocket,
            ))
        });
        let repository = SharedRepository::new();
        let results =
            probe_all_with_socket::<MockSocket>(&builder(5), &[Ipv4Addr::LOCALHOST], &repository);
        assert_eq!(1, results.len());
        assert!(matches!(results[0], Err(Error::Transport(_))));
        assert!(repository.snapshot().is_empty());
    }

    #[test]
    fn test_probe_all_bad_config() {
        let repository = SharedRepository::new();
        let results =
            probe_all_with_socket::<MockSocket>(&builder(0), &[Ipv4Addr::LOCALHOST], &repository);
        assert!(matches!(results[0], Err(Error::BadConfig(_))));
        assert!(repository.snapshot().is_empty());
    }
}
