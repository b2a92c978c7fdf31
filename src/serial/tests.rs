#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};
    use std::thread;
    use std::time::Duration;

    use crate::serial::channel::{READ_TIMEOUT, SerialChannel};
    use crate::serial::commands::{DeviceCommand, NUC_NO_SHUTTER};
    use crate::serial::error::{Result, SerialError};
    use crate::serial::transport::{SerialTransport, TransportProvider};
    use crate::serial::types::{BaudRate, ChannelState};

    #[derive(Clone, Default)]
    struct Wire {
        incoming: Arc<Mutex<VecDeque<Vec<u8>>>>,
        written: Arc<Mutex<Vec<Vec<u8>>>>,
        fail_read: Arc<AtomicBool>,
        fail_write: Arc<AtomicBool>,
        closed: Arc<AtomicUsize>,
    }

    struct MockTransport {
        wire: Wire,
    }

    impl SerialTransport for MockTransport {
        fn bytes_available(&mut self) -> Result<usize> {
            if self.wire.fail_read.load(Ordering::SeqCst) {
                return Err(SerialError::Read("Mock device unplugged".to_string()));
            }
            Ok(self.wire.incoming.lock().unwrap().front().map_or(0, Vec::len))
        }

        fn read(&mut self, buf: &mut [u8]) -> Result<usize> {
            let Some(chunk) = self.wire.incoming.lock().unwrap().pop_front() else {
                return Ok(0);
            };
            buf[..chunk.len()].copy_from_slice(&chunk);
            Ok(chunk.len())
        }

        fn write_all(&mut self, bytes: &[u8]) -> Result<()> {
            if self.wire.fail_write.load(Ordering::SeqCst) {
                return Err(SerialError::Write("Mock write error".to_string()));
            }
            self.wire.written.lock().unwrap().push(bytes.to_vec());
            Ok(())
        }
    }

    impl Drop for MockTransport {
        fn drop(&mut self) {
            self.wire.closed.fetch_add(1, Ordering::SeqCst);
        }
    }

    struct MockProvider {
        wire: Wire,
        ports: Vec<String>,
        opened: Arc<Mutex<Vec<(String, BaudRate, Duration)>>>,
    }

    impl MockProvider {
        fn new(wire: &Wire) -> Self {
            Self {
                wire: wire.clone(),
                ports: vec!["/dev/ttyUSB0".to_string(), "/dev/ttyUSB1".to_string()],
                opened: Arc::new(Mutex::new(Vec::new())),
            }
        }
    }

    impl TransportProvider for MockProvider {
        fn available_ports(&self) -> Result<Vec<String>> {
            Ok(self.ports.clone())
        }

        fn open(&self, port: &str, baud: BaudRate, timeout: Duration) -> Result<Box<dyn SerialTransport>> {
            if !self.ports.iter().any(|p| p == port) {
                return Err(SerialError::Open {
                    port: port.to_string(),
                    reason: "No such device".to_string(),
                });
            }
            self.opened.lock().unwrap().push((port.to_string(), baud, timeout));
            Ok(Box::new(MockTransport { wire: self.wire.clone() }))
        }
    }

    fn wait_until(cond: impl Fn() -> bool) -> bool {
        for _ in 0..300 {
            if cond() {
                return true;
            }
            thread::sleep(Duration::from_millis(10));
        }
        cond()
    }

    fn opened(channel: &SerialChannel<MockProvider>) -> Vec<(String, BaudRate, Duration)> {
        channel.provider().opened.lock().unwrap().clone()
    }

    fn connected_channel(wire: &Wire) -> SerialChannel<MockProvider> {
        let mut channel = SerialChannel::new(MockProvider::new(wire));
        channel.connect("/dev/ttyUSB0", BaudRate::B115200).unwrap();
        channel
    }

    #[test]
    fn test_connect_opens_with_read_timeout() {
        let wire = Wire::default();
        let channel = connected_channel(&wire);

        assert!(matches!(channel.state(), ChannelState::Connected { .. }));
        let session = channel.session().unwrap();
        assert_eq!(session.port, "/dev/ttyUSB0");
        assert_eq!(session.baud, BaudRate::B115200);
        assert_eq!(
            opened(&channel),
            vec![("/dev/ttyUSB0".to_string(), BaudRate::B115200, READ_TIMEOUT)]
        );
    }

    #[test]
    fn test_connect_failure_stays_disconnected() {
        let wire = Wire::default();
        let mut channel = SerialChannel::new(MockProvider::new(&wire));

        let result = channel.connect("/dev/ttyACM9", BaudRate::B9600);

        assert!(matches!(result, Err(SerialError::Open { .. })));
        assert_eq!(channel.state(), ChannelState::Disconnected);
        assert!(channel.session().is_none());
    }

    #[test]
    fn test_inbound_chunks_logged_as_uppercase_hex() {
        let wire = Wire::default();
        let channel = connected_channel(&wire);

        wire.incoming.lock().unwrap().push_back(vec![0xaa, 0x05, 0x0f]);

        assert!(wait_until(|| !channel.rx_log().is_empty()));
        assert_eq!(channel.rx_log().latest().unwrap().hex, "AA050F");
    }

    #[test]
    fn test_rx_log_keeps_last_ten_chunks() {
        let wire = Wire::default();
        let channel = connected_channel(&wire);

        for i in 0..11u8 {
            wire.incoming.lock().unwrap().push_back(vec![i]);
        }

        assert!(wait_until(|| wire.incoming.lock().unwrap().is_empty()));
        assert!(wait_until(|| channel.rx_log().latest().map(|r| r.hex) == Some("0A".to_string())));
        let records = channel.rx_log().snapshot();
        assert_eq!(records.len(), 10);
        assert_eq!(records[0].hex, "01");
    }

    #[test]
    fn test_send_writes_parsed_bytes() {
        let wire = Wire::default();
        let mut channel = connected_channel(&wire);

        channel.send("AA05").unwrap();
        channel.send(" aa 0 5 ").unwrap();

        assert_eq!(*wire.written.lock().unwrap(), vec![vec![0xAA, 0x05], vec![0xAA, 0x05]]);
    }

    #[test]
    fn test_malformed_send_writes_nothing() {
        let wire = Wire::default();
        let mut channel = connected_channel(&wire);

        assert!(matches!(channel.send("ZZ"), Err(SerialError::InvalidHex(_))));
        assert!(matches!(channel.send(""), Err(SerialError::EmptyCommand)));

        assert!(wire.written.lock().unwrap().is_empty());
        assert!(channel.is_connected());
    }

    #[test]
    fn test_send_requires_connection() {
        let wire = Wire::default();
        let mut channel = SerialChannel::new(MockProvider::new(&wire));

        assert!(matches!(channel.send("AA"), Err(SerialError::NotConnected)));
        assert!(matches!(
            channel.send_command(DeviceCommand::NucNormal),
            Err(SerialError::NotConnected)
        ));
    }

    #[test]
    fn test_nuc_command_uses_send_path() {
        let wire = Wire::default();
        let mut channel = connected_channel(&wire);

        channel.send_command(DeviceCommand::NucNoShutter).unwrap();

        assert_eq!(*wire.written.lock().unwrap(), vec![NUC_NO_SHUTTER.to_vec()]);
    }

    #[test]
    fn test_reconnect_closes_previous_session() {
        let wire = Wire::default();
        let mut channel = connected_channel(&wire);

        channel.connect("/dev/ttyUSB1", BaudRate::B921600).unwrap();

        assert_eq!(wire.closed.load(Ordering::SeqCst), 1);
        assert_eq!(channel.session().unwrap().port, "/dev/ttyUSB1");
        assert_eq!(opened(&channel).len(), 2);
    }

    #[test]
    fn test_disconnect_is_idempotent() {
        let wire = Wire::default();
        let mut channel = connected_channel(&wire);

        channel.disconnect();
        channel.disconnect();

        assert_eq!(channel.state(), ChannelState::Disconnected);
        assert_eq!(wire.closed.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_read_error_disconnects_and_records_fault() {
        let wire = Wire::default();
        let mut channel = connected_channel(&wire);

        wire.fail_read.store(true, Ordering::SeqCst);

        assert!(wait_until(|| channel.state() == ChannelState::Disconnected));
        assert!(matches!(channel.take_fault(), Some(SerialError::Read(_))));
        assert!(channel.take_fault().is_none());
        assert!(channel.session().is_none());
        assert_eq!(wire.closed.load(Ordering::SeqCst), 1);
        assert!(matches!(channel.send("AA"), Err(SerialError::NotConnected)));
    }

    #[test]
    fn test_write_error_disconnects() {
        let wire = Wire::default();
        let mut channel = connected_channel(&wire);

        wire.fail_write.store(true, Ordering::SeqCst);

        assert!(matches!(channel.send("AA"), Err(SerialError::Write(_))));
        assert_eq!(channel.state(), ChannelState::Disconnected);
    }

    #[test]
    fn test_drop_closes_transport() {
        let wire = Wire::default();
        drop(connected_channel(&wire));
        assert_eq!(wire.closed.load(Ordering::SeqCst), 1);
    }
}
