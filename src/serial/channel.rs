use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use tracing::{debug, error, info, instrument, warn};

use crate::serial::commands::DeviceCommand;
use crate::serial::error::{Result, SerialError};
use crate::serial::hex::{format_hex, parse_hex};
use crate::serial::rx_log::RxLog;
use crate::serial::transport::{SerialTransport, TransportProvider};
use crate::serial::types::{BaudRate, ChannelState, SerialSession};

/// Upper bound on any single blocking read.
pub const READ_TIMEOUT: Duration = Duration::from_millis(100);
/// Reader sleep between polls when nothing is pending.
pub const POLL_INTERVAL: Duration = Duration::from_millis(10);

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// State shared between the channel owner and its reader thread.
struct Shared {
    transport: Mutex<Option<Box<dyn SerialTransport>>>,
    rx_log: RxLog,
    running: AtomicBool,
    alive: AtomicBool,
    fault: Mutex<Option<SerialError>>,
}

impl Shared {
    fn new() -> Self {
        Self {
            transport: Mutex::new(None),
            rx_log: RxLog::new(),
            running: AtomicBool::new(false),
            alive: AtomicBool::new(false),
            fault: Mutex::new(None),
        }
    }

    /// Reads whatever is pending as one chunk.
    fn read_chunk(&self, buf: &mut Vec<u8>) -> Result<Option<String>> {
        let mut guard = lock(&self.transport);
        let Some(transport) = guard.as_mut() else {
            return Ok(None);
        };
        let pending = transport.bytes_available()?;
        if pending == 0 {
            return Ok(None);
        }
        buf.resize(pending, 0);
        let read = transport.read(buf)?;
        Ok((read > 0).then(|| format_hex(&buf[..read])))
    }

    fn fail(&self, err: SerialError) {
        lock(&self.transport).take();
        *lock(&self.fault) = Some(err);
        self.running.store(false, Ordering::Release);
        self.alive.store(false, Ordering::Release);
    }

    fn reader_loop(self: Arc<Self>) {
        debug!("Serial reader started");
        let mut buf = Vec::new();
        while self.running.load(Ordering::Acquire) {
            match self.read_chunk(&mut buf) {
                Ok(Some(hex)) => {
                    debug!(%hex, "Received");
                    self.rx_log.push(hex);
                }
                Ok(None) => thread::sleep(POLL_INTERVAL),
                Err(e) => {
                    error!("Serial read error: {}", e);
                    self.fail(e);
                    break;
                }
            }
        }
        debug!("Serial reader stopped");
    }
}

/// Full-duplex link to the camera: one reader thread while connected,
/// writes from the owning thread.
pub struct SerialChannel<P: TransportProvider> {
    provider: P,
    shared: Arc<Shared>,
    phase: ChannelState,
    session: Option<SerialSession>,
    reader: Option<JoinHandle<()>>,
}

impl<P: TransportProvider> SerialChannel<P> {
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            shared: Arc::new(Shared::new()),
            phase: ChannelState::Disconnected,
            session: None,
            reader: None,
        }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn available_ports(&self) -> Result<Vec<String>> {
        self.provider.available_ports()
    }

    /// Current state; a session whose reader has failed reads as `Disconnected`.
    pub fn state(&self) -> ChannelState {
        match &self.phase {
            ChannelState::Connected { .. } if !self.shared.alive.load(Ordering::Acquire) => ChannelState::Disconnected,
            phase => phase.clone(),
        }
    }

    pub fn is_connected(&self) -> bool {
        self.state().is_connected()
    }

    pub fn session(&self) -> Option<&SerialSession> {
        self.session.as_ref().filter(|_| self.is_connected())
    }

    pub fn rx_log(&self) -> &RxLog {
        &self.shared.rx_log
    }

    /// Returns the fault that ended the last session, if any, and releases that session.
    pub fn take_fault(&mut self) -> Option<SerialError> {
        let fault = lock(&self.shared.fault).take();
        if fault.is_some() {
            self.reap();
        }
        fault
    }

    /// Opens `port`, closing any current session first.
    #[instrument(skip(self, baud), fields(baud = baud.rate()))]
    pub fn connect(&mut self, port: &str, baud: BaudRate) -> Result<()> {
        self.disconnect();
        lock(&self.shared.fault).take();

        self.phase = ChannelState::Connecting;
        let transport = match self.provider.open(port, baud, READ_TIMEOUT) {
            Ok(transport) => transport,
            Err(e) => {
                warn!("Connect failed: {}", e);
                self.phase = ChannelState::Disconnected;
                return Err(e);
            }
        };

        *lock(&self.shared.transport) = Some(transport);
        self.shared.running.store(true, Ordering::Release);
        self.shared.alive.store(true, Ordering::Release);

        let shared = Arc::clone(&self.shared);
        let spawned = thread::Builder::new()
            .name("serial-reader".to_string())
            .spawn(move || shared.reader_loop());
        match spawned {
            Ok(handle) => self.reader = Some(handle),
            Err(e) => {
                self.shared.running.store(false, Ordering::Release);
                self.shared.alive.store(false, Ordering::Release);
                lock(&self.shared.transport).take();
                self.phase = ChannelState::Disconnected;
                return Err(SerialError::Open {
                    port: port.to_string(),
                    reason: e.to_string(),
                });
            }
        }

        self.phase = ChannelState::Connected { since: Instant::now() };
        self.session = Some(SerialSession {
            port: port.to_string(),
            baud,
        });
        info!("Connected to {} at {} baud", port, baud);
        Ok(())
    }

    /// Stops the reader, waits for it, then closes the port. Safe to call repeatedly.
    pub fn disconnect(&mut self) {
        self.shared.running.store(false, Ordering::Release);
        self.join_reader();
        lock(&self.shared.transport).take();
        self.shared.alive.store(false, Ordering::Release);

        if let Some(session) = self.session.take() {
            info!("Disconnected from {}", session.port);
        }
        self.phase = ChannelState::Disconnected;
    }

    fn join_reader(&mut self) {
        if let Some(handle) = self.reader.take() {
            if handle.join().is_err() {
                warn!("{}", SerialError::ReaderPanicked);
            }
        }
    }

    /// Cleans up after a reader that ended on its own.
    fn reap(&mut self) {
        if matches!(self.phase, ChannelState::Connected { .. }) && !self.shared.alive.load(Ordering::Acquire) {
            self.disconnect();
        }
    }

    /// Parses operator hex text and writes it. Malformed text writes nothing.
    pub fn send(&mut self, text: &str) -> Result<()> {
        let bytes = parse_hex(text)?;
        self.send_bytes(&bytes)
    }

    pub fn send_command(&mut self, command: DeviceCommand) -> Result<()> {
        self.send_bytes(command.bytes())?;
        info!("Sent {} command", command.name());
        Ok(())
    }

    /// Writes raw bytes. A write failure ends the session.
    pub fn send_bytes(&mut self, bytes: &[u8]) -> Result<()> {
        self.reap();
        if !self.is_connected() {
            return Err(SerialError::NotConnected);
        }

        let written = match lock(&self.shared.transport).as_mut() {
            Some(transport) => transport.write_all(bytes),
            None => Err(SerialError::NotConnected),
        };

        match written {
            Ok(()) => {
                info!("Sent: {}", format_hex(bytes));
                Ok(())
            }
            Err(e) => {
                error!("Serial write error: {}", e);
                self.disconnect();
                Err(e)
            }
        }
    }
}

impl<P: TransportProvider> Drop for SerialChannel<P> {
    fn drop(&mut self) {
        self.disconnect();
    }
}
