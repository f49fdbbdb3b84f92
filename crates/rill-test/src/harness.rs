//! Integration test bench
//!
//! Wires a network to the host protocol engine over the in-memory
//! transport, with mock IO underneath, exactly as a target boots the
//! runtime. Tests script inbound frames, pump the service loop, and
//! assert on the frames the runtime mirrors back.

use rill_core::{DebugId, NodeId, PacketKind, PortId};
use rill_graph::{Network, NetworkConfig};
use rill_host::{service_host, BufferTransport, HostCommunication};
use rill_io::MockIo;
use rill_wire::{Command, CMD_SIZE};

pub struct TestBench {
    pub network: Network<HostCommunication<BufferTransport>>,
    pub io: MockIo,
}

impl TestBench {
    pub fn new() -> Self {
        Self::with_config(NetworkConfig::default())
    }

    pub fn with_config(config: NetworkConfig) -> Self {
        let io = MockIo::new();
        let host = HostCommunication::new(BufferTransport::new());
        let network = Network::with_handler(Box::new(io.clone()), config, host);
        TestBench { network, io }
    }

    /// Script the stream-opening magic header.
    pub fn push_magic(&mut self) {
        self.network.handler_mut().transport_mut().push_magic();
    }

    /// Script one inbound command frame.
    pub fn push_command(&mut self, command: Command) {
        self.network
            .handler_mut()
            .transport_mut()
            .push_command(&command);
    }

    /// Script raw inbound bytes.
    pub fn push_bytes(&mut self, bytes: &[u8]) {
        self.network.handler_mut().transport_mut().push_bytes(bytes);
    }

    /// Parse and apply everything pending on the pipe.
    pub fn service(&mut self) {
        service_host(&mut self.network);
    }

    pub fn run_tick(&mut self) {
        self.network.run_tick();
    }

    /// Decode every frame the runtime has emitted since the last take.
    pub fn take_frames(&mut self) -> Vec<Command> {
        let bytes = self.network.handler_mut().transport_mut().take_output();
        assert_eq!(bytes.len() % CMD_SIZE, 0, "output is not frame-aligned");
        bytes
            .chunks_exact(CMD_SIZE)
            .map(|frame| Command::parse(frame).expect("runtime emitted an unparseable frame"))
            .collect()
    }
}

impl Default for TestBench {
    fn default() -> Self {
        TestBench::new()
    }
}

/// Deliveries `(target, port, kind, value)` in emission order.
pub fn deliveries(frames: &[Command]) -> Vec<(NodeId, PortId, PacketKind, u16)> {
    frames
        .iter()
        .filter_map(|frame| match frame {
            Command::PacketDelivered {
                target,
                target_port,
                kind,
                value,
                ..
            } => Some((*target, *target_port, *kind, *value)),
            _ => None,
        })
        .collect()
}

/// PacketSent frames whose recorded sender is `sender`.
pub fn sends_from(frames: &[Command], sender: NodeId) -> usize {
    frames
        .iter()
        .filter(|frame| matches!(frame, Command::PacketSent { sender: s, .. } if *s == sender))
        .count()
}

/// Debug ids reported on the wire, in order.
pub fn debug_ids(frames: &[Command]) -> Vec<DebugId> {
    frames
        .iter()
        .filter_map(|frame| match frame {
            Command::DebugMessage { id, .. } => Some(*id),
            _ => None,
        })
        .collect()
}
