//! HostCommunication - parser and event mirror
//!
//! Inbound: a three-state byte parser. `LookForHeader` scans for the
//! first magic byte, `ParseHeader` matches the rest of it, `ParseCmd`
//! accumulates fixed 8-byte frames. Unknown opcodes are discarded
//! frame-by-frame; payload schema violations force a re-sync through
//! the magic header.
//!
//! Outbound: every runtime notification becomes exactly one frame on
//! the transport. The parser mirrors the network's debug level (it sees
//! `debugChanged` go by) so its own protocol-error frames honor it.

use rill_core::{ComponentType, DebugId, DebugLevel, NodeId, PortId, RillError};
use rill_graph::{Message, Network, NetworkState, NotificationHandler};
use rill_wire::{Command, CMD_SIZE, MAGIC};

use crate::HostTransport;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ParserState {
    LookForHeader,
    ParseHeader,
    ParseCmd,
}

/// Byte-oriented protocol engine over one transport.
pub struct HostCommunication<T: HostTransport> {
    transport: T,
    state: ParserState,
    matched: usize,
    buffer: [u8; CMD_SIZE],
    buffered: usize,
    debug_level: DebugLevel,
}

impl<T: HostTransport> HostCommunication<T> {
    pub fn new(transport: T) -> Self {
        HostCommunication {
            transport,
            state: ParserState::LookForHeader,
            matched: 0,
            buffer: [0; CMD_SIZE],
            buffered: 0,
            debug_level: DebugLevel::default(),
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    /// Drive the parser with one byte; a completed well-formed frame
    /// yields a command.
    pub fn parse_byte(&mut self, byte: u8) -> Option<Command> {
        match self.state {
            ParserState::LookForHeader => {
                if byte == MAGIC[0] {
                    self.state = ParserState::ParseHeader;
                    self.matched = 1;
                }
                None
            }
            ParserState::ParseHeader => {
                if byte == MAGIC[self.matched] {
                    self.matched += 1;
                    if self.matched == MAGIC.len() {
                        self.state = ParserState::ParseCmd;
                        self.buffered = 0;
                    }
                    return None;
                }
                self.protocol_error(DebugId::MagicMismatch);
                if byte == MAGIC[0] {
                    self.matched = 1;
                } else {
                    self.state = ParserState::LookForHeader;
                    self.matched = 0;
                }
                None
            }
            ParserState::ParseCmd => {
                self.buffer[self.buffered] = byte;
                self.buffered += 1;
                if self.buffered < CMD_SIZE {
                    return None;
                }
                self.buffered = 0;
                match Command::parse(&self.buffer) {
                    Ok(command) => Some(command),
                    Err(RillError::UnknownOpcode(opcode)) => {
                        // Frame-aligned garbage: drop it, keep parsing.
                        tracing::warn!("unknown opcode {opcode:#04x}, frame discarded");
                        self.protocol_error(DebugId::UnknownOpcode);
                        None
                    }
                    Err(err) => {
                        tracing::warn!("command rejected: {err}, resynchronizing");
                        self.protocol_error(err.debug_id());
                        self.resync();
                        None
                    }
                }
            }
        }
    }

    /// Pump the transport until it runs dry or a command completes.
    pub fn next_command(&mut self) -> Option<Command> {
        while let Some(byte) = self.transport.read_byte() {
            if let Some(command) = self.parse_byte(byte) {
                return Some(command);
            }
        }
        None
    }

    /// Answer a Ping.
    pub fn pong(&mut self) {
        self.emit(&Command::Pong);
    }

    fn resync(&mut self) {
        self.state = ParserState::LookForHeader;
        self.matched = 0;
        self.buffered = 0;
    }

    fn protocol_error(&mut self, id: DebugId) {
        if self.debug_level.allows(DebugLevel::Error) {
            self.emit(&Command::DebugMessage {
                level: DebugLevel::Error,
                id,
            });
        }
    }

    fn emit(&mut self, command: &Command) {
        self.transport.write_frame(&command.encode());
    }
}

impl<T: HostTransport> NotificationHandler for HostCommunication<T> {
    fn packet_sent(&mut self, index: u16, message: &Message) {
        self.emit(&Command::PacketSent {
            index,
            sender: message.sender,
            sender_port: message.sender_port,
            target: message.target,
            target_port: message.target_port,
            kind: message.packet.kind(),
        });
    }

    fn packet_delivered(&mut self, index: u16, message: &Message) {
        let payload = message.packet.payload_bytes();
        self.emit(&Command::PacketDelivered {
            index,
            target: message.target,
            target_port: message.target_port,
            kind: message.packet.kind(),
            value: u16::from_le_bytes([payload[0], payload[1]]),
        });
    }

    fn node_added(&mut self, node: NodeId, component: ComponentType, parent: NodeId) {
        self.emit(&Command::NodeAdded {
            parent,
            component,
            node,
        });
    }

    fn nodes_connected(
        &mut self,
        src: NodeId,
        src_port: PortId,
        target: NodeId,
        target_port: PortId,
    ) {
        self.emit(&Command::NodesConnected {
            src,
            src_port,
            target,
            target_port,
        });
    }

    fn network_state_changed(&mut self, state: NetworkState) {
        self.emit(&Command::NetworkStateChanged {
            running: state == NetworkState::Running,
        });
    }

    fn subgraph_connected(
        &mut self,
        is_output: bool,
        subgraph: NodeId,
        subgraph_port: PortId,
        child: NodeId,
        child_port: PortId,
    ) {
        self.emit(&Command::SubgraphPortConnected {
            is_output,
            subgraph,
            subgraph_port,
            child,
            child_port,
        });
    }

    fn port_subscription_changed(&mut self, node: NodeId, port: PortId, enable: bool) {
        self.emit(&Command::PortSubscriptionChanged { node, port, enable });
    }

    fn emit_debug(&mut self, level: DebugLevel, id: DebugId) {
        self.emit(&Command::DebugMessage { level, id });
    }

    fn debug_changed(&mut self, level: DebugLevel) {
        self.debug_level = level;
        self.emit(&Command::DebugChanged { level });
    }
}

/// Apply one inbound command to the network. Outbound-only frames
/// arriving here are host errors and are ignored with a debug event.
pub fn apply_command<H: NotificationHandler>(network: &mut Network<H>, command: Command) {
    match command {
        Command::Reset => network.reset(),
        Command::StartNetwork => network.start(),
        Command::CreateComponent { component, parent } => {
            match rill_components::Component::create(component) {
                Some(body) => {
                    let _ = network.add_node(body, parent);
                }
                None => network.emit_debug(DebugLevel::Error, DebugId::CommandParseError),
            }
        }
        Command::ConnectNodes {
            src,
            src_port,
            target,
            target_port,
        } => {
            let _ = network.connect(src, src_port, target, target_port);
        }
        Command::SendPacket {
            target,
            target_port,
            packet,
        } => {
            let _ = network.send_message(target, target_port, packet);
        }
        Command::SetDebugLevel { level } => network.set_debug_level(level),
        Command::SubscribeToPort { node, port, enable } => {
            let _ = network.subscribe_to_port(node, port, enable);
        }
        Command::ConnectSubgraphPort {
            is_output,
            subgraph,
            subgraph_port,
            child,
            child_port,
        } => {
            let _ = network.connect_subgraph(is_output, subgraph, subgraph_port, child, child_port);
        }
        // Answered by the caller owning the transport (see service_host).
        Command::Ping => {}
        _ => network.emit_debug(DebugLevel::Error, DebugId::UnknownOpcode),
    }
}

/// Drain the host pipe: parse every pending byte and apply the commands
/// it yields. Call once per main-loop turn, before `run_tick`.
pub fn service_host<T: HostTransport>(network: &mut Network<HostCommunication<T>>) {
    loop {
        let Some(command) = network.handler_mut().next_command() else {
            return;
        };
        match command {
            Command::Ping => network.handler_mut().pong(),
            command => apply_command(network, command),
        }
    }
}
