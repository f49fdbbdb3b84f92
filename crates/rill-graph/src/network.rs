//! The Network
//!
//! Owns the dense node table and the circular message queue, both sized
//! once at bring-up. All mutation goes through the public operations
//! below; each one notifies the handler before returning, and each
//! capacity overrun is a soft failure: a debug event, a dropped
//! operation, intact invariants.

use rill_components::{Component, PortBinding, ProcessContext};
use rill_core::{
    ComponentType, DebugId, DebugLevel, NodeId, Packet, PortId, RillError, RillResult,
    MAX_MESSAGES, MAX_NODES,
};
use rill_io::Io;

use crate::{Message, MessageQueue, NotificationHandler, NullNotificationHandler};

/// Graph execution state. A constructed network is Stopped; there is no
/// representable pre-construction state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum NetworkState {
    Stopped = 0,
    Running = 1,
}

impl NetworkState {
    pub fn from_byte(b: u8) -> Option<Self> {
        match b {
            0 => Some(NetworkState::Stopped),
            1 => Some(NetworkState::Running),
            _ => None,
        }
    }

    #[inline]
    pub fn to_byte(self) -> u8 {
        self as u8
    }
}

/// Table capacities, fixed at construction.
#[derive(Clone, Copy, Debug)]
pub struct NetworkConfig {
    pub max_nodes: usize,
    pub max_messages: usize,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        NetworkConfig {
            max_nodes: MAX_NODES,
            max_messages: MAX_MESSAGES,
        }
    }
}

/// A directed edge from an out-port to a target in-port.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Connection {
    pub target: NodeId,
    pub target_port: PortId,
    pub subscribed: bool,
}

impl Connection {
    fn to(target: NodeId, target_port: PortId) -> Self {
        Connection {
            target,
            target_port,
            subscribed: false,
        }
    }

    #[inline]
    pub fn is_connected(&self) -> bool {
        self.target != NodeId::NONE
    }
}

impl Default for Connection {
    fn default() -> Self {
        Connection {
            target: NodeId::NONE,
            target_port: PortId::NONE,
            subscribed: false,
        }
    }
}

/// A node: component body plus its slot metadata and out-port table.
#[derive(Debug)]
pub struct Node {
    id: NodeId,
    component_type: ComponentType,
    parent: NodeId,
    body: Component,
    connections: Box<[Connection]>,
}

impl Node {
    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn component_type(&self) -> ComponentType {
        self.component_type
    }

    /// NodeId::NONE for top-level nodes.
    pub fn parent(&self) -> NodeId {
        self.parent
    }

    pub fn connection(&self, port: PortId) -> Option<&Connection> {
        port.index().and_then(|p| self.connections.get(p))
    }

    pub fn out_ports(&self) -> usize {
        self.connections.len()
    }
}

/// The bounded graph runtime.
pub struct Network<H: NotificationHandler = NullNotificationHandler> {
    nodes: Vec<Node>,
    queue: MessageQueue,
    state: NetworkState,
    debug_level: DebugLevel,
    handler: H,
    io: Box<dyn Io>,
    max_nodes: usize,
}

impl Network<NullNotificationHandler> {
    pub fn new(io: Box<dyn Io>) -> Self {
        Network::with_handler(io, NetworkConfig::default(), NullNotificationHandler)
    }
}

impl<H: NotificationHandler> Network<H> {
    pub fn with_handler(io: Box<dyn Io>, config: NetworkConfig, handler: H) -> Self {
        Network {
            nodes: Vec::with_capacity(config.max_nodes),
            queue: MessageQueue::with_capacity(config.max_messages),
            state: NetworkState::Stopped,
            debug_level: DebugLevel::default(),
            handler,
            io,
            max_nodes: config.max_nodes,
        }
    }

    pub fn state(&self) -> NetworkState {
        self.state
    }

    pub fn debug_level(&self) -> DebugLevel {
        self.debug_level
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn queued_messages(&self) -> usize {
        self.queue.len()
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        id.index().and_then(|index| self.nodes.get(index))
    }

    pub fn handler(&self) -> &H {
        &self.handler
    }

    pub fn handler_mut(&mut self) -> &mut H {
        &mut self.handler
    }

    pub fn io_mut(&mut self) -> &mut dyn Io {
        self.io.as_mut()
    }

    /// Append a component to the node table. The assigned id is the new
    /// table length: ids are dense, stable, and never reused.
    pub fn add_node(&mut self, body: Component, parent: NodeId) -> RillResult<NodeId> {
        if self.nodes.len() >= self.max_nodes {
            return Err(self.reject(RillError::NodeLimitReached));
        }
        if parent != NodeId::NONE {
            if let Err(err) = self.node_index(parent) {
                return Err(self.reject(err));
            }
        }

        let id = NodeId::new(self.nodes.len() as u8 + 1);
        let component_type = body.component_type();
        let connections = vec![Connection::default(); body.out_ports()].into_boxed_slice();
        self.nodes.push(Node {
            id,
            component_type,
            parent,
            body,
            connections,
        });
        self.handler.node_added(id, component_type, parent);
        Ok(id)
    }

    /// Wire `src`'s out-port to `target`'s in-port. Re-wiring a port
    /// overwrites the previous edge and clears its subscription.
    pub fn connect(
        &mut self,
        src: NodeId,
        src_port: PortId,
        target: NodeId,
        target_port: PortId,
    ) -> RillResult<()> {
        match self.try_connect(src, src_port, target, target_port) {
            Ok(()) => {
                self.handler
                    .nodes_connected(src, src_port, target, target_port);
                Ok(())
            }
            Err(err) => Err(self.reject(err)),
        }
    }

    fn try_connect(
        &mut self,
        src: NodeId,
        src_port: PortId,
        target: NodeId,
        target_port: PortId,
    ) -> RillResult<()> {
        let src_index = self.node_index(src)?;
        self.node_index(target)?;
        let slot = self.out_slot(src_index, src_port)?;
        self.nodes[src_index].connections[slot] = Connection::to(target, target_port);

        // Outbound SubGraph transparency: if this virtual out-port has a
        // bound child, the child's physical connection follows the new
        // downstream target.
        let binding = self.nodes[src_index]
            .body
            .as_subgraph()
            .and_then(|subgraph| subgraph.output(src_port));
        if let Some(binding) = binding {
            self.rewire_child(binding, target, target_port)?;
        }
        Ok(())
    }

    /// Bind a SubGraph virtual port to a child node port.
    pub fn connect_subgraph(
        &mut self,
        is_output: bool,
        subgraph: NodeId,
        subgraph_port: PortId,
        child: NodeId,
        child_port: PortId,
    ) -> RillResult<()> {
        match self.try_connect_subgraph(is_output, subgraph, subgraph_port, child, child_port) {
            Ok(()) => {
                self.handler
                    .subgraph_connected(is_output, subgraph, subgraph_port, child, child_port);
                Ok(())
            }
            Err(err) => Err(self.reject(err)),
        }
    }

    fn try_connect_subgraph(
        &mut self,
        is_output: bool,
        subgraph: NodeId,
        subgraph_port: PortId,
        child: NodeId,
        child_port: PortId,
    ) -> RillResult<()> {
        let sub_index = self.node_index(subgraph)?;
        self.node_index(child)?;

        let body = self.nodes[sub_index]
            .body
            .as_subgraph_mut()
            .ok_or(RillError::NotASubgraph(subgraph))?;
        if !is_output {
            return body.bind_input(subgraph_port, child, child_port);
        }
        body.bind_output(subgraph_port, child, child_port)?;

        // Outbound transparency, other wiring order: the virtual port may
        // already be connected downstream.
        let slot = self.out_slot(sub_index, subgraph_port)?;
        let downstream = self.nodes[sub_index].connections[slot];
        let binding = PortBinding { child, child_port };
        if downstream.is_connected() {
            self.rewire_child(binding, downstream.target, downstream.target_port)?;
        } else {
            let child_index = self.node_index(child)?;
            self.out_slot(child_index, child_port)?;
        }
        Ok(())
    }

    fn rewire_child(
        &mut self,
        binding: PortBinding,
        target: NodeId,
        target_port: PortId,
    ) -> RillResult<()> {
        let child_index = self.node_index(binding.child)?;
        let slot = self.out_slot(child_index, binding.child_port)?;
        self.nodes[child_index].connections[slot] = Connection::to(target, target_port);
        Ok(())
    }

    /// Inject a packet at a node's in-port from outside the graph.
    /// The target is resolved at delivery time, so injection succeeds
    /// even while the graph is being (re)built.
    pub fn send_message(
        &mut self,
        target: NodeId,
        target_port: PortId,
        packet: Packet,
    ) -> RillResult<()> {
        let message = Message::injected(target, target_port, packet);
        match self.queue.push(message) {
            Ok(index) => {
                self.handler.packet_sent(index, &message);
                Ok(())
            }
            Err(err) => Err(self.reject(err)),
        }
    }

    /// Toggle per-packet notifications for the connection sourced at
    /// `(node, port)`.
    pub fn subscribe_to_port(
        &mut self,
        node: NodeId,
        port: PortId,
        enable: bool,
    ) -> RillResult<()> {
        match self.try_subscribe(node, port, enable) {
            Ok(()) => {
                self.handler.port_subscription_changed(node, port, enable);
                Ok(())
            }
            Err(err) => Err(self.reject(err)),
        }
    }

    fn try_subscribe(&mut self, node: NodeId, port: PortId, enable: bool) -> RillResult<()> {
        let index = self.node_index(node)?;
        let slot = self.out_slot(index, port)?;
        self.nodes[index].connections[slot].subscribed = enable;
        Ok(())
    }

    /// Transition to Running: broadcast Setup to every node, deliver
    /// everything it induced, then run the first tick cycle.
    pub fn start(&mut self) {
        if self.state == NetworkState::Running {
            self.reject(RillError::AlreadyRunning);
            return;
        }
        self.set_state(NetworkState::Running);
        self.broadcast(Packet::Setup);
        self.process_messages();
        self.run_tick();
    }

    /// Drain the queue, stop, and clear the node table. The debug level
    /// survives a reset; it belongs to the host session.
    pub fn reset(&mut self) {
        self.queue.clear();
        self.nodes.clear();
        self.set_state(NetworkState::Stopped);
    }

    /// One scheduler turn: deliver the backlog, broadcast Tick, deliver
    /// what the tick induced. A no-op outside Running.
    pub fn run_tick(&mut self) {
        if self.state != NetworkState::Running {
            self.emit_debug(DebugLevel::Info, DebugId::NotRunning);
            return;
        }
        self.process_messages();
        self.broadcast(Packet::Tick);
        self.process_messages();
    }

    pub fn set_debug_level(&mut self, level: DebugLevel) {
        self.debug_level = level;
        self.handler.debug_changed(level);
    }

    /// Report a debug event if it passes the current level.
    pub fn emit_debug(&mut self, level: DebugLevel, id: DebugId) {
        if self.debug_level.allows(level) {
            self.handler.emit_debug(level, id);
        }
    }

    fn reject(&mut self, err: RillError) -> RillError {
        tracing::warn!("graph operation dropped: {err}");
        self.emit_debug(DebugLevel::Error, err.debug_id());
        err
    }

    fn set_state(&mut self, state: NetworkState) {
        self.state = state;
        self.handler.network_state_changed(state);
    }

    fn node_index(&self, id: NodeId) -> RillResult<usize> {
        match id.index() {
            Some(index) if index < self.nodes.len() => Ok(index),
            _ => Err(RillError::InvalidNodeId(id)),
        }
    }

    fn out_slot(&self, node_index: usize, port: PortId) -> RillResult<usize> {
        match port.index() {
            Some(slot) if slot < self.nodes[node_index].connections.len() => Ok(slot),
            _ => Err(RillError::InvalidPort(port)),
        }
    }

    /// Strict FIFO delivery: dequeue, notify, run the target's reaction
    /// to completion. Sends made during a reaction land at the tail. A
    /// message whose target no longer resolves (stale injection across
    /// a reset) is dropped with InvalidNodeId and no delivery event.
    fn process_messages(&mut self) {
        while let Some((index, message)) = self.queue.pop() {
            match self.node_index(message.target) {
                Ok(node_index) => {
                    self.handler.packet_delivered(index, &message);
                    self.dispatch(node_index, message.packet, message.target_port);
                }
                Err(err) => {
                    self.reject(err);
                }
            }
        }
    }

    fn broadcast(&mut self, packet: Packet) {
        for index in 0..self.nodes.len() {
            self.dispatch(index, packet, PortId::NONE);
        }
    }

    fn dispatch(&mut self, index: usize, packet: Packet, port: PortId) {
        let Some(node) = self.nodes.get_mut(index) else {
            return;
        };
        let mut ctx = DeliveryContext {
            node: node.id,
            connections: &node.connections[..],
            queue: &mut self.queue,
            handler: &mut self.handler,
            io: self.io.as_mut(),
            debug_level: self.debug_level,
        };
        node.body.process(&mut ctx, packet, port);
    }
}

/// What a component may touch while processing: its own out-port table,
/// the queue tail, IO, and the debug channel.
struct DeliveryContext<'a, H: NotificationHandler> {
    node: NodeId,
    connections: &'a [Connection],
    queue: &'a mut MessageQueue,
    handler: &'a mut H,
    io: &'a mut dyn Io,
    debug_level: DebugLevel,
}

impl<H: NotificationHandler> ProcessContext for DeliveryContext<'_, H> {
    fn self_id(&self) -> NodeId {
        self.node
    }

    fn send(&mut self, packet: Packet, out_port: PortId) {
        let connection = match out_port.index().and_then(|p| self.connections.get(p)) {
            Some(connection) => *connection,
            None => {
                self.debug(DebugLevel::Error, DebugId::InvalidPortId);
                return;
            }
        };
        if !connection.is_connected() {
            return;
        }
        let message = Message {
            target: connection.target,
            target_port: connection.target_port,
            packet,
            sender: self.node,
            sender_port: out_port,
        };
        match self.queue.push(message) {
            Ok(index) => {
                if connection.subscribed {
                    self.handler.packet_sent(index, &message);
                }
            }
            Err(_) => self.debug(DebugLevel::Error, DebugId::MessageQueueFull),
        }
    }

    fn forward(&mut self, target: NodeId, target_port: PortId, packet: Packet) {
        let message = Message::injected(target, target_port, packet);
        match self.queue.push(message) {
            Ok(index) => self.handler.packet_sent(index, &message),
            Err(_) => self.debug(DebugLevel::Error, DebugId::MessageQueueFull),
        }
    }

    fn io(&mut self) -> &mut dyn Io {
        &mut *self.io
    }

    fn debug(&mut self, level: DebugLevel, id: DebugId) {
        if self.debug_level.allows(level) {
            self.handler.emit_debug(level, id);
        }
    }
}

#[cfg(test)]
mod tests {
    use rill_io::MockIo;

    use super::*;
    use crate::{CollectingHandler, NetworkEvent};

    fn network() -> Network<CollectingHandler> {
        network_with(NetworkConfig::default()).0
    }

    fn network_with(config: NetworkConfig) -> (Network<CollectingHandler>, MockIo) {
        let io = MockIo::new();
        let net = Network::with_handler(Box::new(io.clone()), config, CollectingHandler::new());
        (net, io)
    }

    fn create(net: &mut Network<CollectingHandler>, kind: ComponentType) -> NodeId {
        net.add_node(Component::create(kind).unwrap(), NodeId::NONE)
            .unwrap()
    }

    fn port(p: i8) -> PortId {
        PortId::new(p)
    }

    #[test]
    fn test_node_ids_dense_and_stable() {
        let mut net = network();
        let a = create(&mut net, ComponentType::Forward);
        let b = create(&mut net, ComponentType::Sink);
        let c = create(&mut net, ComponentType::ToggleBoolean);
        assert_eq!((a, b, c), (NodeId::new(1), NodeId::new(2), NodeId::new(3)));
        for id in [a, b, c] {
            assert_eq!(net.node(id).unwrap().id(), id);
        }
        assert!(net.node(NodeId::NONE).is_none());
    }

    #[test]
    fn test_node_limit_is_soft() {
        let (mut net, _io) = network_with(NetworkConfig {
            max_nodes: 2,
            max_messages: 8,
        });
        create(&mut net, ComponentType::Sink);
        create(&mut net, ComponentType::Sink);
        let err = net
            .add_node(Component::create(ComponentType::Sink).unwrap(), NodeId::NONE)
            .unwrap_err();
        assert_eq!(err, RillError::NodeLimitReached);
        assert_eq!(net.node_count(), 2);
        assert_eq!(
            net.handler().debug_ids(),
            vec![DebugId::NodeUpperLimitReached]
        );
    }

    #[test]
    fn test_pipe_delivers_in_order() {
        let mut net = network();
        let forward = create(&mut net, ComponentType::Forward);
        let sink = create(&mut net, ComponentType::Sink);
        net.connect(forward, port(0), sink, port(0)).unwrap();

        net.start();
        net.send_message(forward, port(0), Packet::Byte(0x2A))
            .unwrap();
        net.run_tick();

        assert_eq!(
            net.handler().delivered_to(),
            vec![(forward, port(0)), (sink, port(0))]
        );
        assert_eq!(net.queued_messages(), 0);
    }

    #[test]
    fn test_send_to_unconnected_port_is_noop() {
        let mut net = network();
        let forward = create(&mut net, ComponentType::Forward);
        net.start();
        net.send_message(forward, port(0), Packet::Byte(1)).unwrap();
        net.run_tick();

        assert_eq!(net.handler().delivered_to(), vec![(forward, port(0))]);
        assert_eq!(net.queued_messages(), 0);
        assert!(net.handler().debug_ids().is_empty());
    }

    #[test]
    fn test_queue_overflow_is_soft() {
        let (mut net, _io) = network_with(NetworkConfig {
            max_nodes: 8,
            max_messages: 2,
        });
        let sink = create(&mut net, ComponentType::Sink);

        net.send_message(sink, port(0), Packet::Void).unwrap();
        net.send_message(sink, port(0), Packet::Void).unwrap();
        let err = net.send_message(sink, port(0), Packet::Void).unwrap_err();
        assert_eq!(err, RillError::QueueFull);

        let sent = net
            .handler()
            .events
            .iter()
            .filter(|e| matches!(e, NetworkEvent::PacketSent { .. }))
            .count();
        assert_eq!(sent, 2);
        assert_eq!(net.handler().debug_ids(), vec![DebugId::MessageQueueFull]);
    }

    #[test]
    fn test_subscription_gates_component_sends() {
        let mut net = network();
        let forward = create(&mut net, ComponentType::Forward);
        let sink = create(&mut net, ComponentType::Sink);
        net.connect(forward, port(0), sink, port(0)).unwrap();
        net.start();

        let hop_sends = |net: &Network<CollectingHandler>| {
            net.handler()
                .events
                .iter()
                .filter(|e| {
                    matches!(e, NetworkEvent::PacketSent { message, .. } if message.sender == forward)
                })
                .count()
        };

        net.send_message(forward, port(0), Packet::Void).unwrap();
        net.run_tick();
        assert_eq!(hop_sends(&net), 0);

        net.subscribe_to_port(forward, port(0), true).unwrap();
        net.send_message(forward, port(0), Packet::Void).unwrap();
        net.run_tick();
        assert_eq!(hop_sends(&net), 1);

        net.subscribe_to_port(forward, port(0), false).unwrap();
        net.send_message(forward, port(0), Packet::Void).unwrap();
        net.run_tick();
        assert_eq!(hop_sends(&net), 1);
    }

    #[test]
    fn test_run_tick_when_stopped() {
        let mut net = network();
        net.set_debug_level(DebugLevel::Info);
        net.run_tick();
        assert_eq!(net.handler().debug_ids(), vec![DebugId::NotRunning]);
    }

    #[test]
    fn test_not_running_filtered_at_default_level() {
        let mut net = network();
        net.run_tick();
        assert!(net.handler().debug_ids().is_empty());
    }

    #[test]
    fn test_start_twice_rejected() {
        let mut net = network();
        net.start();
        net.start();
        assert_eq!(
            net.handler().debug_ids(),
            vec![DebugId::NetworkAlreadyRunning]
        );
        assert_eq!(net.state(), NetworkState::Running);
    }

    #[test]
    fn test_setup_precedes_tick() {
        let (mut net, io) = network_with(NetworkConfig::default());
        let serial = create(&mut net, ComponentType::SerialIn);
        let sink = create(&mut net, ComponentType::Sink);
        net.connect(serial, port(0), sink, port(0)).unwrap();

        io.feed_serial(0, &[0x11]);
        net.start();

        // Setup opened the device before the first tick drained it.
        assert_eq!(io.serial_baudrate(0), Some(9600));
        assert_eq!(net.handler().delivered_to(), vec![(sink, port(0))]);
    }

    #[test]
    fn test_reset_clears_graph_keeps_debug_level() {
        let mut net = network();
        create(&mut net, ComponentType::Forward);
        net.set_debug_level(DebugLevel::Detailed);
        net.start();

        net.reset();
        assert_eq!(net.state(), NetworkState::Stopped);
        assert_eq!(net.node_count(), 0);
        assert_eq!(net.queued_messages(), 0);
        assert_eq!(net.debug_level(), DebugLevel::Detailed);
        assert!(net
            .handler()
            .events
            .contains(&NetworkEvent::StateChanged {
                state: NetworkState::Stopped
            }));
    }

    #[test]
    fn test_injection_survives_reset_delivery_does_not() {
        let mut net = network();
        let sink = create(&mut net, ComponentType::Sink);
        net.start();
        net.reset();

        // Accepted while stopped, resolved (and rejected) at delivery.
        net.send_message(sink, port(0), Packet::Void).unwrap();
        net.run_tick();
        assert_eq!(net.queued_messages(), 1);
        assert!(net.handler().delivered_to().is_empty());

        net.start();
        assert!(net.handler().delivered_to().is_empty());
        assert_eq!(net.handler().debug_ids(), vec![DebugId::InvalidNodeId]);
    }

    fn build_subgraph_pipe(
        net: &mut Network<CollectingHandler>,
        wire_downstream_first: bool,
    ) -> (NodeId, NodeId, NodeId) {
        let sub = create(net, ComponentType::SubGraph);
        let child = net
            .add_node(Component::create(ComponentType::Forward).unwrap(), sub)
            .unwrap();
        let external = create(net, ComponentType::Sink);

        if wire_downstream_first {
            net.connect(sub, port(0), external, port(0)).unwrap();
        }
        net.connect_subgraph(false, sub, port(0), child, port(0))
            .unwrap();
        net.connect_subgraph(true, sub, port(0), child, port(0))
            .unwrap();
        if !wire_downstream_first {
            net.connect(sub, port(0), external, port(0)).unwrap();
        }
        (sub, child, external)
    }

    #[test]
    fn test_subgraph_transparency() {
        for wire_downstream_first in [false, true] {
            let mut net = network();
            let (sub, child, external) = build_subgraph_pipe(&mut net, wire_downstream_first);

            net.start();
            net.send_message(sub, port(0), Packet::Byte(7)).unwrap();
            net.run_tick();

            // One hop in through the virtual port, one hop out: the child's
            // emission lands at the external node without revisiting the
            // SubGraph.
            assert_eq!(
                net.handler().delivered_to(),
                vec![(sub, port(0)), (child, port(0)), (external, port(0))]
            );
            assert_eq!(net.node(child).unwrap().parent(), sub);
        }
    }

    #[test]
    fn test_invalid_references_rejected() {
        let mut net = network();
        let forward = create(&mut net, ComponentType::Forward);

        let err = net
            .connect(NodeId::new(9), port(0), forward, port(0))
            .unwrap_err();
        assert_eq!(err, RillError::InvalidNodeId(NodeId::new(9)));

        let err = net.connect(forward, port(3), forward, port(0)).unwrap_err();
        assert_eq!(err, RillError::InvalidPort(port(3)));

        let err = net
            .connect_subgraph(false, forward, port(0), forward, port(0))
            .unwrap_err();
        assert_eq!(err, RillError::NotASubgraph(forward));

        assert_eq!(
            net.handler().debug_ids(),
            vec![
                DebugId::InvalidNodeId,
                DebugId::InvalidPortId,
                DebugId::InvalidNodeId,
            ]
        );
    }

    #[test]
    fn test_rewire_overwrites_and_clears_subscription() {
        let mut net = network();
        let forward = create(&mut net, ComponentType::Forward);
        let a = create(&mut net, ComponentType::Sink);
        let b = create(&mut net, ComponentType::Sink);

        net.connect(forward, port(0), a, port(0)).unwrap();
        net.subscribe_to_port(forward, port(0), true).unwrap();
        net.connect(forward, port(0), b, port(0)).unwrap();

        let connection = net.node(forward).unwrap().connection(port(0)).unwrap();
        assert_eq!(connection.target, b);
        assert!(!connection.subscribed);
    }
}
