//! Runtime event notifications
//!
//! Everything observable the network does goes through this trait:
//! graph mutations, state changes, packet traffic, debug events. The
//! host layer implements it to mirror events onto the wire; tests use
//! [`CollectingHandler`] to record them.

use rill_core::{ComponentType, DebugId, DebugLevel, NodeId, PortId};

use crate::{Message, NetworkState};

/// Receives every observable runtime event. All methods default to
/// no-ops so implementations override only what they observe.
pub trait NotificationHandler {
    /// A message was enqueued. Emitted for injected messages and for
    /// component sends over subscribed connections.
    fn packet_sent(&mut self, index: u16, message: &Message) {
        let _ = (index, message);
    }

    /// A message was dequeued for delivery.
    fn packet_delivered(&mut self, index: u16, message: &Message) {
        let _ = (index, message);
    }

    fn node_added(&mut self, node: NodeId, component: ComponentType, parent: NodeId) {
        let _ = (node, component, parent);
    }

    fn nodes_connected(
        &mut self,
        src: NodeId,
        src_port: PortId,
        target: NodeId,
        target_port: PortId,
    ) {
        let _ = (src, src_port, target, target_port);
    }

    fn network_state_changed(&mut self, state: NetworkState) {
        let _ = state;
    }

    fn subgraph_connected(
        &mut self,
        is_output: bool,
        subgraph: NodeId,
        subgraph_port: PortId,
        child: NodeId,
        child_port: PortId,
    ) {
        let _ = (is_output, subgraph, subgraph_port, child, child_port);
    }

    fn port_subscription_changed(&mut self, node: NodeId, port: PortId, enable: bool) {
        let _ = (node, port, enable);
    }

    /// A debug event that passed the network's level filter.
    fn emit_debug(&mut self, level: DebugLevel, id: DebugId) {
        let _ = (level, id);
    }

    fn debug_changed(&mut self, level: DebugLevel) {
        let _ = level;
    }
}

/// Discards every event.
pub struct NullNotificationHandler;

impl NotificationHandler for NullNotificationHandler {}

/// A recorded runtime event, one variant per handler method.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NetworkEvent {
    PacketSent { index: u16, message: Message },
    PacketDelivered { index: u16, message: Message },
    NodeAdded { node: NodeId, component: ComponentType, parent: NodeId },
    NodesConnected { src: NodeId, src_port: PortId, target: NodeId, target_port: PortId },
    StateChanged { state: NetworkState },
    SubgraphConnected {
        is_output: bool,
        subgraph: NodeId,
        subgraph_port: PortId,
        child: NodeId,
        child_port: PortId,
    },
    SubscriptionChanged { node: NodeId, port: PortId, enable: bool },
    Debug { level: DebugLevel, id: DebugId },
    DebugChanged { level: DebugLevel },
}

/// Records every event in order. Test and tooling support.
#[derive(Debug, Default)]
pub struct CollectingHandler {
    pub events: Vec<NetworkEvent>,
}

impl CollectingHandler {
    pub fn new() -> Self {
        CollectingHandler::default()
    }

    pub fn take(&mut self) -> Vec<NetworkEvent> {
        std::mem::take(&mut self.events)
    }

    /// Recorded debug ids, in order.
    pub fn debug_ids(&self) -> Vec<DebugId> {
        self.events
            .iter()
            .filter_map(|event| match event {
                NetworkEvent::Debug { id, .. } => Some(*id),
                _ => None,
            })
            .collect()
    }

    /// Targets of delivered packets, in order.
    pub fn delivered_to(&self) -> Vec<(NodeId, PortId)> {
        self.events
            .iter()
            .filter_map(|event| match event {
                NetworkEvent::PacketDelivered { message, .. } => {
                    Some((message.target, message.target_port))
                }
                _ => None,
            })
            .collect()
    }
}

impl NotificationHandler for CollectingHandler {
    fn packet_sent(&mut self, index: u16, message: &Message) {
        self.events.push(NetworkEvent::PacketSent {
            index,
            message: *message,
        });
    }

    fn packet_delivered(&mut self, index: u16, message: &Message) {
        self.events.push(NetworkEvent::PacketDelivered {
            index,
            message: *message,
        });
    }

    fn node_added(&mut self, node: NodeId, component: ComponentType, parent: NodeId) {
        self.events.push(NetworkEvent::NodeAdded {
            node,
            component,
            parent,
        });
    }

    fn nodes_connected(
        &mut self,
        src: NodeId,
        src_port: PortId,
        target: NodeId,
        target_port: PortId,
    ) {
        self.events.push(NetworkEvent::NodesConnected {
            src,
            src_port,
            target,
            target_port,
        });
    }

    fn network_state_changed(&mut self, state: NetworkState) {
        self.events.push(NetworkEvent::StateChanged { state });
    }

    fn subgraph_connected(
        &mut self,
        is_output: bool,
        subgraph: NodeId,
        subgraph_port: PortId,
        child: NodeId,
        child_port: PortId,
    ) {
        self.events.push(NetworkEvent::SubgraphConnected {
            is_output,
            subgraph,
            subgraph_port,
            child,
            child_port,
        });
    }

    fn port_subscription_changed(&mut self, node: NodeId, port: PortId, enable: bool) {
        self.events.push(NetworkEvent::SubscriptionChanged { node, port, enable });
    }

    fn emit_debug(&mut self, level: DebugLevel, id: DebugId) {
        self.events.push(NetworkEvent::Debug { level, id });
    }

    fn debug_changed(&mut self, level: DebugLevel) {
        self.events.push(NetworkEvent::DebugChanged { level });
    }
}
