//! End-to-end host sessions, frame in and frame out.

use rill_core::{ComponentType, DebugId, NodeId, Packet, PacketKind, PortId};
use rill_graph::NetworkConfig;
use rill_test::{debug_ids, deliveries, sends_from, TestBench};
use rill_wire::Command;

fn node(n: u8) -> NodeId {
    NodeId::new(n)
}

fn port(p: i8) -> PortId {
    PortId::new(p)
}

fn create(component: ComponentType) -> Command {
    Command::CreateComponent {
        component,
        parent: NodeId::NONE,
    }
}

fn connect(src: u8, src_port: i8, target: u8, target_port: i8) -> Command {
    Command::ConnectNodes {
        src: node(src),
        src_port: port(src_port),
        target: node(target),
        target_port: port(target_port),
    }
}

fn send(target: u8, target_port: i8, packet: Packet) -> Command {
    Command::SendPacket {
        target: node(target),
        target_port: port(target_port),
        packet,
    }
}

#[test]
fn two_node_pipe() {
    let mut bench = TestBench::new();
    bench.push_magic();
    for command in [
        create(ComponentType::Forward),
        create(ComponentType::Sink),
        connect(1, 0, 2, 0),
        Command::StartNetwork,
        send(1, 0, Packet::Byte(0x2A)),
    ] {
        bench.push_command(command);
    }
    bench.service();
    bench.run_tick();

    let frames = bench.take_frames();
    let delivered = deliveries(&frames);
    assert_eq!(
        delivered,
        vec![
            (node(1), port(0), PacketKind::Byte, 0x2A),
            (node(2), port(0), PacketKind::Byte, 0x2A),
        ]
    );
    assert!(debug_ids(&frames).is_empty());
}

#[test]
fn tick_broadcast_delivers_in_insertion_order() {
    let mut bench = TestBench::new();
    bench.push_magic();
    for command in [
        create(ComponentType::IntervalTimer),
        create(ComponentType::IntervalTimer),
        create(ComponentType::Sink),
        create(ComponentType::Sink),
        connect(1, 0, 3, 0),
        connect(2, 0, 4, 0),
        Command::StartNetwork,
    ] {
        bench.push_command(command);
    }
    bench.service();

    // Start ran Setup then the first tick; both generators fired once,
    // and their emissions were delivered in enqueue order.
    let frames = bench.take_frames();
    let delivered = deliveries(&frames);
    assert_eq!(
        delivered,
        vec![
            (node(3), port(0), PacketKind::Void, 0),
            (node(4), port(0), PacketKind::Void, 0),
        ]
    );
}

#[test]
fn subgraph_is_transparent() {
    let mut bench = TestBench::new();
    bench.push_magic();
    bench.push_command(create(ComponentType::SubGraph));
    bench.push_command(Command::CreateComponent {
        component: ComponentType::Forward,
        parent: node(1),
    });
    bench.push_command(create(ComponentType::Sink));
    for command in [
        Command::ConnectSubgraphPort {
            is_output: false,
            subgraph: node(1),
            subgraph_port: port(0),
            child: node(2),
            child_port: port(0),
        },
        Command::ConnectSubgraphPort {
            is_output: true,
            subgraph: node(1),
            subgraph_port: port(0),
            child: node(2),
            child_port: port(0),
        },
        connect(1, 0, 3, 0),
        Command::StartNetwork,
        send(1, 0, Packet::Byte(7)),
    ] {
        bench.push_command(command);
    }
    bench.service();
    bench.run_tick();

    let frames = bench.take_frames();
    let delivered = deliveries(&frames);
    // In through the virtual port, out in a single hop: the packet is
    // never delivered to the SubGraph's out side a second time.
    assert_eq!(
        delivered,
        vec![
            (node(1), port(0), PacketKind::Byte, 7),
            (node(2), port(0), PacketKind::Byte, 7),
            (node(3), port(0), PacketKind::Byte, 7),
        ]
    );
    let mirrored: Vec<&Command> = frames
        .iter()
        .filter(|f| matches!(f, Command::SubgraphPortConnected { .. }))
        .collect();
    assert_eq!(mirrored.len(), 2);
}

#[test]
fn subscription_gates_packet_sent_frames() {
    let mut bench = TestBench::new();
    bench.push_magic();
    for command in [
        create(ComponentType::Forward),
        create(ComponentType::Sink),
        connect(1, 0, 2, 0),
        Command::StartNetwork,
        Command::SubscribeToPort {
            node: node(1),
            port: port(0),
            enable: true,
        },
        send(1, 0, Packet::Void),
    ] {
        bench.push_command(command);
    }
    bench.service();
    bench.run_tick();
    let frames = bench.take_frames();
    assert_eq!(sends_from(&frames, node(1)), 1);

    bench.push_command(Command::SubscribeToPort {
        node: node(1),
        port: port(0),
        enable: false,
    });
    bench.push_command(send(1, 0, Packet::Void));
    bench.service();
    bench.run_tick();
    let frames = bench.take_frames();
    assert_eq!(sends_from(&frames, node(1)), 0);
}

#[test]
fn queue_overflow_reports_and_drops() {
    let mut bench = TestBench::with_config(NetworkConfig {
        max_nodes: 8,
        max_messages: 4,
    });
    bench.push_magic();
    bench.push_command(create(ComponentType::Sink));
    for _ in 0..5 {
        bench.push_command(send(1, 0, Packet::Void));
    }
    bench.service();

    let frames = bench.take_frames();
    let sent = frames
        .iter()
        .filter(|f| matches!(f, Command::PacketSent { .. }))
        .count();
    assert_eq!(sent, 4);
    assert_eq!(debug_ids(&frames), vec![DebugId::MessageQueueFull]);

    // The four accepted messages deliver normally.
    bench.push_command(Command::StartNetwork);
    bench.service();
    let frames = bench.take_frames();
    assert_eq!(deliveries(&frames).len(), 4);
}

#[test]
fn reset_stops_delivery_until_next_start() {
    let mut bench = TestBench::new();
    bench.push_magic();
    for command in [
        create(ComponentType::Forward),
        create(ComponentType::Sink),
        connect(1, 0, 2, 0),
        Command::StartNetwork,
        Command::Reset,
    ] {
        bench.push_command(command);
    }
    bench.service();

    let frames = bench.take_frames();
    assert!(frames.contains(&Command::NetworkStateChanged { running: true }));
    assert!(frames.contains(&Command::NetworkStateChanged { running: false }));

    // Injection is accepted while stopped but nothing is delivered.
    bench.push_command(send(1, 0, Packet::Void));
    bench.service();
    bench.run_tick();
    let frames = bench.take_frames();
    assert_eq!(sends_from(&frames, NodeId::NONE), 1);
    assert!(deliveries(&frames).is_empty());

    // The graph was cleared by Reset, so the next Start resolves the
    // stale target and rejects it.
    bench.push_command(Command::StartNetwork);
    bench.service();
    let frames = bench.take_frames();
    assert!(deliveries(&frames).is_empty());
    assert_eq!(debug_ids(&frames), vec![DebugId::InvalidNodeId]);
}

#[test]
fn every_mutation_has_a_mirror_frame() {
    let mut bench = TestBench::new();
    bench.push_magic();
    for command in [
        create(ComponentType::SubGraph),
        Command::CreateComponent {
            component: ComponentType::Forward,
            parent: node(1),
        },
        create(ComponentType::Sink),
        connect(1, 0, 3, 0),
        Command::ConnectSubgraphPort {
            is_output: false,
            subgraph: node(1),
            subgraph_port: port(0),
            child: node(2),
            child_port: port(0),
        },
        Command::SubscribeToPort {
            node: node(2),
            port: port(0),
            enable: true,
        },
    ] {
        bench.push_command(command);
    }
    bench.service();

    let frames = bench.take_frames();
    assert_eq!(
        frames,
        vec![
            Command::NodeAdded {
                parent: NodeId::NONE,
                component: ComponentType::SubGraph,
                node: node(1),
            },
            Command::NodeAdded {
                parent: node(1),
                component: ComponentType::Forward,
                node: node(2),
            },
            Command::NodeAdded {
                parent: NodeId::NONE,
                component: ComponentType::Sink,
                node: node(3),
            },
            Command::NodesConnected {
                src: node(1),
                src_port: port(0),
                target: node(3),
                target_port: port(0),
            },
            Command::SubgraphPortConnected {
                is_output: false,
                subgraph: node(1),
                subgraph_port: port(0),
                child: node(2),
                child_port: port(0),
            },
            Command::PortSubscriptionChanged {
                node: node(2),
                port: port(0),
                enable: true,
            },
        ]
    );
}

#[test]
fn ping_is_answered_with_pong() {
    let mut bench = TestBench::new();
    bench.push_magic();
    bench.push_command(Command::Ping);
    bench.service();
    assert_eq!(bench.take_frames(), vec![Command::Pong]);
}

#[test]
fn outbound_opcode_from_host_is_rejected() {
    let mut bench = TestBench::new();
    bench.push_magic();
    bench.push_command(Command::Pong);
    bench.service();
    assert_eq!(debug_ids(&bench.take_frames()), vec![DebugId::UnknownOpcode]);
}

#[test]
fn debug_level_command_changes_filtering() {
    let mut bench = TestBench::new();
    bench.push_magic();
    bench.push_command(Command::SetDebugLevel {
        level: rill_core::DebugLevel::Info,
    });
    bench.service();
    let frames = bench.take_frames();
    assert!(frames.contains(&Command::DebugChanged {
        level: rill_core::DebugLevel::Info
    }));

    // NotRunning is Info-level and now reaches the wire.
    bench.run_tick();
    assert_eq!(debug_ids(&bench.take_frames()), vec![DebugId::NotRunning]);
}
