//! Benchmarks for the Rill wire protocol and delivery loop.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use rill_components::Component;
use rill_core::{ComponentType, NodeId, Packet, PortId};
use rill_graph::Network;
use rill_io::MockIo;
use rill_wire::Command;

fn bench_frame_parse(c: &mut Criterion) {
    let frame = Command::SendPacket {
        target: NodeId::new(3),
        target_port: PortId::new(0),
        packet: Packet::Integer(0x12345678),
    }
    .encode();

    c.bench_function("frame_parse", |b| {
        b.iter(|| Command::parse(black_box(&frame)))
    });
}

fn bench_frame_encode(c: &mut Criterion) {
    let command = Command::PacketSent {
        index: 17,
        sender: NodeId::new(1),
        sender_port: PortId::new(0),
        target: NodeId::new(2),
        target_port: PortId::new(0),
        kind: rill_core::PacketKind::Byte,
    };

    c.bench_function("frame_encode", |b| b.iter(|| black_box(&command).encode()));
}

fn bench_pipe_delivery(c: &mut Criterion) {
    let mut network = Network::new(Box::new(MockIo::new()));
    let mut previous = None;
    for _ in 0..4 {
        let id = network
            .add_node(
                Component::create(ComponentType::Forward).unwrap(),
                NodeId::NONE,
            )
            .unwrap();
        if let Some(prev) = previous {
            network.connect(prev, PortId::new(0), id, PortId::new(0)).unwrap();
        }
        previous = Some(id);
    }
    let head = NodeId::new(1);
    network.start();

    c.bench_function("pipe_delivery_4_nodes", |b| {
        b.iter(|| {
            network
                .send_message(head, PortId::new(0), Packet::Byte(0x55))
                .unwrap();
            network.run_tick();
        })
    });
}

criterion_group!(
    benches,
    bench_frame_parse,
    bench_frame_encode,
    bench_pipe_delivery
);
criterion_main!(benches);
