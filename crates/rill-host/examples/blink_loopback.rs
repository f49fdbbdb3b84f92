//! A scripted host session over the in-memory transport.
//!
//! Builds the classic blink graph the way a host-side compiler would,
//! one 8-byte frame at a time:
//!
//!   IntervalTimer -> ToggleBoolean -> DigitalWritePin(13)
//!
//! then runs a few ticks against the mock clock and prints every frame
//! the runtime mirrored back.

use rill_core::{NodeId, Packet, PortId};
use rill_graph::{Network, NetworkConfig};
use rill_host::{service_host, BufferTransport, HostCommunication};
use rill_io::MockIo;
use rill_wire::{Command, CMD_SIZE};

fn main() {
    let io = MockIo::new();
    let host = HostCommunication::new(BufferTransport::new());
    let mut network = Network::with_handler(
        Box::new(io.clone()),
        NetworkConfig::default(),
        host,
    );

    let timer = NodeId::new(1);
    let toggle = NodeId::new(2);
    let led = NodeId::new(3);

    {
        let transport = network.handler_mut().transport_mut();
        transport.push_magic();
        for command in [
            Command::CreateComponent {
                component: rill_core::ComponentType::IntervalTimer,
                parent: NodeId::NONE,
            },
            Command::CreateComponent {
                component: rill_core::ComponentType::ToggleBoolean,
                parent: NodeId::NONE,
            },
            Command::CreateComponent {
                component: rill_core::ComponentType::DigitalWritePin,
                parent: NodeId::NONE,
            },
            Command::ConnectNodes {
                src: timer,
                src_port: PortId::new(0),
                target: toggle,
                target_port: PortId::new(0),
            },
            Command::ConnectNodes {
                src: toggle,
                src_port: PortId::new(0),
                target: led,
                target_port: PortId::new(0),
            },
            // Pin 13, then a 500 ms blink interval.
            Command::SendPacket {
                target: led,
                target_port: PortId::new(1),
                packet: Packet::Integer(13),
            },
            Command::SendPacket {
                target: timer,
                target_port: PortId::new(0),
                packet: Packet::Integer(500),
            },
            Command::StartNetwork,
        ] {
            transport.push_command(&command);
        }
    }

    service_host(&mut network);
    for _ in 0..4 {
        io.advance_ms(500);
        network.run_tick();
        println!("t={:>4}ms led={:?}", io.now_ms(), io.digital_level(13));
    }

    println!("--- frames from runtime ---");
    let bytes = network.handler_mut().transport_mut().take_output();
    for frame in bytes.chunks_exact(CMD_SIZE) {
        match Command::parse(frame) {
            Ok(command) => println!("{command:?}"),
            Err(err) => println!("<{err}>"),
        }
    }
}
