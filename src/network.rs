use crate::machine::{Fault, Machine, Status};

/// One routed message: a destination address and an x/y payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Packet {
    pub dest: i64,
    pub x: i64,
    pub y: i64,
}

/// A bank of machines booted from one image and advanced round-robin.
///
/// Machine `i` receives its address `i` as its first input. Every three
/// outputs a machine queues form a packet; packets addressed inside the
/// bank are delivered as x then y, packets addressed outside are handed
/// back to the caller. A machine polling an empty queue is fed -1 for
/// the idle read and advanced on the next round.
pub struct Network {
    nodes: Vec<Machine>,
}

impl Network {
    pub fn boot(program: &[i64], size: usize) -> Network {
        let nodes = (0..size)
            .map(|address| {
                let mut node = Machine::new(program);
                node.push_input(address as i64);
                node
            })
            .collect();
        Network { nodes }
    }

    pub fn node(&self, address: usize) -> &Machine {
        &self.nodes[address]
    }

    /// Queue a packet payload onto a node's input.
    pub fn deliver(&mut self, address: usize, x: i64, y: i64) {
        self.nodes[address].push_input(x);
        self.nodes[address].push_input(y);
    }

    /// Give every node one scheduling quantum and route the packets it
    /// completed. Returns the packets addressed outside the bank.
    pub fn step_round(&mut self) -> Result<Vec<Packet>, Fault> {
        let mut external = Vec::new();
        for index in 0..self.nodes.len() {
            let node = &mut self.nodes[index];
            if node.status() == Status::Blocked && node.pending_input() == 0 {
                // Idle read: nothing queued for this node right now.
                node.push_input(-1);
            }
            node.run_until_output(3)?;

            while self.nodes[index].pending_output() >= 3 {
                let node = &mut self.nodes[index];
                let dest = node.pop_output().unwrap_or_default();
                let x = node.pop_output().unwrap_or_default();
                let y = node.pop_output().unwrap_or_default();
                let packet = Packet { dest, x, y };
                match usize::try_from(dest) {
                    Ok(address) if address < self.nodes.len() => self.deliver(address, x, y),
                    _ => external.push(packet),
                }
                self.nodes[index].run_until_output(3)?;
            }
        }
        Ok(external)
    }

    /// True when every node is suspended on an empty input queue, with
    /// no packet left in flight.
    pub fn idle(&self) -> bool {
        self.nodes
            .iter()
            .all(|node| node.status() == Status::Blocked && node.pending_input() == 0)
    }
}

/// Run the bank until any machine addresses a packet to `dest` and
/// return that packet.
pub fn first_packet_to(program: &[i64], size: usize, dest: i64) -> Result<Packet, Fault> {
    let mut net = Network::boot(program, size);
    loop {
        for packet in net.step_round()? {
            if packet.dest == dest {
                return Ok(packet);
            }
        }
    }
}

/// Run the bank with a NAT at address 255: the NAT latches the last
/// packet sent to it and, whenever the whole bank goes idle, resumes
/// the network by delivering that packet to machine 0. Returns the
/// first y value the NAT delivers twice in a row.
pub fn nat_repeated_y(program: &[i64], size: usize) -> Result<i64, Fault> {
    let mut net = Network::boot(program, size);
    let mut held: Option<Packet> = None;
    let mut last_resumed_y: Option<i64> = None;
    loop {
        for packet in net.step_round()? {
            if packet.dest == 255 {
                held = Some(packet);
            }
        }
        if net.idle() {
            if let Some(packet) = held {
                if last_resumed_y == Some(packet.y) {
                    return Ok(packet.y);
                }
                last_resumed_y = Some(packet.y);
                net.deliver(0, packet.x, packet.y);
            }
        }
    }
}
