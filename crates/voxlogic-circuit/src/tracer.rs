//! Net tracing: from block adjacency to a graph of nets.
//!
//! Tracing starts at every logic block of a circuit that is neither a wire
//! nor a junction. Each unclaimed face of such a root opens a new net, which
//! walks outward one voxel at a time, straight through wires, until it hits
//! a logic block or runs off the medium. A junction extends the net that
//! reached it through all of its faces; any other block reached by a walk
//! starts a new net on each of its remaining unclaimed faces.
//!
//! Net serial numbers follow the depth-first discovery order. After tracing,
//! nets that carry no information (no reader/driver pair and no junction)
//! are dropped; survivors keep their serials.

use indexmap::IndexMap;
use voxlogic_core::{BlockPos, CompileError, Direction, FaceRole, NetId};
use voxlogic_grid::Grid;

// ── Nets ───────────────────────────────────────────────────────────

/// One block face attached to a net.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NetMember {
    /// The block.
    pub pos: BlockPos,
    /// Physical direction of the attached face.
    pub direction: Direction,
    /// Effective role of the face after applying the block's orientation.
    pub role: FaceRole,
}

/// An equivalence class of block faces connected through wire.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Net {
    id: NetId,
    members: Vec<NetMember>,
    edges: Vec<(BlockPos, BlockPos)>,
    has_in: bool,
    has_out: bool,
    has_inout: bool,
}

impl Net {
    fn new(id: NetId) -> Self {
        Self {
            id,
            members: Vec::new(),
            edges: Vec::new(),
            has_in: false,
            has_out: false,
            has_inout: false,
        }
    }

    fn attach(&mut self, member: NetMember) {
        match member.role {
            FaceRole::In => self.has_in = true,
            FaceRole::Out => self.has_out = true,
            FaceRole::InOut => self.has_inout = true,
            FaceRole::None => {}
        }
        self.members.push(member);
    }

    /// Serial number, unique within one trace.
    pub fn id(&self) -> NetId {
        self.id
    }

    /// Attached faces in claim order.
    pub fn members(&self) -> &[NetMember] {
        &self.members
    }

    /// Voxel steps walked while tracing, as `(from, to)` pairs. Empty when
    /// edge recording is disabled.
    pub fn edges(&self) -> &[(BlockPos, BlockPos)] {
        &self.edges
    }

    /// Whether some attached face reads the net.
    pub fn has_in(&self) -> bool {
        self.has_in
    }

    /// Whether some attached face drives the net.
    pub fn has_out(&self) -> bool {
        self.has_out
    }

    /// Whether a junction face is attached.
    pub fn has_inout(&self) -> bool {
        self.has_inout
    }

    /// A net is worth evaluating when something drives it and something
    /// reads it, or when it passes through a junction.
    pub fn is_useful(&self) -> bool {
        (self.has_in && self.has_out) || self.has_inout
    }

    /// Members whose faces drive the net.
    pub fn drivers(&self) -> impl Iterator<Item = &NetMember> {
        self.members.iter().filter(|m| m.role.drives())
    }
}

/// The retained nets of a circuit and the face-to-net lookup.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NetGraph {
    nets: IndexMap<NetId, Net>,
    faces: IndexMap<(BlockPos, Direction), NetId>,
}

impl NetGraph {
    /// Net attached to the physical face `direction` of the block at `pos`.
    pub fn net_at(&self, pos: BlockPos, direction: Direction) -> Option<NetId> {
        self.faces.get(&(pos, direction)).copied()
    }

    /// Look up a net by serial.
    pub fn net(&self, id: NetId) -> Option<&Net> {
        self.nets.get(&id)
    }

    /// Retained nets in serial order.
    pub fn nets(&self) -> impl Iterator<Item = &Net> {
        self.nets.values()
    }

    /// Serials of the retained nets in order.
    pub fn ids(&self) -> impl Iterator<Item = NetId> + '_ {
        self.nets.keys().copied()
    }

    /// Number of retained nets.
    pub fn len(&self) -> usize {
        self.nets.len()
    }

    /// Whether no net survived pruning.
    pub fn is_empty(&self) -> bool {
        self.nets.is_empty()
    }
}

// ── Tracing ────────────────────────────────────────────────────────

/// Trace the nets connecting `members` (in discovery order).
///
/// When `record_edges` is false the nets carry no trace edges; membership
/// and serials are unaffected.
///
/// # Errors
///
/// [`CompileError::ConflictingNetMerge`] if a walk reaches a face already
/// claimed by a different net.
pub fn trace(
    grid: &dyn Grid,
    members: &[BlockPos],
    record_edges: bool,
) -> Result<NetGraph, CompileError> {
    let mut tracer = Tracer {
        grid,
        record_edges,
        claims: IndexMap::new(),
        nets: Vec::new(),
    };
    for &root in members {
        match grid.behavior(root) {
            Some(b) if !b.is_wire() && !b.is_junction() => {}
            _ => continue,
        }
        for d in Direction::ALL {
            if tracer.claims.contains_key(&(root, d)) {
                continue;
            }
            let net = tracer.open();
            tracer.claim(net, root, d);
            tracer.run(net, root, d)?;
        }
    }
    Ok(tracer.finish())
}

/// Pending work of the depth-first walk.
enum Frame {
    /// Walk from `from` along `direction` on behalf of `net`.
    Walk {
        net: NetId,
        from: BlockPos,
        direction: Direction,
    },
    /// Fan out from a reached block through its remaining faces.
    Fan {
        net: NetId,
        pos: BlockPos,
        arrived: Direction,
        junction: bool,
        next: usize,
    },
}

struct Tracer<'a> {
    grid: &'a dyn Grid,
    record_edges: bool,
    claims: IndexMap<(BlockPos, Direction), NetId>,
    nets: Vec<Net>,
}

impl Tracer<'_> {
    fn open(&mut self) -> NetId {
        let id = NetId(self.nets.len() as u32);
        self.nets.push(Net::new(id));
        id
    }

    fn claim(&mut self, net: NetId, pos: BlockPos, direction: Direction) {
        let role = self
            .grid
            .behavior(pos)
            .map_or(FaceRole::None, |b| b.face_role(self.grid.orientation(pos), direction));
        self.claims.insert((pos, direction), net);
        self.nets[net.0 as usize].attach(NetMember {
            pos,
            direction,
            role,
        });
    }

    fn edge(&mut self, net: NetId, from: BlockPos, to: BlockPos) {
        if self.record_edges {
            self.nets[net.0 as usize].edges.push((from, to));
        }
    }

    /// Run one walk and everything it fans out into, depth first. An
    /// explicit stack keeps long chains of blocks off the call stack.
    fn run(&mut self, net: NetId, from: BlockPos, direction: Direction) -> Result<(), CompileError> {
        let mut stack = vec![Frame::Walk {
            net,
            from,
            direction,
        }];
        while let Some(frame) = stack.pop() {
            match frame {
                Frame::Walk {
                    net,
                    from,
                    direction,
                } => {
                    if let Some(fan) = self.walk(net, from, direction)? {
                        stack.push(fan);
                    }
                }
                Frame::Fan {
                    net,
                    pos,
                    arrived,
                    junction,
                    next,
                } => {
                    let Some(i) = (next..Direction::ALL.len()).find(|&i| {
                        let e = Direction::ALL[i];
                        e != arrived && !self.claims.contains_key(&(pos, e))
                    }) else {
                        continue;
                    };
                    stack.push(Frame::Fan {
                        net,
                        pos,
                        arrived,
                        junction,
                        next: i + 1,
                    });
                    let e = Direction::ALL[i];
                    let branch = if junction { net } else { self.open() };
                    self.claim(branch, pos, e);
                    stack.push(Frame::Walk {
                        net: branch,
                        from: pos,
                        direction: e,
                    });
                }
            }
        }
        Ok(())
    }

    /// Step from `from` along `direction` through wire. Returns the fan-out
    /// frame of the logic block reached, if the walk claimed one.
    fn walk(
        &mut self,
        net: NetId,
        from: BlockPos,
        direction: Direction,
    ) -> Result<Option<Frame>, CompileError> {
        let arrived = direction.opposite();
        let mut prev = from;
        loop {
            let here = prev.offset(direction);
            if !self.grid.contains(here) {
                return Ok(None);
            }
            let Some(behavior) = self.grid.behavior(here) else {
                return Ok(None);
            };
            self.edge(net, prev, here);
            if behavior.is_wire() {
                prev = here;
                continue;
            }
            return match self.claims.get(&(here, arrived)) {
                Some(&existing) if existing != net => Err(CompileError::ConflictingNetMerge {
                    pos: here,
                    direction: arrived,
                    existing,
                    incoming: net,
                }),
                Some(_) => Ok(None),
                None => {
                    self.claim(net, here, arrived);
                    Ok(Some(Frame::Fan {
                        net,
                        pos: here,
                        arrived,
                        junction: behavior.is_junction(),
                        next: 0,
                    }))
                }
            };
        }
    }

    fn finish(self) -> NetGraph {
        let nets: IndexMap<NetId, Net> = self
            .nets
            .into_iter()
            .filter(Net::is_useful)
            .map(|n| (n.id, n))
            .collect();
        let faces = self
            .claims
            .into_iter()
            .filter(|(_, id)| nets.contains_key(id))
            .collect();
        NetGraph { nets, faces }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use voxlogic_core::{Behavior, BlockId, Orientation};
    use voxlogic_grid::{BlockCatalog, BlockType, VoxelGrid};

    const WIRE: BlockId = BlockId(1);
    const PAD: BlockId = BlockId(2);
    const INDICATOR: BlockId = BlockId(3);
    const JUNCTION: BlockId = BlockId(4);
    const GATE: BlockId = BlockId(5);

    fn grid() -> VoxelGrid {
        let catalog = BlockCatalog::builder()
            .block(WIRE, BlockType::new("wire").with_behavior(Behavior::Wire))
            .block(PAD, BlockType::new("pad").with_behavior(Behavior::Pad))
            .block(
                INDICATOR,
                BlockType::new("indicator").with_behavior(Behavior::Indicator),
            )
            .block(
                JUNCTION,
                BlockType::new("junction").with_behavior(Behavior::Junction),
            )
            .block(GATE, BlockType::new("gate").with_behavior(Behavior::Gate))
            .build()
            .unwrap();
        VoxelGrid::new(Arc::new(catalog), [8, 4, 4]).unwrap()
    }

    fn members(g: &VoxelGrid) -> Vec<BlockPos> {
        g.bounds()
            .positions()
            .filter(|&p| g.behavior(p).is_some())
            .collect()
    }

    #[test]
    fn pad_wire_indicator_forms_one_net() {
        let mut g = grid();
        let pad = BlockPos::new(0, 1, 1);
        let lamp = BlockPos::new(3, 1, 1);
        g.place(pad, PAD).unwrap();
        g.place(BlockPos::new(1, 1, 1), WIRE).unwrap();
        g.place(BlockPos::new(2, 1, 1), WIRE).unwrap();
        g.place(lamp, INDICATOR).unwrap();

        let graph = trace(&g, &members(&g), true).unwrap();
        assert_eq!(graph.len(), 1);
        let id = graph.net_at(pad, Direction::PosX).unwrap();
        assert_eq!(graph.net_at(lamp, Direction::NegX), Some(id));
        let net = graph.net(id).unwrap();
        assert!(net.has_in() && net.has_out() && !net.has_inout());
        assert_eq!(net.members().len(), 2);
        assert_eq!(net.drivers().count(), 1);
        assert_eq!(
            net.edges(),
            &[
                (pad, BlockPos::new(1, 1, 1)),
                (BlockPos::new(1, 1, 1), BlockPos::new(2, 1, 1)),
                (BlockPos::new(2, 1, 1), lamp),
            ]
        );
    }

    #[test]
    fn edges_omitted_when_disabled() {
        let mut g = grid();
        g.place(BlockPos::new(0, 0, 0), PAD).unwrap();
        g.place(BlockPos::new(1, 0, 0), INDICATOR).unwrap();
        let graph = trace(&g, &members(&g), false).unwrap();
        assert_eq!(graph.len(), 1);
        assert!(graph.nets().all(|n| n.edges().is_empty()));
    }

    #[test]
    fn useless_nets_pruned_and_serials_kept() {
        let mut g = grid();
        // Two pads facing each other: drivers only.
        g.place(BlockPos::new(0, 0, 0), PAD).unwrap();
        g.place(BlockPos::new(1, 0, 0), WIRE).unwrap();
        g.place(BlockPos::new(2, 0, 0), PAD).unwrap();
        g.place(BlockPos::new(3, 0, 0), INDICATOR).unwrap();

        let graph = trace(&g, &members(&g), true).unwrap();
        assert_eq!(graph.net_at(BlockPos::new(0, 0, 0), Direction::PosX), None);
        let kept = graph
            .net_at(BlockPos::new(3, 0, 0), Direction::NegX)
            .unwrap();
        assert_eq!(graph.len(), 1);
        // Serial 0 is the dead pad-to-pad net.
        assert_ne!(kept, NetId(0));
    }

    #[test]
    fn junction_extends_one_net() {
        let mut g = grid();
        let j = BlockPos::new(2, 1, 1);
        g.place(j, JUNCTION).unwrap();
        g.place(BlockPos::new(0, 1, 1), PAD).unwrap();
        g.place(BlockPos::new(1, 1, 1), WIRE).unwrap();
        g.place(BlockPos::new(3, 1, 1), WIRE).unwrap();
        g.place(BlockPos::new(4, 1, 1), INDICATOR).unwrap();
        g.place(BlockPos::new(2, 2, 1), INDICATOR).unwrap();

        let graph = trace(&g, &members(&g), true).unwrap();
        let id = graph.net_at(BlockPos::new(0, 1, 1), Direction::PosX).unwrap();
        assert_eq!(graph.net_at(BlockPos::new(4, 1, 1), Direction::NegX), Some(id));
        assert_eq!(graph.net_at(BlockPos::new(2, 2, 1), Direction::NegY), Some(id));
        for d in Direction::ALL {
            assert_eq!(graph.net_at(j, d), Some(id), "{d}");
        }
        assert!(graph.net(id).unwrap().has_inout());
    }

    #[test]
    fn rotated_gate_roles_recorded() {
        let mut g = grid();
        let gate = BlockPos::new(1, 1, 1);
        // Canonical +X now faces +Y.
        let o = Orientation::from_basis(Direction::PosY, Direction::NegX).unwrap();
        g.set_block(gate, GATE, o, 0).unwrap();
        g.place(BlockPos::new(1, 2, 1), INDICATOR).unwrap();
        let graph = trace(&g, &members(&g), true).unwrap();
        let id = graph.net_at(gate, Direction::PosY).unwrap();
        let net = graph.net(id).unwrap();
        assert_eq!(net.members()[0].role, FaceRole::Out);
        assert_eq!(net.members()[1].role, FaceRole::In);
    }

    #[test]
    fn walk_stops_at_air() {
        let mut g = grid();
        g.place(BlockPos::new(0, 0, 0), PAD).unwrap();
        g.place(BlockPos::new(1, 0, 0), WIRE).unwrap();
        let graph = trace(&g, &members(&g), true).unwrap();
        assert!(graph.is_empty());
    }
}
