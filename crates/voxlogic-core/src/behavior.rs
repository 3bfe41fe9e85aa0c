//! The closed catalog of logic-element kinds and their per-face roles.
//!
//! A [`Behavior`] is an immutable descriptor: a six-entry [`FaceRole`] table
//! defined in canonical (unrotated) space, plus a compile routine that lives
//! in `voxlogic-circuit`. The effective role of a physical face is found by
//! rotating the physical direction back into canonical space through the
//! block's [`Orientation`] before looking it up.

use crate::direction::Direction;
use crate::orientation::Orientation;
use std::fmt;

/// How a block face participates in a net.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FaceRole {
    /// The block reads the net's value through this face.
    In,
    /// The block drives the net through this face.
    Out,
    /// The face is both; the net is extended across the block.
    InOut,
    /// The face does not connect.
    None,
}

impl FaceRole {
    /// Whether the block reads through a face with this role.
    pub fn reads(self) -> bool {
        matches!(self, Self::In | Self::InOut)
    }

    /// Whether the block drives a net through a face with this role.
    pub fn drives(self) -> bool {
        matches!(self, Self::Out | Self::InOut)
    }
}

use FaceRole::{In, InOut, Out};

const ALL_IN: [FaceRole; 6] = [In; 6];
const ALL_OUT: [FaceRole; 6] = [Out; 6];
const ALL_INOUT: [FaceRole; 6] = [InOut; 6];
const ALL_NONE: [FaceRole; 6] = [FaceRole::None; 6];

/// A logic-element kind.
///
/// Every block type carries at most one behavior. Blocks without one are
/// air or scenery and terminate any trace that reaches them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Behavior {
    /// Pass-through medium; carries a trace straight on.
    Wire,
    /// Stateful toggle driven by standing on it; outputs its sub-datum.
    Pad,
    /// Shows the combined truth of its inputs in its sub-datum.
    Indicator,
    /// Extends a net across itself in every direction.
    Junction,
    /// Two inputs on the x axis, negated OR on the remaining faces.
    Nor,
    /// Passes `-X` to `+X` while any of the four side inputs is truthy.
    Gate,
    /// Outputs the sub-datum of the sampled block.
    GetSubDatum,
    /// Outputs the id of the block beyond the sampled block's `-X` face.
    GetNeighborId,
    /// Outputs the event value injected into an embedded evaluation.
    Spontaneous,
    /// Requests an orientation change of the (embedding) block.
    SetRotation,
    /// Requests replacement of the (embedding) block by another type.
    Become,
    /// Publishes its inputs to an enclosing [`Behavior::Ic`] block.
    IcOutput,
    /// Evaluates the circuits inside its block type's nested grid.
    Ic,
}

impl Behavior {
    /// Every behavior, in registry order.
    pub const ALL: [Behavior; 13] = [
        Behavior::Wire,
        Behavior::Pad,
        Behavior::Indicator,
        Behavior::Junction,
        Behavior::Nor,
        Behavior::Gate,
        Behavior::GetSubDatum,
        Behavior::GetNeighborId,
        Behavior::Spontaneous,
        Behavior::SetRotation,
        Behavior::Become,
        Behavior::IcOutput,
        Behavior::Ic,
    ];

    /// Registry name of this behavior.
    pub fn name(self) -> &'static str {
        match self {
            Self::Wire => "wire",
            Self::Pad => "pad",
            Self::Indicator => "indicator",
            Self::Junction => "junction",
            Self::Nor => "nor",
            Self::Gate => "gate",
            Self::GetSubDatum => "getSubDatum",
            Self::GetNeighborId => "getNeighborID",
            Self::Spontaneous => "spontaneous",
            Self::SetRotation => "setRotation",
            Self::Become => "become",
            Self::IcOutput => "icOutput",
            Self::Ic => "ic",
        }
    }

    /// Resolve a registry name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|b| b.name() == name)
    }

    /// Face roles in canonical space, indexed by [`Direction::index`].
    pub fn roles(self) -> [FaceRole; 6] {
        match self {
            Self::Wire => ALL_NONE,
            Self::Junction => ALL_INOUT,
            Self::Pad | Self::GetSubDatum | Self::Spontaneous | Self::Ic => ALL_OUT,
            // The -X face is the sensed one.
            Self::GetNeighborId => [Out, Out, Out, FaceRole::None, Out, Out],
            Self::Indicator | Self::SetRotation | Self::Become | Self::IcOutput => ALL_IN,
            Self::Nor => [In, Out, Out, In, Out, Out],
            Self::Gate => [Out, In, In, In, In, In],
        }
    }

    /// Role of the canonical face `direction`.
    pub fn canonical_role(self, direction: Direction) -> FaceRole {
        self.roles()[direction.index()]
    }

    /// Role of the physical face `direction` on a block rotated by `orientation`.
    pub fn face_role(self, orientation: Orientation, direction: Direction) -> FaceRole {
        self.canonical_role(orientation.untransform(direction))
    }

    /// Whether this is the wire medium.
    pub fn is_wire(self) -> bool {
        self == Self::Wire
    }

    /// Whether this behavior extends nets instead of terminating them.
    pub fn is_junction(self) -> bool {
        self == Self::Junction
    }
}

impl fmt::Display for Behavior {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
