//! Arena index newtypes used throughout the [`Program`](crate::model::Program) graph.
//!
//! Instructions, blocks, subroutines and variables form a cyclic object graph
//! (a block points at its subroutine, a subroutine points back at its blocks).
//! Rather than wiring that up with `Rc`/`Weak` or raw pointers, every
//! cross-reference is a small `Copy` index into the owning arena.

use std::fmt;

macro_rules! arena_id {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name(pub u32);

        impl $name {
            #[must_use]
            pub fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<usize> for $name {
            fn from(value: usize) -> Self {
                Self(value as u32)
            }
        }
    };
}

arena_id!(InstructionId);
arena_id!(BlockId);
arena_id!(SubroutineId);
arena_id!(VariableId);
