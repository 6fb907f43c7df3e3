//! The read-only program model the [`Emitter`](crate::emitter::Emitter) renders.
//!
//! `Program` is an arena: every cross-reference between instructions, blocks,
//! subroutines and variables is a [`crate::ids`] index rather than a pointer,
//! so the whole graph can be handed to the emitter as a single immutable
//! borrow. Nothing here mutates after construction.

use crate::ids::{BlockId, InstructionId, SubroutineId, VariableId};
use crate::opcode::Opcode;
use crate::tables::VariableType;

/// A decoded constant/jump operand attached to an instruction.
#[derive(Debug, Clone, PartialEq)]
pub enum Arg {
    Int(i32),
    Float(f32),
    String(String),
    Object(u32),
}

/// Where an address "means something" beyond plain fallthrough.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AddressKind {
    #[default]
    None,
    SubRoutine,
    JumpTarget,
    StoreState,
}

/// One decoded opcode in program order.
#[derive(Debug, Clone)]
pub struct Instruction {
    pub address: u32,
    pub opcode: Opcode,
    pub raw_bytes: Vec<u8>,
    pub args: Vec<Arg>,
    /// Next instruction in straight-line order; `None` for terminators.
    pub follower: Option<InstructionId>,
    /// Branch targets, 0..n (conditional/unconditional jumps, calls).
    pub branches: Vec<InstructionId>,
    pub address_kind: AddressKind,
    /// Owning block. Every instruction belongs to exactly one block.
    pub block: BlockId,
    /// Stack snapshot at this instruction, top-of-stack first. Empty unless
    /// `Program::has_stack_analysis` and the owning subroutine finished.
    pub stack: Vec<VariableId>,
    /// Variables consumed/produced by this opcode; meaning is per-opcode
    /// (see the NSS writer's dispatch table).
    pub variables: Vec<VariableId>,
}

/// Semantic classification of a block->block edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockEdgeKind {
    Unconditional,
    ConditionalTrue,
    ConditionalFalse,
    SubRoutineCall,
    SubRoutineTail,
    SubRoutineStore,
    Dead,
}

impl BlockEdgeKind {
    /// True for the edge kind a call site's entry edge carries.
    #[must_use]
    pub fn is_subroutine_call(self) -> bool {
        matches!(self, Self::SubRoutineCall)
    }
}

/// The DOT-tag-string-mapping discriminant of a [`ControlStructure`], kept
/// distinct from it so the NSS/DOT writers can match on a bare tag without
/// dragging the (possibly absent) payload along.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlStructureKind {
    None,
    DoWhileHead,
    DoWhileTail,
    DoWhileNext,
    WhileHead,
    WhileTail,
    WhileNext,
    Break,
    Continue,
    Return,
    IfCond,
    IfTrue,
    IfElse,
    IfNext,
}

/// A structured-control-flow annotation on a block. Most kinds carry no
/// payload; `Return` and `IfCond` carry exactly the block references their
/// reconstruction needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ControlStructure {
    None,
    DoWhileHead,
    DoWhileTail,
    DoWhileNext,
    WhileHead,
    WhileTail,
    WhileNext,
    Break,
    Continue,
    Return {
        retn: BlockId,
    },
    IfCond {
        if_cond: BlockId,
        if_true: BlockId,
        if_else: Option<BlockId>,
        if_next: Option<BlockId>,
    },
    IfTrue,
    IfElse,
    IfNext,
}

impl ControlStructure {
    #[must_use]
    pub fn kind(&self) -> ControlStructureKind {
        match self {
            Self::None => ControlStructureKind::None,
            Self::DoWhileHead => ControlStructureKind::DoWhileHead,
            Self::DoWhileTail => ControlStructureKind::DoWhileTail,
            Self::DoWhileNext => ControlStructureKind::DoWhileNext,
            Self::WhileHead => ControlStructureKind::WhileHead,
            Self::WhileTail => ControlStructureKind::WhileTail,
            Self::WhileNext => ControlStructureKind::WhileNext,
            Self::Break => ControlStructureKind::Break,
            Self::Continue => ControlStructureKind::Continue,
            Self::Return { .. } => ControlStructureKind::Return,
            Self::IfCond { .. } => ControlStructureKind::IfCond,
            Self::IfTrue => ControlStructureKind::IfTrue,
            Self::IfElse => ControlStructureKind::IfElse,
            Self::IfNext => ControlStructureKind::IfNext,
        }
    }
}

/// A maximal straight-line instruction run ending at a terminator or join.
#[derive(Debug, Clone)]
pub struct Block {
    pub entry_address: u32,
    pub instructions: Vec<InstructionId>,
    /// Successor blocks. `children.len() == children_types.len()` always.
    pub children: Vec<BlockId>,
    pub children_types: Vec<BlockEdgeKind>,
    pub subroutine: SubroutineId,
    pub controls: Vec<ControlStructure>,
}

impl Block {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubroutineKind {
    Start,
    Global,
    StoreState,
    #[default]
    Normal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StackAnalyzeState {
    #[default]
    NotStarted,
    Running,
    Finished,
    Failed,
}

/// A logical function: an entry block plus every block reachable from it.
#[derive(Debug, Clone)]
pub struct Subroutine {
    pub entry_address: u32,
    /// First entry is the entry block.
    pub blocks: Vec<BlockId>,
    /// At most one return block.
    pub returns: Option<BlockId>,
    pub kind: SubroutineKind,
    pub stack_analyze_state: StackAnalyzeState,
}

impl Subroutine {
    #[must_use]
    pub fn entry_block(&self) -> Option<BlockId> {
        self.blocks.first().copied()
    }
}

/// A typed SSA-like stack slot inferred by stack analysis.
#[derive(Debug, Clone)]
pub struct Variable {
    pub id: VariableId,
    pub var_type: VariableType,
    /// The instruction that produced this value, if any.
    pub creator: Option<InstructionId>,
    /// Other variable ids denoting the same logical value at different
    /// stack heights. Stored sorted so dumps are deterministic.
    pub siblings: Vec<VariableId>,
}

/// A global variable declared before `main` runs.
#[derive(Debug, Clone)]
pub struct GlobalVariable {
    pub variable: VariableId,
}

/// A compiled NWScript program, read-only from the emitter's perspective.
#[derive(Debug, Clone)]
pub struct Program {
    pub total_size: u32,
    pub game: crate::tables::Game,
    pub instructions: Vec<Instruction>,
    pub blocks: Vec<Block>,
    pub subroutines: Vec<Subroutine>,
    pub variables: Vec<Variable>,
    pub globals: Vec<GlobalVariable>,
    pub has_stack_analysis: bool,
}

impl Program {
    #[must_use]
    pub fn instruction(&self, id: InstructionId) -> &Instruction {
        &self.instructions[id.index()]
    }

    #[must_use]
    pub fn block(&self, id: BlockId) -> &Block {
        &self.blocks[id.index()]
    }

    #[must_use]
    pub fn subroutine(&self, id: SubroutineId) -> &Subroutine {
        &self.subroutines[id.index()]
    }

    #[must_use]
    pub fn variable(&self, id: VariableId) -> &Variable {
        &self.variables[id.index()]
    }

    #[must_use]
    pub fn instruction_count(&self) -> usize {
        self.instructions.len()
    }
}
