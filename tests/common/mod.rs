//! Shared fixtures for the integration tests: a minimal `OpcodeTables` fake
//! and a few hand-built `Program`s, in the same spirit as
//! `messense-llvm-bitcode-rs`'s `tests/test_bitcode_reader.rs` building a
//! `Bitcode` straight from fixture bytes rather than through a mock crate.
//!
//! Not every test binary uses every helper here; that's expected for a
//! shared fixture module.
#![allow(dead_code)]

use std::collections::HashMap;

use ncs_emit::ids::{BlockId, InstructionId, SubroutineId, VariableId};
use ncs_emit::model::{
    AddressKind, Arg, Block, ControlStructure, GlobalVariable, Instruction, Program, Subroutine,
    SubroutineKind, StackAnalyzeState, Variable,
};
use ncs_emit::opcode::Opcode;
use ncs_emit::tables::{Game, JumpLabelTarget, OpcodeTables, VariableType};

/// A deliberately dumb `OpcodeTables`: mnemonics are the opcode's debug name
/// uppercased, names/labels default to an address- or id-derived spelling
/// unless a test overrides one in the lookup maps.
#[derive(Default)]
pub struct FakeTables {
    pub jump_labels: HashMap<u32, String>,
    pub signatures: HashMap<u32, String>,
    pub variable_names: HashMap<u32, String>,
    pub function_names: HashMap<u32, String>,
    pub engine_type_names: HashMap<usize, String>,
    pub generic_engine_type_names: HashMap<usize, String>,
    pub engine_type_count: usize,
}

impl OpcodeTables for FakeTables {
    fn format_bytes(&self, instr: &Instruction) -> String {
        instr
            .raw_bytes
            .iter()
            .map(|b| format!("{b:02x}"))
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn format_instruction(&self, instr: &Instruction, _game: Game) -> String {
        format!("{:?}", instr.opcode).to_uppercase()
    }

    fn format_instruction_data(&self, instr: &Instruction) -> String {
        match instr.args.first() {
            Some(Arg::Int(v)) => v.to_string(),
            Some(Arg::Float(v)) => format!("{v:?}"),
            Some(Arg::String(s)) => format!("\"{s}\""),
            Some(Arg::Object(v)) => v.to_string(),
            None => String::new(),
        }
    }

    fn format_jump_label_name(&self, target: JumpLabelTarget<'_>) -> String {
        let addr = match target {
            JumpLabelTarget::Instruction(instr) => instr.address,
            JumpLabelTarget::Subroutine(sub) => sub.entry_address,
        };
        self.jump_labels.get(&addr).cloned().unwrap_or_default()
    }

    fn format_jump_destination(&self, addr: u32) -> String {
        format!("loc_{addr:08X}")
    }

    fn format_signature(&self, sub: &Subroutine, _game: Game, _with_names: bool) -> String {
        self.signatures
            .get(&sub.entry_address)
            .cloned()
            .unwrap_or_default()
    }

    fn format_variable_name(&self, var: &Variable) -> String {
        self.variable_names
            .get(&var.id.0)
            .cloned()
            .unwrap_or_else(|| format!("v{}", var.id.0))
    }

    fn variable_type_name(&self, ty: VariableType, _game: Game) -> String {
        match ty {
            VariableType::Int => "int".to_string(),
            VariableType::Float => "float".to_string(),
            VariableType::String => "string".to_string(),
            VariableType::Vector => "vector".to_string(),
            VariableType::Object => "object".to_string(),
            VariableType::Engine(i) => format!("engine{i}"),
        }
    }

    fn function_name(&self, _game: Game, id: u32) -> String {
        self.function_names
            .get(&id)
            .cloned()
            .unwrap_or_else(|| format!("Func{id}"))
    }

    fn engine_type_count(&self, _game: Game) -> usize {
        self.engine_type_count
    }

    fn engine_type_name(&self, _game: Game, i: usize) -> String {
        self.engine_type_names.get(&i).cloned().unwrap_or_default()
    }

    fn generic_engine_type_name(&self, i: usize) -> String {
        self.generic_engine_type_names
            .get(&i)
            .cloned()
            .unwrap_or_default()
    }
}

/// A minimal valid program: one subroutine holding one block with one
/// instruction (`RETN`), no stack analysis.
pub fn retn_only_program() -> Program {
    let block = Block {
        entry_address: 0,
        instructions: vec![InstructionId(0)],
        children: vec![],
        children_types: vec![],
        subroutine: SubroutineId(0),
        controls: vec![],
    };
    let instr = Instruction {
        address: 0,
        opcode: Opcode::Retn,
        raw_bytes: vec![0x20],
        args: vec![],
        follower: None,
        branches: vec![],
        address_kind: AddressKind::None,
        block: BlockId(0),
        stack: vec![],
        variables: vec![],
    };
    let sub = Subroutine {
        entry_address: 0,
        blocks: vec![BlockId(0)],
        returns: None,
        kind: SubroutineKind::Start,
        stack_analyze_state: StackAnalyzeState::NotStarted,
    };
    Program {
        total_size: 1,
        game: Game::Nwn,
        instructions: vec![instr],
        blocks: vec![block],
        subroutines: vec![sub],
        variables: vec![],
        globals: vec![],
        has_stack_analysis: false,
    }
}

/// Two instructions in one block: address 0 falls through to address 1,
/// which terminates.
pub fn two_instruction_listing_program() -> Program {
    let instr0 = Instruction {
        address: 0,
        opcode: Opcode::Nop,
        raw_bytes: vec![0x2C],
        args: vec![],
        follower: Some(InstructionId(1)),
        branches: vec![],
        address_kind: AddressKind::None,
        block: BlockId(0),
        stack: vec![],
        variables: vec![],
    };
    let instr1 = Instruction {
        address: 1,
        opcode: Opcode::Retn,
        raw_bytes: vec![0x20],
        args: vec![],
        follower: None,
        branches: vec![],
        address_kind: AddressKind::None,
        block: BlockId(0),
        stack: vec![],
        variables: vec![],
    };
    let block = Block {
        entry_address: 0,
        instructions: vec![InstructionId(0), InstructionId(1)],
        children: vec![],
        children_types: vec![],
        subroutine: SubroutineId(0),
        controls: vec![],
    };
    let sub = Subroutine {
        entry_address: 0,
        blocks: vec![BlockId(0)],
        returns: None,
        kind: SubroutineKind::Start,
        stack_analyze_state: StackAnalyzeState::NotStarted,
    };
    Program {
        total_size: 2,
        game: Game::Nwn,
        instructions: vec![instr0, instr1],
        blocks: vec![block],
        subroutines: vec![sub],
        variables: vec![],
        globals: vec![],
        has_stack_analysis: false,
    }
}

/// A block of `count` `NOP` instructions at `addr`, belonging to
/// `subroutine`, wired up with sequential `follower`s. Defaults to
/// `BlockId(0)`; use [`straight_line_block_in`] when a test needs the
/// instructions' `block` back-reference to point elsewhere.
pub fn straight_line_block(
    addr: u32,
    count: usize,
    subroutine: SubroutineId,
    first_instruction_id: u32,
) -> (Block, Vec<Instruction>) {
    straight_line_block_in(addr, count, subroutine, first_instruction_id, BlockId(0))
}

/// As [`straight_line_block`], but with an explicit owning `block_id` for
/// every generated instruction's `block` back-reference.
pub fn straight_line_block_in(
    addr: u32,
    count: usize,
    subroutine: SubroutineId,
    first_instruction_id: u32,
    block_id: BlockId,
) -> (Block, Vec<Instruction>) {
    let mut instructions = Vec::with_capacity(count);
    let ids: Vec<InstructionId> = (0..count)
        .map(|i| InstructionId(first_instruction_id + i as u32))
        .collect();
    for i in 0..count {
        instructions.push(Instruction {
            address: addr + i as u32,
            opcode: Opcode::Nop,
            raw_bytes: vec![0x2C],
            args: vec![],
            follower: ids.get(i + 1).copied(),
            branches: vec![],
            address_kind: AddressKind::None,
            block: block_id,
            stack: vec![],
            variables: vec![],
        });
    }
    let block = Block {
        entry_address: addr,
        instructions: ids,
        children: vec![],
        children_types: vec![],
        subroutine,
        controls: vec![],
    };
    (block, instructions)
}

pub fn simple_variable(id: u32, var_type: VariableType, creator: Option<InstructionId>) -> Variable {
    Variable {
        id: VariableId(id),
        var_type,
        creator,
        siblings: vec![],
    }
}

pub fn global(id: u32) -> GlobalVariable {
    GlobalVariable {
        variable: VariableId(id),
    }
}

pub fn if_control(
    if_cond: BlockId,
    if_true: BlockId,
    if_else: Option<BlockId>,
    if_next: Option<BlockId>,
) -> ControlStructure {
    ControlStructure::IfCond {
        if_cond,
        if_true,
        if_else,
        if_next,
    }
}
