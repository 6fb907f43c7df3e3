//! The pure, game-specific helper contract the emitter renders through.
//!
//! None of this is implemented by the crate itself — opcode mnemonics,
//! engine-type tables and per-game function tables are a decode-layer
//! concern (see the crate's top-level docs). `OpcodeTables` is the single
//! trait an `Emitter` is generic over, the same way
//! `messense-llvm-bitcode-rs`'s `BitStreamReader` is generic over a
//! `BitStreamVisitor` supplied by the caller.

use crate::model::{Instruction, Subroutine, Variable};

/// Which BioWare Aurora-engine title a program was compiled for. Drives the
/// opcode-to-name, engine-type and function tables an `OpcodeTables` impl
/// consults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Game {
    Nwn,
    Nwn2,
    Kotor,
    Kotor2,
    Jade,
    Witcher,
}

/// The semantic type of a stack-analysed [`Variable`](crate::model::Variable).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VariableType {
    Int,
    Float,
    String,
    Vector,
    Object,
    /// A game-specific engine type, indexed as the analysis pass assigned it.
    Engine(u16),
}

/// Disambiguates the two call sites `format_jump_label_name` is used from:
/// a single instruction's own label, or a subroutine's entry label.
pub enum JumpLabelTarget<'a> {
    Instruction(&'a Instruction),
    Subroutine(&'a Subroutine),
}

/// Pure formatting/naming helpers consumed from the analysis layer. An
/// `Emitter` never constructs one of these itself; a caller supplies an impl
/// tied to the decode tables for the program's [`Game`].
pub trait OpcodeTables {
    /// Hex dump of an instruction's raw bytes, space-separated.
    fn format_bytes(&self, instr: &Instruction) -> String;

    /// Mnemonic plus operand rendering for the listing/assembly/DOT views.
    fn format_instruction(&self, instr: &Instruction, game: Game) -> String;

    /// Constant-literal rendering for `CONST` opcodes, used by the NSS
    /// writer.
    fn format_instruction_data(&self, instr: &Instruction) -> String;

    /// A human label for a jump target, or empty if it has none.
    fn format_jump_label_name(&self, target: JumpLabelTarget<'_>) -> String;

    /// A synthetic label for a bare address with no assigned name.
    fn format_jump_destination(&self, addr: u32) -> String;

    /// Pretty-printed subroutine signature, e.g. `int DoStuff(int a, object b)`.
    fn format_signature(&self, sub: &Subroutine, game: Game, with_names: bool) -> String;

    /// Deterministic spelling for a stack-analysed variable, e.g. `i5`.
    fn format_variable_name(&self, var: &Variable) -> String;

    /// The NSS type keyword for a variable type (`int`, `float`, `object`, …).
    fn variable_type_name(&self, ty: VariableType, game: Game) -> String;

    /// The engine API name for a numeric `ACTION` function id.
    fn function_name(&self, game: Game, id: u32) -> String;

    /// Number of engine types the given game defines (may be 0).
    fn engine_type_count(&self, game: Game) -> usize;

    /// The game-specific name of engine type `i`, or empty if unused.
    fn engine_type_name(&self, game: Game, i: usize) -> String;

    /// The generic (game-independent) name of engine type `i`.
    fn generic_engine_type_name(&self, i: usize) -> String;
}
