//! §4.2 listing/assembly writer and §4.4 stack dump.

use std::fmt::Write;

use super::{addr8x, Emitter};
use crate::error::EmitError;
use crate::model::Instruction;
use crate::tables::{JumpLabelTarget, OpcodeTables};

impl<'p, F: OpcodeTables> Emitter<'p, F> {
    /// Address, raw bytes and mnemonic per instruction, with optional stack
    /// dumps and jump-label prologues.
    pub fn create_listing<W: Write>(
        &self,
        sink: &mut W,
        print_stack: bool,
    ) -> Result<(), EmitError> {
        let _span = self.span("listing");
        self.write_info(sink)?;
        self.write_engine_types(sink)?;
        for instr in &self.program.instructions {
            self.write_label_prologue(sink, instr)?;
            if self.program.has_stack_analysis && print_stack {
                self.write_stack_dump(sink, instr, 36)?;
            }
            let bytes = self.tables.format_bytes(instr);
            let mnemonic = self.tables.format_instruction(instr, self.program.game);
            writeln!(sink, "  {} {:>26} {}", addr8x(instr.address), bytes, mnemonic)?;
            if instr.follower.is_none() {
                writeln!(sink, "  -------- -------------------------- ---")?;
            }
        }
        Ok(())
    }

    /// Mnemonics only, no addresses or raw bytes.
    pub fn create_assembly<W: Write>(
        &self,
        sink: &mut W,
        print_stack: bool,
    ) -> Result<(), EmitError> {
        let _span = self.span("assembly");
        self.write_info(sink)?;
        self.write_engine_types(sink)?;
        for instr in &self.program.instructions {
            self.write_label_prologue(sink, instr)?;
            if self.program.has_stack_analysis && print_stack {
                self.write_stack_dump(sink, instr, 36)?;
            }
            let mnemonic = self.tables.format_instruction(instr, self.program.game);
            writeln!(sink, "  {mnemonic}")?;
            if instr.follower.is_none() {
                writeln!(sink)?;
            }
        }
        Ok(())
    }

    fn write_label_prologue<W: Write>(
        &self,
        sink: &mut W,
        instr: &Instruction,
    ) -> Result<(), EmitError> {
        let label = self
            .tables
            .format_jump_label_name(JumpLabelTarget::Instruction(instr));
        if label.is_empty() {
            return Ok(());
        }
        let signature = self.instruction_signature(instr);
        if signature.is_empty() {
            writeln!(sink, "{label}:")?;
        } else {
            writeln!(sink, "{label}: ; {signature}")?;
        }
        Ok(())
    }

    /// §4.4: a bordered table of the instruction's stack, top-of-stack first.
    fn write_stack_dump<W: Write>(
        &self,
        sink: &mut W,
        instr: &Instruction,
        indent: usize,
    ) -> Result<(), EmitError> {
        let pad = " ".repeat(indent);
        let depth = instr.stack.len();
        writeln!(sink, "{pad}; .--- Stack: {depth:<4} ---")?;
        for (idx, &var_id) in instr.stack.iter().enumerate() {
            let var = self.program.variable(var_id);
            let type_name = self
                .tables
                .variable_type_name(var.var_type, self.program.game)
                .to_lowercase();
            let creator_addr = var
                .creator
                .map(|c| self.program.instruction(c).address)
                .unwrap_or(0);
            write!(
                sink,
                "{pad}; | {idx:>4} - {:>6}: {type_name:<8} ({})",
                var.id.0,
                addr8x(creator_addr)
            )?;
            if !var.siblings.is_empty() {
                let csv = var
                    .siblings
                    .iter()
                    .map(|id| id.0.to_string())
                    .collect::<Vec<_>>()
                    .join(",");
                write!(sink, " ({csv})")?;
            }
            writeln!(sink)?;
        }
        writeln!(sink, "{pad}; '--- ---------- ---")?;
        Ok(())
    }
}
