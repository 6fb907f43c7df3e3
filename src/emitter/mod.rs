//! The `Emitter`: four read-only renderings of a [`Program`] into a text
//! sink (listing, assembly, GraphViz DOT, partial NSS).
//!
//! An `Emitter` borrows the program and a [`crate::tables::OpcodeTables`]
//! impl for the duration of a call; it owns no state of its own and never
//! mutates either. See the crate-level docs for the rendering contracts.

mod dot;
mod listing;
mod nss;

use std::fmt::Write;

use tracing::debug_span;

use crate::error::EmitError;
use crate::model::{Program, Subroutine, SubroutineKind, StackAnalyzeState};
use crate::tables::{JumpLabelTarget, OpcodeTables};

/// Renders a [`Program`] into one of four textual forms.
///
/// Generic over `F: OpcodeTables` so the same emitter works for every
/// BioWare Aurora title; a host picks the `OpcodeTables` impl matching the
/// program's `Game` and hands both to `Emitter::new`.
pub struct Emitter<'p, F> {
    program: &'p Program,
    tables: &'p F,
}

impl<'p, F: OpcodeTables> Emitter<'p, F> {
    #[must_use]
    pub fn new(program: &'p Program, tables: &'p F) -> Self {
        Self { program, tables }
    }

    /// `"; <N> bytes, <M> instructions"` followed by a blank line.
    pub(crate) fn write_info<W: Write>(&self, sink: &mut W) -> Result<(), EmitError> {
        writeln!(
            sink,
            "; {} bytes, {} instructions\n",
            self.program.total_size,
            self.program.instruction_count()
        )?;
        Ok(())
    }

    /// The engine-type legend, or nothing if the game has no engine types.
    pub(crate) fn write_engine_types<W: Write>(&self, sink: &mut W) -> Result<(), EmitError> {
        let count = self.tables.engine_type_count(self.program.game);
        if count == 0 {
            return Ok(());
        }
        writeln!(sink, "; Engine types:")?;
        for i in 0..count {
            let specific = self.tables.engine_type_name(self.program.game, i);
            if specific.is_empty() {
                continue;
            }
            let generic = self.tables.generic_engine_type_name(i);
            writeln!(sink, "; {generic}: {specific}")?;
        }
        writeln!(sink)?;
        Ok(())
    }

    /// §4.3: a subroutine's signature, or empty if stack analysis hasn't
    /// finished for it (or the program has none at all).
    pub(crate) fn subroutine_signature(&self, sub: &Subroutine) -> String {
        if !self.program.has_stack_analysis {
            return String::new();
        }
        if matches!(
            sub.kind,
            SubroutineKind::Start | SubroutineKind::Global | SubroutineKind::StoreState
        ) {
            return String::new();
        }
        if sub.stack_analyze_state != StackAnalyzeState::Finished {
            return String::new();
        }
        self.tables.format_signature(sub, self.program.game, true)
    }

    /// §4.3 for an instruction: delegates to the owning subroutine only when
    /// the instruction is itself a subroutine entry point.
    pub(crate) fn instruction_signature(
        &self,
        instr: &crate::model::Instruction,
    ) -> String {
        if instr.address_kind != crate::model::AddressKind::SubRoutine {
            return String::new();
        }
        let block = self.program.block(instr.block);
        self.subroutine_signature(self.program.subroutine(block.subroutine))
    }

    /// The label a jump target or subroutine entry should render under:
    /// the formatter's label name if it has one, else a synthetic
    /// destination label for the bare address.
    pub(crate) fn label_or_destination(&self, target: JumpLabelTarget<'_>, addr: u32) -> String {
        let label = self.tables.format_jump_label_name(target);
        if label.is_empty() {
            self.tables.format_jump_destination(addr)
        } else {
            label
        }
    }

    pub(crate) fn span(&self, mode: &'static str) -> tracing::span::EnteredSpan {
        debug_span!(
            "ncs_emit",
            mode,
            instructions = self.program.instruction_count(),
            blocks = self.program.blocks.len(),
            subroutines = self.program.subroutines.len(),
        )
        .entered()
    }
}

/// Zero-padded 8-digit uppercase hex, per §3's address-formatting invariant.
pub(crate) fn addr8x(addr: u32) -> String {
    format!("{addr:08X}")
}
