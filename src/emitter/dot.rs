//! §4.5 GraphViz DOT writer: subroutine clusters, large-block subdivision,
//! and colored inter-block edges.

use std::fmt::Write;

use super::{addr8x, Emitter};
use crate::error::EmitError;
use crate::model::{Block, BlockEdgeKind, ControlStructureKind, Subroutine};
use crate::tables::{JumpLabelTarget, OpcodeTables};

const PREAMBLE: &str = "digraph {\n  overlap=false\n  concentrate=true\n  splines=ortho\n\n";

/// Maximum instruction lines per DOT node before a block is subdivided.
const MAX_LINES_PER_NODE: usize = 10;

fn ceil_div(n: usize, d: usize) -> usize {
    n.div_ceil(d)
}

fn control_tag(kind: ControlStructureKind) -> &'static str {
    match kind {
        ControlStructureKind::None => "<NONE>",
        ControlStructureKind::DoWhileHead => "<DOWHILEHEAD>",
        ControlStructureKind::DoWhileTail => "<DOWHILETAIL>",
        ControlStructureKind::DoWhileNext => "<DOWHILENEXT>",
        ControlStructureKind::WhileHead => "<WHILEHEAD>",
        ControlStructureKind::WhileTail => "<WHILETAIL>",
        ControlStructureKind::WhileNext => "<WHILENEXT>",
        ControlStructureKind::Break => "<BREAK>",
        ControlStructureKind::Continue => "<CONTINUE>",
        ControlStructureKind::Return => "<RETURN>",
        ControlStructureKind::IfCond => "<IFCOND>",
        ControlStructureKind::IfTrue => "<IFTRUE>",
        ControlStructureKind::IfElse => "<IFELSE>",
        ControlStructureKind::IfNext => "<IFNEXT>",
    }
}

fn edge_color(kind: BlockEdgeKind) -> &'static str {
    match kind {
        BlockEdgeKind::Unconditional => "blue",
        BlockEdgeKind::ConditionalTrue => "green",
        BlockEdgeKind::ConditionalFalse => "red",
        BlockEdgeKind::SubRoutineCall => "cyan",
        BlockEdgeKind::SubRoutineTail => "orange",
        BlockEdgeKind::SubRoutineStore => "purple",
        BlockEdgeKind::Dead => "gray40",
    }
}

/// Escapes a formatter-provided string for embedding in a DOT label.
fn escape_label(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            _ => out.push(c),
        }
    }
    out
}

/// Number of DOT nodes a block with `k` instructions subdivides into.
fn node_count(k: usize) -> usize {
    ceil_div(k, MAX_LINES_PER_NODE).max(1)
}

impl<'p, F: OpcodeTables> Emitter<'p, F> {
    /// A subroutine-clustered CFG, one node per `MAX_LINES_PER_NODE`
    /// instructions in a block, edges colored by [`BlockEdgeKind`].
    pub fn create_dot<W: Write>(
        &self,
        sink: &mut W,
        print_control_types: bool,
    ) -> Result<(), EmitError> {
        let _span = self.span("dot");
        sink.write_str(PREAMBLE)?;

        for sub in &self.program.subroutines {
            self.write_cluster(sink, sub, print_control_types)?;
        }
        for block in &self.program.blocks {
            self.write_block_edges(sink, block)?;
        }

        sink.write_str("}\n")?;
        Ok(())
    }

    fn write_cluster<W: Write>(
        &self,
        sink: &mut W,
        sub: &Subroutine,
        print_control_types: bool,
    ) -> Result<(), EmitError> {
        let Some(entry_id) = sub.entry_block() else {
            return Ok(());
        };
        if self.program.block(entry_id).is_empty() {
            return Ok(());
        }

        let label = self.cluster_label(sub);
        writeln!(sink, "  subgraph cluster_s{} {{", addr8x(sub.entry_address))?;
        writeln!(sink, "    style=filled")?;
        writeln!(sink, "    color=lightgrey")?;
        writeln!(sink, "    label=\"{}\"", escape_label(&label))?;
        writeln!(sink)?;

        for &block_id in &sub.blocks {
            self.write_block_nodes(sink, self.program.block(block_id), print_control_types)?;
        }

        writeln!(sink, "  }}")?;
        Ok(())
    }

    fn cluster_label(&self, sub: &Subroutine) -> String {
        let signature = self.subroutine_signature(sub);
        if !signature.is_empty() {
            return signature;
        }
        self.label_or_destination(JumpLabelTarget::Subroutine(sub), sub.entry_address)
    }

    fn block_header_label(&self, block: &Block) -> String {
        match block.instructions.first() {
            Some(&first) => self.label_or_destination(
                JumpLabelTarget::Instruction(self.program.instruction(first)),
                block.entry_address,
            ),
            None => self.tables.format_jump_destination(block.entry_address),
        }
    }

    fn write_block_nodes<W: Write>(
        &self,
        sink: &mut W,
        block: &Block,
        print_control_types: bool,
    ) -> Result<(), EmitError> {
        let k = block.instructions.len();
        let n = node_count(k);
        let lines_per_node = ceil_div(k, n);

        let mut labels: Vec<String> = vec![String::new(); n];

        if print_control_types && !block.controls.is_empty() {
            let mut prefix = String::new();
            for ctrl in &block.controls {
                prefix.push_str(control_tag(ctrl.kind()));
                prefix.push_str("\\n");
            }
            prefix.push_str("\\n");
            labels[0].push_str(&prefix);
        }

        labels[0].push_str(&escape_label(&self.block_header_label(block)));
        labels[0].push_str(":\\l");

        if lines_per_node > 0 {
            for (j, &instr_id) in block.instructions.iter().enumerate() {
                let node = (j / lines_per_node).min(n - 1);
                let mnemonic = self
                    .tables
                    .format_instruction(self.program.instruction(instr_id), self.program.game);
                labels[node].push_str("  ");
                labels[node].push_str(&escape_label(&mnemonic));
                labels[node].push_str("\\l");
            }
        }

        let addr = addr8x(block.entry_address);
        for (i, label) in labels.iter().enumerate() {
            writeln!(
                sink,
                "    b{addr}_{i} [ shape=box label=\"{label}\" ]"
            )?;
        }
        if n > 1 {
            let chain = (0..n)
                .map(|i| format!("b{addr}_{i}"))
                .collect::<Vec<_>>()
                .join(" -> ");
            writeln!(sink, "    {chain} [ style=dotted ]")?;
        }
        Ok(())
    }

    fn write_block_edges<W: Write>(&self, sink: &mut W, block: &Block) -> Result<(), EmitError> {
        debug_assert_eq!(
            block.children.len(),
            block.children_types.len(),
            "children and children_types must stay parallel"
        );
        let last = node_count(block.instructions.len()) - 1;
        let from = format!("b{}_{last}", addr8x(block.entry_address));

        for (child_id, &kind) in block.children.iter().zip(&block.children_types) {
            let child = self.program.block(*child_id);
            let to = format!("b{}_0", addr8x(child.entry_address));

            let mut attr = format!("color={}", edge_color(kind));
            if child.entry_address < block.entry_address {
                attr.push_str(" style=bold");
            }
            if child.subroutine != block.subroutine {
                attr.push_str(" constraint=false");
            }
            writeln!(sink, "  {from} -> {to} [ {attr} ]")?;
        }
        Ok(())
    }
}
