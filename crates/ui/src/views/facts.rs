use std::fmt::{self, Write};

use crate::vm::FactsVm;

pub fn render_facts(out: &mut impl Write, vm: &FactsVm) -> fmt::Result {
    let marker = if vm.narration.speaking { " ~))" } else { "" };
    writeln!(out, "=== {} ==={marker}", vm.title)?;
    writeln!(out, "{} ({})", vm.illustration_alt, vm.illustration.src)?;
    let narration = if vm.narration.enabled {
        format!("[{}]", vm.narration.label)
    } else {
        format!("({})", vm.narration.label)
    };
    writeln!(out, "{} {narration}", vm.heading)?;
    writeln!(out, "{}", vm.subtitle)?;
    for fact in &vm.facts {
        writeln!(out, "  * {fact}")?;
    }
    writeln!(out, "[{}]", vm.quiz_label)
}
