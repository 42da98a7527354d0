use std::fmt::{self, Write};

use crate::vm::ResultVm;

pub fn render_result(out: &mut impl Write, vm: &ResultVm) -> fmt::Result {
    writeln!(out, "{}", vm.headline)?;
    writeln!(out, "{}", vm.summary)?;
    writeln!(out, "{}", vm.encouragement)?;
    writeln!(out, "Completed {}", vm.completed_at_str)?;
    writeln!(out, "[{}]", vm.action_label)
}
