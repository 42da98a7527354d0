use std::fmt::{self, Write};

use crate::vm::HomeVm;

pub fn render_home(out: &mut impl Write, vm: &HomeVm) -> fmt::Result {
    writeln!(out, "*** {} ***", vm.title)?;
    writeln!(out, "{}", vm.tagline)?;
    writeln!(out, "[{}]", vm.call_to_action)
}
