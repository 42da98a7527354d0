use std::fmt::{self, Write};

use crate::vm::{CaptureVm, IdentifyingVm};

pub fn render_capture(out: &mut impl Write, vm: &CaptureVm) -> fmt::Result {
    writeln!(out, "{}", vm.heading)?;
    writeln!(out, "{}", vm.instructions)?;
    if let Some(error) = vm.error {
        writeln!(out, "! {error}")?;
    }
    let capture = if vm.can_capture {
        format!("[{}]", vm.capture_label)
    } else {
        format!("({} unavailable)", vm.capture_label)
    };
    writeln!(out, "[{}] {capture}", vm.cancel_label)
}

pub fn render_identifying(out: &mut impl Write, vm: &IdentifyingVm) -> fmt::Result {
    writeln!(out, "{}", vm.heading)?;
    writeln!(out, "{}", vm.message)?;
    if let (Some(mime), Some(bytes)) = (&vm.image_mime_type, vm.image_bytes) {
        writeln!(out, "Captured image: {mime}, {bytes} bytes")?;
    }
    Ok(())
}
