use std::fmt::{self, Write};

use crate::vm::QuizVm;

pub fn render_quiz(out: &mut impl Write, vm: &QuizVm) -> fmt::Result {
    writeln!(out, "{}", vm.title)?;
    writeln!(out, "{}", vm.subtitle)?;
    for (index, question) in vm.questions.iter().enumerate() {
        writeln!(out)?;
        writeln!(out, "{}. {}", index + 1, question.text)?;
        for option in &question.options {
            let mark = if option.selected { "(x)" } else { "( )" };
            writeln!(out, "  {mark} {}. {}", option.letter, option.text)?;
        }
    }
    writeln!(out)?;
    let submit = if vm.can_submit {
        format!("[{}]", vm.submit_label)
    } else {
        format!("({})", vm.submit_label)
    };
    writeln!(out, "Answered {}/{} {submit}", vm.answered, vm.total)
}
