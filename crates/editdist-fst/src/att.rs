// AT&T text format output.
//
//   transition:  SOURCE<TAB>TARGET<TAB>INPUT<TAB>OUTPUT<TAB>WEIGHT
//   final state: STATE<TAB>WEIGHT

use std::fmt;
use std::io::{self, Write};

use crate::builder::{AttLine, EditTransducer};

/// [`AttLine`] paired with the epsilon spelling it is rendered with.
pub struct AttDisplay<'a> {
    line: &'a AttLine,
    epsilon: &'a str,
}

impl fmt::Display for AttDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.line {
            AttLine::Transition(t) => write!(
                f,
                "{}\t{}\t{}\t{}\t{}",
                t.source,
                t.target,
                t.input.as_att(self.epsilon),
                t.output.as_att(self.epsilon),
                format_weight(t.weight)
            ),
            AttLine::Final { state, weight } => write!(f, "{state}\t{}", format_weight(*weight)),
        }
    }
}

/// Plain decimal with at least one fractional digit: `1.0`, `0.00001`, never `1e-5`.
pub fn format_weight(weight: f64) -> String {
    let mut text = weight.to_string();
    if weight.is_finite() && !text.contains('.') {
        text.push_str(".0");
    }
    text
}

impl AttLine {
    pub fn display<'a>(&'a self, epsilon: &'a str) -> AttDisplay<'a> {
        AttDisplay {
            line: self,
            epsilon,
        }
    }
}

impl EditTransducer {
    /// Write every line, newline-terminated, in emission order.
    pub fn write_att<W: Write>(&self, mut out: W) -> io::Result<()> {
        for line in self.lines() {
            writeln!(out, "{}", line.display(self.epsilon()))?;
        }
        out.flush()
    }

    /// The whole table as a string.
    pub fn to_att_string(&self) -> String {
        let mut buf = Vec::new();
        // writing into a Vec cannot fail
        let _ = self.write_att(&mut buf);
        String::from_utf8_lossy(&buf).into_owned()
    }
}
