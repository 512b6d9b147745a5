// shutter/src/ui/output_format.rs
//! Formatting of status messages and masking summaries.
//!
//! Messages go to stderr so stdout stays reserved for command output that
//! scripts may consume. Color is applied only when the target is a terminal.

use std::io::{self, Write};

use is_terminal::IsTerminal;
use owo_colors::{OwoColorize, Style};
use shutter_core::MaskReport;
use std::collections::BTreeMap;

fn print_styled<W: Write>(writer: &mut W, tag: &str, msg: &str, style: Style, color: bool) -> io::Result<()> {
    if color {
        writeln!(writer, "{} {}", tag.style(style), msg)
    } else {
        writeln!(writer, "{} {}", tag, msg)
    }
}

pub fn print_info_message<W: Write>(writer: &mut W, msg: &str, color: bool) -> io::Result<()> {
    print_styled(writer, "[info]", msg, Style::new().cyan(), color)
}

pub fn print_success_message<W: Write>(writer: &mut W, msg: &str, color: bool) -> io::Result<()> {
    print_styled(writer, "[ok]", msg, Style::new().green().bold(), color)
}

/// Helper for printing info messages to stderr.
pub fn info_msg(msg: impl AsRef<str>) {
    let color = io::stderr().is_terminal();
    let _ = print_info_message(&mut io::stderr(), msg.as_ref(), color);
}

pub fn success_msg(msg: impl AsRef<str>) {
    let color = io::stderr().is_terminal();
    let _ = print_success_message(&mut io::stderr(), msg.as_ref(), color);
}

/// Prints how many fragments were masked, grouped by tier and rule.
pub fn print_mask_summary<W: Write>(writer: &mut W, report: &MaskReport, color: bool) -> io::Result<()> {
    let header = format!(
        "Masked {} of {} text fragments.",
        report.redaction_count(),
        report.fragments_scanned
    );
    if color {
        writeln!(writer, "{}", header.bold())?;
    } else {
        writeln!(writer, "{}", header)?;
    }

    let mut per_rule: BTreeMap<(String, &str), usize> = BTreeMap::new();
    for redaction in &report.redactions {
        *per_rule
            .entry((redaction.tier.to_string(), redaction.rule.as_str()))
            .or_default() += 1;
    }
    for ((tier, rule), count) in per_rule {
        writeln!(writer, "  {tier:<12} {rule:<32} {count}")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use shutter_core::{AppliedRedaction, RedactionRegion, RuleTier};

    fn redaction(tier: RuleTier, rule: &str) -> AppliedRedaction {
        AppliedRedaction {
            region: RedactionRegion { min_x: 0.0, min_y: 0.0, max_x: 1.0, max_y: 1.0 },
            tier,
            rule: rule.to_string(),
            confidence: 0.9,
            text_hash: String::new(),
        }
    }

    #[test]
    fn summary_groups_by_rule() {
        let report = MaskReport {
            fragments_scanned: 5,
            redactions: vec![
                redaction(RuleTier::Fixed, "phone"),
                redaction(RuleTier::Fixed, "phone"),
                redaction(RuleTier::Keyword, "ACME"),
            ],
        };
        let mut out = Vec::new();
        print_mask_summary(&mut out, &report, false).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("Masked 3 of 5 text fragments."));
        assert!(text.lines().any(|l| l.contains("phone") && l.trim_end().ends_with('2')));
        assert!(text.lines().any(|l| l.contains("ACME") && l.trim_end().ends_with('1')));
    }

    #[test]
    fn plain_messages_have_no_escape_codes() {
        let mut out = Vec::new();
        print_info_message(&mut out, "careful", false).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "[info] careful\n");
    }
}
