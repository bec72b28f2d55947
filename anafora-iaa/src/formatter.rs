//! Plain-text rendering of agreement reports.

use std::fmt::Write;

use unicode_width::UnicodeWidthStr;

use crate::agreement::{AgreementCounts, AgreementTable};
use crate::diff::DocumentDiff;
use crate::report::{IaaReport, Side};

/// Render a full report: header, agreement tables and the entity diff.
pub fn format_report(report: &IaaReport) -> String {
    let mut output = String::new();

    writeln!(
        output,
        "Agreement: {} vs {}",
        describe(&report.left),
        describe(&report.right)
    )
    .unwrap();
    writeln!(output).unwrap();

    output.push_str(&format_table("Entity types", "type", &report.entity_types));
    writeln!(output).unwrap();
    output.push_str(&format_table("Properties", "property", &report.properties));
    if let Some(relations) = &report.relations {
        writeln!(output).unwrap();
        output.push_str(&format_table("Relations", "relation", relations));
    }
    writeln!(output).unwrap();
    output.push_str(&format_diff(&report.diff, &report.left, &report.right));

    output
}

fn describe(side: &Side) -> String {
    if side.annotator.is_empty() {
        format!("{} ({} entities)", side.document, side.entities)
    } else {
        format!("{} [{}] ({} entities)", side.document, side.annotator, side.entities)
    }
}

/// Render one table with aligned columns and an `overall` row.
pub fn format_table(heading: &str, label: &str, table: &AgreementTable) -> String {
    let mut output = String::new();
    writeln!(output, "{}", heading).unwrap();

    if table.is_empty() {
        writeln!(output, "  (none)").unwrap();
        return output;
    }

    let width = table
        .rows()
        .map(|(key, _)| key.width())
        .chain([label.width(), "overall".width()])
        .max()
        .unwrap_or(0);

    writeln!(
        output,
        "  {}  {:>5}  {:>5}  {:>5}",
        pad(label, width),
        "agree",
        "total",
        "ratio"
    )
    .unwrap();
    for (key, counts) in table.rows() {
        write_row(&mut output, key, width, counts);
    }
    write_row(&mut output, "overall", width, &table.overall());

    output
}

fn write_row(output: &mut String, key: &str, width: usize, counts: &AgreementCounts) {
    writeln!(
        output,
        "  {}  {:>5}  {:>5}  {:>5}",
        pad(key, width),
        counts.agree,
        counts.total,
        format_ratio(counts)
    )
    .unwrap();
}

fn format_ratio(counts: &AgreementCounts) -> String {
    counts
        .ratio()
        .map(|ratio| format!("{:.3}", ratio))
        .unwrap_or_else(|| "-".to_string())
}

/// Left-align by display width so wide characters keep columns straight.
fn pad(text: &str, width: usize) -> String {
    let fill = width.saturating_sub(text.width());
    format!("{}{}", text, " ".repeat(fill))
}

/// Render the entity diff.
pub fn format_diff(diff: &DocumentDiff, left: &Side, right: &Side) -> String {
    let mut output = String::new();
    writeln!(output, "Differences").unwrap();

    if diff.is_empty() {
        writeln!(output, "  (none)").unwrap();
        return output;
    }

    for id in &diff.only_left {
        writeln!(output, "  only in {}: {}", side_name(left), id).unwrap();
    }
    for id in &diff.only_right {
        writeln!(output, "  only in {}: {}", side_name(right), id).unwrap();
    }
    for change in &diff.changed {
        writeln!(
            output,
            "  {} ~ {} [{}]",
            change.left_id, change.right_id, change.span
        )
        .unwrap();
        for (field, [ours, theirs]) in &change.fields {
            writeln!(output, "    {}: {:?} vs {:?}", field, ours, theirs).unwrap();
        }
    }

    output
}

fn side_name(side: &Side) -> &str {
    if side.annotator.is_empty() {
        &side.document
    } else {
        &side.annotator
    }
}
