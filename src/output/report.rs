//! Plain-text rendering of analysis results and stored records

use crate::analyzer::AnalysisResult;
use crate::state::AnalysisStatus;
use crate::storage::UrlRecord;
use std::fmt::Write;

/// Renders every field of a result, one per line
pub fn format_result(result: &AnalysisResult) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Status: {}", result.status);

    if result.status == AnalysisStatus::Error {
        if let Some(message) = &result.error_message {
            let _ = writeln!(out, "Error: {}", message);
        }
        return out;
    }

    if !result.status.is_terminal() {
        return out;
    }

    let _ = writeln!(out, "HTML version: {}", result.html_version);
    let _ = writeln!(out, "Title: {}", result.title);

    let _ = writeln!(out, "Headings:");
    for (level, count) in result.headings.levels().iter().enumerate() {
        let _ = writeln!(out, "  h{}: {}", level + 1, count);
    }

    let _ = writeln!(out, "Links:");
    let _ = writeln!(out, "  Internal: {}", result.internal_links);
    let _ = writeln!(out, "  External: {}", result.external_links);
    let _ = writeln!(out, "  Broken: {}", result.broken_links);

    let login = if result.has_login_form { "yes" } else { "no" };
    let _ = writeln!(out, "Login form: {}", login);
    out
}

/// Renders a stored record with its header and full result
pub fn format_record(record: &UrlRecord) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "=== Record {} ===", record.id);
    let _ = writeln!(out, "Address: {}", record.address);
    let _ = writeln!(out, "Created: {}", record.created_at);
    let _ = writeln!(out, "Updated: {}", record.updated_at);
    out.push_str(&format_result(&record.result));
    out
}

/// Renders one summary line per record
pub fn format_record_line(record: &UrlRecord) -> String {
    let r = &record.result;
    format!(
        "{:>5}  {:<8} {:<40} int={} ext={} broken={} login={}",
        record.id,
        r.status,
        record.address,
        r.internal_links,
        r.external_links,
        r.broken_links,
        r.has_login_form
    )
}

/// Prints a result to stdout
pub fn print_result(result: &AnalysisResult) {
    print!("{}", format_result(result));
}

/// Prints a stored record to stdout
pub fn print_record(record: &UrlRecord) {
    print!("{}", format_record(record));
}

/// Prints a table of records to stdout
pub fn print_records(records: &[UrlRecord]) {
    if records.is_empty() {
        println!("No records");
        return;
    }

    println!("{:>5}  {:<8} {:<40} links", "ID", "STATUS", "ADDRESS");
    for record in records {
        println!("{}", format_record_line(record));
    }
}
