//! CLI presentation: reconcile reports and account summaries as terminal text.

use crate::model::Account;
use crate::reconcile::ReconcileReport;
use comfy_table::presets::UTF8_BORDERS_ONLY;
use comfy_table::Table;
use owo_colors::OwoColorize;

pub fn format_section_heading(title: &str) -> String {
    format!("{}", title.bold().underline())
}

/// Format a reconcile report: per-tier change counts, then item failures.
pub fn format_reconcile_report(report: &ReconcileReport) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}\n\n", format_section_heading("Reconciliation")));

    if report.is_noop() {
        out.push_str("Remote account already matches the document.\n");
        return out;
    }

    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.set_header(vec!["Tier", "Change", "Applied", "Declined", "Failed"]);
    for ((tier, kind), stats) in &report.changes {
        if stats.applied == 0 && stats.declined == 0 && stats.failed == 0 {
            continue;
        }
        table.add_row(vec![
            tier.as_str().to_string(),
            kind.as_str().to_string(),
            stats.applied.to_string(),
            stats.declined.to_string(),
            stats.failed.to_string(),
        ]);
    }
    out.push_str(&format!("{}\n\n", table));

    if !report.failures.is_empty() {
        out.push_str(&format!("{}\n\n", format_section_heading("Failures")));
        for failure in &report.failures {
            let target = match &failure.list {
                Some(list) => format!("@{} in \"{}\"", failure.username, list),
                None => format!("@{}", failure.username),
            };
            out.push_str(&format!(
                "  {} {} {}: {}\n",
                "✗".red(),
                failure.kind.as_str(),
                target,
                failure.message
            ));
        }
        out.push('\n');
    }

    out.push_str(&format!(
        "Total: {} changes applied, {} failed.\n",
        report.total_applied(),
        report.failures.len()
    ));
    out
}

/// Format an account's contents as a table of lists with member counts.
pub fn format_account_summary(title: &str, account: &Account) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}\n\n", format_section_heading(title)));
    out.push_str(&format!("  Follows: {}\n\n", account.follows.len()));

    if account.lists.is_empty() && account.meta_lists.is_empty() {
        out.push_str("No lists.\n");
        return out;
    }

    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.set_header(vec!["List", "Kind", "Mode", "Entries"]);
    for list in &account.lists {
        table.add_row(vec![
            list.name.clone(),
            "list".to_string(),
            list.mode().as_str().to_string(),
            format!("{} members", list.members.len()),
        ]);
    }
    for meta in &account.meta_lists {
        let refs = meta.lists.as_ref().map(|l| l.len()).unwrap_or(0);
        table.add_row(vec![
            meta.name.clone(),
            "meta-list".to_string(),
            if meta.is_private { "private" } else { "public" }.to_string(),
            format!("{} lists", refs),
        ]);
    }
    out.push_str(&format!("{}\n", table));
    out
}
