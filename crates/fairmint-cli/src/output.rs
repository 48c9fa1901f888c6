//! Output formatting utilities.

use fairmint_allocation::{AllocationSummary, SerialVerdict, Verdict};
use fairmint_shuffle::SerialDigest;
use serde_json::Value;

/// Formats a value as pretty JSON.
pub fn format_json(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| "{}".to_string())
}

/// Prints the tier summary table.
#[allow(clippy::print_literal)]
pub fn print_summary(summary: &AllocationSummary) {
    println!("{:<16} {}", "TIER", "COUNT");
    println!("{}", "-".repeat(30));
    for tier in &summary.tiers {
        println!("{:<16} {}", truncate(&tier.name, 16), tier.count);
    }
    println!("{:<16} {}", "TOTAL", summary.total);
}

/// Prints the header for shuffle rows.
#[allow(clippy::print_literal)]
pub fn print_rank_header(with_digests: bool) {
    if with_digests {
        println!("{:<10} {:<12} {}", "RANK", "SERIAL", "DIGEST");
        println!("{}", "-".repeat(88));
    } else {
        println!("{:<10} {}", "RANK", "SERIAL");
        println!("{}", "-".repeat(24));
    }
}

/// Formats one shuffle row.
pub fn format_rank_row(rank: u64, digest: &SerialDigest, with_digests: bool) -> String {
    if with_digests {
        format!("{:<10} {:<12} {}", rank, digest.serial(), digest.to_hex())
    } else {
        format!("{:<10} {}", rank, digest.serial())
    }
}

/// Prints the header for verification rows.
#[allow(clippy::print_literal)]
pub fn print_verdict_header() {
    println!("{:<12} {:<10} {}", "SERIAL", "RANK", "VERDICT");
    println!("{}", "-".repeat(60));
}

/// Formats one verification row.
pub fn format_verdict_row(verdict: &SerialVerdict) -> String {
    let status = match &verdict.verdict {
        Verdict::Ok => "ok".to_string(),
        Verdict::Missing => "missing".to_string(),
        Verdict::Mismatch { expected, found } => {
            format!("mismatch (expected {}, found {})", expected.image, found.image)
        }
        Verdict::Unreadable { reason } => format!("unreadable: {}", truncate(reason, 40)),
    };
    format!("{:<12} {:<10} {}", verdict.serial, verdict.rank, status)
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
