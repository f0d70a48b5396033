//! Text chart for one record: summary rows across the eight key lengths.

use primesift_core::TallySummary;

/// Print the chart block for one record: a separator rule, the prime, and
/// one row per summary field with a fixed-width column per key length.
pub fn print_record(prime: u64, hash: &[TallySummary; 8], ava: &[TallySummary; 8]) {
    println!();
    println!("{}", "-".repeat(96));
    println!("{prime:>20}");

    println!();
    row("hash.cnt", hash, |s| s.samples);
    row("hash.bit.min", hash, |s| s.bit.min);
    row("hash.bit.max", hash, |s| s.bit.max);
    row("hash.bit.sum", hash, |s| s.bit.sum);
    row("hash.bit.gap", hash, |s| s.bit.gap);
    row("hash.bit.avg", hash, |s| s.bit.avg);

    println!();
    row("hash.pop.min", hash, |s| s.pop.min);
    row("hash.pop.max", hash, |s| s.pop.max);
    row("hash.pop.sum", hash, |s| s.pop.sum);
    row("hash.pop.gap", hash, |s| s.pop.gap);
    row("hash.pop.avg", hash, |s| s.pop.avg);

    println!();
    row("ava.cnt", ava, |s| s.samples);
    row("ava.bit.min", ava, |s| s.bit.min);
    row("ava.bit.max", ava, |s| s.bit.max);
    row("ava.bit.sum", ava, |s| s.bit.sum);
    row("ava.bit.gap", ava, |s| s.bit.gap);
    row("ava.bit.avg", ava, |s| s.bit.avg);

    println!();
    row("ava.pop.min", ava, |s| s.pop.min);
    row("ava.pop.max", ava, |s| s.pop.max);
    row("ava.pop.sum", ava, |s| s.pop.sum);
    row("ava.pop.gap", ava, |s| s.pop.gap);
    row("ava.pop.avg", ava, |s| s.pop.avg);
}

fn row(label: &str, metas: &[TallySummary; 8], field: impl Fn(&TallySummary) -> u32) {
    let mut line = format!(".{label:<15}");
    for meta in metas {
        line.push_str(&format!("{:>10}", field(meta)));
    }
    println!("{line}");
}

/// Format an integer with thousands separators: `1234567` → `1,234,567`.
pub fn thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
