//! Report numbers: `CRI-{PROJ|SERV}-{YYYYMMDD}-{NNN}`

use chrono::NaiveDate;

use crate::domain::CriKind;

/// Number for the `sequence`-th report of `kind` on `date`
pub fn format_number(kind: CriKind, date: NaiveDate, sequence: u32) -> String {
    format!("{}-{sequence:03}", day_prefix(kind, date))
}

/// Next free number for `kind` on `date`, given the numbers already used.
///
/// Uses the highest existing sequence plus one, so deleting a report never
/// hands out a number that is still taken.
pub fn next_number<'a>(
    kind: CriKind,
    date: NaiveDate,
    existing: impl IntoIterator<Item = &'a str>,
) -> String {
    let prefix = day_prefix(kind, date);
    let highest = existing
        .into_iter()
        .filter_map(|numero| parse_sequence(numero, &prefix))
        .max()
        .unwrap_or(0);
    format_number(kind, date, highest.saturating_add(1))
}

fn day_prefix(kind: CriKind, date: NaiveDate) -> String {
    format!("CRI-{}-{}", kind.number_prefix(), date.format("%Y%m%d"))
}

fn parse_sequence(numero: &str, prefix: &str) -> Option<u32> {
    numero.trim().strip_prefix(prefix)?.strip_prefix('-')?.parse().ok()
}
