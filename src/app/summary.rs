use crate::metrics::CountersSnapshot;

/// `Total: <s+f>, Success: <s>, Errors: <f>`
#[must_use]
pub fn summary_line(snapshot: &CountersSnapshot) -> String {
    format!(
        "Total: {}, Success: {}, Errors: {}",
        snapshot.total(),
        snapshot.succeeded,
        snapshot.failed
    )
}

pub fn print_summary(snapshot: &CountersSnapshot) {
    println!("{}", summary_line(snapshot));
}
