use indexmap::IndexSet;
use serde_json::Number;

use super::store::PersistedReport;

/// Version labels in first-seen order, scanning commands in stored order.
pub fn columns(report: &PersistedReport) -> Vec<String> {
    let mut seen: IndexSet<&str> = IndexSet::new();
    for versions in report.commands().values() {
        for version in versions.keys() {
            seen.insert(version.as_str());
        }
    }
    seen.into_iter().map(str::to_string).collect()
}

/// Renders a markdown comparison table. The first column is each row's
/// baseline; later cells carry their delta from it.
pub fn render(report: &PersistedReport) -> String {
    let columns = columns(report);
    let mut table = String::new();

    table.push_str("| **Command** |");
    for column in &columns {
        table.push_str(&format!(" {} |", escape_cell(column)));
    }
    table.push('\n');

    table.push_str("| -- |");
    for _ in &columns {
        table.push_str(" -- |");
    }
    table.push('\n');

    for (identity, versions) in report.commands() {
        table.push_str(&format!("| {} |", escape_cell(&identity.replace('\n', ""))));

        let baseline = columns.first().and_then(|c| versions.get(c));
        for (idx, column) in columns.iter().enumerate() {
            let cell = match versions.get(column) {
                None => "-".to_string(),
                Some(value) if idx == 0 => format!("{}ms", value),
                Some(value) => match baseline {
                    Some(base) => format!("{}ms ({})", value, format_delta(value, base)),
                    None => format!("{}ms", value),
                },
            };
            table.push_str(&format!(" {} |", cell));
        }
        table.push('\n');
    }

    table
}

fn format_delta(value: &Number, baseline: &Number) -> String {
    let delta = match (as_integer(value), as_integer(baseline)) {
        (Some(v), Some(b)) => {
            let d = v - b;
            (d > 0, d.to_string())
        }
        _ => {
            let d = value.as_f64().unwrap_or(0.0) - baseline.as_f64().unwrap_or(0.0);
            (d > 0.0, d.to_string())
        }
    };
    match delta {
        (true, d) => format!("+{}ms", d),
        (false, d) => format!("{}ms", d),
    }
}

fn as_integer(n: &Number) -> Option<i128> {
    n.as_u64()
        .map(i128::from)
        .or_else(|| n.as_i64().map(i128::from))
}

fn escape_cell(s: &str) -> String {
    s.replace('|', "\\|")
}
