//! Base stat bars.

use pg_core::Record;

/// Largest base stat in the games, used as the bar's full scale.
pub const STAT_SCALE: u32 = 255;

/// Cells in a bar.
pub const BAR_WIDTH: usize = 10;

/// The stats shown on the card: catalog key, label, and icon.
pub const SHOWN_STATS: &[(&str, &str, &str)] = &[
    ("hp", "HP", "❤️ "),
    ("attack", "Attack", "⚔️ "),
    ("defense", "Defense", "🛡️ "),
    ("speed", "Speed", "⚡"),
];

/// A ten-cell bar followed by the value, e.g. `█░░░░░░░░░ 35`.
pub fn stat_bar(value: u32) -> String {
    let filled = ((value as usize * BAR_WIDTH) / STAT_SCALE as usize).min(BAR_WIDTH);
    format!(
        "{}{} {value}",
        "█".repeat(filled),
        "░".repeat(BAR_WIDTH - filled)
    )
}

/// Sum of every known base stat, or `None` when the record has none.
pub fn total(record: &Record) -> Option<u32> {
    if record.attributes.is_empty() {
        None
    } else {
        Some(record.attributes.values().sum())
    }
}

/// One fenced-block line per shown stat. Missing stats read `unknown`.
pub fn stat_lines(record: &Record) -> Vec<String> {
    SHOWN_STATS
        .iter()
        .map(|(key, label, icon)| {
            let value = record
                .attribute(key)
                .map(stat_bar)
                .unwrap_or_else(|| "unknown".to_string());
            format!("{icon} {label:<7} {value}")
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bar_scaling() {
        assert_eq!(stat_bar(0), "░░░░░░░░░░ 0");
        assert_eq!(stat_bar(35), "█░░░░░░░░░ 35");
        assert_eq!(stat_bar(128), "█████░░░░░ 128");
        assert_eq!(stat_bar(255), "██████████ 255");
    }

    #[test]
    fn bar_clamps_above_scale() {
        assert_eq!(stat_bar(999), "██████████ 999");
    }

    #[test]
    fn total_of_known_stats() {
        let record = Record::new(25, "Pikachu")
            .with_attribute("hp", 35)
            .with_attribute("attack", 55)
            .with_attribute("special-attack", 50);
        assert_eq!(total(&record), Some(140));
        assert_eq!(total(&Record::new(1, "Missing")), None);
    }

    #[test]
    fn missing_stats_read_unknown() {
        let record = Record::new(25, "Pikachu").with_attribute("hp", 35);
        let lines = stat_lines(&record);
        assert_eq!(lines.len(), 4);
        assert!(lines[0].contains("HP") && lines[0].ends_with("35"));
        assert!(lines[1].contains("Attack") && lines[1].ends_with("unknown"));
    }
}
