//! The greeting card layout.
//!
//! The card is HTML-flavoured markdown centred in a `<div>`, the way GitHub
//! renders a profile README. Sections appear in a fixed order so a diff
//! between two runs only touches the values that changed.

use chrono::{DateTime, Utc};
use pg_core::Record;

use crate::error::{RenderError, RenderResult};
use crate::fallback::{first_available, or_unknown};
use crate::stats;
use crate::templates::Template;

/// Abilities listed on the card.
pub const MAX_ABILITIES: usize = 2;

/// Render `record` as a greeting card.
///
/// The image section is left out when no image candidate is available.
/// Missing types, abilities, size, and stats render as `Unknown`/`unknown`
/// so the layout stays the same for sparse records.
pub fn render_card(
    record: &Record,
    template: &Template,
    updated_at: DateTime<Utc>,
) -> RenderResult<String> {
    let name = record.name.trim();
    if name.is_empty() {
        return Err(RenderError::MissingName { id: record.id });
    }

    let mut out = String::from("<div align=\"center\">\n\n");

    if let Some(url) = first_available(&record.images) {
        out.push_str(&format!(
            "<img src=\"{}\" width=\"250\" height=\"250\" alt=\"{}\">\n\n",
            escape_attr(url),
            escape_attr(name)
        ));
    }

    out.push_str(&format!("# {}\n\n", template.greeting_for(name)));
    out.push_str(&info_table(record));
    out.push_str(&format!(
        "### 🎯 Abilities\n**{}**\n\n",
        abilities_label(record)
    ));

    let total = stats::total(record)
        .map(|t| t.to_string())
        .unwrap_or_else(|| "unknown".to_string());
    out.push_str(&format!("### 📊 Base Stats (Total: {total})\n```\n"));
    for line in stats::stat_lines(record) {
        out.push_str(&line);
        out.push('\n');
    }
    out.push_str("```\n\n");

    out.push_str(&format!("## ✨ {} ✨\n\n", template.closing()));
    out.push_str(&format!(
        "*Last updated: {}*\n\n",
        updated_at.format("%B %d, %Y at %H:%M UTC")
    ));
    out.push_str(FOOTER);
    out.push_str("\n</div>\n");

    Ok(out)
}

const FOOTER: &str = "---\n\n\
🌟 **This README is automatically updated every 24 hours with a new Pokémon greeting!** 🌟<br>\n\
Powered by [PokéAPI](https://pokeapi.co/)\n";

fn info_table(record: &Record) -> String {
    let cells = [
        format!("#{:03}", record.id),
        or_unknown(record.tags_label()),
        or_unknown(record.height.map(|h| format!("{:.1} m", f64::from(h) / 10.0))),
        or_unknown(record.weight.map(|w| format!("{:.1} kg", f64::from(w) / 10.0))),
    ];
    let labels = ["Number", "Type", "Height", "Weight"];

    let mut out = String::from("<table>\n<tr>\n");
    for cell in &cells {
        out.push_str(&format!(
            "<td align=\"center\"><strong>{cell}</strong></td>\n"
        ));
    }
    out.push_str("</tr>\n<tr>\n");
    for label in labels {
        out.push_str(&format!("<td align=\"center\">{label}</td>\n"));
    }
    out.push_str("</tr>\n</table>\n\n");
    out
}

/// Escape a value for a double-quoted HTML attribute.
fn escape_attr(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}

fn abilities_label(record: &Record) -> String {
    let shown: Vec<&str> = record
        .abilities
        .iter()
        .map(String::as_str)
        .filter(|a| !a.trim().is_empty())
        .take(MAX_ABILITIES)
        .collect();
    if shown.is_empty() {
        "Unknown".to_string()
    } else {
        shown.join(", ")
    }
}
