use comfy_table::{ContentArrangement, Table};

use pg_core::{GreeterConfig, HistoryStore, JsonFileStore};

pub fn run(config: &GreeterConfig) {
    let mut store = JsonFileStore::new(&config.history_path, config.history_size);
    let history = store.load();

    if history.is_empty() {
        println!("  No greetings recorded yet.");
        return;
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["#", "Pokémon", "Types", "Recorded"]);

    // Newest first.
    for entry in history.entries().iter().rev() {
        let recorded = entry
            .timestamp
            .map(|t| t.format("%Y-%m-%d %H:%M UTC").to_string())
            .unwrap_or_else(|| "—".to_string());
        table.add_row(vec![
            format!("{:03}", entry.id),
            entry.name.clone().unwrap_or_else(|| "—".to_string()),
            entry.types.clone().unwrap_or_else(|| "—".to_string()),
            recorded,
        ]);
    }

    println!("{table}");
    println!();
    println!(
        "  {} of {} entries kept",
        history.len(),
        history.max_len()
    );
}
