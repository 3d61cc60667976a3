use std::time::Duration;

use tabulet::{
    Entry, GcRule, Instance, ReadOptions, RuleConfig, Scan, SweepConfig, Sweeper, Timestamp,
};

fn main() {
    println!("Tabulet Table Tour");

    let instance = Instance::new();

    let table_name = "Hello-Tabulet";
    if !instance.table_exists(table_name) {
        println!("Creating table {table_name}");
        instance.create_table(table_name).expect("Failed to create table");
    }
    let table = instance.table(table_name).expect("Failed to get table");

    // One family per rule shape.
    println!("Creating column family cf1 with a max-age rule");
    let max_age = GcRule::max_age(Duration::from_secs(5)).expect("Failed to build rule");
    table
        .create_family("cf1", Some(max_age))
        .expect("Failed to create cf1");

    println!("Creating column family cf2 with a max-versions rule");
    let max_versions = GcRule::max_versions(2).expect("Failed to build rule");
    table
        .create_family("cf2", Some(max_versions))
        .expect("Failed to create cf2");

    println!("Creating column family cf3 with a union rule");
    let union = RuleConfig::new()
        .versions(2)
        .age(Duration::from_secs(5))
        .union()
        .build()
        .expect("Failed to build rule");
    table
        .create_family("cf3", Some(union))
        .expect("Failed to create cf3");

    println!("Creating column family cf4 with an intersection rule");
    let intersection = RuleConfig::new()
        .versions(2)
        .age(Duration::from_secs(5))
        .intersection()
        .build()
        .expect("Failed to build rule");
    table
        .create_family("cf4", Some(intersection))
        .expect("Failed to create cf4");

    // Write a few greetings, three versions each.
    println!("Writing greetings to the table");
    let greetings = ["Hello World!", "Hello Tabulet!", "Hello Rust!"];
    let base = Timestamp::now();
    let mut entries = Vec::new();
    for (i, greeting) in greetings.iter().enumerate() {
        for version in 0..3u64 {
            entries.push(Entry::new(
                format!("greeting{i}"),
                "cf2",
                "message",
                base + Duration::from_millis(version),
                format!("{greeting} (v{version})"),
            ));
        }
    }
    let failed = table.insert(entries);
    assert!(failed.is_empty(), "insert failures: {failed:?}");

    // Read a single row, most recent version only.
    let filter = ReadOptions {
        cell_limit: Some(1),
        now: None,
    };
    println!("Reading a single row by row key");
    let row = table
        .read_row("greeting0", &filter)
        .expect("Row not found");
    let cell = row.cell("cf2", "message").expect("Cell not found");
    println!("\tRead: {}", String::from_utf8_lossy(&cell.value));

    // Read the entire table with the same filter.
    println!("Reading the entire table");
    for row in table.scan(&Scan::prefix("greeting"), &filter) {
        if let Some(cell) = row.cell("cf2", "message") {
            println!("\tRead {}: {}", row.key, String::from_utf8_lossy(&cell.value));
        }
    }

    // List families and their rules.
    println!("Printing ID and GC rule for all column families");
    for handle in table.list_families() {
        let rule = table
            .family_rule(handle.name())
            .expect("Failed to get rule");
        let descriptor = rule.map(|r| r.to_descriptor().to_json().expect("Failed to encode"));
        println!(
            "\tColumn family: {} (id {}), rule: {}",
            handle.name(),
            handle.id(),
            descriptor.unwrap_or_else(|| "retain forever".to_string()),
        );
    }

    // Replace cf1's rule; the old rule is discarded, not merged.
    println!("Updating column family cf1 GC rule");
    table
        .set_family_rule("cf1", Some(GcRule::max_versions(1).expect("Failed to build rule")))
        .expect("Failed to update rule");

    // Physically reclaim garbage.
    let stats = Sweeper::new(SweepConfig::default()).sweep(&table, Timestamp::now());
    println!(
        "Sweep: examined {} cells, dropped {}, emptied {} rows",
        stats.cells_examined, stats.cells_dropped, stats.rows_emptied
    );

    println!("Deleting column family cf4");
    table.delete_family("cf4").expect("Failed to delete cf4");

    println!("Deleting table {table_name}");
    instance
        .delete_table(table_name)
        .expect("Failed to delete table");
    println!("Done");
}
