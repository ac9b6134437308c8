use comfy_table::{presets::UTF8_FULL, Cell, CellAlignment, Row, Table};
use tenet::Engine;

/// Render working memory as a table, one fact per row
pub fn facts_table(engine: &Engine) -> String {
    if engine.environment().is_empty() {
        return "( no facts defined )\n".to_string();
    }

    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(Row::from(vec![
        Cell::new("Fact").set_alignment(CellAlignment::Left)
    ]));

    for fact in engine.environment().iter() {
        table.add_row(Row::from(vec![Cell::new(fact.to_string())]));
    }

    format!("{}\n", table)
}

/// Render working memory the way the shell lists it: one fact per line,
/// comma-continued, period-terminated
pub fn facts_listing(engine: &Engine) -> String {
    let facts = engine.facts();
    if facts.is_empty() {
        "( no facts defined )".to_string()
    } else {
        format!(" {}.", facts.join(",\n "))
    }
}

/// Render the loaded program, one item per line
pub fn rules_listing(engine: &Engine) -> String {
    let rules = engine.rules();
    if rules.is_empty() {
        "( no rules defined )".to_string()
    } else {
        rules.join("\n")
    }
}
