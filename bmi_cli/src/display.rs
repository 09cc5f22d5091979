//! Terminal rendering of readings, history and the category legend.

use bmi_core::{BmiCategory, HistoryEntry};
use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

fn header_cell(text: &str) -> Cell {
    Cell::new(text).add_attribute(Attribute::Bold)
}

fn category_colour(category: BmiCategory) -> Color {
    match category {
        BmiCategory::Underweight => Color::Blue,
        BmiCategory::NormalWeight => Color::Green,
        BmiCategory::Overweight => Color::Yellow,
        BmiCategory::Obese => Color::Red,
    }
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
}

/// History table with BMI and Category columns, oldest first
pub fn history_table(entries: &[HistoryEntry]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![header_cell("#"), header_cell("BMI"), header_cell("Category")]);
    apply_table_style(&mut table);

    for (i, entry) in entries.iter().enumerate() {
        table.add_row(vec![
            Cell::new(i + 1).set_alignment(CellAlignment::Right),
            Cell::new(format!("{:.1}", entry.bmi)).set_alignment(CellAlignment::Right),
            Cell::new(entry.category.label()).fg(category_colour(entry.category)),
        ]);
    }
    table
}

/// Legend of categories, their ranges and band colours
pub fn categories_table() -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Category"),
        header_cell("BMI"),
        header_cell("Colour"),
    ]);
    apply_table_style(&mut table);

    for category in BmiCategory::ALL {
        table.add_row(vec![
            Cell::new(category.label()),
            Cell::new(category.range_text()),
            Cell::new(category.colour_name()).fg(category_colour(category)),
        ]);
    }
    table
}
