use comfy_table::{presets::NOTHING, *};
use gtdprep::{audit::MissingValueReport, country_names::CountryNameMapping};
use polars::prelude::{AnyValue, DataFrame};

/// Text shown for missing cells in tables
const MISSING_CELL: &str = "null";

fn cell_text(value: AnyValue) -> String {
    match value {
        AnyValue::Null => MISSING_CELL.to_string(),
        // `AnyValue`'s Display quotes strings
        AnyValue::String(s) => s.to_string(),
        other => other.to_string(),
    }
}

fn styled_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(NOTHING)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_style(comfy_table::TableComponent::BottomBorder, '─')
        .set_style(comfy_table::TableComponent::MiddleHeaderIntersections, '─')
        .set_style(comfy_table::TableComponent::HeaderLines, '─')
        .set_style(comfy_table::TableComponent::BottomBorderIntersections, '─')
        .set_style(comfy_table::TableComponent::TopBorder, '─')
        .set_style(comfy_table::TableComponent::TopBorderIntersections, '─');
    table
}

/// Renders every row of `df` as a table, one column per frame column.
pub fn preview_table(df: &DataFrame) -> anyhow::Result<Table> {
    let mut table = styled_table();
    table.set_header(
        df.get_column_names()
            .into_iter()
            .map(|name| Cell::new(name).add_attribute(Attribute::Bold)),
    );
    for idx in 0..df.height() {
        let row = df
            .get_columns()
            .iter()
            .map(|series| series.get(idx).map(cell_text))
            .collect::<Result<Vec<_>, _>>()?;
        table.add_row(row);
    }
    Ok(table)
}

pub fn display_preview(df: &DataFrame) -> anyhow::Result<()> {
    println!("\n{}", preview_table(df)?);
    Ok(())
}

/// Formats the missing value report as one `column  count` line per column. An empty report
/// gives no lines.
pub fn missing_values_lines(report: &MissingValueReport) -> Vec<String> {
    let width = report.iter().map(|(name, _)| name.len()).max().unwrap_or(0);
    report
        .iter()
        .map(|(name, count)| format!("{name:<width$}  {count}"))
        .collect()
}

pub fn display_missing_values(report: &MissingValueReport) {
    println!("NaN values in each column:");
    for line in missing_values_lines(report) {
        println!("{line}");
    }
}

pub fn display_country_names(mapping: &CountryNameMapping) {
    let mut table = styled_table();
    table.set_header(vec![
        Cell::new("GTD name").add_attribute(Attribute::Bold),
        Cell::new("Mapped name").add_attribute(Attribute::Bold),
    ]);
    for (from, to) in mapping.iter() {
        table.add_row(vec![from, to]);
    }
    println!("\n{}", table);
}
