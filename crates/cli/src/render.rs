//! Console report rendering.
//!
//! Four banner-separated sections: current inventory, forecast summary, the
//! reorder list, and the cost comparison. Quantities and money round to two
//! decimals here and nowhere earlier.

use chrono::NaiveDate;

use larder_costing::CostComparison;
use larder_engine::{ForecastSummaryRow, InventoryStatusRow, PlanningRun};
use larder_planner::ReorderRecommendation;

const BANNER_WIDTH: usize = 80;
const TOP_N: usize = 10;

pub fn render_plan(run: &PlanningRun) -> String {
    let days = run.horizon.days();
    let mut out = String::new();

    push_section_header(
        &mut out,
        &format!(
            "CURRENT INVENTORY (as of {} morning) - Top {TOP_N}",
            run.horizon.start()
        ),
    );
    out.push_str(&inventory_section(&run.inventory_status));

    push_section_header(
        &mut out,
        &format!("FORECAST SUMMARY ({days}-day average) - Top {TOP_N}"),
    );
    out.push_str(&forecast_section(&run.forecast_summary));

    push_section_header(&mut out, &format!("REORDER / RESTOCK LIST - Top {TOP_N}"));
    out.push_str(&reorder_section(&run.recommendations, days));

    push_section_header(&mut out, "COSTS (Dynamic vs Weekly Recurring Baseline)");
    out.push_str(&costs_section(&run.costs));

    out.push_str(&banner());
    out.push_str("\n\n");
    out
}

fn banner() -> String {
    "=".repeat(BANNER_WIDTH)
}

fn push_section_header(out: &mut String, title: &str) {
    out.push('\n');
    out.push_str(&banner());
    out.push('\n');
    out.push_str(title);
    out.push('\n');
    out.push_str(&banner());
    out.push('\n');
}

fn inventory_section(rows: &[InventoryStatusRow]) -> String {
    let cells: Vec<Vec<String>> = rows
        .iter()
        .take(TOP_N)
        .map(|row| {
            vec![
                row.ingredient.to_string(),
                row.unit.to_string(),
                format!("{:.2}", row.current_qty),
                row.last_supplier.to_string(),
                date_cell(row.last_order_date),
                format!("{:.2}", row.last_order_qty),
                date_cell(row.next_delivery_date),
                format!("{:.2}", row.next_delivery_qty),
                date_cell(row.stockout_date_if_no_order),
            ]
        })
        .collect();
    render_table(
        &[
            "ingredient",
            "unit",
            "current_qty",
            "last_supplier",
            "last_order_date",
            "last_order_qty",
            "next_delivery_date",
            "next_delivery_qty",
            "stockout_if_no_order",
        ],
        &cells,
    )
}

fn forecast_section(rows: &[ForecastSummaryRow]) -> String {
    let cells: Vec<Vec<String>> = rows
        .iter()
        .take(TOP_N)
        .map(|row| {
            vec![
                row.ingredient.to_string(),
                row.unit.to_string(),
                format!("{:.2}", row.average_daily),
            ]
        })
        .collect();
    render_table(&["ingredient", "unit", "avg_daily"], &cells)
}

fn reorder_section(recommendations: &[ReorderRecommendation], days: u32) -> String {
    if recommendations.is_empty() {
        return format!("No restocks required in this {days}-day window under the model.\n");
    }
    let cells: Vec<Vec<String>> = recommendations
        .iter()
        .take(TOP_N)
        .map(|rec| {
            vec![
                rec.ingredient.to_string(),
                rec.supplier.to_string(),
                rec.order_date.to_string(),
                rec.delivery_date.to_string(),
                format!("{:.2}", rec.order_qty),
                rec.unit.to_string(),
                format!("{:.2}", rec.unit_cost),
                format!("{:.2}", rec.estimated_cost),
                rec.stockout_date_if_no_order.to_string(),
            ]
        })
        .collect();
    render_table(
        &[
            "ingredient",
            "supplier",
            "order_date",
            "delivery_date",
            "order_qty",
            "unit",
            "unit_cost",
            "estimated_cost",
            "stockout_if_no_order",
        ],
        &cells,
    )
}

fn costs_section(costs: &CostComparison) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "Dynamic plan spend:         £{}\n",
        format_money(costs.dynamic_total)
    ));
    out.push_str(&format!(
        "Recurring baseline spend:   £{} (repeat last order qty once this week)\n",
        format_money(costs.baseline_total)
    ));
    if costs.savings >= 0.0 {
        out.push_str(&format!(
            "Estimated savings:          £{}\n",
            format_money(costs.savings)
        ));
    } else {
        out.push_str(&format!(
            "Estimated extra spend:      £{} (dynamic > baseline)\n",
            format_money(costs.savings.abs())
        ));
    }
    out
}

fn date_cell(date: Option<NaiveDate>) -> String {
    match date {
        Some(date) => date.to_string(),
        None => "-".to_string(),
    }
}

/// Two decimals with thousands separators ("1,234,567.89").
fn format_money(amount: f64) -> String {
    let magnitude = format!("{:.2}", amount.abs());
    let (int_part, frac_part) = match magnitude.split_once('.') {
        Some(parts) => parts,
        None => (magnitude.as_str(), "00"),
    };
    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    let sign = if amount < 0.0 { "-" } else { "" };
    format!("{sign}{grouped}.{frac_part}")
}

/// Column-aligned plain-text table, widths fitted to content.
fn render_table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|header| header.len()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            if let Some(width) = widths.get_mut(i) {
                *width = (*width).max(cell.len());
            }
        }
    }

    let mut out = String::new();
    for (i, header) in headers.iter().enumerate() {
        if i > 0 {
            out.push_str("  ");
        }
        out.push_str(&format!("{header:<width$}", width = widths[i]));
    }
    out.push('\n');
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            if i > 0 {
                out.push_str("  ");
            }
            out.push_str(&format!("{cell:<width$}", width = widths[i]));
        }
        out.push('\n');
    }
    out
}
