use chrono::{DateTime, FixedOffset, NaiveDate, Utc};

use crate::{
    error::AppError,
    models::{Location, StockCount},
};

/// A location paired with its counted rows, ready for export.
pub struct LocationCounts {
    pub location: Location,
    pub stock_counts: Vec<StockCount>,
}

impl LocationCounts {
    /// Sum of all counted units at this location.
    pub fn total_items(&self) -> i64 {
        self.stock_counts.iter().map(|sc| i64::from(sc.count)).sum()
    }
}

/// Render one location's counts as CSV: a data section, a blank line,
/// then the PIC/location/totals summary. Lines are joined with `\n` and
/// there is no trailing newline. Empty locations are refused so a
/// download never produces a header-only file.
pub fn location_csv(location: &Location, stock_counts: &[StockCount]) -> Result<String, AppError> {
    if stock_counts.is_empty() {
        return Err(AppError::NotFound(format!(
            "no stock counts to export for {}",
            location.name
        )));
    }

    let mut rows = vec!["Barcode,Product Name,UOM,Selling Price,Count,Counted At".to_string()];

    for sc in stock_counts {
        rows.push(format!(
            "{},\"{}\",{},{},{},{}",
            sc.barcode,
            sc.product_name,
            sc.uom,
            sc.selling_price,
            sc.count,
            format_counted_at(sc.counted_at)
        ));
    }

    let total_items: i64 = stock_counts.iter().map(|sc| i64::from(sc.count)).sum();

    rows.push(String::new());
    rows.push(format!("PIC Name,{}", location.pic_name.as_deref().unwrap_or("-")));
    rows.push(format!("Location,{}", location.name));
    rows.push(format!("Total Products,{}", stock_counts.len()));
    rows.push(format!("Total Items,{total_items}"));

    Ok(rows.join("\n"))
}

/// Render every location's counts as one CSV, followed by a
/// per-location summary block and a grand total. Locations without any
/// counts contribute no data rows but still appear in the summary.
pub fn all_locations_csv(locations: &[LocationCounts]) -> Result<String, AppError> {
    if locations.iter().all(|lc| lc.stock_counts.is_empty()) {
        return Err(AppError::NotFound("no stock counts to export".to_string()));
    }

    let mut rows =
        vec!["Location,PIC Name,Barcode,Product Name,UOM,Selling Price,Count,Counted At".to_string()];

    for lc in locations {
        let pic = lc.location.pic_name.as_deref().unwrap_or("-");
        for sc in &lc.stock_counts {
            rows.push(format!(
                "\"{}\",{},{},\"{}\",{},{},{},{}",
                lc.location.name,
                pic,
                sc.barcode,
                sc.product_name,
                sc.uom,
                sc.selling_price,
                sc.count,
                format_counted_at(sc.counted_at)
            ));
        }
    }

    rows.push(String::new());
    rows.push("Summary by Location".to_string());
    for lc in locations {
        rows.push(format!(
            "\"{}\",\"{}\",{} products,{} items",
            lc.location.name,
            lc.location.pic_name.as_deref().unwrap_or("-"),
            lc.stock_counts.len(),
            lc.total_items()
        ));
    }

    let total_products: usize = locations.iter().map(|lc| lc.stock_counts.len()).sum();
    let total_items: i64 = locations.iter().map(LocationCounts::total_items).sum();

    rows.push(String::new());
    rows.push(format!("Grand Total,{total_products} products,{total_items} items"));

    Ok(rows.join("\n"))
}

/// Download filename for a single location's export.
pub fn location_filename(location: &Location, date: NaiveDate) -> String {
    let slug: Vec<&str> = location.name.split_whitespace().collect();
    format!("stock-count-{}-{}.csv", slug.join("-"), date.format("%Y-%m-%d"))
}

/// Download filename for the all-locations export.
pub fn all_locations_filename(date: NaiveDate) -> String {
    format!("stock-count-all-locations-{}.csv", date.format("%Y-%m-%d"))
}

/// Counts are taken on the shop floor in Western Indonesian Time, so
/// timestamps render in UTC+7 as `D/M/YYYY HH.MM.SS` with day and month
/// unpadded. Dots in the time keep the value inside one CSV column.
fn format_counted_at(counted_at: DateTime<Utc>) -> String {
    let wib = FixedOffset::east_opt(7 * 3600).expect("UTC+7 offset");
    counted_at
        .with_timezone(&wib)
        .format("%-d/%-m/%Y %H.%M.%S")
        .to_string()
}
