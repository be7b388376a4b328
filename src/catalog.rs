use crate::{error::AppError, models::NewProduct, store::StockStore};
use std::collections::HashMap;

/// Parse a master catalog CSV into import-ready records.
///
/// The first non-blank line is the header; columns are discovered by
/// case-insensitive substring match so `Barcode`, `BARCODE` and
/// `Kode Barcode` all work. Data rows may quote fields containing
/// commas. Duplicate barcodes keep the first occurrence's position and
/// the last occurrence's values. A header-only file yields an empty list.
pub fn parse_products_csv(text: &str) -> Result<Vec<NewProduct>, AppError> {
    let lines: Vec<&str> = text.lines().filter(|line| !line.trim().is_empty()).collect();

    let Some(header_line) = lines.first() else {
        return Err(AppError::Validation("CSV file is empty".to_string()));
    };

    let headers: Vec<String> = header_line
        .to_lowercase()
        .split(',')
        .map(|h| h.trim().to_string())
        .collect();

    let barcode_idx = headers.iter().position(|h| h.contains("barcode"));
    let name_idx = headers
        .iter()
        .position(|h| h.contains("product") || h.contains("name"));
    let uom_idx = headers.iter().position(|h| h.contains("uom"));
    let price_idx = headers
        .iter()
        .position(|h| h.contains("price") || h.contains("selling"));

    let (Some(barcode_idx), Some(name_idx), Some(uom_idx), Some(price_idx)) =
        (barcode_idx, name_idx, uom_idx, price_idx)
    else {
        return Err(AppError::Validation(format!(
            "CSV must contain Barcode, Product Name, UOM and Selling Price columns (found: {})",
            headers.join(", ")
        )));
    };

    let needed = [barcode_idx, name_idx, uom_idx, price_idx]
        .into_iter()
        .max()
        .unwrap_or(0)
        + 1;

    let mut products: Vec<NewProduct> = Vec::new();
    let mut seen: HashMap<String, usize> = HashMap::new();

    // Row numbers count from the header, so the first data row is row 2.
    for (offset, line) in lines.iter().enumerate().skip(1) {
        let row = offset + 1;
        let fields = split_csv_line(line);

        if fields.len() < needed {
            return Err(AppError::Validation(format!(
                "row {}: expected at least {} columns, found {}",
                row,
                needed,
                fields.len()
            )));
        }

        let barcode = fields[barcode_idx].clone();
        if barcode.is_empty() {
            return Err(AppError::Validation(format!("row {row}: barcode is empty")));
        }

        let product = NewProduct {
            barcode: barcode.clone(),
            product_name: fields[name_idx].clone(),
            uom: fields[uom_idx].clone(),
            selling_price: parse_idr_price(&fields[price_idx])
                .ok_or_else(|| {
                    AppError::Validation(format!(
                        "row {}: invalid selling price {:?}",
                        row, fields[price_idx]
                    ))
                })?,
        };

        match seen.get(&barcode) {
            Some(&at) => products[at] = product,
            None => {
                seen.insert(barcode, products.len());
                products.push(product);
            }
        }
    }

    Ok(products)
}

/// Upsert parsed records into the master catalog, keyed by barcode.
/// Returns the number of rows written after deduplication.
pub async fn import_products(
    store: &dyn StockStore,
    products: Vec<NewProduct>,
) -> Result<u64, AppError> {
    if products.is_empty() {
        return Ok(0);
    }

    for (i, product) in products.iter().enumerate() {
        if product.barcode.trim().is_empty() {
            return Err(AppError::Validation(format!(
                "product {} has an empty barcode",
                i + 1
            )));
        }
        if product.selling_price < 0 {
            return Err(AppError::Validation(format!(
                "product {} has a negative selling price",
                i + 1
            )));
        }
    }

    // The wire path can feed duplicates too, so dedup again before the upsert
    // hits the unique barcode constraint.
    let mut deduped: Vec<NewProduct> = Vec::new();
    let mut seen: HashMap<String, usize> = HashMap::new();
    for product in products {
        match seen.get(&product.barcode) {
            Some(&at) => deduped[at] = product,
            None => {
                seen.insert(product.barcode.clone(), deduped.len());
                deduped.push(product);
            }
        }
    }

    let imported = store.upsert_products(&deduped).await?;
    log::info!("imported {} products into master catalog", imported);
    Ok(imported)
}

/// Split a single CSV line, honoring double quotes around fields that
/// contain commas. Quote characters are consumed, fields are trimmed.
fn split_csv_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut inside_quotes = false;

    for ch in line.chars() {
        match ch {
            '"' => inside_quotes = !inside_quotes,
            ',' if !inside_quotes => {
                fields.push(current.trim().to_string());
                current.clear();
            }
            _ => current.push(ch),
        }
    }
    fields.push(current.trim().to_string());

    fields
}

/// Normalize an Indonesian-format price string to a whole rupiah amount.
/// `.` is a thousands separator and `,` a decimal comma, so `1.000,50`
/// reads as 1000.50 and truncates to 1000. Returns None for anything
/// that does not parse or is negative.
fn parse_idr_price(raw: &str) -> Option<i64> {
    let normalized = raw.trim().replace('.', "").replace(',', ".");
    let value: f64 = normalized.parse().ok()?;
    if !value.is_finite() || value < 0.0 {
        return None;
    }
    Some(value.trunc() as i64)
}
