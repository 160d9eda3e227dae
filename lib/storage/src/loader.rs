//! Catalog file loading
//!
//! Accepts a JSON array of product objects or JSON Lines (one product per
//! line). Files ending in `.gz` are gunzipped first. Individual products are
//! read leniently; a JSON Lines row that does not parse is skipped with a
//! warning.

use flate2::read::GzDecoder;
use serde_json::Value;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use tracing::{debug, warn};
use vendorq_core::{Error, ProductRecord, Result};

/// Read every product from a catalog file
pub fn load_products<P: AsRef<Path>>(path: P) -> Result<Vec<ProductRecord>> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let mut data = String::new();

    if path.extension().map_or(false, |ext| ext == "gz") {
        GzDecoder::new(BufReader::new(file)).read_to_string(&mut data)?;
    } else {
        BufReader::new(file).read_to_string(&mut data)?;
    }

    let products = parse_products(&data)?;
    debug!(path = %path.display(), products = products.len(), "catalog file parsed");
    Ok(products)
}

/// Parse catalog text in either supported layout
pub fn parse_products(data: &str) -> Result<Vec<ProductRecord>> {
    let trimmed = data.trim_start();

    if trimmed.starts_with('[') {
        let rows: Vec<Value> = serde_json::from_str(trimmed)?;
        return Ok(rows.iter().filter_map(product_from_row).collect());
    }

    let mut products = Vec::new();
    for (line_no, line) in data.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        match serde_json::from_str::<Value>(line) {
            Ok(row) => products.extend(product_from_row(&row)),
            Err(e) => warn!("Skipping catalog line {}: {}", line_no + 1, e),
        }
    }

    if products.is_empty() && !trimmed.is_empty() {
        return Err(Error::Serialization("no product rows found in catalog".to_string()));
    }
    Ok(products)
}

fn product_from_row(row: &Value) -> Option<ProductRecord> {
    if row.is_object() {
        Some(ProductRecord::from_value(row))
    } else {
        warn!("Skipping non-object catalog row");
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::write::GzEncoder;
    use flate2::Compression;
    use std::io::Write;
    use tempfile::tempdir;

    const ARRAY: &str = r#"[
        {"product_name": "Alpha CRM", "seller": "Alpha Inc", "main_category": "CRM Software", "rating": 4.5,
         "Features": "[{\"Category\": \"Sales\", \"features\": [{\"name\": \"Lead Management\", \"description\": \"Track leads\"}]}]"},
        {"product_name": "Beta Books", "vendor": "Beta LLC", "main_category": "Accounting", "rating": "4.1", "Features": null}
    ]"#;

    #[test]
    fn test_parse_array() {
        let products = parse_products(ARRAY).unwrap();
        assert_eq!(products.len(), 2);
        assert_eq!(products[0].features.groups().len(), 1);
        assert_eq!(products[1].seller, "Beta LLC");
        assert_eq!(products[1].rating, 4.1);
        assert!(!products[1].features.is_present());
    }

    #[test]
    fn test_parse_json_lines_skips_bad_rows() {
        let data = concat!(
            r#"{"product_name": "Alpha", "seller": "A", "main_category": "CRM"}"#, "\n",
            "not json\n",
            "\n",
            "42\n",
            r#"{"product_name": "Beta", "seller": "B", "main_category": "CRM"}"#, "\n",
        );
        let products = parse_products(data).unwrap();
        let names: Vec<&str> = products.iter().map(|p| p.product_name.as_str()).collect();
        assert_eq!(names, vec!["Alpha", "Beta"]);
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(parse_products("[{]"), Err(Error::Serialization(_))));
        assert!(matches!(parse_products("garbage\n"), Err(Error::Serialization(_))));
        assert!(parse_products("").unwrap().is_empty());
    }

    #[test]
    fn test_load_plain_and_gzip() {
        let dir = tempdir().unwrap();

        let plain = dir.path().join("catalog.json");
        std::fs::write(&plain, ARRAY).unwrap();
        assert_eq!(load_products(&plain).unwrap().len(), 2);

        let gz = dir.path().join("catalog.json.gz");
        let mut encoder = GzEncoder::new(File::create(&gz).unwrap(), Compression::default());
        encoder.write_all(ARRAY.as_bytes()).unwrap();
        encoder.finish().unwrap();
        assert_eq!(load_products(&gz).unwrap().len(), 2);
    }

    #[test]
    fn test_missing_file() {
        let dir = tempdir().unwrap();
        assert!(matches!(load_products(dir.path().join("missing.json")), Err(Error::Io(_))));
    }
}
