//! Draft validation
//!
//! Turns loosely typed user input (form fields, bulk import files) into
//! [`ProductPayload`]s. Nothing reaches the network without passing here.
//!
//! Rules per draft:
//! - `name`: required, non-blank after trim
//! - `price`: required, a decimal greater than 0
//! - `stock`: required, an integer of 0 or more
//! - category: required, by id or by name
//! - `imageUrls`: at most [`MAX_PRODUCT_IMAGES`]
//! - `discount.percentage`: within 0-100 when a discount is given

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::Deserialize;
use serde_json::Value;
use shared::models::MAX_PRODUCT_IMAGES;
use shared::{CategoryId, CategoryRef, Discount, ProductPayload};

// ── Draft input ─────────────────────────────────────────────────────

/// A field that may arrive as a JSON number or as typed text
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum DraftValue {
    Number(serde_json::Number),
    Text(String),
}

impl DraftValue {
    fn to_text(&self) -> String {
        match self {
            Self::Number(n) => n.to_string(),
            Self::Text(s) => s.trim().to_string(),
        }
    }

    /// Plain or scientific notation (`1e-7` is how JSON encoders write small floats)
    fn to_decimal(&self) -> Option<Decimal> {
        let text = self.to_text();
        Decimal::from_str(&text)
            .or_else(|_| Decimal::from_scientific(&text))
            .ok()
    }

    /// Whole number of 0 or more; `3.0` counts
    fn to_whole(&self) -> Option<u32> {
        self.to_decimal()
            .filter(|d| d.fract().is_zero() && !d.is_sign_negative())
            .and_then(|d| d.to_u32())
    }
}

impl From<&str> for DraftValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for DraftValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<i64> for DraftValue {
    fn from(n: i64) -> Self {
        Self::Number(n.into())
    }
}

/// Discount as entered
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct DraftDiscount {
    #[serde(default)]
    pub active: bool,
    #[serde(default)]
    pub percentage: Option<DraftValue>,
}

/// Unvalidated candidate product
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDraft {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub price: Option<DraftValue>,
    #[serde(default)]
    pub stock: Option<DraftValue>,
    #[serde(default, alias = "categoryRef")]
    pub category_id: Option<DraftValue>,
    #[serde(default)]
    pub category_name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image_urls: Vec<String>,
    #[serde(default)]
    pub discount: Option<DraftDiscount>,
}

// ── Reports ─────────────────────────────────────────────────────────

/// Per-field errors for one draft
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    pub field_errors: BTreeMap<String, String>,
}

impl ValidationReport {
    pub fn is_ok(&self) -> bool {
        self.field_errors.is_empty()
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.field_errors.get(field).map(String::as_str)
    }

    fn add(&mut self, field: &str, message: impl Into<String>) {
        self.field_errors.insert(field.to_string(), message.into());
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .field_errors
            .iter()
            .map(|(field, msg)| format!("{field}: {msg}"))
            .collect();
        f.write_str(&parts.join("; "))
    }
}

/// One bulk import problem
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineError {
    /// 1-based entry number; `None` for problems with the payload as a whole
    pub line: Option<usize>,
    pub field: Option<String>,
    /// Already prefixed with `Line N:` when `line` is set
    pub message: String,
}

/// Every problem found in a bulk import payload
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchReport {
    pub errors: Vec<LineError>,
}

impl BatchReport {
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Distinct 1-based line numbers with at least one error
    pub fn lines(&self) -> BTreeSet<usize> {
        self.errors.iter().filter_map(|e| e.line).collect()
    }

    fn payload(message: impl Into<String>) -> Self {
        Self {
            errors: vec![LineError {
                line: None,
                field: None,
                message: message.into(),
            }],
        }
    }

    fn push_line(&mut self, line: usize, field: Option<&str>, message: &str) {
        self.errors.push(LineError {
            line: Some(line),
            field: field.map(str::to_string),
            message: format!("Line {line}: {message}"),
        });
    }
}

impl fmt::Display for BatchReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let lines: Vec<&str> = self.errors.iter().map(|e| e.message.as_str()).collect();
        f.write_str(&lines.join("\n"))
    }
}

// ── Single draft ────────────────────────────────────────────────────

/// Validate a draft without building a payload
pub fn validate(draft: &ProductDraft) -> ValidationReport {
    check(draft).1
}

/// Validate a draft and build its payload
pub fn validate_into(draft: &ProductDraft) -> Result<ProductPayload, ValidationReport> {
    match check(draft) {
        (Some(payload), report) if report.is_ok() => Ok(payload),
        (_, report) => Err(report),
    }
}

fn check(draft: &ProductDraft) -> (Option<ProductPayload>, ValidationReport) {
    let mut report = ValidationReport::default();

    let name = draft
        .name
        .as_deref()
        .map(str::trim)
        .filter(|n| !n.is_empty());
    if name.is_none() {
        report.add("name", "name is required");
    }

    let price = match draft.price.as_ref() {
        None => {
            report.add("price", "price is required");
            None
        }
        Some(value) if value.to_text().is_empty() => {
            report.add("price", "price is required");
            None
        }
        Some(value) => match value.to_decimal() {
            Some(p) if p > Decimal::ZERO => Some(p),
            _ => {
                report.add("price", "price must be a number greater than 0");
                None
            }
        },
    };

    let stock = match draft.stock.as_ref() {
        None => {
            report.add("stock", "stock is required");
            None
        }
        Some(value) if value.to_text().is_empty() => {
            report.add("stock", "stock is required");
            None
        }
        Some(value) => match value.to_whole() {
            Some(s) => Some(s),
            None => {
                report.add("stock", "stock must be a whole number of 0 or more");
                None
            }
        },
    };

    let category = category_ref(draft);
    if category.is_none() {
        report.add("category", "category is required");
    }

    let image_urls: Vec<String> = draft
        .image_urls
        .iter()
        .map(|u| u.trim())
        .filter(|u| !u.is_empty())
        .map(str::to_string)
        .collect();
    if image_urls.len() > MAX_PRODUCT_IMAGES {
        report.add(
            "imageUrls",
            format!("at most {MAX_PRODUCT_IMAGES} images are allowed"),
        );
    }

    let discount = match &draft.discount {
        None => None,
        Some(d) => {
            let pct = d
                .percentage
                .as_ref()
                .and_then(DraftValue::to_decimal)
                .filter(|p| *p >= Decimal::ZERO && *p <= Decimal::ONE_HUNDRED);
            match pct {
                Some(percentage) => Some(Discount {
                    active: d.active,
                    percentage,
                }),
                None if !d.active && d.percentage.is_none() => None,
                None => {
                    report.add("discount", "discount must be between 0 and 100");
                    None
                }
            }
        }
    };

    let payload = match (name, price, stock, category) {
        (Some(name), Some(price), Some(stock), Some(category)) if report.is_ok() => {
            Some(ProductPayload {
                name: name.to_string(),
                price,
                stock,
                category,
                description: draft
                    .description
                    .as_deref()
                    .map(str::trim)
                    .filter(|d| !d.is_empty())
                    .map(str::to_string),
                image_urls,
                discount,
            })
        }
        _ => None,
    };
    (payload, report)
}

fn category_ref(draft: &ProductDraft) -> Option<CategoryRef> {
    let id = draft
        .category_id
        .as_ref()
        .map(DraftValue::to_text)
        .filter(|t| !t.is_empty());
    if let Some(id) = id {
        return Some(CategoryRef::Id(CategoryId::new(id)));
    }
    draft
        .category_name
        .as_deref()
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .map(|n| CategoryRef::Name(n.to_string()))
}

// ── Batch (bulk import) ─────────────────────────────────────────────

/// Validate a bulk import payload.
///
/// The payload must be a JSON array. Every entry is checked; the report
/// holds all problems, not just the first.
pub fn validate_batch(payload: &Value) -> Result<Vec<ProductPayload>, BatchReport> {
    let Some(entries) = payload.as_array() else {
        return Err(BatchReport::payload("payload must be a list of products"));
    };
    if entries.is_empty() {
        return Err(BatchReport::payload("payload contains no products"));
    }

    let mut report = BatchReport::default();
    let mut valid = Vec::with_capacity(entries.len());
    for (idx, entry) in entries.iter().enumerate() {
        let line = idx + 1;
        let draft = match ProductDraft::deserialize(entry) {
            Ok(d) => d,
            Err(_) => {
                report.push_line(line, None, "entry is not a product object");
                continue;
            }
        };
        match validate_into(&draft) {
            Ok(p) => valid.push(p),
            Err(r) => {
                for (field, msg) in &r.field_errors {
                    report.push_line(line, Some(field.as_str()), msg);
                }
            }
        }
    }

    if report.is_empty() { Ok(valid) } else { Err(report) }
}

/// Parse and validate bulk import text
pub fn parse_import(text: &str) -> Result<Vec<ProductPayload>, BatchReport> {
    let value: Value = serde_json::from_str(text)
        .map_err(|e| BatchReport::payload(format!("payload is not valid JSON: {e}")))?;
    validate_batch(&value)
}

// ── Preview ─────────────────────────────────────────────────────────

/// One row of an import preview
#[derive(Debug, Clone, PartialEq)]
pub struct PreviewRow {
    /// 1-based
    pub line: usize,
    pub name: Option<String>,
    pub price: Option<Decimal>,
    pub valid: bool,
}

/// What a bulk import would submit, shown before the user confirms
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImportPreview {
    pub rows: Vec<PreviewRow>,
    pub report: BatchReport,
}

impl ImportPreview {
    pub fn valid_count(&self) -> usize {
        self.rows.iter().filter(|r| r.valid).count()
    }

    pub fn can_submit(&self) -> bool {
        !self.rows.is_empty() && self.report.is_empty()
    }
}

/// Build a preview of an import; never touches the network
pub fn preview_import(text: &str) -> ImportPreview {
    let value: Value = match serde_json::from_str(text) {
        Ok(v) => v,
        Err(e) => {
            return ImportPreview {
                rows: Vec::new(),
                report: BatchReport::payload(format!("payload is not valid JSON: {e}")),
            };
        }
    };
    let report = validate_batch(&value).err().unwrap_or_default();
    let bad_lines = report.lines();

    let rows = value
        .as_array()
        .map(|entries| {
            entries
                .iter()
                .enumerate()
                .map(|(idx, entry)| {
                    let draft = ProductDraft::deserialize(entry).unwrap_or_default();
                    PreviewRow {
                        line: idx + 1,
                        name: draft.name.map(|n| n.trim().to_string()),
                        price: draft
                            .price
                            .as_ref()
                            .and_then(DraftValue::to_decimal),
                        valid: !bad_lines.contains(&(idx + 1)),
                    }
                })
                .collect()
        })
        .unwrap_or_default();

    ImportPreview { rows, report }
}
