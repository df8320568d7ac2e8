/// Shared data structures for the application state
///
/// These structs represent the catalog records as they appear in the
/// input document and in the saved snapshot.
use std::path::{Path, PathBuf};

use serde::{Deserialize, Deserializer, Serialize};

/// Image paths exported from the original site carry this absolute prefix
pub const LOCAL_IMAGE_ROOT: &str = "/home/ubuntu/vendas-site/";

/// Represents a single product in the catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    /// Category tag used by the filter buttons (e.g. "eletronicos")
    #[serde(default, deserialize_with = "null_as_default")]
    pub category: String,
    /// Display name of the product
    #[serde(default, deserialize_with = "null_as_default")]
    pub original_name: String,
    /// Image references, index 0 is the cover
    #[serde(default, deserialize_with = "null_as_default")]
    pub images: Vec<String>,
    /// Price, absent means zero
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
    /// Free text description, the only field edited at runtime
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    /// Link to the original product page
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

impl Item {
    /// Price as shown on cards and in the gallery, e.g. "R$ 1.234,50"
    pub fn price_label(&self) -> String {
        format!("R$ {}", format_price(self.value))
    }

    /// The external link, if one is set and non-empty
    pub fn external_link(&self) -> Option<&str> {
        self.link.as_deref().filter(|link| !link.trim().is_empty())
    }

    pub fn cover_image(&self) -> Option<&str> {
        self.images.first().map(String::as_str)
    }
}

/// Treat an explicit JSON `null` the same as a missing field
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Format a price with "." thousands separators and "," decimals.
/// Missing or zero prices render as "0,00"; whole amounts drop the decimals.
pub fn format_price(value: Option<f64>) -> String {
    let value = match value {
        Some(v) if v.is_finite() && v != 0.0 => v,
        _ => return "0,00".to_string(),
    };

    let cents = (value.abs() * 100.0).round() as u64;
    let whole = group_thousands(cents / 100);
    let sign = if value < 0.0 { "-" } else { "" };

    match cents % 100 {
        0 => format!("{}{}", sign, whole),
        fraction => format!("{}{},{:02}", sign, whole, fraction),
    }
}

fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }
    grouped
}

/// Rewrite an image reference for display.
/// References under [`LOCAL_IMAGE_ROOT`] become relative; anything else is returned verbatim.
pub fn image_url(reference: &str) -> &str {
    reference
        .strip_prefix(LOCAL_IMAGE_ROOT)
        .unwrap_or(reference)
}

/// Resolve an image reference to a file the image widget can load.
/// Relative references are taken relative to `root`.
pub fn image_source(root: &Path, reference: &str) -> PathBuf {
    let path = Path::new(image_url(reference));
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        root.join(path)
    }
}
