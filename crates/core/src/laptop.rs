//! The laptop record: one row of the catalog.
//!
//! Field names follow the domain; serde renames map them onto the column
//! headers of the cleaned laptop dataset (`Model`, `Price_MYR`, `ram_memory`,
//! `OS`, ...). Numeric columns are read leniently because spreadsheet exports
//! often write whole numbers as `8.0`.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Column order of the cleaned laptop dataset.
pub const STANDARD_COLUMNS: [&str; 20] = [
    "brand",
    "Model",
    "Price_MYR",
    "processor_brand",
    "processor_tier",
    "num_cores",
    "num_threads",
    "ram_memory",
    "primary_storage_type",
    "primary_storage_capacity",
    "secondary_storage_type",
    "secondary_storage_capacity",
    "gpu_brand",
    "gpu_type",
    "is_touch_screen",
    "display_size",
    "resolution_width",
    "resolution_height",
    "OS",
    "year_of_warranty",
];

/// Marker used by the dataset for inapplicable fields.
pub const NOT_APPLICABLE: &str = "N/A";

/// Kind of graphics hardware.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum GpuType {
    Integrated,
    Dedicated,
    /// Anything else the dataset carries (e.g. `N/A`), kept verbatim.
    Other(String),
}

impl GpuType {
    /// Lowercase label used for set membership tests.
    pub fn as_str(&self) -> &str {
        match self {
            GpuType::Integrated => "integrated",
            GpuType::Dedicated => "dedicated",
            GpuType::Other(raw) => raw,
        }
    }
}

impl From<&str> for GpuType {
    fn from(raw: &str) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "integrated" => GpuType::Integrated,
            "dedicated" => GpuType::Dedicated,
            _ => GpuType::Other(raw.trim().to_string()),
        }
    }
}

impl std::fmt::Display for GpuType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for GpuType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for GpuType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(GpuType::from(raw.as_str()))
    }
}

/// One laptop in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LaptopRecord {
    pub brand: String,

    #[serde(rename = "Model")]
    pub model: String,

    /// Price in MYR
    #[serde(rename = "Price_MYR", deserialize_with = "de_decimal")]
    pub price: f64,

    pub processor_brand: String,

    pub processor_tier: String,

    #[serde(deserialize_with = "de_count")]
    pub num_cores: u32,

    #[serde(deserialize_with = "de_count")]
    pub num_threads: u32,

    #[serde(rename = "ram_memory", deserialize_with = "de_count")]
    pub ram_gb: u32,

    pub primary_storage_type: String,

    #[serde(rename = "primary_storage_capacity", deserialize_with = "de_count")]
    pub primary_storage_capacity_gb: u32,

    pub secondary_storage_type: String,

    #[serde(rename = "secondary_storage_capacity", deserialize_with = "de_count")]
    pub secondary_storage_capacity_gb: u32,

    pub gpu_brand: String,

    pub gpu_type: GpuType,

    #[serde(deserialize_with = "de_flag")]
    pub is_touch_screen: bool,

    #[serde(rename = "display_size", deserialize_with = "de_decimal")]
    pub display_size_inches: f64,

    #[serde(deserialize_with = "de_count")]
    pub resolution_width: u32,

    #[serde(deserialize_with = "de_count")]
    pub resolution_height: u32,

    #[serde(rename = "OS")]
    pub os: String,

    /// Years of warranty, or `N/A`
    #[serde(rename = "year_of_warranty")]
    pub warranty_years: String,
}

impl LaptopRecord {
    /// A record with the given identity and price; every other field is a
    /// neutral placeholder to be filled by the `with_*` builders.
    pub fn new(brand: impl Into<String>, model: impl Into<String>, price: f64) -> Self {
        Self {
            brand: brand.into(),
            model: model.into(),
            price,
            processor_brand: "intel".into(),
            processor_tier: "core i5".into(),
            num_cores: 4,
            num_threads: 8,
            ram_gb: 8,
            primary_storage_type: "SSD".into(),
            primary_storage_capacity_gb: 512,
            secondary_storage_type: "No secondary storage".into(),
            secondary_storage_capacity_gb: 0,
            gpu_brand: "intel".into(),
            gpu_type: GpuType::Integrated,
            is_touch_screen: false,
            display_size_inches: 15.6,
            resolution_width: 1920,
            resolution_height: 1080,
            os: "windows".into(),
            warranty_years: "1".into(),
        }
    }

    pub fn with_ram(mut self, ram_gb: u32) -> Self {
        self.ram_gb = ram_gb;
        self
    }

    pub fn with_cores(mut self, num_cores: u32) -> Self {
        self.num_cores = num_cores;
        self
    }

    pub fn with_gpu(mut self, gpu_brand: impl Into<String>, gpu_type: GpuType) -> Self {
        self.gpu_brand = gpu_brand.into();
        self.gpu_type = gpu_type;
        self
    }

    pub fn with_os(mut self, os: impl Into<String>) -> Self {
        self.os = os.into();
        self
    }

    pub fn with_display(mut self, display_size_inches: f64) -> Self {
        self.display_size_inches = display_size_inches;
        self
    }

    /// Render the record as text cells in [`STANDARD_COLUMNS`] order.
    pub fn cells(&self) -> Vec<String> {
        vec![
            self.brand.clone(),
            self.model.clone(),
            decimal_text(self.price),
            self.processor_brand.clone(),
            self.processor_tier.clone(),
            self.num_cores.to_string(),
            self.num_threads.to_string(),
            self.ram_gb.to_string(),
            self.primary_storage_type.clone(),
            self.primary_storage_capacity_gb.to_string(),
            self.secondary_storage_type.clone(),
            self.secondary_storage_capacity_gb.to_string(),
            self.gpu_brand.clone(),
            self.gpu_type.to_string(),
            if self.is_touch_screen { "True" } else { "False" }.to_string(),
            decimal_text(self.display_size_inches),
            self.resolution_width.to_string(),
            self.resolution_height.to_string(),
            self.os.clone(),
            self.warranty_years.clone(),
        ]
    }
}

/// Format a decimal the way the dataset prints it: whole numbers keep one
/// fractional digit (`15.0`), everything else uses the shortest form (`15.6`).
pub fn decimal_text(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 {
        format!("{value:.1}")
    } else {
        format!("{value}")
    }
}

fn de_decimal<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    let raw = String::deserialize(deserializer)?;
    raw.trim()
        .parse::<f64>()
        .map_err(|_| serde::de::Error::custom(format!("expected a number, found '{raw}'")))
}

fn de_count<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
    let raw = String::deserialize(deserializer)?;
    let text = raw.trim();
    if let Ok(n) = text.parse::<u32>() {
        return Ok(n);
    }
    match text.parse::<f64>() {
        Ok(n) if n >= 0.0 && n.fract() == 0.0 && n <= f64::from(u32::MAX) => Ok(n as u32),
        _ => Err(serde::de::Error::custom(format!(
            "expected a whole number, found '{raw}'"
        ))),
    }
}

fn de_flag<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    let raw = String::deserialize(deserializer)?;
    match raw.trim().to_lowercase().as_str() {
        "true" | "yes" | "1" => Ok(true),
        "false" | "no" | "0" | "" => Ok(false),
        _ => Err(serde::de::Error::custom(format!(
            "expected a yes/no flag, found '{raw}'"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gpu_type_parses_case_insensitively() {
        assert_eq!(GpuType::from("Dedicated"), GpuType::Dedicated);
        assert_eq!(GpuType::from(" integrated "), GpuType::Integrated);
        assert_eq!(GpuType::from("N/A"), GpuType::Other("N/A".into()));
    }

    #[test]
    fn decimal_text_keeps_one_digit_for_whole_numbers() {
        assert_eq!(decimal_text(15.0), "15.0");
        assert_eq!(decimal_text(15.6), "15.6");
        assert_eq!(decimal_text(2999.0), "2999.0");
    }

    #[test]
    fn record_deserializes_from_dataset_columns() {
        let json = serde_json::json!({
            "brand": "asus",
            "Model": "ROG Strix G16",
            "Price_MYR": "6499.0",
            "processor_brand": "intel",
            "processor_tier": "core i7",
            "num_cores": "16",
            "num_threads": "24",
            "ram_memory": "16.0",
            "primary_storage_type": "SSD",
            "primary_storage_capacity": "1024",
            "secondary_storage_type": "No secondary storage",
            "secondary_storage_capacity": "0",
            "gpu_brand": "nvidia",
            "gpu_type": "dedicated",
            "is_touch_screen": "False",
            "display_size": "16.0",
            "resolution_width": "2560",
            "resolution_height": "1600",
            "OS": "windows",
            "year_of_warranty": "2",
            "Rating": "4.5"
        });
        let record: LaptopRecord = serde_json::from_value(json).unwrap();
        assert_eq!(record.model, "ROG Strix G16");
        assert_eq!(record.ram_gb, 16);
        assert_eq!(record.gpu_type, GpuType::Dedicated);
        assert!(!record.is_touch_screen);
        assert!((record.display_size_inches - 16.0).abs() < f64::EPSILON);
    }

    #[test]
    fn fractional_count_is_rejected() {
        let json = serde_json::json!({ "n": "8.5" });
        #[derive(Deserialize)]
        struct Probe {
            #[serde(deserialize_with = "de_count")]
            #[allow(dead_code)]
            n: u32,
        }
        assert!(serde_json::from_value::<Probe>(json).is_err());
    }

    #[test]
    fn cells_follow_standard_columns() {
        let record = LaptopRecord::new("dell", "XPS 13", 5999.0);
        let cells = record.cells();
        assert_eq!(cells.len(), STANDARD_COLUMNS.len());
        assert_eq!(cells[1], "XPS 13");
        assert_eq!(cells[2], "5999.0");
    }
}
