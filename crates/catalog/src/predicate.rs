//! Predicate library: pure record tests composed with logical AND.
//!
//! Predicates are plain data so a filter can be logged, echoed back to the
//! caller, and compared in tests. String membership tests are
//! case-insensitive: both the configured set and the record value are
//! lowercased before comparison.

use lappybot_core::laptop::LaptopRecord;
use serde::Serialize;

/// A single test over one [`LaptopRecord`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Predicate {
    /// `price <= max_price`
    BudgetAtMost { max_price: f64 },
    /// `price > min_price`
    PriceAbove { min_price: f64 },
    RamAtLeast { min_ram: u32 },
    CoresAtLeast { min_cores: u32 },
    GpuTypeIn { gpu_types: Vec<String> },
    OsIn { os: Vec<String> },
    BrandIn { brands: Vec<String> },
    /// `low <= display < high`, open-ended when `high` is `None`
    DisplaySizeInRange { low: f64, high: Option<f64> },
}

fn lowered<I, S>(items: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    items
        .into_iter()
        .map(|s| s.as_ref().trim().to_lowercase())
        .collect()
}

fn member(set: &[String], value: &str) -> bool {
    let value = value.trim().to_lowercase();
    set.iter().any(|s| *s == value)
}

impl Predicate {
    pub fn budget_at_most(max_price: f64) -> Self {
        Self::BudgetAtMost { max_price }
    }

    pub fn price_above(min_price: f64) -> Self {
        Self::PriceAbove { min_price }
    }

    pub fn ram_at_least(min_ram: u32) -> Self {
        Self::RamAtLeast { min_ram }
    }

    pub fn cores_at_least(min_cores: u32) -> Self {
        Self::CoresAtLeast { min_cores }
    }

    pub fn gpu_type_in<I: IntoIterator<Item = S>, S: AsRef<str>>(gpu_types: I) -> Self {
        Self::GpuTypeIn {
            gpu_types: lowered(gpu_types),
        }
    }

    pub fn os_in<I: IntoIterator<Item = S>, S: AsRef<str>>(os: I) -> Self {
        Self::OsIn { os: lowered(os) }
    }

    pub fn brand_in<I: IntoIterator<Item = S>, S: AsRef<str>>(brands: I) -> Self {
        Self::BrandIn {
            brands: lowered(brands),
        }
    }

    pub fn display_size_in_range(low: f64, high: Option<f64>) -> Self {
        Self::DisplaySizeInRange { low, high }
    }

    /// Evaluate against one record.
    pub fn test(&self, record: &LaptopRecord) -> bool {
        match self {
            Self::BudgetAtMost { max_price } => record.price <= *max_price,
            Self::PriceAbove { min_price } => record.price > *min_price,
            Self::RamAtLeast { min_ram } => record.ram_gb >= *min_ram,
            Self::CoresAtLeast { min_cores } => record.num_cores >= *min_cores,
            Self::GpuTypeIn { gpu_types } => member(gpu_types, record.gpu_type.as_str()),
            Self::OsIn { os } => member(os, &record.os),
            Self::BrandIn { brands } => member(brands, &record.brand),
            Self::DisplaySizeInRange { low, high } => {
                let size = record.display_size_inches;
                size >= *low && high.is_none_or(|h| size < h)
            }
        }
    }
}

/// An AND-composition of predicates. An empty set accepts every record.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct PredicateSet(Vec<Predicate>);

impl PredicateSet {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn push(&mut self, predicate: Predicate) {
        self.0.push(predicate);
    }

    /// Builder-style push.
    pub fn with(mut self, predicate: Predicate) -> Self {
        self.0.push(predicate);
        self
    }

    /// Append every predicate of `other`.
    pub fn extend(&mut self, other: PredicateSet) {
        self.0.extend(other.0);
    }

    pub fn matches(&self, record: &LaptopRecord) -> bool {
        self.0.iter().all(|p| p.test(record))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Predicate> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<Predicate> for PredicateSet {
    fn from_iter<T: IntoIterator<Item = Predicate>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Price brackets offered by the guided quiz.
///
/// The lower bound of the middle bracket is exclusive: a laptop priced at
/// exactly 3000 belongs to [`BudgetBucket::Under3000`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BudgetBucket {
    /// `price <= 3000`
    Under3000,
    /// `3000 < price <= 5000`
    From3000To5000,
    /// `price > 5000`
    Over5000,
}

impl BudgetBucket {
    /// Parse a quiz answer such as `"Under MYR 3000"`, `"MYR 3000-5000"`,
    /// `"Over MYR 5000"`, or the short forms without the currency.
    pub fn parse(label: &str) -> Option<Self> {
        let normalized = label.trim().replace('–', "-").replace("MYR ", "");
        match normalized.as_str() {
            "Under 3000" => Some(Self::Under3000),
            "3000-5000" => Some(Self::From3000To5000),
            "Over 5000" => Some(Self::Over5000),
            _ => None,
        }
    }

    pub fn predicates(self) -> PredicateSet {
        match self {
            Self::Under3000 => PredicateSet::new().with(Predicate::budget_at_most(3000.0)),
            Self::From3000To5000 => PredicateSet::new()
                .with(Predicate::price_above(3000.0))
                .with(Predicate::budget_at_most(5000.0)),
            Self::Over5000 => PredicateSet::new().with(Predicate::price_above(5000.0)),
        }
    }
}

/// Display size brackets offered by the guided quiz.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizeBucket {
    /// `[13.0, 15.0)`
    Compact,
    /// `[15.0, ∞)`
    Large,
}

impl SizeBucket {
    /// Parse `"13-14 inch"` or `"15-16 inch"` (hyphen or en dash).
    pub fn parse(label: &str) -> Option<Self> {
        match label.trim().replace('–', "-").as_str() {
            "13-14 inch" => Some(Self::Compact),
            "15-16 inch" => Some(Self::Large),
            _ => None,
        }
    }

    pub fn predicate(self) -> Predicate {
        match self {
            Self::Compact => Predicate::display_size_in_range(13.0, Some(15.0)),
            Self::Large => Predicate::display_size_in_range(15.0, None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lappybot_core::laptop::GpuType;

    fn priced(price: f64) -> LaptopRecord {
        LaptopRecord::new("acer", "Aspire", price)
    }

    #[test]
    fn budget_ceiling_is_inclusive() {
        let p = Predicate::budget_at_most(3000.0);
        assert!(p.test(&priced(3000.0)));
        assert!(!p.test(&priced(3000.01)));
    }

    #[test]
    fn membership_ignores_case_on_both_sides() {
        let record = LaptopRecord::new("ASUS", "ROG", 6000.0)
            .with_os("Windows")
            .with_gpu("NVIDIA", GpuType::Dedicated);
        assert!(Predicate::brand_in(["asus"]).test(&record));
        assert!(Predicate::brand_in(["Asus", "hp"]).test(&record));
        assert!(Predicate::os_in(["WINDOWS"]).test(&record));
        assert!(Predicate::gpu_type_in(["Dedicated"]).test(&record));
        assert!(!Predicate::gpu_type_in(["integrated"]).test(&record));
    }

    #[test]
    fn other_gpu_type_matches_its_raw_label() {
        let record = priced(100.0).with_gpu("N/A", GpuType::from("N/A"));
        assert!(Predicate::gpu_type_in(["n/a"]).test(&record));
        assert!(!Predicate::gpu_type_in(["dedicated", "integrated"]).test(&record));
    }

    #[test]
    fn ram_and_cores_floors() {
        let record = priced(4000.0).with_ram(16).with_cores(6);
        assert!(Predicate::ram_at_least(16).test(&record));
        assert!(!Predicate::ram_at_least(17).test(&record));
        assert!(Predicate::cores_at_least(6).test(&record));
        assert!(!Predicate::cores_at_least(8).test(&record));
    }

    #[test]
    fn budget_bucket_boundaries() {
        let under = BudgetBucket::Under3000.predicates();
        let middle = BudgetBucket::From3000To5000.predicates();
        let over = BudgetBucket::Over5000.predicates();

        assert!(under.matches(&priced(3000.0)));
        assert!(!middle.matches(&priced(3000.0)));

        assert!(middle.matches(&priced(5000.0)));
        assert!(!over.matches(&priced(5000.0)));

        assert!(over.matches(&priced(5000.5)));
        assert!(!under.matches(&priced(5000.5)));
        assert!(!middle.matches(&priced(5000.5)));
    }

    #[test]
    fn budget_bucket_labels() {
        assert_eq!(BudgetBucket::parse("Under MYR 3000"), Some(BudgetBucket::Under3000));
        assert_eq!(BudgetBucket::parse("MYR 3000-5000"), Some(BudgetBucket::From3000To5000));
        assert_eq!(BudgetBucket::parse("3000–5000"), Some(BudgetBucket::From3000To5000));
        assert_eq!(BudgetBucket::parse("Over 5000"), Some(BudgetBucket::Over5000));
        assert_eq!(BudgetBucket::parse("under myr 3000"), None);
        assert_eq!(BudgetBucket::parse("Whatever"), None);
    }

    #[test]
    fn fifteen_inches_is_large_not_compact() {
        let record = priced(4000.0).with_display(15.0);
        assert!(SizeBucket::Large.predicate().test(&record));
        assert!(!SizeBucket::Compact.predicate().test(&record));
    }

    #[test]
    fn compact_bucket_bounds() {
        let compact = SizeBucket::Compact.predicate();
        assert!(compact.test(&priced(1.0).with_display(13.0)));
        assert!(compact.test(&priced(1.0).with_display(14.9)));
        assert!(!compact.test(&priced(1.0).with_display(12.5)));
        assert_eq!(SizeBucket::parse("13–14 inch"), Some(SizeBucket::Compact));
        assert_eq!(SizeBucket::parse("17 inch"), None);
    }

    #[test]
    fn empty_set_accepts_everything() {
        assert!(PredicateSet::new().matches(&priced(99_999.0)));
    }

    #[test]
    fn set_is_logical_and() {
        let set: PredicateSet = [Predicate::ram_at_least(8), Predicate::budget_at_most(3000.0)]
            .into_iter()
            .collect();
        assert!(set.matches(&priced(2500.0).with_ram(8)));
        assert!(!set.matches(&priced(2500.0).with_ram(4)));
        assert!(!set.matches(&priced(3500.0).with_ram(8)));
    }

    #[test]
    fn predicate_serializes_with_kind_tag() {
        let json = serde_json::to_value(Predicate::brand_in(["HP"])).unwrap();
        assert_eq!(json["kind"], "brand_in");
        assert_eq!(json["brands"][0], "hp");
    }
}
