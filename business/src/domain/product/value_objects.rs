use serde::{Deserialize, Serialize};

/// Client-side ordering applied to a page of search results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    Popularity,
    ProductName,
    ProductNameDesc,
    NutriscoreAsc,
    NutriscoreDesc,
}

impl SortKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Popularity => "popularity",
            SortKey::ProductName => "product_name",
            SortKey::ProductNameDesc => "product_name_desc",
            SortKey::NutriscoreAsc => "nutriscore_asc",
            SortKey::NutriscoreDesc => "nutriscore_desc",
        }
    }
}

impl std::fmt::Display for SortKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "popularity" => Ok(SortKey::Popularity),
            "product_name" => Ok(SortKey::ProductName),
            "product_name_desc" => Ok(SortKey::ProductNameDesc),
            "nutriscore_asc" => Ok(SortKey::NutriscoreAsc),
            "nutriscore_desc" => Ok(SortKey::NutriscoreDesc),
            _ => Err(format!("Invalid sort key: {}", s)),
        }
    }
}

/// Nutrition grade, A best.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NutritionGrade {
    A,
    B,
    C,
    D,
    E,
}

impl std::fmt::Display for NutritionGrade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NutritionGrade::A => write!(f, "a"),
            NutritionGrade::B => write!(f, "b"),
            NutritionGrade::C => write!(f, "c"),
            NutritionGrade::D => write!(f, "d"),
            NutritionGrade::E => write!(f, "e"),
        }
    }
}

impl std::str::FromStr for NutritionGrade {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "a" => Ok(NutritionGrade::A),
            "b" => Ok(NutritionGrade::B),
            "c" => Ok(NutritionGrade::C),
            "d" => Ok(NutritionGrade::D),
            "e" => Ok(NutritionGrade::E),
            _ => Err(format!("Invalid nutrition grade: {}", s)),
        }
    }
}

/// Processing-level group ("NOVA"), 1 least processed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NovaGroup {
    Unprocessed,
    ProcessedCulinary,
    Processed,
    UltraProcessed,
}

impl NovaGroup {
    pub fn from_group(group: u8) -> Option<Self> {
        match group {
            1 => Some(NovaGroup::Unprocessed),
            2 => Some(NovaGroup::ProcessedCulinary),
            3 => Some(NovaGroup::Processed),
            4 => Some(NovaGroup::UltraProcessed),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            NovaGroup::Unprocessed => "Unprocessed",
            NovaGroup::ProcessedCulinary => "Processed culinary",
            NovaGroup::Processed => "Processed",
            NovaGroup::UltraProcessed => "Ultra-processed",
        }
    }
}
