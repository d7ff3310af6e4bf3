//! Sampling dimensions and the combos built from them.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::catalog;
use crate::ParseError;

/// One axis of a combo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Dimension {
    Category,
    Gender,
    Age,
    Ethnicity,
    Background,
    Pose,
}

impl Dimension {
    /// Every dimension, in enumeration order.
    pub const ALL: [Dimension; 6] = [
        Dimension::Category,
        Dimension::Gender,
        Dimension::Age,
        Dimension::Ethnicity,
        Dimension::Background,
        Dimension::Pose,
    ];

    /// Dimensions that describe the model rather than the shot.
    pub const PERSONA: [Dimension; 5] = [
        Dimension::Gender,
        Dimension::Age,
        Dimension::Ethnicity,
        Dimension::Background,
        Dimension::Pose,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Dimension::Category => "category",
            Dimension::Gender => "gender",
            Dimension::Age => "age",
            Dimension::Ethnicity => "ethnicity",
            Dimension::Background => "background",
            Dimension::Pose => "pose",
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Dimension {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Dimension::ALL
            .into_iter()
            .find(|d| d.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParseError::UnknownDimension(s.to_string()))
    }
}

/// One value per dimension.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Combo {
    pub category: String,
    pub gender: String,
    pub age: String,
    pub ethnicity: String,
    pub background: String,
    pub pose: String,
}

impl Combo {
    pub fn get(&self, dimension: Dimension) -> &str {
        match dimension {
            Dimension::Category => &self.category,
            Dimension::Gender => &self.gender,
            Dimension::Age => &self.age,
            Dimension::Ethnicity => &self.ethnicity,
            Dimension::Background => &self.background,
            Dimension::Pose => &self.pose,
        }
    }

    pub fn set(&mut self, dimension: Dimension, value: impl Into<String>) {
        let slot = match dimension {
            Dimension::Category => &mut self.category,
            Dimension::Gender => &mut self.gender,
            Dimension::Age => &mut self.age,
            Dimension::Ethnicity => &mut self.ethnicity,
            Dimension::Background => &mut self.background,
            Dimension::Pose => &mut self.pose,
        };
        *slot = value.into();
    }

    /// `(dimension, value)` pairs in enumeration order.
    pub fn values(&self) -> impl Iterator<Item = (Dimension, &str)> + '_ {
        Dimension::ALL.into_iter().map(move |d| (d, self.get(d)))
    }
}

/// Selected values for each dimension.
///
/// Each set keeps insertion order and never holds duplicates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DimensionSets {
    pub categories: Vec<String>,
    pub genders: Vec<String>,
    pub ages: Vec<String>,
    pub ethnicities: Vec<String>,
    pub backgrounds: Vec<String>,
    pub poses: Vec<String>,
}

impl DimensionSets {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every value the product offers.
    pub fn catalog() -> Self {
        let mut sets = Self::new();
        for dimension in Dimension::ALL {
            sets.extend(dimension, catalog::values(dimension).iter().copied());
        }
        sets
    }

    pub fn get(&self, dimension: Dimension) -> &[String] {
        match dimension {
            Dimension::Category => &self.categories,
            Dimension::Gender => &self.genders,
            Dimension::Age => &self.ages,
            Dimension::Ethnicity => &self.ethnicities,
            Dimension::Background => &self.backgrounds,
            Dimension::Pose => &self.poses,
        }
    }

    fn get_mut(&mut self, dimension: Dimension) -> &mut Vec<String> {
        match dimension {
            Dimension::Category => &mut self.categories,
            Dimension::Gender => &mut self.genders,
            Dimension::Age => &mut self.ages,
            Dimension::Ethnicity => &mut self.ethnicities,
            Dimension::Background => &mut self.backgrounds,
            Dimension::Pose => &mut self.poses,
        }
    }

    /// Add a value, ignoring duplicates. Returns true if it was new.
    pub fn insert(&mut self, dimension: Dimension, value: impl Into<String>) -> bool {
        let value = value.into();
        let set = self.get_mut(dimension);
        if set.contains(&value) {
            return false;
        }
        set.push(value);
        true
    }

    pub fn extend<I, S>(&mut self, dimension: Dimension, values: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for value in values {
            self.insert(dimension, value);
        }
    }

    /// Builder form of [`DimensionSets::extend`].
    pub fn with<I, S>(mut self, dimension: Dimension, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extend(dimension, values);
        self
    }

    /// Remove duplicates left by deserialization, keeping first occurrences.
    pub fn normalized(self) -> Self {
        let mut sets = Self::new();
        for dimension in Dimension::ALL {
            sets.extend(dimension, self.get(dimension).iter().cloned());
        }
        sets
    }

    /// Whether some dimension has no values, which makes the cross product empty.
    pub fn has_empty(&self) -> bool {
        Dimension::ALL.into_iter().any(|d| self.get(d).is_empty())
    }

    /// Size of the full cross product.
    pub fn combination_count(&self) -> usize {
        Dimension::ALL
            .into_iter()
            .map(|d| self.get(d).len())
            .product()
    }

    /// Every combo, category outermost and pose innermost.
    pub fn cross_product(&self) -> Vec<Combo> {
        let mut combos = Vec::with_capacity(self.combination_count());
        for category in &self.categories {
            for gender in &self.genders {
                for age in &self.ages {
                    for ethnicity in &self.ethnicities {
                        for background in &self.backgrounds {
                            for pose in &self.poses {
                                combos.push(Combo {
                                    category: category.clone(),
                                    gender: gender.clone(),
                                    age: age.clone(),
                                    ethnicity: ethnicity.clone(),
                                    background: background.clone(),
                                    pose: pose.clone(),
                                });
                            }
                        }
                    }
                }
            }
        }
        combos
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_sets() -> DimensionSets {
        DimensionSets::new()
            .with(Dimension::Category, ["Standing Pose"])
            .with(Dimension::Gender, ["Female", "Male"])
            .with(Dimension::Age, ["Adult"])
            .with(Dimension::Ethnicity, ["Asian", "Black"])
            .with(Dimension::Background, ["Studio White"])
            .with(Dimension::Pose, ["Standing", "Walking"])
    }

    #[test]
    fn test_dimension_parse() {
        assert_eq!("pose".parse::<Dimension>(), Ok(Dimension::Pose));
        assert_eq!(" Gender ".parse::<Dimension>(), Ok(Dimension::Gender));
        assert_eq!(
            "mood".parse::<Dimension>(),
            Err(ParseError::UnknownDimension("mood".to_string()))
        );
    }

    #[test]
    fn test_insert_deduplicates() {
        let mut sets = DimensionSets::new();
        assert!(sets.insert(Dimension::Pose, "Standing"));
        assert!(!sets.insert(Dimension::Pose, "Standing"));
        assert!(sets.insert(Dimension::Pose, "Seated"));
        assert_eq!(sets.poses, vec!["Standing", "Seated"]);
    }

    #[test]
    fn test_normalized_drops_duplicates() {
        let sets = DimensionSets {
            genders: vec!["Male".into(), "Female".into(), "Male".into()],
            ..Default::default()
        };
        assert_eq!(sets.normalized().genders, vec!["Male", "Female"]);
    }

    #[test]
    fn test_cross_product_order() {
        let combos = small_sets().cross_product();
        assert_eq!(combos.len(), 8);
        assert_eq!(combos.len(), small_sets().combination_count());

        let first = &combos[0];
        assert_eq!(
            (first.gender.as_str(), first.ethnicity.as_str(), first.pose.as_str()),
            ("Female", "Asian", "Standing")
        );
        // Pose varies fastest, gender slowest
        assert_eq!(combos[1].pose, "Walking");
        assert_eq!(combos[2].ethnicity, "Black");
        assert_eq!(combos[4].gender, "Male");
    }

    #[test]
    fn test_empty_dimension_empties_product() {
        let mut sets = small_sets();
        sets.backgrounds.clear();
        assert!(sets.has_empty());
        assert!(sets.cross_product().is_empty());
    }

    #[test]
    fn test_combo_get_set() {
        let mut combo = small_sets().cross_product().remove(0);
        combo.set(Dimension::Background, "Outdoor Urban");
        assert_eq!(combo.get(Dimension::Background), "Outdoor Urban");
        let dims: Vec<_> = combo.values().map(|(d, _)| d).collect();
        assert_eq!(dims, Dimension::ALL.to_vec());
    }

    #[test]
    fn test_catalog_sets_are_full() {
        let sets = DimensionSets::catalog();
        assert!(!sets.has_empty());
        assert_eq!(sets.genders, vec!["Female", "Male"]);
    }
}
