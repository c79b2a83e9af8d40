//! On-disk talent catalogue format.
//!
//! ```ron
//! (
//!     talents: [
//!         (
//!             id: "soldier",
//!             name: "Soldier",
//!             bonuses: {
//!                 health: { 1: 0.04, 2: 0.06 },
//!             },
//!         ),
//!         (
//!             id: "soldier_commando",
//!             name: "Commando",
//!             extends: Some("soldier"),
//!             specializations: {
//!                 assassination: { 12: true },
//!             },
//!         ),
//!     ],
//! )
//! ```
//!
//! Tables are `threshold → value` maps. They stay raw here so validation can
//! report the offending talent and key before a [`talent_core::RankTable`]
//! is built.

use std::collections::BTreeMap;
use std::fmt;
use std::marker::PhantomData;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use talent_core::{AbilityKey, BonusKey, Rank, SpecializationKey, TalentId};

/// Raw `threshold → value` steps of one table, in file order.
///
/// Repeated thresholds are kept so that table construction can reject them
/// instead of the last entry silently winning.
#[derive(Clone, Debug, PartialEq)]
pub struct RawTable<V>(Vec<(Rank, V)>);

impl<V> RawTable<V> {
    pub fn new(steps: Vec<(Rank, V)>) -> Self {
        Self(steps)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, (Rank, V)> {
        self.0.iter()
    }

    pub fn values(&self) -> impl Iterator<Item = &V> + '_ {
        self.0.iter().map(|(_, value)| value)
    }
}

impl<V> Default for RawTable<V> {
    fn default() -> Self {
        Self(Vec::new())
    }
}

impl<V, const N: usize> From<[(Rank, V); N]> for RawTable<V> {
    fn from(steps: [(Rank, V); N]) -> Self {
        Self(steps.into())
    }
}

impl<'a, V> IntoIterator for &'a RawTable<V> {
    type Item = &'a (Rank, V);
    type IntoIter = std::slice::Iter<'a, (Rank, V)>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl<V: Serialize> Serialize for RawTable<V> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (threshold, value) in &self.0 {
            map.serialize_entry(threshold, value)?;
        }
        map.end()
    }
}

impl<'de, V: Deserialize<'de>> Deserialize<'de> for RawTable<V> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct StepsVisitor<V>(PhantomData<V>);

        impl<'de, V: Deserialize<'de>> Visitor<'de> for StepsVisitor<V> {
            type Value = RawTable<V>;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a map from rank threshold to value")
            }

            fn visit_map<M>(self, mut map: M) -> Result<Self::Value, M::Error>
            where
                M: MapAccess<'de>,
            {
                let mut steps = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some(step) = map.next_entry::<Rank, V>()? {
                    steps.push(step);
                }
                Ok(RawTable(steps))
            }
        }

        deserializer.deserialize_map(StepsVisitor(PhantomData))
    }
}

/// One talent as written in a catalogue file.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TalentSpec {
    pub id: TalentId,
    pub name: String,
    /// Base talent this entry specializes. The base must appear earlier in
    /// the same file.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extends: Option<TalentId>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub bonuses: BTreeMap<BonusKey, RawTable<f64>>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub abilities: BTreeMap<AbilityKey, RawTable<u8>>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub specializations: BTreeMap<SpecializationKey, RawTable<bool>>,
}

impl TalentSpec {
    pub fn table_count(&self) -> usize {
        self.bonuses.len() + self.abilities.len() + self.specializations.len()
    }
}

/// Top-level structure of `talents.ron`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogueFile {
    pub talents: Vec<TalentSpec>,
}
