// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Core types shared by the panels
//!
//! Express identifiers, IFC class names, fragment id maps and colours.

use crate::{ModelError, Result};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

/// Type-safe express identifier
///
/// Wraps the raw IFC entity ID (e.g., #123 becomes ExpressId(123))
#[derive(
    Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct ExpressId(pub u32);

impl fmt::Display for ExpressId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl From<u32> for ExpressId {
    fn from(id: u32) -> Self {
        ExpressId(id)
    }
}

impl From<ExpressId> for u32 {
    fn from(id: ExpressId) -> Self {
        id.0
    }
}

/// IFC classes the panels care about
///
/// Everything else is kept as [`IfcType::Unknown`] with its upper-case name,
/// so classification by entity still works for classes not listed here.
#[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IfcType {
    // Spatial structure
    IfcProject,
    IfcSite,
    IfcBuilding,
    IfcBuildingStorey,
    IfcSpace,

    // Building elements
    IfcWall,
    IfcWallStandardCase,
    IfcCurtainWall,
    IfcSlab,
    IfcRoof,
    IfcBeam,
    IfcColumn,
    IfcDoor,
    IfcWindow,
    IfcStair,
    IfcStairFlight,
    IfcRamp,
    IfcRailing,
    IfcCovering,
    IfcPlate,
    IfcMember,
    IfcFooting,
    IfcBuildingElementProxy,
    IfcFurnishingElement,
    IfcOpeningElement,
    IfcFlowTerminal,
    IfcFlowSegment,

    // Property definitions
    IfcPropertySet,
    IfcPropertySingleValue,
    IfcElementQuantity,

    // Relationships
    IfcRelDefinesByProperties,
    IfcRelDefinesByType,
    IfcRelContainedInSpatialStructure,
    IfcRelAggregates,
    IfcRelAssociatesMaterial,

    /// Unknown type (upper-case STEP name, or `UNKNOWN_<code>` for unmapped codes)
    Unknown(String),
}

/// (upper-case name, web-ifc type code, variant)
const TYPE_TABLE: &[(&str, u32, IfcType)] = &[
    ("IFCPROJECT", 103090709, IfcType::IfcProject),
    ("IFCSITE", 4097777520, IfcType::IfcSite),
    ("IFCBUILDING", 4031249490, IfcType::IfcBuilding),
    ("IFCBUILDINGSTOREY", 3124254112, IfcType::IfcBuildingStorey),
    ("IFCSPACE", 3856911033, IfcType::IfcSpace),
    ("IFCWALL", 2391406946, IfcType::IfcWall),
    ("IFCWALLSTANDARDCASE", 3512223829, IfcType::IfcWallStandardCase),
    ("IFCCURTAINWALL", 3495092785, IfcType::IfcCurtainWall),
    ("IFCSLAB", 1529196076, IfcType::IfcSlab),
    ("IFCROOF", 2016517767, IfcType::IfcRoof),
    ("IFCBEAM", 753842376, IfcType::IfcBeam),
    ("IFCCOLUMN", 843113511, IfcType::IfcColumn),
    ("IFCDOOR", 395920057, IfcType::IfcDoor),
    ("IFCWINDOW", 3304561284, IfcType::IfcWindow),
    ("IFCSTAIR", 331165859, IfcType::IfcStair),
    ("IFCSTAIRFLIGHT", 4252922144, IfcType::IfcStairFlight),
    ("IFCRAMP", 3024970846, IfcType::IfcRamp),
    ("IFCRAILING", 2262370178, IfcType::IfcRailing),
    ("IFCCOVERING", 1973544240, IfcType::IfcCovering),
    ("IFCPLATE", 3171933400, IfcType::IfcPlate),
    ("IFCMEMBER", 1073191201, IfcType::IfcMember),
    ("IFCFOOTING", 900683007, IfcType::IfcFooting),
    ("IFCBUILDINGELEMENTPROXY", 1095909175, IfcType::IfcBuildingElementProxy),
    ("IFCFURNISHINGELEMENT", 263784265, IfcType::IfcFurnishingElement),
    ("IFCOPENINGELEMENT", 3588315303, IfcType::IfcOpeningElement),
    ("IFCFLOWTERMINAL", 2058353004, IfcType::IfcFlowTerminal),
    ("IFCFLOWSEGMENT", 987401354, IfcType::IfcFlowSegment),
    ("IFCPROPERTYSET", 1451395588, IfcType::IfcPropertySet),
    ("IFCPROPERTYSINGLEVALUE", 3650150729, IfcType::IfcPropertySingleValue),
    ("IFCELEMENTQUANTITY", 1883228015, IfcType::IfcElementQuantity),
    ("IFCRELDEFINESBYPROPERTIES", 4186316022, IfcType::IfcRelDefinesByProperties),
    ("IFCRELDEFINESBYTYPE", 781010003, IfcType::IfcRelDefinesByType),
    (
        "IFCRELCONTAINEDINSPATIALSTRUCTURE",
        3242617779,
        IfcType::IfcRelContainedInSpatialStructure,
    ),
    ("IFCRELAGGREGATES", 160246688, IfcType::IfcRelAggregates),
    ("IFCRELASSOCIATESMATERIAL", 2655215786, IfcType::IfcRelAssociatesMaterial),
];

impl FromStr for IfcType {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl IfcType {
    /// Parse from a STEP class name (case-insensitive)
    pub fn parse(s: &str) -> Self {
        let upper = s.trim().to_uppercase();
        TYPE_TABLE
            .iter()
            .find(|(name, _, _)| *name == upper)
            .map(|(_, _, ty)| ty.clone())
            .unwrap_or(IfcType::Unknown(upper))
    }

    /// Resolve a numeric web-ifc type code
    pub fn from_code(code: u32) -> Self {
        TYPE_TABLE
            .iter()
            .find(|(_, c, _)| *c == code)
            .map(|(_, _, ty)| ty.clone())
            .unwrap_or_else(|| IfcType::Unknown(format!("UNKNOWN_{}", code)))
    }

    /// Numeric web-ifc type code, if known
    pub fn code(&self) -> Option<u32> {
        TYPE_TABLE
            .iter()
            .find(|(_, _, ty)| ty == self)
            .map(|(_, code, _)| *code)
    }

    /// Upper-case STEP name, as used for `entities` classification groups
    pub fn name(&self) -> &str {
        match self {
            IfcType::Unknown(name) => name,
            other => TYPE_TABLE
                .iter()
                .find(|(_, _, ty)| ty == other)
                .map(|(name, _, _)| *name)
                .unwrap_or("UNKNOWN"),
        }
    }
}

impl fmt::Display for IfcType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Fragment uuid to express ids
///
/// The unit of every highlight, colour and classification operation.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FragmentIdMap(BTreeMap<String, BTreeSet<ExpressId>>);

impl FragmentIdMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one id under a fragment
    pub fn insert(&mut self, fragment: impl Into<String>, id: ExpressId) {
        self.0.entry(fragment.into()).or_default().insert(id);
    }

    /// Merge every entry of `other` into this map
    pub fn merge(&mut self, other: &FragmentIdMap) {
        for (fragment, ids) in &other.0 {
            self.0
                .entry(fragment.clone())
                .or_default()
                .extend(ids.iter().copied());
        }
    }

    /// Remove every id of `other`; fragments left empty are dropped
    pub fn subtract(&mut self, other: &FragmentIdMap) {
        for (fragment, ids) in &other.0 {
            if let Some(own) = self.0.get_mut(fragment) {
                own.retain(|id| !ids.contains(id));
            }
        }
        self.0.retain(|_, ids| !ids.is_empty());
    }

    /// Keep only ids present in both maps
    pub fn intersection(&self, other: &FragmentIdMap) -> FragmentIdMap {
        let mut result = FragmentIdMap::new();
        for (fragment, ids) in &self.0 {
            if let Some(theirs) = other.0.get(fragment) {
                let common: BTreeSet<ExpressId> = ids.intersection(theirs).copied().collect();
                if !common.is_empty() {
                    result.0.insert(fragment.clone(), common);
                }
            }
        }
        result
    }

    /// Drop a whole fragment entry
    pub fn remove_fragment(&mut self, fragment: &str) {
        self.0.remove(fragment);
    }

    pub fn get(&self, fragment: &str) -> Option<&BTreeSet<ExpressId>> {
        self.0.get(fragment)
    }

    pub fn contains(&self, fragment: &str, id: ExpressId) -> bool {
        self.0.get(fragment).is_some_and(|ids| ids.contains(&id))
    }

    pub fn fragments(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &BTreeSet<ExpressId>)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of distinct express ids across all fragments
    pub fn id_count(&self) -> usize {
        self.0
            .values()
            .flatten()
            .collect::<BTreeSet<_>>()
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.values().all(BTreeSet::is_empty)
    }
}

/// RGB colour in linear 0..1 components
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Parse `#rrggbb` (leading `#` optional)
    pub fn from_hex(hex: &str) -> Result<Self> {
        let digits = hex.trim().trim_start_matches('#');
        if digits.len() != 6 || !digits.is_ascii() {
            return Err(ModelError::InvalidColor(hex.to_string()));
        }
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&digits[range], 16)
                .map(|v| v as f32 / 255.0)
                .map_err(|_| ModelError::InvalidColor(hex.to_string()))
        };
        Ok(Self {
            r: channel(0..2)?,
            g: channel(2..4)?,
            b: channel(4..6)?,
        })
    }

    /// Format as lower-case `#rrggbb`
    pub fn to_hex(&self) -> String {
        let byte = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        format!("#{:02x}{:02x}{:02x}", byte(self.r), byte(self.g), byte(self.b))
    }
}

impl FromStr for Color {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self> {
        Color::from_hex(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_name_and_code() {
        assert_eq!(IfcType::parse("IfcWall"), IfcType::IfcWall);
        assert_eq!(IfcType::from_code(3512223829), IfcType::IfcWallStandardCase);
        assert_eq!(IfcType::IfcWall.name(), "IFCWALL");
        assert_eq!(IfcType::IfcSlab.code(), Some(1529196076));
        assert_eq!(IfcType::parse("IfcTendon").name(), "IFCTENDON");
        assert_eq!(IfcType::from_code(7).name(), "UNKNOWN_7");
    }

    #[test]
    fn test_fragment_map_set_operations() {
        let mut a = FragmentIdMap::new();
        a.insert("f1", ExpressId(1));
        a.insert("f1", ExpressId(2));
        a.insert("f2", ExpressId(3));

        let mut b = FragmentIdMap::new();
        b.insert("f1", ExpressId(2));
        b.insert("f2", ExpressId(3));

        let common = a.intersection(&b);
        assert_eq!(common, b);

        a.subtract(&b);
        assert!(a.contains("f1", ExpressId(1)));
        assert!(a.get("f2").is_none());
        assert_eq!(a.id_count(), 1);

        a.merge(&b);
        assert_eq!(a.id_count(), 3);
    }

    #[test]
    fn test_fragment_map_json_shape() {
        let mut map = FragmentIdMap::new();
        map.insert("abc", ExpressId(7));
        let json = serde_json::to_string(&map).unwrap();
        assert_eq!(json, r#"{"abc":[7]}"#);
    }

    #[test]
    fn test_color_hex() {
        let color = Color::from_hex("#202932").unwrap();
        assert_eq!(color.to_hex(), "#202932");
        assert!(Color::from_hex("#12345").is_err());
        assert!(Color::from_hex("zzzzzz").is_err());
    }
}
