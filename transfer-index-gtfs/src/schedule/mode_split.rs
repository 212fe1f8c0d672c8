use gtfs_structures::{Route, RouteType};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// which side of the transfer a route belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransitMode {
    Rail,
    Bus,
}

/// decides which routes feed the rail side and which feed the bus side of the analysis.
///
/// when `rail_route_ids` is non-empty it alone picks the rail routes, which lets a
/// single line (e.g. route "301") be analyzed even when other routes share its route
/// type. bus routes are always picked by route type. route types use the GTFS codes,
/// with extended codes folded into their basic type.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ModeSplitConfig {
    #[serde(default)]
    pub rail_route_ids: Vec<String>,
    #[serde(default = "ModeSplitConfig::default_rail_route_types")]
    pub rail_route_types: Vec<i16>,
    #[serde(default = "ModeSplitConfig::default_bus_route_types")]
    pub bus_route_types: Vec<i16>,
}

impl Default for ModeSplitConfig {
    fn default() -> Self {
        Self {
            rail_route_ids: vec![],
            rail_route_types: Self::default_rail_route_types(),
            bus_route_types: Self::default_bus_route_types(),
        }
    }
}

impl ModeSplitConfig {
    /// tram, subway and rail
    pub fn default_rail_route_types() -> Vec<i16> {
        vec![0, 1, 2]
    }

    pub fn default_bus_route_types() -> Vec<i16> {
        vec![3]
    }

    pub fn with_rail_route_ids(rail_route_ids: &[String]) -> ModeSplitConfig {
        ModeSplitConfig {
            rail_route_ids: rail_route_ids.to_vec(),
            ..Default::default()
        }
    }

    pub fn classifier(&self) -> ModeClassifier<'_> {
        ModeClassifier {
            conf: self,
            rail_ids: self.rail_route_ids.iter().map(String::as_str).collect(),
        }
    }
}

/// a [`ModeSplitConfig`] prepared for repeated route lookups.
pub struct ModeClassifier<'a> {
    conf: &'a ModeSplitConfig,
    rail_ids: HashSet<&'a str>,
}

impl ModeClassifier<'_> {
    /// classifies a route as rail, bus, or neither (None). a route listed in
    /// `rail_route_ids` is rail regardless of its route type.
    pub fn classify(&self, route: &Route) -> Option<TransitMode> {
        let code = route_type_code(&route.route_type);
        if self.rail_ids.is_empty() {
            if self.conf.rail_route_types.contains(&code) {
                return Some(TransitMode::Rail);
            }
        } else if self.rail_ids.contains(route.id.as_str()) {
            return Some(TransitMode::Rail);
        }
        if self.conf.bus_route_types.contains(&code) {
            Some(TransitMode::Bus)
        } else {
            None
        }
    }
}

/// the basic GTFS route_type code for a route type.
pub fn route_type_code(route_type: &RouteType) -> i16 {
    match route_type {
        RouteType::Tramway => 0,
        RouteType::Subway => 1,
        RouteType::Rail => 2,
        RouteType::Bus => 3,
        RouteType::Ferry => 4,
        RouteType::CableCar => 5,
        RouteType::Gondola => 6,
        RouteType::Funicular => 7,
        RouteType::Other(code) => *code,
        // coach, air, taxi and any later additions
        _ => -1,
    }
}
