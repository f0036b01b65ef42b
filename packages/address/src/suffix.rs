#![allow(clippy::too_many_lines)]
//! Street suffix table.
//!
//! Maps long-form street suffixes and their common abbreviations to the
//! canonical title-case USPS abbreviation, so "STREET", "Str" and "st"
//! all resolve to "St".

use std::collections::BTreeMap;
use std::sync::LazyLock;

/// `(canonical abbreviation, long form, other accepted spellings)`.
///
/// Source: USPS Publication 28 (Appendix C) street suffix abbreviations.
/// Suffixes that double as common leading words (Fort, Mount, Saint) are
/// left out on purpose.
const SUFFIXES: &[(&str, &str, &[&str])] = &[
    ("Aly", "Alley", &["Allee", "Ally"]),
    ("Anx", "Annex", &["Anex", "Annx"]),
    ("Arc", "Arcade", &[]),
    ("Ave", "Avenue", &["Av", "Aven", "Avenu", "Avn", "Avnue"]),
    ("Byu", "Bayou", &["Bayoo"]),
    ("Bch", "Beach", &[]),
    ("Bnd", "Bend", &[]),
    ("Blf", "Bluff", &["Bluf"]),
    ("Btm", "Bottom", &["Bot", "Bottm"]),
    ("Blvd", "Boulevard", &["Blv", "Boul", "Boulv"]),
    ("Br", "Branch", &["Brnch"]),
    ("Brg", "Bridge", &["Brdge"]),
    ("Brk", "Brook", &[]),
    ("Byp", "Bypass", &["Bypa", "Bypas", "Byps"]),
    ("Cp", "Camp", &["Cmp"]),
    ("Cyn", "Canyon", &["Canyn", "Cnyn"]),
    ("Cpe", "Cape", &[]),
    ("Cswy", "Causeway", &["Causwa"]),
    ("Ctr", "Center", &["Cen", "Cent", "Centr", "Centre", "Cnter", "Cntr"]),
    ("Cir", "Circle", &["Circ", "Circl", "Crcl", "Crcle"]),
    ("Clf", "Cliff", &[]),
    ("Clfs", "Cliffs", &[]),
    ("Clb", "Club", &[]),
    ("Cmn", "Common", &[]),
    ("Cmns", "Commons", &[]),
    ("Cor", "Corner", &[]),
    ("Cors", "Corners", &[]),
    ("Crse", "Course", &[]),
    ("Ct", "Court", &[]),
    ("Cts", "Courts", &[]),
    ("Cv", "Cove", &[]),
    ("Crk", "Creek", &[]),
    ("Cres", "Crescent", &["Crsent", "Crsnt"]),
    ("Crst", "Crest", &[]),
    ("Xing", "Crossing", &["Crssng"]),
    ("Xrd", "Crossroad", &[]),
    ("Curv", "Curve", &[]),
    ("Dl", "Dale", &[]),
    ("Dm", "Dam", &[]),
    ("Dv", "Divide", &["Div", "Dvd"]),
    ("Dr", "Drive", &["Driv", "Drv"]),
    ("Est", "Estate", &[]),
    ("Ests", "Estates", &[]),
    ("Expy", "Expressway", &["Exp", "Expr", "Express", "Expw"]),
    ("Ext", "Extension", &["Extn", "Extnsn"]),
    ("Fls", "Falls", &[]),
    ("Fry", "Ferry", &["Frry"]),
    ("Fld", "Field", &[]),
    ("Flds", "Fields", &[]),
    ("Flt", "Flat", &[]),
    ("Flts", "Flats", &[]),
    ("Frd", "Ford", &[]),
    ("Frst", "Forest", &["Forests"]),
    ("Frg", "Forge", &["Forg"]),
    ("Frk", "Fork", &[]),
    ("Frks", "Forks", &[]),
    ("Fwy", "Freeway", &["Freewy", "Frway", "Frwy"]),
    ("Gdn", "Garden", &["Gardn", "Grden", "Grdn"]),
    ("Gdns", "Gardens", &["Grdns"]),
    ("Gtwy", "Gateway", &["Gatewy", "Gatway", "Gtway"]),
    ("Gln", "Glen", &[]),
    ("Grn", "Green", &[]),
    ("Grv", "Grove", &["Grov"]),
    ("Hbr", "Harbor", &["Harb", "Harbr", "Hrbor"]),
    ("Hvn", "Haven", &[]),
    ("Hts", "Heights", &["Ht"]),
    ("Hwy", "Highway", &["Highwy", "Hiway", "Hiwy", "Hway"]),
    ("Hl", "Hill", &[]),
    ("Hls", "Hills", &[]),
    ("Holw", "Hollow", &["Hllw", "Hollows", "Holws"]),
    ("Inlt", "Inlet", &[]),
    ("Jct", "Junction", &["Jction", "Jctn", "Junctn", "Juncton"]),
    ("Ky", "Key", &[]),
    ("Knl", "Knoll", &["Knol"]),
    ("Lk", "Lake", &[]),
    ("Lks", "Lakes", &[]),
    ("Lndg", "Landing", &["Lndng"]),
    ("Ln", "Lane", &[]),
    ("Lgt", "Light", &[]),
    ("Lf", "Loaf", &[]),
    ("Lck", "Lock", &[]),
    ("Ldg", "Lodge", &["Ldge", "Lodg"]),
    ("Loop", "Loop", &["Loops"]),
    ("Mall", "Mall", &[]),
    ("Mnr", "Manor", &[]),
    ("Mdw", "Meadow", &[]),
    ("Mdws", "Meadows", &["Medows"]),
    ("Mews", "Mews", &[]),
    ("Ml", "Mill", &[]),
    ("Mls", "Mills", &[]),
    ("Msn", "Mission", &["Missn", "Mssn"]),
    ("Mtwy", "Motorway", &[]),
    ("Mtn", "Mountain", &["Mntain", "Mntn", "Mountin", "Mtin"]),
    ("Nck", "Neck", &[]),
    ("Orch", "Orchard", &["Orchrd"]),
    ("Oval", "Oval", &["Ovl"]),
    ("Opas", "Overpass", &[]),
    ("Park", "Park", &["Prk", "Parks"]),
    ("Pkwy", "Parkway", &["Parkwy", "Pkway", "Pky", "Parkways", "Pkwys"]),
    ("Pass", "Pass", &[]),
    ("Psge", "Passage", &[]),
    ("Path", "Path", &["Paths"]),
    ("Pike", "Pike", &["Pikes"]),
    ("Pne", "Pine", &[]),
    ("Pnes", "Pines", &[]),
    ("Pl", "Place", &[]),
    ("Pln", "Plain", &[]),
    ("Plns", "Plains", &[]),
    ("Plz", "Plaza", &["Plza"]),
    ("Pt", "Point", &[]),
    ("Pts", "Points", &[]),
    ("Prt", "Port", &[]),
    ("Pr", "Prairie", &["Prr"]),
    ("Radl", "Radial", &["Rad", "Radiel"]),
    ("Ramp", "Ramp", &[]),
    ("Rnch", "Ranch", &["Ranches", "Rnchs"]),
    ("Rpd", "Rapid", &[]),
    ("Rpds", "Rapids", &[]),
    ("Rst", "Rest", &[]),
    ("Rdg", "Ridge", &["Rdge"]),
    ("Riv", "River", &["Rvr", "Rivr"]),
    ("Rd", "Road", &[]),
    ("Rds", "Roads", &[]),
    ("Rte", "Route", &[]),
    ("Row", "Row", &[]),
    ("Rue", "Rue", &[]),
    ("Run", "Run", &[]),
    ("Shl", "Shoal", &[]),
    ("Shr", "Shore", &[]),
    ("Shrs", "Shores", &[]),
    ("Skwy", "Skyway", &[]),
    ("Spg", "Spring", &["Spng", "Sprng"]),
    ("Spgs", "Springs", &["Spngs", "Sprngs"]),
    ("Spur", "Spur", &["Spurs"]),
    ("Sq", "Square", &["Sqr", "Sqre", "Squ"]),
    ("Sta", "Station", &["Statn", "Stn"]),
    ("Stra", "Stravenue", &["Strav", "Straven", "Stravn", "Strvn", "Strvnue"]),
    ("Strm", "Stream", &["Streme"]),
    ("St", "Street", &["Str", "Strt"]),
    ("Sts", "Streets", &[]),
    ("Smt", "Summit", &["Sumit", "Sumitt"]),
    ("Ter", "Terrace", &["Terr"]),
    ("Trwy", "Throughway", &[]),
    ("Trce", "Trace", &["Traces"]),
    ("Trak", "Track", &["Tracks", "Trk", "Trks"]),
    ("Trfy", "Trafficway", &[]),
    ("Trl", "Trail", &["Trails", "Trls"]),
    ("Trlr", "Trailer", &["Trlrs"]),
    ("Tunl", "Tunnel", &["Tunel", "Tunls", "Tunnels", "Tunnl"]),
    ("Tpke", "Turnpike", &["Trnpk", "Turnpk"]),
    ("Upas", "Underpass", &[]),
    ("Vly", "Valley", &["Vally", "Vlly"]),
    ("Via", "Viaduct", &["Vdct", "Viadct"]),
    ("Vw", "View", &[]),
    ("Vlg", "Village", &["Vill", "Villag", "Villg", "Villiage"]),
    ("Vl", "Ville", &[]),
    ("Vis", "Vista", &["Vist", "Vst", "Vsta"]),
    ("Walk", "Walk", &["Walks"]),
    ("Wall", "Wall", &[]),
    ("Way", "Way", &["Wy"]),
    ("Wl", "Well", &[]),
    ("Wls", "Wells", &[]),
];

/// Uppercased spelling -> canonical abbreviation.
static SUFFIX_LOOKUP: LazyLock<BTreeMap<String, &'static str>> = LazyLock::new(|| {
    let mut map = BTreeMap::new();
    for (canonical, long, others) in SUFFIXES {
        for spelling in std::iter::once(canonical)
            .chain(std::iter::once(long))
            .chain(others.iter())
        {
            map.insert(spelling.to_uppercase(), *canonical);
        }
    }
    map
});

/// Returns the canonical abbreviation for a suffix token, matched
/// case-insensitively against long forms and abbreviations.
#[must_use]
pub fn canonical_suffix(token: &str) -> Option<&'static str> {
    SUFFIX_LOOKUP.get(&token.trim().to_uppercase()).copied()
}

/// Returns `true` if the token is a known street suffix in any spelling.
#[must_use]
pub fn is_street_suffix(token: &str) -> bool {
    canonical_suffix(token).is_some()
}

/// Returns `true` if the value is exactly one of the canonical
/// abbreviations this table resolves to.
#[must_use]
pub fn is_canonical_suffix(value: &str) -> bool {
    SUFFIXES.iter().any(|(canonical, _, _)| *canonical == value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_long_forms() {
        assert_eq!(canonical_suffix("Street"), Some("St"));
        assert_eq!(canonical_suffix("AVENUE"), Some("Ave"));
        assert_eq!(canonical_suffix("boulevard"), Some("Blvd"));
        assert_eq!(canonical_suffix("Parkway"), Some("Pkwy"));
        assert_eq!(canonical_suffix("Highway"), Some("Hwy"));
    }

    #[test]
    fn resolves_abbreviations() {
        assert_eq!(canonical_suffix("ST"), Some("St"));
        assert_eq!(canonical_suffix("str"), Some("St"));
        assert_eq!(canonical_suffix("Av"), Some("Ave"));
        assert_eq!(canonical_suffix("PKY"), Some("Pkwy"));
        assert_eq!(canonical_suffix("Rd"), Some("Rd"));
    }

    #[test]
    fn passes_on_unknown_tokens() {
        assert_eq!(canonical_suffix("Main"), None);
        assert_eq!(canonical_suffix("123"), None);
        assert_eq!(canonical_suffix(""), None);
        assert!(!is_street_suffix("Mount"));
    }

    #[test]
    fn canonical_forms_map_to_themselves() {
        for (canonical, long, _) in SUFFIXES {
            assert_eq!(canonical_suffix(canonical), Some(*canonical), "{long}");
            assert!(is_canonical_suffix(canonical));
        }
    }

    #[test]
    fn every_resolution_is_canonical() {
        for resolved in SUFFIX_LOOKUP.values() {
            assert!(is_canonical_suffix(resolved), "{resolved}");
        }
    }

    #[test]
    fn canonical_check_is_exact() {
        assert!(is_canonical_suffix("St"));
        assert!(!is_canonical_suffix("ST"));
        assert!(!is_canonical_suffix("Street"));
    }
}
