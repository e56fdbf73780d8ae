//! Static pattern tables behind the dialog analyzer. Everything the
//! analyzer recognizes lives here as data, so a category or a brand can
//! be added without touching extraction control flow.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;

use crate::domain::service::ServiceCategory;
use crate::domain::vehicle::VehicleTier;

/// Brands the analyzer recognizes, in match priority order.
pub(crate) const CAR_BRANDS: &[&str] = &[
    "toyota",
    "hyundai",
    "kia",
    "bmw",
    "mercedes",
    "lada",
    "renault",
    "daewoo",
    "chevrolet",
    "honda",
    "nissan",
    "volkswagen",
    "audi",
    "mazda",
    "ford",
    "mitsubishi",
    "skoda",
    "opel",
    "peugeot",
    "citroen",
    "suzuki",
    "subaru",
    "lexus",
    "infiniti",
    "acura",
    "jaguar",
    "land rover",
    "volvo",
    "mini",
    "smart",
    "porsche",
    "ferrari",
    "lamborghini",
    "maserati",
    "bentley",
    "rolls-royce",
    "bugatti",
];

/// Model vocabularies for the brands common enough to matter.
const CAR_MODELS: &[(&str, &[&str])] = &[
    (
        "toyota",
        &[
            "camry",
            "corolla",
            "land cruiser",
            "prado",
            "hilux",
            "hiace",
            "yaris",
            "auris",
            "avensis",
            "verso",
            "rav4",
            "highlander",
            "sienna",
            "sequoia",
            "tacoma",
            "tundra",
        ],
    ),
    (
        "hyundai",
        &[
            "solaris",
            "creta",
            "santa fe",
            "elantra",
            "i20",
            "i30",
            "i40",
            "accent",
            "sonata",
            "genesis",
            "equus",
            "tucson",
            "ix35",
            "ix55",
            "getz",
            "matrix",
            "veloster",
        ],
    ),
    (
        "kia",
        &[
            "rio",
            "optima",
            "sorento",
            "sportage",
            "ceed",
            "picanto",
            "mohave",
            "carnival",
            "sedona",
            "cerato",
            "k2",
            "k3",
            "k5",
            "k7",
            "k9",
        ],
    ),
    (
        "lada",
        &[
            "granta",
            "kalina",
            "vesta",
            "largus",
            "priora",
            "samara",
            "niva",
            "2104",
            "2105",
            "2106",
            "2107",
            "2109",
            "2110",
            "2114",
            "2115",
        ],
    ),
    (
        "renault",
        &[
            "logan",
            "sandero",
            "duster",
            "megane",
            "laguna",
            "clio",
            "symbol",
            "captur",
            "kaptur",
            "arkana",
            "koleos",
            "espace",
            "scenic",
            "trafic",
            "master",
        ],
    ),
    (
        "bmw",
        &[
            "1-series",
            "2-series",
            "3-series",
            "4-series",
            "5-series",
            "6-series",
            "7-series",
            "x1",
            "x2",
            "x3",
            "x4",
            "x5",
            "x6",
            "x7",
            "z4",
            "i3",
            "i8",
        ],
    ),
    (
        "mercedes",
        &[
            "a-class",
            "b-class",
            "c-class",
            "e-class",
            "s-class",
            "cla",
            "cls",
            "slk",
            "sl",
            "glc",
            "gle",
            "gls",
            "gla",
            "glk",
            "ml",
            "gl",
            "viano",
            "vito",
            "sprinter",
        ],
    ),
    (
        "nissan",
        &[
            "almera",
            "primera",
            "qashqai",
            "murano",
            "pathfinder",
            "x-trail",
            "juke",
            "note",
            "micra",
            "tiida",
            "patrol",
            "armada",
            "frontier",
            "terra",
            "sentra",
            "altima",
            "maxima",
        ],
    ),
    (
        "honda",
        &[
            "civic",
            "accord",
            "cr-v",
            "hr-v",
            "pilot",
            "odyssey",
            "fit",
            "jazz",
            "city",
            "br-v",
            "insight",
            "legend",
            "nsx",
            "s2000",
        ],
    ),
    (
        "volkswagen",
        &[
            "golf",
            "polo",
            "passat",
            "jetta",
            "tiguan",
            "touareg",
            "bora",
            "lavida",
            "magotan",
            "phaeton",
            "beetle",
            "scirocco",
            "eos",
            "amarok",
            "crafter",
            "transporter",
        ],
    ),
];

/// One row of the vehicle classification table. Rows are evaluated in
/// order; brand lists are checked before model lists within a row.
pub(crate) struct TierRule {
    pub tier: VehicleTier,
    pub brands: &'static [&'static str],
    pub models: &'static [&'static str],
}

pub(crate) const TIER_RULES: &[TierRule] = &[
    TierRule {
        tier: VehicleTier::Compact,
        brands: &["lada", "daewoo", "renault", "chevrolet"],
        models: &[
            "rio", "solaris", "logan", "aveo", "granta", "kalina", "vesta", "priora", "almera",
            "sandero",
        ],
    },
    TierRule {
        tier: VehicleTier::Business,
        brands: &["toyota", "honda", "hyundai", "kia", "nissan"],
        models: &[
            "camry", "accord", "optima", "creta", "qashqai", "sorento", "tucson", "sportage",
            "elantra", "sonata",
        ],
    },
    TierRule {
        tier: VehicleTier::Premium,
        brands: &["bmw", "mercedes", "land rover", "volvo", "lexus"],
        models: &[
            "7-series",
            "s-class",
            "range rover",
            "xc90",
            "lx",
            "land cruiser",
            "prado",
            "x5",
            "x7",
            "gle",
            "gls",
        ],
    },
];

/// Per-category trigger vocabularies. Categories are independent: a turn
/// may match any number of them.
const SERVICE_PATTERNS: &[(ServiceCategory, &str)] = &[
    (
        ServiceCategory::Diagnostics,
        r"(?i)\b(diagnostics?|diagnose|check(?:-?up)?|inspection|computer diagnostics|scan(?:ning)?)\b",
    ),
    (
        ServiceCategory::Repair,
        r"(?i)\b(repair(?:s|ing)?|fix(?:ing)?|restore|restoration|overhaul)\b",
    ),
    (
        ServiceCategory::Replacement,
        r"(?i)\b(replace(?:ment|ments)?|replacing|install(?:ation)?|fit(?:ting)?|swap|change|changing)\b",
    ),
    (
        ServiceCategory::Maintenance,
        r"(?i)\b(maintenance|scheduled service|service interval|servicing|tune-?up)\b",
    ),
    (
        ServiceCategory::Painting,
        r"(?i)\b(paint(?:ing|work)?|respray|touch-?up)\b",
    ),
    (
        ServiceCategory::Rustproofing,
        r"(?i)\b(rustproof(?:ing)?|anti-?rust|anti-?corrosion|corrosion protection|undercoat(?:ing)?)\b",
    ),
    (
        ServiceCategory::Brakes,
        r"(?i)\b(brakes?|brake pads?|brake discs?|rotors?|calipers?|brake fluid|brake lines?)\b",
    ),
    (
        ServiceCategory::Suspension,
        r"(?i)\b(suspension|shock absorbers?|shocks|struts?|springs?|ball joints?|control arms?|bushings?|sway bar)\b",
    ),
    (
        ServiceCategory::Engine,
        r"(?i)\b(engine|motor|timing belt|timing chain|cylinder head|engine rebuild)\b",
    ),
    (
        ServiceCategory::Transmission,
        r"(?i)\b(transmission|gearbox|clutch|cvt|torque converter|automatic box|manual box)\b",
    ),
    (
        ServiceCategory::Bodywork,
        r"(?i)\b(body ?work|bumpers?|fenders?|doors?|hood|trunk lid|sills?|roof)\b",
    ),
    (
        ServiceCategory::Electrical,
        r"(?i)\b(electrics|electrical|wiring|alternator|starter|battery)\b",
    ),
    (
        ServiceCategory::Tires,
        r"(?i)\b(tires?|tyres?|wheels?|rims?|wheel alignment|tire fitting|tire change)\b",
    ),
    (ServiceCategory::Oil, r"(?i)\b(oil|oil change|engine oil|oil filter)\b"),
    (
        ServiceCategory::Filters,
        r"(?i)\b(filters?|air filter|cabin filter|fuel filter|oil filter)\b",
    ),
];

pub(crate) static BRAND_RE: LazyLock<Regex> = LazyLock::new(|| {
    let alternation =
        CAR_BRANDS.iter().map(|brand| regex::escape(brand)).collect::<Vec<_>>().join("|");
    Regex::new(&format!(r"(?i)\b({alternation})\b")).expect("brand pattern")
});

pub(crate) static MODEL_RES: LazyLock<HashMap<&'static str, Regex>> = LazyLock::new(|| {
    CAR_MODELS
        .iter()
        .map(|(brand, models)| {
            let alternation =
                models.iter().map(|model| regex::escape(model)).collect::<Vec<_>>().join("|");
            let pattern =
                Regex::new(&format!(r"(?i)\b({alternation})\b")).expect("model pattern");
            (*brand, pattern)
        })
        .collect()
});

pub(crate) static YEAR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b((?:19|20)\d{2})\b").expect("year pattern"));

pub(crate) static MILEAGE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(\d{1,3}(?:[ ,]\d{3})*|\d{4,6})\s*(kms?|thousand|k)\b")
        .expect("mileage pattern")
});

pub(crate) static SERVICE_RES: LazyLock<Vec<(ServiceCategory, Regex)>> = LazyLock::new(|| {
    SERVICE_PATTERNS
        .iter()
        .map(|(category, pattern)| {
            (*category, Regex::new(pattern).expect("service pattern"))
        })
        .collect()
});
