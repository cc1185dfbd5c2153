//! Option Catalog
//!
//! Value sets for the front-end dropdowns and the model → manufacturer
//! mapping used to filter models by make. Built once from the schema.

use crate::encoder::CategoricalField;
use crate::schema::ColumnSchema;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use tracing::{info, warn};

/// Manufacturer assigned to models missing from [`KNOWN_MANUFACTURERS`]
pub const FALLBACK_MANUFACTURER: &str = "others";

/// Model name → manufacturer names, keys sorted
pub type ModelMakeMapping = BTreeMap<String, Vec<String>>;

/// Manufacturer → model names, in lookup priority order
pub const KNOWN_MANUFACTURERS: &[(&str, &[&str])] = &[
    (
        "bmw",
        &[
            "130i", "3", "3 series", "320i", "323i", "325i", "328i", "4-runner", "5",
            "5 series", "523i", "525i", "528i", "530i", "535i", "550i", "6", "7 series",
            "x3", "x5", "x6", "m", "m class",
        ],
    ),
    (
        "ford",
        &[
            "ecosport", "edge", "escape", "expedition", "explorer", "f-150", "flex", "focus",
            "fusion", "mustang", "ranger", "taurus", "transit",
        ],
    ),
    (
        "honda",
        &[
            "accord", "accord crosstour", "city", "civic", "cr-v", "crosstour", "element",
            "fit", "fr-v", "odyssey", "pilot", "ridgeline", "stream",
        ],
    ),
    (
        "hyundai",
        &[
            "accent", "azera", "creta", "elantra", "genesis", "i10", "ix35", "santa fe",
            "sonata", "tucson", "veloster", "veracruz",
        ],
    ),
    (
        "kia",
        &[
            "borrego", "cadenza", "carens", "cerato", "forte", "mohave", "optima", "picanto",
            "rio", "sedona", "sorento", "soul", "sportage",
        ],
    ),
    (
        "lexus",
        &[
            "es", "gs", "is", "ls", "lx", "nx", "rx", "rx 300", "rx 330", "rx 350", "rx 400h",
        ],
    ),
    (
        "mazda",
        &["2", "3", "5", "6", "cx-7", "cx-9", "mx-3", "premacy", "tribute"],
    ),
    (
        "mercedes-benz",
        &[
            "a-class", "c-class", "c180", "c200", "c220", "c230", "c240", "c250", "c280",
            "c300", "c320", "c350", "c43", "cla-class", "cls", "e200", "e300", "e320", "e350",
            "e550", "g-class", "gl-class", "gla 250", "gla-class", "glc-class", "gle-class",
            "glk-class", "gls-class", "r-class", "s-class", "s-coupe", "slk-class",
        ],
    ),
    (
        "nissan",
        &[
            "almera", "altima", "armada", "frontier", "maxima", "micra", "murano",
            "pathfinder", "patrol", "primera", "quest", "rogue", "sentra", "sunny", "teana",
            "tiida", "titan", "x-trail",
        ],
    ),
    (
        "peugeot",
        &["206", "307", "308", "406", "407", "408", "508", "607", "807"],
    ),
    (
        "toyota",
        &[
            "4-runner", "avalon", "avanza", "camry", "corolla", "corolla altis",
            "corolla verso", "fj cruiser", "hiace", "highlander", "hilux", "land cruiser",
            "land cruiser prado", "matrix", "previa", "prius", "rav4", "sequoia", "sienna",
            "solara", "tacoma", "tundra", "venza", "yaris",
        ],
    ),
    (
        "volkswagen",
        &[
            "bora", "cc", "golf", "golf variant", "jetta", "passat", "tiguan", "touareg",
            "vento",
        ],
    ),
    (
        "others",
        &[
            "ilx", "mdx", "rdx", "rl", "tl", "tsx", "zdx", "a4", "a6", "a7", "enclave",
            "lacrosse", "rendezvous", "verano", "escalade", "srx", "avalanche", "camaro",
            "equinox", "malibu", "200", "300c", "avenger", "sebring", "town&country",
            "caliber", "caravan", "challenger", "charger", "durango", "journey", "acadia",
            "yukon", "ex", "fx", "fx35", "g35", "jx", "m", "qx4", "qx56", "qx60", "qx80",
            "x-type", "xj", "cherokee", "commander", "compass", "grand cherokee", "liberty",
            "wrangler", "discovery", "freelander", "range rover", "range rover evoque",
            "range rover sport", "range rover velar", "range rover vogue", "mkc", "mkx",
            "navigator", "lancer", "outlander", "pajero", "pajero io", "montero", "cayenne",
            "panamera", "forester", "legacy", "outback", "tribeca", "vitara", "s80", "xc90",
            "astra", "berlingo", "c4", "cl", "cooper", "continental", "duster", "galaxy",
            "laguna", "logan", "mgf", "mpv", "vectra", "viano", "zafira", "tc", "xb",
        ],
    ),
];

/// Dropdown options derived from the schema
#[derive(Debug, Clone, Default, Serialize)]
pub struct Catalog {
    pub makes: Vec<String>,
    pub models: Vec<String>,
    pub conditions: Vec<String>,
    pub model_make_mapping: ModelMakeMapping,
}

impl Catalog {
    /// Derive value sets and the model → make mapping from a schema
    pub fn from_schema(schema: &ColumnSchema) -> Self {
        let makes = values_with_prefix(schema, CategoricalField::Make);
        let models = values_with_prefix(schema, CategoricalField::Model);
        let conditions = values_with_prefix(schema, CategoricalField::Condition);
        let model_make_mapping = build_model_make_mapping(&models, KNOWN_MANUFACTURERS);

        info!(
            "Extracted {} makes, {} models, {} conditions; mapped {} models",
            makes.len(),
            models.len(),
            conditions.len(),
            model_make_mapping.len()
        );

        Self {
            makes,
            models,
            conditions,
            model_make_mapping,
        }
    }

    /// Manufacturers known for a model
    pub fn makes_for_model(&self, model: &str) -> Option<&[String]> {
        self.model_make_mapping.get(model).map(Vec::as_slice)
    }

    /// Models listed under a manufacturer, in sorted order
    pub fn models_for_make(&self, make: &str) -> Vec<&str> {
        self.model_make_mapping
            .iter()
            .filter(|(_, makes)| makes.iter().any(|m| m == make))
            .map(|(model, _)| model.as_str())
            .collect()
    }
}

/// Sorted, de-duplicated values of the columns carrying a field's prefix
fn values_with_prefix(schema: &ColumnSchema, field: CategoricalField) -> Vec<String> {
    schema
        .columns()
        .iter()
        .filter_map(|column| column.strip_prefix(field.prefix()))
        .map(str::to_string)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Assign each model the manufacturers that list it, or the fallback.
fn build_model_make_mapping(models: &[String], known: &[(&str, &[&str])]) -> ModelMakeMapping {
    let mut mapping: ModelMakeMapping = models
        .iter()
        .map(|model| (model.clone(), Vec::new()))
        .collect();

    for (make, make_models) in known {
        for model in *make_models {
            if let Some(makes) = mapping.get_mut(*model) {
                if !makes.iter().any(|m| m == make) {
                    makes.push(make.to_string());
                }
            }
        }
    }

    let uncovered: Vec<&String> = mapping
        .iter()
        .filter(|(_, makes)| makes.is_empty())
        .map(|(model, _)| model)
        .collect();
    if !uncovered.is_empty() {
        warn!(
            "{} models not mapped, assigning to '{}': {:?}",
            uncovered.len(),
            FALLBACK_MANUFACTURER,
            uncovered
        );
    }

    for makes in mapping.values_mut() {
        if makes.is_empty() {
            makes.push(FALLBACK_MANUFACTURER.to_string());
        }
    }

    mapping
}
