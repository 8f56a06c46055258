//! Yealink firmware 83.

use super::{VENDOR, associator, dect_files, extractors, filename, mapping, model_files};
use crate::plugin::PluginDefinition;

/// Supported models and the firmware they run.
pub const MODEL_VERSIONS: &[(&str, &str)] = &[
    ("T19P_E2", "53.83.0.35"),
    ("T21P_E2", "52.83.0.35"),
    ("T23P", "44.83.0.35"),
    ("T23G", "44.83.0.35"),
    ("T27P", "45.83.0.35"),
    ("T27G", "69.83.0.35"),
    ("T29G", "46.83.0.120"),
    ("T40P", "54.83.0.35"),
    ("T40G", "76.83.0.35"),
    ("CP960", "73.83.0.30"),
    ("T41P", "36.83.0.35"),
    ("T41S", "66.83.0.35"),
    ("T42G", "29.83.0.120"),
    ("T42S", "66.83.0.35"),
    ("T46G", "28.83.0.120"),
    ("T46S", "66.83.0.35"),
    ("T48G", "35.83.0.120"),
    ("T48S", "66.83.0.35"),
    ("T52S", "70.83.0.35"),
    ("T54S", "70.83.0.35"),
    ("T56A", "58.83.0.15"),
    ("T58", "58.83.0.15"),
    ("W60B", "77.83.0.85"),
    ("W80B", "103.83.0.122"),
    ("W80DM", "103.83.0.122"),
];

const MODEL_FILES: &[(&str, &str)] = &[
    ("y000000000044.cfg", "T23-44.83.0.35.rom"),
    ("y000000000045.cfg", "T27-45.83.0.35.rom"),
    ("y000000000069.cfg", "T27G-69.83.0.35.rom"),
    ("y000000000052.cfg", "T21P_E2-52.83.0.35.rom"),
    ("y000000000053.cfg", "T19P_E2-53.83.0.35.rom"),
    ("y000000000054.cfg", "T40-54.83.0.35.rom"),
    ("y000000000076.cfg", "T40G-76.83.0.35.rom"),
    ("y000000000066.cfg", "T46S(T48S,T42S,T41S)-66.83.0.35.rom"),
    ("y000000000068.cfg", "T46S(T48S,T42S,T41S)-66.83.0.35.rom"),
    ("y000000000070.cfg", "T54S(T52S)-70.83.0.35.rom"),
    ("y000000000028.cfg", "T46-28.83.0.120.rom"),
    ("y000000000029.cfg", "T42-29.83.0.120.rom"),
    ("y000000000035.cfg", "T48-35.83.0.120.rom"),
    ("y000000000036.cfg", "T41-36.83.0.120.rom"),
    ("y000000000046.cfg", "T29-46.83.0.120.rom"),
    ("y000000000058.cfg", "T58V(T56A)-58.83.0.15.rom"),
    ("y000000000073.cfg", "CP960-73.83.0.30.rom"),
];

// `$PN` is expanded by the base to its product name, e.g. W80B.
const DECT_FILES: &[(&str, &str)] = &[
    ("y000000000077.cfg", "W60B-77.83.0.85.rom"),
    ("y000000000103.cfg", "$PN-103.83.0.122.rom"),
];

const HANDSETS_FW: &[(&str, &str)] = &[
    ("w53h", "W53H-88.83.0.90.rom"),
    ("w56h", "W56H-61.83.0.90.rom"),
    ("w59r", "W59R-115.83.0.10.rom"),
    ("cp930w", "CP930W-87.83.0.60.rom"),
];

/// Create the Yealink firmware 83 plugin definition.
pub fn plugin() -> PluginDefinition {
    PluginDefinition::new("yealink_v83", VENDOR, filename())
        .with_associator(associator(MODEL_VERSIONS))
        .with_extractors(extractors())
        .with_mapping(mapping())
        .with_common_files(model_files(MODEL_FILES))
        .with_common_files(dect_files(DECT_FILES, HANDSETS_FW))
        .with_encoding("UTF-8")
}
