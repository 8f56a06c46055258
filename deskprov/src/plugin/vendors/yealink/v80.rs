//! Yealink firmware 80.
//!
//! The W52P base of this branch names its handset image in a dedicated
//! key and has its own template.

use super::{VENDOR, associator, extractors, filename, mapping, model_files};
use crate::plugin::{CommonFile, PluginDefinition};

/// Supported models and the firmware they run.
pub const MODEL_VERSIONS: &[(&str, &str)] = &[
    ("T19P_E2", "53.80.0.95"),
    ("T21P_E2", "52.80.0.95"),
    ("T23P", "44.80.0.95"),
    ("T23G", "44.80.0.95"),
    ("T27P", "45.80.0.95"),
    ("T29G", "46.80.0.95"),
    ("T40P", "54.80.0.95"),
    ("T41P", "36.80.0.95"),
    ("T42G", "29.80.0.95"),
    ("T46G", "28.80.0.95"),
    ("T48G", "35.80.0.95"),
    ("T49G", "51.80.0.100"),
    ("CP860", "37.80.0.30"),
    ("CP960", "73.80.0.35"),
    ("W52P", "25.80.0.15"),
];

/// Key naming the handset image of the W52P base.
pub const FW_HANDSET_FILENAME_KEY: &str = "XX_fw_handset_filename";

const MODEL_FILES: &[(&str, &str)] = &[
    ("y000000000028.cfg", "T46-28.80.0.95.rom"),
    ("y000000000029.cfg", "T42-29.80.0.95.rom"),
    ("y000000000035.cfg", "T48-35.80.0.95.rom"),
    ("y000000000036.cfg", "T41-36.80.0.95.rom"),
    ("y000000000044.cfg", "T23-44.80.0.95.rom"),
    ("y000000000045.cfg", "T27-45.80.0.95.rom"),
    ("y000000000046.cfg", "T29-46.80.0.95.rom"),
    ("y000000000051.cfg", "T49-51.80.0.100.rom"),
    ("y000000000052.cfg", "T21P_E2-52.80.0.95.rom"),
    ("y000000000053.cfg", "T19P_E2-53.80.0.95.rom"),
    ("y000000000054.cfg", "T40-54.80.0.95.rom"),
    ("y000000000037.cfg", "CP860-37.80.0.30.rom"),
    ("y000000000073.cfg", "CP960-73.80.0.35.rom"),
];

fn w52p_file() -> CommonFile {
    CommonFile::firmware(
        "y000000000025.cfg",
        "Base for W52P&W56P-25.80.0.15.rom",
        "W52P.tpl",
    )
    .with_field(FW_HANDSET_FILENAME_KEY, "W56H-61.80.0.15.rom")
}

/// Create the Yealink firmware 80 plugin definition.
pub fn plugin() -> PluginDefinition {
    PluginDefinition::new("yealink_v80", VENDOR, filename())
        .with_associator(associator(MODEL_VERSIONS))
        .with_extractors(extractors())
        .with_mapping(mapping())
        .with_common_files(model_files(MODEL_FILES))
        .with_common_file(w52p_file())
        .with_encoding("UTF-8")
}
