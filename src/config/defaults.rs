use super::{
    AnalysisConfig, ApiConfig, Config, ExportConfig, GalleryConfig, InputConfig, PathsConfig,
    VerifyConfig,
};

pub const BASE_URL: &str = "http://localhost:8000";
pub const GALLERY_LIMIT: u32 = 50;
pub const DATABASE_PATH: &str = "backend/data/palettes.db";
pub const TEST_FILE: &str = "test_unit.py";

pub fn defaults() -> Config {
    Config {
        api: ApiConfig::default(),
        analysis: AnalysisConfig::default(),
        gallery: GalleryConfig::default(),
        export: ExportConfig::default(),
        verify: VerifyConfig::default(),
        input: InputConfig::default(),
        paths: PathsConfig::default(),
    }
}
