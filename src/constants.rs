// Data source URL
pub const LISTING_URL: &str = "https://www.gaeb.de/de/service/downloads/gaeb-datenaustausch/";

// Directory names
pub const STAGING_DIR_NAME: &str = "xsd_staging";
pub const OUTPUT_DIR_NAME: &str = "xsd_files";

// Selectors and extensions
pub const SCHEMA_LINK_SELECTOR: &str = r#"a[href$=".zip"], a[href$=".xsd"]"#;
pub const ARCHIVE_SUFFIX: &str = ".zip";
pub const SCHEMA_SUFFIX: &str = ".xsd";
pub const PARTIAL_SUFFIX: &str = ".part";
