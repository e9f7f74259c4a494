use crate::catalog::VendorCatalog;
use crate::error::{ConfigError, ConfigResult};
use std::fs;
use std::path::Path;

/// Catalogs compiled into the binary, keyed by vendor
const BUILTIN_CATALOGS: &[(&str, &str)] = &[
    ("pipedrive", include_str!("../catalogs/pipedrive.yaml")),
    ("freshdesk", include_str!("../catalogs/freshdesk.yaml")),
    ("hubspot", include_str!("../catalogs/hubspot.yaml")),
    ("capsule", include_str!("../catalogs/capsule.yaml")),
    ("close", include_str!("../catalogs/close.yaml")),
];

/// Supported file formats for catalogs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Yaml,
    Json,
}

impl FileFormat {
    /// Detect file format from extension
    pub fn from_path<P: AsRef<Path>>(path: P) -> ConfigResult<Self> {
        let path = path.as_ref();
        match path.extension().and_then(|s| s.to_str()) {
            Some("yaml") | Some("yml") => Ok(FileFormat::Yaml),
            Some("json") => Ok(FileFormat::Json),
            Some(ext) => Err(ConfigError::UnsupportedFormat(ext.to_string())),
            None => Err(ConfigError::UnsupportedFormat("no extension".to_string())),
        }
    }
}

/// Loads vendor catalogs from the embedded set or from files
pub struct CatalogLoader;

impl CatalogLoader {
    pub fn builtin_vendors() -> Vec<&'static str> {
        BUILTIN_CATALOGS.iter().map(|(vendor, _)| *vendor).collect()
    }

    /// Parse the embedded catalog of `vendor`
    pub fn builtin(vendor: &str) -> ConfigResult<VendorCatalog> {
        let key = vendor.to_ascii_lowercase();
        let content = BUILTIN_CATALOGS
            .iter()
            .find(|(name, _)| *name == key)
            .map(|(_, content)| *content)
            .ok_or_else(|| ConfigError::UnknownVendor {
                vendor: vendor.to_string(),
                available: Self::builtin_vendors().join(", "),
            })?;
        Self::parse_content(content, FileFormat::Yaml)
    }

    /// Load a catalog from a YAML or JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> ConfigResult<VendorCatalog> {
        let path = path.as_ref();
        let format = FileFormat::from_path(path)?;
        let content = fs::read_to_string(path)?;
        tracing::debug!(path = %path.display(), "loading catalog file");
        Self::parse_content(&content, format)
    }

    /// Parse and validate catalog content
    pub fn parse_content(content: &str, format: FileFormat) -> ConfigResult<VendorCatalog> {
        let catalog: VendorCatalog = match format {
            FileFormat::Yaml => serde_yaml::from_str(content)?,
            FileFormat::Json => serde_json::from_str(content)?,
        };
        catalog.validate()?;
        Ok(catalog)
    }

    /// The file catalog when given, otherwise the embedded one
    pub fn resolve(vendor: &str, catalog_path: Option<&Path>) -> ConfigResult<VendorCatalog> {
        match catalog_path {
            Some(path) => {
                let catalog = Self::from_file(path)?;
                if !catalog.vendor.eq_ignore_ascii_case(vendor) {
                    return Err(ConfigError::Validation(format!(
                        "catalog file is for vendor '{}', not '{}'",
                        catalog.vendor, vendor
                    )));
                }
                Ok(catalog)
            }
            None => Self::builtin(vendor),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::Builder;

    #[test]
    fn test_format_detection() {
        assert_eq!(FileFormat::from_path("a.yml").unwrap(), FileFormat::Yaml);
        assert_eq!(FileFormat::from_path("a.json").unwrap(), FileFormat::Json);
        assert!(FileFormat::from_path("a.toml").is_err());
        assert!(FileFormat::from_path("catalog").is_err());
    }

    #[test]
    fn test_unknown_vendor_lists_available() {
        let err = CatalogLoader::builtin("salesforce").unwrap_err();
        let message = err.to_string();
        assert!(message.contains("salesforce"));
        assert!(message.contains("pipedrive"));
    }

    #[test]
    fn test_json_catalog_file() {
        let mut file = Builder::new().suffix(".json").tempfile().unwrap();
        write!(
            file,
            r#"{{"vendor":"close","base_url":"https://api.close.com/api/v1",
               "auth":{{"type":"basic","password":""}},
               "credential":{{"type":"env","var":"CLOSE_API_KEY"}},
               "tools":[{{"name":"me","description":"Current user","method":"GET","path":"/me/"}}]}}"#
        )
        .unwrap();

        let catalog = CatalogLoader::resolve("close", Some(file.path())).unwrap();
        assert_eq!(catalog.tools.len(), 1);
        assert!(CatalogLoader::resolve("hubspot", Some(file.path())).is_err());
    }

    #[test]
    fn test_empty_tool_list_rejected() {
        let yaml = "vendor: x\nbase_url: https://x.test\ntools: []\n";
        assert!(matches!(
            CatalogLoader::parse_content(yaml, FileFormat::Yaml),
            Err(ConfigError::Validation(_))
        ));
    }
}
