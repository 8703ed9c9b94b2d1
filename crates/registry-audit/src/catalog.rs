//! Parsing of the registry listing into API descriptors.

use tracing::debug;

use crate::models::{ApiDescriptor, SpecListing};

const PROP_SWAGGER: &str = "Swagger";
const PROP_VERSIONS: &str = "X-Versions";
const PROP_CREATED_BY: &str = "X-CreatedBy";

/// Extract API descriptors from a listing response.
///
/// The canonical name comes from the `Swagger` property URL (second-to-last
/// path segment), falling back to the entry's own `name`. Entries with no
/// derivable name are dropped.
#[must_use]
pub fn extract_api_data(listing: &SpecListing) -> Vec<ApiDescriptor> {
    let mut apis = Vec::new();

    for entry in &listing.apis {
        let mut url_name = None;
        let mut versions = None;
        let mut created_by = None;

        for property in &entry.properties {
            match property.kind.as_str() {
                PROP_SWAGGER => {
                    if let Some(url) = &property.url {
                        let segments: Vec<&str> = url.split('/').collect();
                        if segments.len() >= 3 {
                            url_name = Some(segments[segments.len() - 2].to_string());
                        }
                    }
                }
                PROP_VERSIONS => {
                    if let Some(value) = &property.value {
                        versions = Some(clean_versions(value));
                    }
                }
                PROP_CREATED_BY => {
                    if let Some(value) = &property.value {
                        created_by = Some(value.clone());
                    }
                }
                _ => {}
            }
        }

        let name = url_name
            .or_else(|| entry.name.clone())
            .filter(|name| !name.is_empty());

        let Some(name) = name else {
            debug!("skipping listing entry with no derivable name");
            continue;
        };

        apis.push(ApiDescriptor {
            name,
            versions,
            created_by,
        });
    }

    apis
}

/// Strip whitespace and leading `*`/`-` markers from each comma-separated
/// version, preserving order.
fn clean_versions(raw: &str) -> String {
    raw.split(',')
        .map(|version| version.trim().trim_start_matches(['*', '-']))
        .collect::<Vec<_>>()
        .join(",")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{SpecEntry, SpecProperty};

    fn swagger_property(url: &str) -> SpecProperty {
        SpecProperty {
            kind: "Swagger".to_string(),
            url: Some(url.to_string()),
            value: None,
        }
    }

    fn value_property(kind: &str, value: &str) -> SpecProperty {
        SpecProperty {
            kind: kind.to_string(),
            url: None,
            value: Some(value.to_string()),
        }
    }

    #[test]
    fn test_clean_versions_strips_markers_and_whitespace() {
        assert_eq!(clean_versions("*1.0.0, -2.0.0,  3.0.0"), "1.0.0,2.0.0,3.0.0");
    }

    #[test]
    fn test_clean_versions_preserves_order() {
        assert_eq!(clean_versions("3.0.0,1.0.0"), "3.0.0,1.0.0");
    }

    #[test]
    fn test_name_from_swagger_url() {
        let listing = SpecListing {
            apis: vec![SpecEntry {
                name: Some("Display Name".to_string()),
                properties: vec![
                    swagger_property("https://api.example.com/apis/org/orders/1.0.0"),
                    value_property("X-Versions", "*1.0.0, 2.0.0"),
                    value_property("X-CreatedBy", "alice"),
                ],
            }],
        };

        let apis = extract_api_data(&listing);
        assert_eq!(apis.len(), 1);
        assert_eq!(apis[0].name, "orders");
        assert_eq!(apis[0].versions.as_deref(), Some("1.0.0,2.0.0"));
        assert_eq!(apis[0].created_by.as_deref(), Some("alice"));
    }

    #[test]
    fn test_name_falls_back_to_entry_name() {
        let listing = SpecListing {
            apis: vec![SpecEntry {
                name: Some("orders".to_string()),
                properties: vec![],
            }],
        };

        let apis = extract_api_data(&listing);
        assert_eq!(apis.len(), 1);
        assert_eq!(apis[0].name, "orders");
        assert!(apis[0].versions.is_none());
    }

    #[test]
    fn test_entry_without_name_is_dropped() {
        let listing = SpecListing {
            apis: vec![
                SpecEntry {
                    name: None,
                    properties: vec![value_property("X-Versions", "1.0.0")],
                },
                SpecEntry {
                    name: Some("kept".to_string()),
                    properties: vec![],
                },
            ],
        };

        let apis = extract_api_data(&listing);
        assert_eq!(apis.len(), 1);
        assert_eq!(apis[0].name, "kept");
    }

    #[test]
    fn test_short_swagger_url_is_ignored() {
        let listing = SpecListing {
            apis: vec![SpecEntry {
                name: Some("fallback".to_string()),
                properties: vec![swagger_property("orders")],
            }],
        };

        let apis = extract_api_data(&listing);
        assert_eq!(apis[0].name, "fallback");
    }
}
