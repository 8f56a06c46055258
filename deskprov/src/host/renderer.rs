//! Template rendering seam.

use bytes::Bytes;

use crate::error::OutputError;
use crate::mapper::VendorFieldMapping;

/// Everything a renderer needs to produce one device file.
#[derive(Debug, Clone, Copy)]
pub struct RenderRequest<'a> {
    /// Device-specific filename; renderers pick the template from it.
    pub filename: &'a str,
    /// Template to use; `None` for device files, where the renderer
    /// chooses from the filename and model.
    pub template: Option<&'a str>,
    /// Device model, for model-specific templates.
    pub model: Option<&'a str>,
    pub mapping: &'a VendorFieldMapping,
    /// Encoding label of the output, e.g. `UTF-8`.
    pub encoding: &'a str,
}

/// External template engine.
pub trait TemplateRenderer: Send + Sync {
    /// Render the whole file in memory.
    fn render(&self, request: &RenderRequest<'_>) -> Result<Bytes, OutputError>;
}

/// Renders the field mapping itself as pretty-printed JSON.
///
/// Useful for hosts that post-process the mapping, and for tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonRenderer;

impl RenderRequest<'_> {
    /// Name reported when rendering fails.
    pub fn template_name(&self) -> &str {
        self.template.unwrap_or(self.filename)
    }
}

impl TemplateRenderer for JsonRenderer {
    fn render(&self, request: &RenderRequest<'_>) -> Result<Bytes, OutputError> {
        if !is_utf8_label(request.encoding) {
            return Err(OutputError::Render {
                template: request.template_name().to_string(),
                message: format!("unsupported encoding '{}'", request.encoding),
            });
        }
        serde_json::to_vec_pretty(request.mapping)
            .map(Bytes::from)
            .map_err(|e| OutputError::Render {
                template: request.template_name().to_string(),
                message: e.to_string(),
            })
    }
}

fn is_utf8_label(label: &str) -> bool {
    label.eq_ignore_ascii_case("utf-8") || label.eq_ignore_ascii_case("utf8")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_json_renderer() {
        let mut mapping = VendorFieldMapping::new();
        mapping.insert("XX_locale", json!("fr"));
        let request = RenderRequest {
            filename: "cfg001122aabbcc.xml",
            template: None,
            model: Some("GXP2160"),
            mapping: &mapping,
            encoding: "UTF-8",
        };

        let out = JsonRenderer.render(&request).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value, json!({"XX_locale": "fr"}));
    }

    #[test]
    fn test_json_renderer_rejects_other_encodings() {
        let mapping = VendorFieldMapping::new();
        let request = RenderRequest {
            filename: "SEP001122AABBCC.cnf.xml",
            template: None,
            model: None,
            mapping: &mapping,
            encoding: "ISO-8859-1",
        };
        assert!(matches!(
            JsonRenderer.render(&request),
            Err(OutputError::Render { .. })
        ));

        let request = RenderRequest {
            filename: "y000000000028.cfg",
            template: Some("model.tpl"),
            ..request
        };
        match JsonRenderer.render(&request) {
            Err(OutputError::Render { template, .. }) => assert_eq!(template, "model.tpl"),
            other => panic!("unexpected result: {other:?}"),
        }
    }
}
