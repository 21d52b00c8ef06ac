use lightningcss::stylesheet::{MinifyOptions, ParserOptions, PrinterOptions, StyleSheet};

use crate::cfg::acfg;

use super::Result_;

acfg!(
    /// A CSS minifier that accepts [`CSSConfig`].
    MinifierCSS: CSSConfig
);
impl crate::cfg::ConfigHolder<MinifierCSS> {
    pub(super) fn minify(&self, src: &str, out: &mut String) -> Result_ {
        let opts = ParserOptions {
            error_recovery: self.error_recovery,
            ..ParserOptions::default()
        };
        let mut ss = StyleSheet::parse(src, opts)
            .map_err(|e| anyhow::anyhow!("CSS parse failed: {e}"))?;
        ss.minify(MinifyOptions::default())
            .map_err(|e| anyhow::anyhow!("CSS minify failed: {e}"))?;
        let res = ss.to_css(PrinterOptions {
            minify: true,
            ..PrinterOptions::default()
        }).map_err(|e| anyhow::anyhow!("CSS print failed: {e}"))?;
        out.push_str(&res.code);
        Ok(())
    }
}

/// Configuration for the CSS minifier
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct CSSConfig {
    /// Skip over invalid rules and declarations instead of failing the file.
    /// Defaults to `false`.
    pub error_recovery: bool
}
impl Default for CSSConfig {
    fn default() -> Self {
        Self { error_recovery: false }
    }
}
