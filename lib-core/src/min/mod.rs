use crate::cfg;

/// Minifier for CSS files
pub mod css;

/// Minifier for JavaScript files
pub mod js;

type Result_ = anyhow::Result<()>;

/// A supported file type, determining which minifier handles a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    /// A CSS file, minified with `lightningcss`.
    Css,
    /// A JavaScript file, minified with `oxc`.
    Js,
}

impl FileKind {
    /// Returns the file kind for a file extension, or `None` for anything
    /// that is not `css` or `js` (compared ASCII case-insensitively).
    #[must_use]
    pub fn by_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "css" => Some(Self::Css),
            "js" => Some(Self::Js),
            _ => None,
        }
    }

    /// The canonical extension for this kind, without the leading dot.
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Css => "css",
            Self::Js => "js",
        }
    }

    /// Minifies `src` and appends the result onto `out`.
    /// # Errors
    /// Returns an error if the source fails to parse or print, depending on
    /// the file type.
    pub fn minify(self, cfgmap: &cfg::ConfigMap, src: &str, out: &mut String) -> Result_ {
        match self {
            Self::Css => cfgmap.fetch::<css::MinifierCSS>().minify(src, out),
            Self::Js => cfgmap.fetch::<js::MinifierJS>().minify(src, out),
        }
    }
}

impl std::fmt::Display for FileKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Css => "CSS",
            Self::Js => "JS",
        })
    }
}
