use oxc::allocator::Allocator;
use oxc::codegen::{Codegen, CodegenOptions, CommentOptions};
use oxc::mangler::MangleOptions;
use oxc::minifier::{CompressOptions, Minifier, MinifierOptions};
use oxc::parser::Parser;
use oxc::span::SourceType;

use crate::cfg::acfg;

use super::Result_;

acfg!(
    /// A JavaScript minifier that accepts [`JSConfig`].
    MinifierJS: JSConfig
);
impl crate::cfg::ConfigHolder<MinifierJS> {
    pub(super) fn minify(&self, src: &str, out: &mut String) -> Result_ {
        let allocator = Allocator::default();
        let ret = Parser::new(&allocator, src, SourceType::mjs()).parse();
        if !ret.errors.is_empty() {
            if self.verbose {
                let msgs = ret.errors.iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join("; ");
                anyhow::bail!("JS parse failed: {msgs}");
            }
            anyhow::bail!("JS parse failed with {} error(s)", ret.errors.len());
        }
        let mut program = ret.program;
        let options = MinifierOptions {
            mangle: Some(MangleOptions::default()),
            compress: Some(CompressOptions::smallest()),
        };
        let ret = Minifier::new(options).minify(&allocator, &mut program);
        let code = Codegen::new()
            .with_options(CodegenOptions {
                minify: true,
                comments: CommentOptions::disabled(),
                ..CodegenOptions::default()
            })
            .with_scoping(ret.scoping)
            .build(&program)
            .code;
        out.push_str(&code);
        Ok(())
    }
}

/// Configuration for the JavaScript minifier
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct JSConfig {
    /// Include every parser diagnostic in minification errors instead of
    /// only a count. Defaults to `false`.
    pub verbose: bool
}
