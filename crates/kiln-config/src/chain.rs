//! Ordered processing chains.
//!
//! A chain lists the steps the external engine applies to one asset type, in
//! the order it applies them. Steps that do not apply in the current
//! environment stay in the chain but are marked inactive, so both
//! environments declare the same shape.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::environment::Environment;
use crate::naming::NamingTemplate;
use crate::rules::{ExtensionMatcher, ProcessingRule};
use crate::types::{AssetClass, Preprocessor};

/// Babel presets applied to script sources.
pub const SCRIPT_PRESETS: &[&str] = &["@babel/preset-env"];

/// Babel plugins applied to script sources.
pub const SCRIPT_PLUGINS: &[&str] = &["@babel/plugin-proposal-class-properties"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StepKind {
    Compile,
    Extract,
    Transform,
    Emit,
    Compress,
    Transpile,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "step", rename_all = "lowercase")]
pub enum ProcessingStep {
    /// Compile a preprocessor dialect to plain CSS
    Compile { preprocessor: Preprocessor },
    /// Pull stylesheets out of script bundles into their own files
    Extract {
        public_path: String,
        hot_reload: bool,
        reload_all: bool,
    },
    /// Resolve `@import`/`url()` references in CSS
    Transform,
    /// Copy the file to the output directory under a computed name
    Emit {
        name: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        output_path: Option<String>,
    },
    /// Recompress images
    Compress {
        enabled: bool,
        settings: CompressionSettings,
    },
    /// Transpile scripts for the target browsers
    Transpile {
        presets: Vec<String>,
        plugins: Vec<String>,
    },
}

impl ProcessingStep {
    pub fn kind(&self) -> StepKind {
        match self {
            Self::Compile { .. } => StepKind::Compile,
            Self::Extract { .. } => StepKind::Extract,
            Self::Transform => StepKind::Transform,
            Self::Emit { .. } => StepKind::Emit,
            Self::Compress { .. } => StepKind::Compress,
            Self::Transpile { .. } => StepKind::Transpile,
        }
    }

    /// Disabled compression is the only inactive step.
    pub fn is_active(&self) -> bool {
        !matches!(self, Self::Compress { enabled: false, .. })
    }
}

/// Per-format image compression settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompressionSettings {
    pub mozjpeg: JpegSettings,
    pub optipng: OptipngSettings,
    pub pngquant: PngquantSettings,
    pub gifsicle: GifsicleSettings,
}

impl Default for CompressionSettings {
    fn default() -> Self {
        Self {
            mozjpeg: JpegSettings {
                progressive: true,
                quality: 65,
            },
            optipng: OptipngSettings { enabled: true },
            pngquant: PngquantSettings {
                quality: (0.65, 0.9),
                speed: 4,
            },
            gifsicle: GifsicleSettings { interlaced: true },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct JpegSettings {
    pub progressive: bool,
    pub quality: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptipngSettings {
    pub enabled: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PngquantSettings {
    /// Min/max quality in 0..=1
    pub quality: (f32, f32),
    pub speed: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GifsicleSettings {
    pub interlaced: bool,
}

/// The resolved chain for one rule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessingChain {
    pub rule: String,
    pub class: AssetClass,
    pub matcher: ExtensionMatcher,
    pub steps: Vec<ProcessingStep>,
}

impl ProcessingChain {
    pub fn matches(&self, path: &Path) -> bool {
        self.matcher.matches(path)
    }

    /// Declared step kinds, including inactive ones.
    pub fn kinds(&self) -> Vec<StepKind> {
        self.steps.iter().map(ProcessingStep::kind).collect()
    }

    /// Step kinds the engine will actually run.
    pub fn active_kinds(&self) -> Vec<StepKind> {
        self.active_steps().map(ProcessingStep::kind).collect()
    }

    pub fn active_steps(&self) -> impl Iterator<Item = &ProcessingStep> {
        self.steps.iter().filter(|step| step.is_active())
    }

    pub fn has_active(&self, kind: StepKind) -> bool {
        self.active_steps().any(|step| step.kind() == kind)
    }

    /// Name pattern and output directory of the emit step, if any.
    pub fn emit(&self) -> Option<(&str, Option<&str>)> {
        self.steps.iter().find_map(|step| match step {
            ProcessingStep::Emit { name, output_path } => {
                Some((name.as_str(), output_path.as_deref()))
            }
            _ => None,
        })
    }
}

/// Inputs shared by every chain of one build.
#[derive(Debug, Clone, Copy)]
pub(crate) struct ChainContext<'a> {
    pub env: Environment,
    pub naming: NamingTemplate,
    pub css_public_path: &'a str,
}

pub(crate) fn build_chain(rule: &ProcessingRule, ctx: ChainContext<'_>) -> ProcessingChain {
    let steps = match rule.class {
        AssetClass::Stylesheet => stylesheet_steps(rule, ctx),
        AssetClass::Image => vec![emit_step(rule, ctx), compress_step(ctx.env)],
        AssetClass::Font => vec![emit_step(rule, ctx)],
        AssetClass::Script => vec![ProcessingStep::Transpile {
            presets: SCRIPT_PRESETS.iter().map(|p| p.to_string()).collect(),
            plugins: SCRIPT_PLUGINS.iter().map(|p| p.to_string()).collect(),
        }],
    };

    tracing::debug!(
        rule = %rule.name,
        class = rule.class.as_str(),
        steps = steps.len(),
        "built processing chain"
    );

    ProcessingChain {
        rule: rule.name.clone(),
        class: rule.class,
        matcher: rule.matcher.clone(),
        steps,
    }
}

fn stylesheet_steps(rule: &ProcessingRule, ctx: ChainContext<'_>) -> Vec<ProcessingStep> {
    let mut steps = Vec::with_capacity(3);
    if let Some(preprocessor) = rule.preprocessor {
        steps.push(ProcessingStep::Compile { preprocessor });
    }
    steps.push(ProcessingStep::Extract {
        public_path: ctx.css_public_path.to_string(),
        hot_reload: ctx.env.hot_reload(),
        reload_all: true,
    });
    steps.push(ProcessingStep::Transform);
    steps
}

fn emit_step(rule: &ProcessingRule, ctx: ChainContext<'_>) -> ProcessingStep {
    let name = if rule.fixed_name {
        NamingTemplate::Stable.pattern("[ext]")
    } else {
        ctx.naming.pattern("[ext]")
    };

    ProcessingStep::Emit {
        name,
        output_path: rule.output_dir.clone(),
    }
}

fn compress_step(env: Environment) -> ProcessingStep {
    ProcessingStep::Compress {
        enabled: env.compress_images(),
        settings: CompressionSettings::default(),
    }
}
