//! Architecture layers and the ordered set of class-library layers.
//!
//! # Design
//!
//! `Layer` is a pure value type: `Copy`, equality-by-value, no identity. The
//! naming convention (`<base>.<Layer>`) and the project kind each layer maps
//! to live here; reference wiring lives in `plan.rs`.

use std::fmt;

use serde::{Deserialize, Serialize};


// ── Layer ─────────────────────────────────────────────────────────────────────

/// One layer of the generated solution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Layer {
    Domain,
    Application,
    Infrastructure,
    Persistence,
    Api,
}

impl Layer {
    /// All layers in declaration order.
    pub const ALL: [Layer; 5] = [
        Self::Domain,
        Self::Application,
        Self::Infrastructure,
        Self::Persistence,
        Self::Api,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Domain => "Domain",
            Self::Application => "Application",
            Self::Infrastructure => "Infrastructure",
            Self::Persistence => "Persistence",
            Self::Api => "Api",
        }
    }

    /// Suffix appended to the base project name, including the dot.
    pub const fn suffix(&self) -> &'static str {
        match self {
            Self::Domain => ".Domain",
            Self::Application => ".Application",
            Self::Infrastructure => ".Infrastructure",
            Self::Persistence => ".Persistence",
            Self::Api => ".Api",
        }
    }

    /// The project kind the toolchain creates for this layer.
    pub const fn project_kind(&self) -> ProjectKind {
        match self {
            Self::Api => ProjectKind::WebApi,
            _ => ProjectKind::ClassLibrary,
        }
    }

    /// `<base>.<Layer>`
    pub fn project_name(&self, base: &str) -> String {
        format!("{base}{}", self.suffix())
    }
}

impl fmt::Display for Layer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── ProjectKind ───────────────────────────────────────────────────────────────

/// The toolchain template a project is created from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProjectKind {
    WebApi,
    ClassLibrary,
}

impl ProjectKind {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::WebApi => "web-api",
            Self::ClassLibrary => "class-library",
        }
    }
}

impl fmt::Display for ProjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── LayerSet ──────────────────────────────────────────────────────────────────

/// Ordered class-library layers of a solution.
///
/// Always starts with Domain then Application; Infrastructure and Persistence
/// follow when enabled. The order drives directory creation, not wiring.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayerSet(Vec<Layer>);

impl LayerSet {
    pub fn new(include_infrastructure: bool, include_persistence: bool) -> Self {
        let mut layers = vec![Layer::Domain, Layer::Application];
        if include_infrastructure {
            layers.push(Layer::Infrastructure);
        }
        if include_persistence {
            layers.push(Layer::Persistence);
        }
        Self(layers)
    }

    pub fn contains(&self, layer: Layer) -> bool {
        self.0.contains(&layer)
    }

    pub fn iter(&self) -> impl Iterator<Item = Layer> + '_ {
        self.0.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[Layer] {
        &self.0
    }
}

impl<'a> IntoIterator for &'a LayerSet {
    type Item = Layer;
    type IntoIter = std::iter::Copied<std::slice::Iter<'a, Layer>>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter().copied()
    }
}
