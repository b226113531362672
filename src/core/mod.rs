pub mod ast;
pub mod metrics;

use crate::errors::ParseError;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A function or method as declared in source.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct FunctionRecord {
    pub name: String,
    /// Positional parameter names in declaration order.
    pub args: Vec<String>,
    pub docstring: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ClassRecord {
    pub name: String,
    pub docstring: Option<String>,
    pub methods: Vec<FunctionRecord>,
}

/// One imported module or symbol.
///
/// `import a.b as c` yields `{module: "a.b", name: None, alias: Some("c")}`;
/// `from m import x as y` yields `{module: "m", name: Some("x"), alias: Some("y")}`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ImportRecord {
    pub module: String,
    pub name: Option<String>,
    pub alias: Option<String>,
}

/// Structural model of one successfully parsed file.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ModuleStructure {
    pub file: String,
    pub functions: Vec<FunctionRecord>,
    pub classes: Vec<ClassRecord>,
    pub imports: Vec<ImportRecord>,
}

impl ModuleStructure {
    pub fn new(file: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            ..Self::default()
        }
    }

    /// Top-level functions followed by every class's methods, keyed by name.
    ///
    /// A method sharing a name with an earlier function or method replaces it
    /// while keeping the first occurrence's position.
    pub fn flattened_functions(&self) -> IndexMap<&str, &FunctionRecord> {
        self.functions
            .iter()
            .chain(self.classes.iter().flat_map(|class| class.methods.iter()))
            .fold(IndexMap::new(), |mut acc, function| {
                acc.insert(function.name.as_str(), function);
                acc
            })
    }

    pub fn imports_module(&self, modules: &[String]) -> bool {
        self.imports
            .iter()
            .any(|import| modules.iter().any(|m| *m == import.module))
    }
}

/// One file's parse outcome: a structural model or the reason there is none.
#[derive(Clone, Debug, PartialEq)]
pub struct SourceUnit {
    pub path: String,
    pub parsed: Result<ModuleStructure, ParseError>,
}

impl SourceUnit {
    pub fn parsed(structure: ModuleStructure) -> Self {
        Self {
            path: structure.file.clone(),
            parsed: Ok(structure),
        }
    }

    pub fn failed(path: impl Into<String>, error: ParseError) -> Self {
        Self {
            path: path.into(),
            parsed: Err(error),
        }
    }

    pub fn structure(&self) -> Option<&ModuleStructure> {
        self.parsed.as_ref().ok()
    }

    pub fn error(&self) -> Option<&ParseError> {
        self.parsed.as_ref().err()
    }
}

/// Letter rank for a cyclomatic complexity value.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Rank {
    A,
    B,
    C,
    D,
    E,
    F,
}

impl Rank {
    pub fn from_complexity(complexity: u32) -> Self {
        match complexity {
            0..=5 => Rank::A,
            6..=10 => Rank::B,
            11..=20 => Rank::C,
            21..=30 => Rank::D,
            31..=40 => Rank::E,
            _ => Rank::F,
        }
    }
}

impl std::fmt::Display for Rank {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{self:?}")
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct BlockComplexity {
    pub name: String,
    pub complexity: u32,
    pub rank: Rank,
}

impl BlockComplexity {
    pub fn new(name: impl Into<String>, complexity: u32) -> Self {
        Self {
            name: name.into(),
            complexity,
            rank: Rank::from_complexity(complexity),
        }
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct ComplexitySummary {
    pub average: f64,
    pub max: f64,
    pub functions: Vec<BlockComplexity>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct MetricsReport {
    pub cyclomatic_complexity: ComplexitySummary,
    pub maintainability_index: f64,
    pub nesting_depth: u32,
}

/// Per-file entry of an [`AnalysisResult`].
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum FileReport {
    Analyzed {
        structure: ModuleStructure,
        metrics: MetricsReport,
    },
    Failed {
        error: String,
    },
}

impl FileReport {
    pub fn failed(error: &ParseError) -> Self {
        FileReport::Failed {
            error: error.to_string(),
        }
    }

    pub fn structure(&self) -> Option<&ModuleStructure> {
        match self {
            FileReport::Analyzed { structure, .. } => Some(structure),
            FileReport::Failed { .. } => None,
        }
    }

    pub fn metrics(&self) -> Option<&MetricsReport> {
        match self {
            FileReport::Analyzed { metrics, .. } => Some(metrics),
            FileReport::Failed { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            FileReport::Analyzed { .. } => None,
            FileReport::Failed { error } => Some(error),
        }
    }
}

/// File path to per-file report, in input order.
pub type AnalysisResult = IndexMap<String, FileReport>;

/// Why a function was considered risky.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum RiskReason {
    #[serde(rename = "high cyclomatic complexity")]
    HighComplexity,
    #[serde(rename = "deeply nested logic")]
    DeepNesting,
    #[serde(rename = "core inference route or API handler")]
    FrameworkEntryPoint,
}

impl std::fmt::Display for RiskReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        static DISPLAY_STRINGS: &[(RiskReason, &str)] = &[
            (RiskReason::HighComplexity, "high cyclomatic complexity"),
            (RiskReason::DeepNesting, "deeply nested logic"),
            (
                RiskReason::FrameworkEntryPoint,
                "core inference route or API handler",
            ),
        ];

        let display_str = DISPLAY_STRINGS
            .iter()
            .find(|(reason, _)| reason == self)
            .map(|(_, s)| *s)
            .unwrap_or("unknown");

        write!(f, "{display_str}")
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct RiskEntry {
    pub risk_score: f64,
    pub reasons: Vec<RiskReason>,
}

/// Function name to risk entry for one file.
pub type FileRisks = IndexMap<String, RiskEntry>;

/// File path to the risks of every function in that file.
pub type RiskMap = IndexMap<String, FileRisks>;
