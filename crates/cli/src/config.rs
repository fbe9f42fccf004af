use anyhow::{anyhow, Context, Result};
use biblio_analysis::{DEFAULT_PAIR_LIMIT, DEFAULT_VENUE_LIMIT};
use biblio_graph::{
    default_values, AttributeSource, Cycle, FromField, RandomChoice, DEFAULT_SAMPLE_SIZE,
};
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const CONFIG_ENV: &str = "BIBLIO_CONFIG";
pub const CORPUS_ENV: &str = "BIBLIO_CORPUS";
pub const DEFAULT_CONFIG_FILE: &str = "biblio.toml";

/// File configuration; every field is optional and CLI flags win
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BiblioConfig {
    pub corpus: Option<PathBuf>,
    pub vocabulary: Option<PathBuf>,
    pub limits: LimitsConfig,
    pub attributes: AttributesConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LimitsConfig {
    pub pairs: usize,
    pub venues: usize,
    pub sample_size: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            pairs: DEFAULT_PAIR_LIMIT,
            venues: DEFAULT_VENUE_LIMIT,
            sample_size: DEFAULT_SAMPLE_SIZE,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttributeMode {
    #[default]
    Random,
    Cycle,
    Field,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AttributesConfig {
    pub mode: AttributeMode,
    pub seed: Option<u64>,
    /// Empty means the built-in country list
    pub values: Vec<String>,
    pub field: Option<String>,
    pub fallback: String,
}

impl Default for AttributesConfig {
    fn default() -> Self {
        Self {
            mode: AttributeMode::Random,
            seed: None,
            values: Vec::new(),
            field: None,
            fallback: "Unknown".to_string(),
        }
    }
}

impl AttributesConfig {
    fn values(&self) -> Vec<String> {
        if self.values.is_empty() {
            default_values()
        } else {
            self.values.clone()
        }
    }

    pub fn source(&self) -> Result<Box<dyn AttributeSource>> {
        let source: Box<dyn AttributeSource> = match self.mode {
            AttributeMode::Random => match self.seed {
                Some(seed) => Box::new(RandomChoice::seeded(self.values(), seed)?),
                None => Box::new(RandomChoice::new(self.values())?),
            },
            AttributeMode::Cycle => Box::new(Cycle::new(self.values())?),
            AttributeMode::Field => {
                let field = self
                    .field
                    .clone()
                    .ok_or_else(|| anyhow!("attributes.mode = \"field\" requires attributes.field"))?;
                Box::new(FromField::new(field, self.fallback.clone()))
            }
        };
        Ok(source)
    }
}

impl BiblioConfig {
    /// Explicit path, then `BIBLIO_CONFIG`, then `./biblio.toml` if present
    pub fn discover(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        if let Some(path) = std::env::var_os(CONFIG_ENV).filter(|v| !v.is_empty()) {
            return Self::load(Path::new(&path));
        }
        let local = Path::new(DEFAULT_CONFIG_FILE);
        if local.is_file() {
            return Self::load(local);
        }
        Ok(Self::default())
    }

    pub fn load(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let is_toml = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("toml"));

        let mut config = Self::parse(&bytes, is_toml)
            .with_context(|| format!("Invalid config {}", path.display()))?;
        log::debug!("Loaded config from {}", path.display());

        if let Some(base) = path.parent() {
            config.resolve_relative(base);
        }
        Ok(config)
    }

    fn parse(bytes: &[u8], toml_first: bool) -> Result<Self> {
        let utf8 = std::str::from_utf8(bytes)?;
        if toml_first {
            return toml::from_str(utf8).map_err(|err| anyhow!("TOML parse error: {err}"));
        }
        match serde_json::from_str(utf8) {
            Ok(config) => Ok(config),
            Err(json_err) => toml::from_str(utf8).map_err(|toml_err| {
                anyhow!("Config is not valid JSON ({json_err}) or TOML ({toml_err})")
            }),
        }
    }

    fn resolve_relative(&mut self, base: &Path) {
        for path in [&mut self.corpus, &mut self.vocabulary].into_iter().flatten() {
            if path.is_relative() {
                *path = base.join(&*path);
            }
        }
    }

    /// Corpus path from flag, then `BIBLIO_CORPUS`, then the config file
    pub fn corpus_path(&self, flag: Option<&Path>) -> Option<PathBuf> {
        flag.map(Path::to_path_buf)
            .or_else(|| {
                std::env::var_os(CORPUS_ENV)
                    .filter(|v| !v.is_empty())
                    .map(PathBuf::from)
            })
            .or_else(|| self.corpus.clone())
    }
}
