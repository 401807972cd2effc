//! Crew definition: the agent persona and task text of each stage.
//!
//! A crew is declared in TOML:
//!
//! ```toml
//! [crew]
//! name = "marketing"
//!
//! [[stages]]
//! kind = "analyze"
//!
//! [stages.agent]
//! role = "Researcher"
//! goal = "Analyze scraped data"
//! backstory = "An AI agent specialized in data analysis."
//!
//! [stages.task]
//! name = "AnalyzeData"
//! description = "Analyze the scraped data and extract key insights."
//! expected_output = "A summary of key insights from the data."
//! ```
//!
//! followed by `draft` and `detect_gaps` stages in that order.

use msight_core::{CrewSettings, StageKind};
use msight_error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;
use tracing::{debug, instrument};

/// Crew bundled with the binary.
const BUNDLED_CREW: &str = include_str!("../crew.toml");

/// Agent persona sent as the system message of a stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_getters::Getters)]
pub struct AgentSpec {
    /// Role name (e.g. "Researcher")
    role: String,
    /// What the agent is trying to achieve
    goal: String,
    /// Persona background
    backstory: String,
    /// Whether the agent expects a human reply; logged, never awaited
    #[serde(default)]
    human_input: bool,
}

/// Task text of a stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_getters::Getters)]
pub struct TaskSpec {
    /// Task name, also the input key under which downstream stages see its output
    name: String,
    /// Instruction for the agent
    description: String,
    /// Shape of the expected answer
    expected_output: String,
}

/// One stage of the crew.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_getters::Getters)]
pub struct StageSpec {
    /// Which pipeline stage this is
    kind: StageKind,
    /// Persona running the stage
    agent: AgentSpec,
    /// Task the persona performs
    task: TaskSpec,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_getters::Getters)]
struct CrewMetadata {
    name: String,
    #[serde(default)]
    description: String,
}

/// A validated crew: exactly one stage per [`StageKind`], in execution order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Crew {
    crew: CrewMetadata,
    stages: Vec<StageSpec>,
}

impl Crew {
    /// The crew shipped with M-Sight.
    pub fn bundled() -> Result<Self, ConfigError> {
        BUNDLED_CREW.parse()
    }

    /// Load a crew from a TOML file.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            ConfigError::new(format!("Failed to read crew: {}", e)).with_path(path)
        })?;
        content
            .parse()
            .map_err(|e: ConfigError| e.with_path(path))
    }

    /// Load the crew named by configuration, falling back to the bundled one.
    pub fn load(settings: &CrewSettings) -> Result<Self, ConfigError> {
        match settings.path() {
            Some(path) => Self::from_file(path),
            None => Self::bundled(),
        }
    }

    /// Crew name.
    pub fn name(&self) -> &str {
        self.crew.name()
    }

    /// Stages in execution order.
    pub fn stages(&self) -> &[StageSpec] {
        &self.stages
    }

    /// Stage definition for a kind.
    pub fn stage(&self, kind: StageKind) -> Option<&StageSpec> {
        self.stages.iter().find(|stage| stage.kind == kind)
    }

    /// Check stage count, order and task text.
    #[instrument(skip(self), fields(name = %self.crew.name, stage_count = self.stages.len()))]
    pub fn validate(&self) -> Result<(), ConfigError> {
        let kinds: Vec<StageKind> = self.stages.iter().map(|stage| stage.kind).collect();
        if kinds != StageKind::ORDER {
            return Err(ConfigError::new(format!(
                "Crew '{}' must define stages {:?} in order, found {:?}",
                self.crew.name,
                StageKind::ORDER,
                kinds
            )));
        }

        for stage in &self.stages {
            if stage.task.name.trim().is_empty() {
                return Err(ConfigError::new(format!(
                    "Crew '{}' stage {} has a blank task name",
                    self.crew.name, stage.kind
                )));
            }
            if stage.task.description.trim().is_empty() {
                return Err(ConfigError::new(format!(
                    "Crew '{}' task '{}' has a blank description",
                    self.crew.name, stage.task.name
                )));
            }
        }

        let mut names: Vec<&str> = self.stages.iter().map(|s| s.task.name.as_str()).collect();
        names.sort_unstable();
        names.dedup();
        if names.len() != self.stages.len() {
            return Err(ConfigError::new(format!(
                "Crew '{}' task names must be unique",
                self.crew.name
            )));
        }

        Ok(())
    }
}

impl FromStr for Crew {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let crew: Crew = toml::from_str(s)
            .map_err(|e| ConfigError::new(format!("Failed to parse crew: {}", e)))?;
        crew.validate()?;
        debug!(name = %crew.crew.name, "Crew loaded");
        Ok(crew)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bundled_crew_is_valid() {
        let crew = Crew::bundled().unwrap();
        assert_eq!(crew.name(), "marketing");

        let names: Vec<&str> = crew.stages().iter().map(|s| s.task().name().as_str()).collect();
        assert_eq!(names, ["AnalyzeData", "DraftScript", "IdentifyGaps"]);

        let gaps = crew.stage(StageKind::DetectGaps).unwrap();
        assert_eq!(gaps.agent().role(), "GapDetector");
        assert!(*gaps.agent().human_input());
        assert!(!*crew.stage(StageKind::Draft).unwrap().agent().human_input());
    }

    #[test]
    fn test_out_of_order_stages_rejected() {
        let swapped = BUNDLED_CREW
            .replacen("kind = \"analyze\"", "kind = \"tmp\"", 1)
            .replacen("kind = \"draft\"", "kind = \"analyze\"", 1)
            .replacen("kind = \"tmp\"", "kind = \"draft\"", 1);
        let err = swapped.parse::<Crew>().unwrap_err();
        assert!(err.to_string().contains("in order"));
    }

    #[test]
    fn test_missing_stage_rejected() {
        let cut = BUNDLED_CREW
            .split("[[stages]]\nkind = \"detect_gaps\"")
            .next()
            .unwrap();
        assert!(cut.parse::<Crew>().is_err());
    }

    #[test]
    fn test_blank_description_rejected() {
        let blank = BUNDLED_CREW.replace(
            "Draft a video script based on the insights.",
            "   ",
        );
        let err = blank.parse::<Crew>().unwrap_err();
        assert!(err.to_string().contains("DraftScript"));
    }

    #[test]
    fn test_load_from_configured_path() {
        let file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        let custom = BUNDLED_CREW.replace("name = \"marketing\"", "name = \"custom\"");
        std::fs::write(file.path(), custom).unwrap();

        let settings: CrewSettings =
            toml::from_str(&format!("path = {:?}", file.path().display().to_string())).unwrap();
        let crew = Crew::load(&settings).unwrap();
        assert_eq!(crew.name(), "custom");
    }

    #[test]
    fn test_invalid_crew_file_names_the_file() {
        let file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        let blank = BUNDLED_CREW.replace("Draft a video script based on the insights.", "");
        std::fs::write(file.path(), blank).unwrap();

        let err = Crew::from_file(file.path()).unwrap_err();
        assert_eq!(err.path.as_deref(), Some(file.path()));
        assert!(err.message.contains("DraftScript"));

        let missing = Crew::from_file("/nonexistent/crew.toml").unwrap_err();
        assert_eq!(
            missing.path.as_deref(),
            Some(Path::new("/nonexistent/crew.toml"))
        );
    }
}
