// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! # Crew Request YAML Parser
//!
//! Parses `CrewRequest` YAML manifests into domain requests.
//!
//! # Architecture
//!
//! - **Layer:** Infrastructure
//! - **Purpose:** Parse external YAML → Domain objects
//! - **Anti-Corruption:** Translates the manifest schema to the domain model
//!
//! # Manifest Format
//!
//! ```yaml
//! apiVersion: 100monkeys.ai/v1
//! kind: CrewRequest
//! metadata:
//!   name: curate-reading-list
//! spec:
//!   goal: "Curate this week's saved articles"
//!   priority: high
//!   resources:
//!     cpu: 0.3
//!     memory: 0.3
//!     agents: 3
//!   capabilities:
//!     - summarization
//!     - tagging
//!   maxCrewSize: 4
//!   pipeline:
//!     - crew: knowledge_curation
//!       task: curate_knowledge
//! ```

use crate::domain::budget::ResourceRequirements;
use crate::domain::crew::{CompositionRequirements, CrewKind, CrewProcess};
use crate::domain::request::{PipelineStep, RequestError, RequestId, WorkflowPriority, WorkflowRequest};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

const EXPECTED_API_VERSION: &str = "100monkeys.ai/v1";
const EXPECTED_KIND: &str = "CrewRequest";

// ============================================================================
// YAML Schema (External Representation)
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestManifest {
    pub api_version: String,
    pub kind: String,
    pub metadata: RequestMetadataYaml,
    pub spec: RequestSpecYaml,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestMetadataYaml {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub labels: HashMap<String, String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestSpecYaml {
    pub goal: String,
    #[serde(default)]
    pub priority: WorkflowPriority,
    #[serde(default)]
    pub resources: ResourcesYaml,
    #[serde(default)]
    pub capabilities: Vec<String>,
    #[serde(default)]
    pub max_crew_size: Option<usize>,
    #[serde(default)]
    pub complexity: Option<f64>,
    #[serde(default)]
    pub process: CrewProcess,
    #[serde(default)]
    pub pipeline: Vec<PipelineStepYaml>,
    #[serde(default)]
    pub context: serde_json::Value,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResourcesYaml {
    #[serde(default)]
    pub cpu: Option<f64>,
    #[serde(default)]
    pub memory: Option<f64>,
    #[serde(default)]
    pub agents: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineStepYaml {
    pub crew: CrewKind,
    pub task: String,
    #[serde(default)]
    pub inputs: serde_json::Value,
}

// ============================================================================
// Parser
// ============================================================================

pub struct RequestParser;

impl RequestParser {
    /// Parse a manifest file into a domain request.
    pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<WorkflowRequest, RequestError> {
        let yaml = fs::read_to_string(path)?;
        Self::parse_yaml(&yaml)
    }

    /// Parse manifest YAML into a domain request.
    pub fn parse_yaml(yaml: &str) -> Result<WorkflowRequest, RequestError> {
        let manifest: RequestManifest = serde_yaml::from_str(yaml)?;
        Self::into_request(manifest)
    }

    fn into_request(manifest: RequestManifest) -> Result<WorkflowRequest, RequestError> {
        if manifest.api_version != EXPECTED_API_VERSION {
            return Err(RequestError::InvalidApiVersion(manifest.api_version));
        }
        if manifest.kind != EXPECTED_KIND {
            return Err(RequestError::InvalidKind(manifest.kind));
        }

        let spec = manifest.spec;
        if spec.goal.trim().is_empty() {
            return Err(RequestError::EmptyGoal);
        }
        Self::validate_share("cpu", spec.resources.cpu)?;
        Self::validate_share("memory", spec.resources.memory)?;

        let composition = if spec.capabilities.is_empty() {
            None
        } else {
            Some(CompositionRequirements {
                capabilities: spec.capabilities.into_iter().collect(),
                max_crew_size: spec.max_crew_size,
                complexity: spec.complexity,
                process: spec.process,
            })
        };

        Ok(WorkflowRequest {
            id: RequestId::new(),
            goal: spec.goal,
            context: spec.context,
            priority: spec.priority,
            resources: ResourceRequirements {
                cpu: spec.resources.cpu,
                memory: spec.resources.memory,
                agents: spec.resources.agents,
            },
            composition,
            pipeline: spec
                .pipeline
                .into_iter()
                .map(|step| PipelineStep {
                    crew: step.crew,
                    task: step.task,
                    inputs: step.inputs,
                })
                .collect(),
        })
    }

    fn validate_share(field: &str, value: Option<f64>) -> Result<(), RequestError> {
        if let Some(v) = value {
            if !(0.0..=1.0).contains(&v) {
                return Err(RequestError::InvalidResources(format!(
                    "{field} must be within [0, 1], got {v}"
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const VALID: &str = r#"
apiVersion: 100monkeys.ai/v1
kind: CrewRequest
metadata:
  name: curate-reading-list
spec:
  goal: "Curate this week's saved articles"
  priority: high
  resources:
    cpu: 0.3
    memory: 0.3
    agents: 3
  capabilities:
    - summarization
    - tagging
  maxCrewSize: 4
  pipeline:
    - crew: knowledge_curation
      task: curate_knowledge
"#;

    #[test]
    fn parses_valid_manifest() {
        let request = RequestParser::parse_yaml(VALID).unwrap();
        assert_eq!(request.goal, "Curate this week's saved articles");
        assert_eq!(request.priority, WorkflowPriority::High);
        assert_eq!(request.resources.cpu(), 0.3);
        assert_eq!(request.resources.agents(), 3);
        let composition = request.composition.unwrap();
        assert!(composition.capabilities.contains("tagging"));
        assert_eq!(composition.max_crew_size(), 4);
        assert_eq!(request.pipeline.len(), 1);
        assert_eq!(request.pipeline[0].crew, CrewKind::KnowledgeCuration);
    }

    #[test]
    fn rejects_wrong_api_version() {
        let yaml = VALID.replace("100monkeys.ai/v1", "100monkeys.ai/v2");
        assert!(matches!(
            RequestParser::parse_yaml(&yaml),
            Err(RequestError::InvalidApiVersion(_))
        ));
    }

    #[test]
    fn rejects_wrong_kind() {
        let yaml = VALID.replace("CrewRequest", "Workflow");
        assert!(matches!(
            RequestParser::parse_yaml(&yaml),
            Err(RequestError::InvalidKind(_))
        ));
    }

    #[test]
    fn rejects_empty_goal() {
        let yaml = VALID.replace("\"Curate this week's saved articles\"", "\"  \"");
        assert!(matches!(
            RequestParser::parse_yaml(&yaml),
            Err(RequestError::EmptyGoal)
        ));
    }

    #[test]
    fn rejects_out_of_range_cpu() {
        let yaml = VALID.replace("cpu: 0.3", "cpu: 1.5");
        assert!(matches!(
            RequestParser::parse_yaml(&yaml),
            Err(RequestError::InvalidResources(_))
        ));
    }

    #[test]
    fn no_capabilities_means_no_composition() {
        let yaml = r#"
apiVersion: 100monkeys.ai/v1
kind: CrewRequest
metadata:
  name: plain
spec:
  goal: "Summarize the inbox"
"#;
        let request = RequestParser::parse_yaml(yaml).unwrap();
        assert!(request.composition.is_none());
        assert!(request.pipeline.is_empty());
    }

    #[test]
    fn parses_manifest_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(VALID.as_bytes()).unwrap();

        let request = RequestParser::parse_file(file.path()).unwrap();
        assert_eq!(request.priority, WorkflowPriority::High);
    }
}
