// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! # Agent Catalog
//!
//! The closed universe of agent types available for crew composition.
//!
//! Agent kinds are an enum rather than a string-keyed registry so that
//! dispatch is exhaustiveness-checked at compile time. Capability tags stay
//! plain strings: matching is set-intersection over tags, not semantic.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Broad domain an agent belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AgentCategory {
    Knowledge,
    Code,
    Conversation,
    Media,
}

/// Every agent type the platform can place into a crew.
///
/// Declaration order is load-bearing: the registry lists agents in this
/// order, and capability matching breaks score ties by it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgentKind {
    // Knowledge
    KnowledgeCurator,
    ResearchSynthesizer,
    ContentExplorer,
    LearningPath,
    // Code
    CodeAnalyst,
    PatternDetector,
    InsightGenerator,
    SecurityAnalyst,
    // Conversation
    ConversationAnalyst,
    LearningAnalyzer,
    InsightExtractor,
    KnowledgeGapDetector,
    // Media
    OcrImageAnalyst,
    VideoProcessor,
    AudioJournalProcessor,
}

impl AgentKind {
    pub const ALL: [AgentKind; 15] = [
        AgentKind::KnowledgeCurator,
        AgentKind::ResearchSynthesizer,
        AgentKind::ContentExplorer,
        AgentKind::LearningPath,
        AgentKind::CodeAnalyst,
        AgentKind::PatternDetector,
        AgentKind::InsightGenerator,
        AgentKind::SecurityAnalyst,
        AgentKind::ConversationAnalyst,
        AgentKind::LearningAnalyzer,
        AgentKind::InsightExtractor,
        AgentKind::KnowledgeGapDetector,
        AgentKind::OcrImageAnalyst,
        AgentKind::VideoProcessor,
        AgentKind::AudioJournalProcessor,
    ];

    pub fn category(&self) -> AgentCategory {
        match self {
            AgentKind::KnowledgeCurator
            | AgentKind::ResearchSynthesizer
            | AgentKind::ContentExplorer
            | AgentKind::LearningPath => AgentCategory::Knowledge,
            AgentKind::CodeAnalyst
            | AgentKind::PatternDetector
            | AgentKind::InsightGenerator
            | AgentKind::SecurityAnalyst => AgentCategory::Code,
            AgentKind::ConversationAnalyst
            | AgentKind::LearningAnalyzer
            | AgentKind::InsightExtractor
            | AgentKind::KnowledgeGapDetector => AgentCategory::Conversation,
            AgentKind::OcrImageAnalyst
            | AgentKind::VideoProcessor
            | AgentKind::AudioJournalProcessor => AgentCategory::Media,
        }
    }

    /// Capability tags this agent contributes to a crew.
    pub fn capabilities(&self) -> &'static [&'static str] {
        match self {
            AgentKind::KnowledgeCurator => {
                &["categorization", "tagging", "summarization", "curation"]
            }
            AgentKind::ResearchSynthesizer => {
                &["synthesis", "summarization", "cross_referencing", "research"]
            }
            AgentKind::ContentExplorer => &["discovery", "search", "research", "link_analysis"],
            AgentKind::LearningPath => &["sequencing", "curation", "recommendation"],
            AgentKind::CodeAnalyst => &["code_review", "static_analysis", "documentation"],
            AgentKind::PatternDetector => &["pattern_mining", "static_analysis", "clustering"],
            AgentKind::InsightGenerator => &["insight_generation", "summarization", "reporting"],
            AgentKind::SecurityAnalyst => &["security_audit", "code_review", "risk_assessment"],
            AgentKind::ConversationAnalyst => {
                &["dialogue_analysis", "summarization", "topic_extraction"]
            }
            AgentKind::LearningAnalyzer => &["learning_assessment", "topic_extraction"],
            AgentKind::InsightExtractor => &["insight_generation", "entity_extraction"],
            AgentKind::KnowledgeGapDetector => &["gap_detection", "cross_referencing"],
            AgentKind::OcrImageAnalyst => &["ocr", "image_analysis", "entity_extraction"],
            AgentKind::VideoProcessor => &["transcription", "video_analysis", "summarization"],
            AgentKind::AudioJournalProcessor => &["transcription", "sentiment_analysis"],
        }
    }

    /// Narrower specializations, used for display and ranking context only.
    pub fn specializations(&self) -> &'static [&'static str] {
        match self {
            AgentKind::KnowledgeCurator => &["personal_knowledge_bases"],
            AgentKind::ResearchSynthesizer => &["academic_sources"],
            AgentKind::ContentExplorer => &["web_content"],
            AgentKind::LearningPath => &["skill_progressions"],
            AgentKind::CodeAnalyst => &["repository_audits"],
            AgentKind::PatternDetector => &["architecture_patterns"],
            AgentKind::InsightGenerator => &["executive_summaries"],
            AgentKind::SecurityAnalyst => &["dependency_risk"],
            AgentKind::ConversationAnalyst => &["ai_chat_transcripts"],
            AgentKind::LearningAnalyzer => &["study_sessions"],
            AgentKind::InsightExtractor => &["action_items"],
            AgentKind::KnowledgeGapDetector => &["topic_coverage"],
            AgentKind::OcrImageAnalyst => &["screenshots"],
            AgentKind::VideoProcessor => &["lecture_recordings"],
            AgentKind::AudioJournalProcessor => &["voice_notes"],
        }
    }

    /// Build the read-only descriptor for this kind.
    pub fn descriptor(&self) -> AgentDescriptor {
        AgentDescriptor {
            kind: *self,
            capabilities: self.capabilities().iter().map(|s| s.to_string()).collect(),
            specializations: self
                .specializations()
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

impl std::fmt::Display for AgentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            AgentKind::KnowledgeCurator => "knowledge_curator",
            AgentKind::ResearchSynthesizer => "research_synthesizer",
            AgentKind::ContentExplorer => "content_explorer",
            AgentKind::LearningPath => "learning_path",
            AgentKind::CodeAnalyst => "code_analyst",
            AgentKind::PatternDetector => "pattern_detector",
            AgentKind::InsightGenerator => "insight_generator",
            AgentKind::SecurityAnalyst => "security_analyst",
            AgentKind::ConversationAnalyst => "conversation_analyst",
            AgentKind::LearningAnalyzer => "learning_analyzer",
            AgentKind::InsightExtractor => "insight_extractor",
            AgentKind::KnowledgeGapDetector => "knowledge_gap_detector",
            AgentKind::OcrImageAnalyst => "ocr_image_analyst",
            AgentKind::VideoProcessor => "video_processor",
            AgentKind::AudioJournalProcessor => "audio_journal_processor",
        };
        write!(f, "{name}")
    }
}

/// Read-only view over one registry entry. Never mutated by the composer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentDescriptor {
    pub kind: AgentKind,
    pub capabilities: HashSet<String>,
    pub specializations: HashSet<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_kind_is_listed_exactly_once() {
        let unique: HashSet<_> = AgentKind::ALL.iter().collect();
        assert_eq!(unique.len(), AgentKind::ALL.len());
    }

    #[test]
    fn descriptors_carry_capabilities() {
        for kind in AgentKind::ALL {
            let descriptor = kind.descriptor();
            assert_eq!(descriptor.kind, kind);
            assert!(
                !descriptor.capabilities.is_empty(),
                "{kind} has no capabilities"
            );
        }
    }

    #[test]
    fn display_matches_serde_representation() {
        let json = serde_json::to_string(&AgentKind::KnowledgeGapDetector).unwrap();
        assert_eq!(json, "\"knowledge_gap_detector\"");
        assert_eq!(
            AgentKind::KnowledgeGapDetector.to_string(),
            "knowledge_gap_detector"
        );
    }
}
