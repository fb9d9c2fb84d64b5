//! Projection of query results into the response contracts

pub mod snippet;
pub mod ui;

use std::collections::HashSet;

use crate::ranking::MAX_SOURCES;
use crate::types::{
    AnswerResult, ExpandedSourceView, FormattedResponse, OutputMode, RagResponse, RagSource,
    RawResponse, RawSource, SourceItem, SourcesPanel, UiRagResponse, UiSettings,
};

pub use snippet::{extract_snippet, MAX_SNIPPET_CHARS};

/// Stateless projection of `(answer, sources, query)` into one output contract
pub struct ResponseFormatter;

impl ResponseFormatter {
    pub fn format(mode: OutputMode, result: &AnswerResult, query: &str) -> FormattedResponse {
        match mode {
            OutputMode::Raw => FormattedResponse::Raw(Self::raw(result)),
            OutputMode::StandardRag => FormattedResponse::StandardRag(Self::standard_rag(result)),
            OutputMode::Ui => FormattedResponse::Ui(Self::ui(result, query)),
        }
    }

    /// Answer, source path/name pairs and the conversation id
    pub fn raw(result: &AnswerResult) -> RawResponse {
        RawResponse {
            answer: result.answer.clone(),
            sources: result
                .sources
                .iter()
                .map(|source| RawSource {
                    source_path: source.path.clone(),
                    source_name: source.display_name.clone(),
                    source_url: Some(source.external_url.clone()),
                })
                .collect(),
            conversation_id: result.conversation_id,
        }
    }

    /// Up to five sources, each with its file name and exactly one snippet
    pub fn standard_rag(result: &AnswerResult) -> RagResponse {
        RagResponse {
            answer: result.answer.clone(),
            sources: result
                .sources
                .iter()
                .take(MAX_SOURCES)
                .map(|source| RagSource {
                    path: source.path.clone(),
                    title: source.file_name().to_string(),
                    url: None,
                    snippets: vec![extract_snippet(
                        source.content.as_deref().unwrap_or_default(),
                        MAX_SNIPPET_CHARS,
                    )],
                })
                .collect(),
        }
    }

    /// Answer with a collapsible sources panel
    pub fn ui(result: &AnswerResult, query: &str) -> UiRagResponse {
        let standard = Self::standard_rag(result);
        let mut seen = HashSet::new();

        let items: Vec<SourceItem> = standard
            .sources
            .into_iter()
            .filter(|source| seen.insert(source.title.clone()))
            .map(|source| {
                let title = ui::readable_title(&source.title);
                let exact_passage = source.snippets.join(" […] ");
                SourceItem {
                    expanded: ExpandedSourceView {
                        location: ui::location_for(&title).to_string(),
                        why_it_supports: ui::why_it_supports(query, &exact_passage),
                        exact_passage,
                    },
                    title,
                    source: source.path,
                }
            })
            .collect();

        UiRagResponse {
            answer: standard.answer,
            sources_panel: SourcesPanel {
                title: format!("Sources ({})", items.len()),
                ui: UiSettings::default(),
                items,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Source;

    fn result() -> AnswerResult {
        AnswerResult::new(
            "X is the treatment.",
            vec![
                Source {
                    path: "docs/A_B.pdf".into(),
                    display_name: "A B".into(),
                    external_url: "https://www.google.com/search?q=A%20B".into(),
                    content: Some("the treatment is X.".into()),
                },
                Source {
                    path: "docs/Clinical_Trial_Review.pdf".into(),
                    display_name: "Clinical Trial Review".into(),
                    external_url: "https://example.org/ctr".into(),
                    content: None,
                },
            ],
            12,
        )
    }

    #[test]
    fn test_raw_contract() {
        let raw = ResponseFormatter::raw(&result());
        assert_eq!(raw.conversation_id, 12);
        assert_eq!(raw.sources[0].source_path, "docs/A_B.pdf");
        assert_eq!(raw.sources[0].source_name, "A B");

        let value = serde_json::to_value(&raw).unwrap();
        assert_eq!(value["sources"][1]["source_url"], "https://example.org/ctr");
    }

    #[test]
    fn test_standard_contract() {
        let rag = ResponseFormatter::standard_rag(&result());
        assert_eq!(rag.sources.len(), 2);
        assert_eq!(rag.sources[0].title, "A_B.pdf");
        assert_eq!(rag.sources[0].url, None);
        assert_eq!(rag.sources[0].snippets, vec!["the treatment is X.".to_string()]);
        assert_eq!(rag.sources[1].snippets.len(), 1);

        let value = serde_json::to_value(&rag).unwrap();
        assert!(value["sources"][0]["url"].is_null());
        assert!(value.get("conversation_id").is_none());
    }

    #[test]
    fn test_ui_contract() {
        let ui = ResponseFormatter::ui(&result(), "treatment options");
        let panel = &ui.sources_panel;
        assert_eq!(panel.title, "Sources (2)");
        assert_eq!(panel.items[0].title, "A B");
        assert_eq!(panel.items[0].source, "docs/A_B.pdf");
        assert_eq!(panel.items[0].expanded.exact_passage, "the treatment is X.");
        assert_eq!(panel.items[0].expanded.location, "Document excerpt");
        assert_eq!(
            panel.items[0].expanded.why_it_supports,
            "Directly addresses treatment mentioned in the query."
        );
        assert_eq!(panel.items[1].expanded.location, "Clinical research findings");
        assert_eq!(panel.items[1].expanded.why_it_supports, ui::DEFAULT_SUPPORT);
    }

    #[test]
    fn test_ui_contract_without_sources() {
        let ui = ResponseFormatter::ui(&AnswerResult::no_evidence(1), "anything");
        assert_eq!(ui.sources_panel.title, "Sources (0)");
        assert!(ui.sources_panel.items.is_empty());
    }

    #[test]
    fn test_dispatch_by_mode() {
        let result = result();
        assert!(matches!(
            ResponseFormatter::format(OutputMode::Raw, &result, "q"),
            FormattedResponse::Raw(_)
        ));
        let formatted = ResponseFormatter::format(OutputMode::Ui, &result, "q");
        assert_eq!(formatted.answer(), "X is the treatment.");
    }
}
