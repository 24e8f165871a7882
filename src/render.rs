//! Plain-text rendering of roadmap documents and saved-roadmap listings.

use std::fmt::Write as _;

use skillforge_client::SavedRoadmap;
use skillforge_core::{Roadmap, Stage};

pub fn render_roadmap(roadmap: &Roadmap) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", roadmap.roadmap_title);
    let _ = writeln!(out, "{}", "=".repeat(roadmap.roadmap_title.chars().count().max(4)));
    if !roadmap.summary.is_empty() {
        let _ = writeln!(out, "{}", roadmap.summary);
    }
    let _ = writeln!(out);
    for (index, stage) in roadmap.stages.iter().enumerate() {
        out.push_str(&render_stage(index, stage));
        let _ = writeln!(out);
    }
    out
}

pub fn render_stage(index: usize, stage: &Stage) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Stage {}: {}", stage.display_id(index), stage.title);
    if !stage.description.is_empty() {
        let _ = writeln!(out, "  {}", stage.description);
    }
    if !stage.learning_objectives.is_empty() {
        let _ = writeln!(out, "  Learning goals:");
        for objective in &stage.learning_objectives {
            let _ = writeln!(out, "    - {}", objective);
        }
    }
    if !stage.project_idea.is_empty() {
        let _ = writeln!(out, "  Capstone project: {}", stage.project_idea);
    }
    let resources = stage.resource_items();
    if !resources.is_empty() {
        let _ = writeln!(out, "  Resources:");
        for resource in resources {
            let _ = writeln!(out, "    - {} <{}>", resource.title, resource.url);
        }
    }
    let quiz_count = stage.quiz_items().len();
    if quiz_count > 0 {
        let _ = writeln!(out, "  Knowledge check: {} question(s)", quiz_count);
    }
    out
}

pub fn render_saved_list(roadmaps: &[SavedRoadmap]) -> String {
    if roadmaps.is_empty() {
        return "No roadmaps saved yet.\n".to_string();
    }
    let mut out = String::new();
    for roadmap in roadmaps {
        let _ = writeln!(
            out,
            "{}  {} ({}, {}) - {}",
            roadmap.id, roadmap.title, roadmap.skill_level, roadmap.created_at, roadmap.user_goal
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use skillforge_core::Resource;

    fn sample_roadmap() -> Roadmap {
        serde_json::from_str(
            r#"{
                "roadmap_title": "Go Deep Dive",
                "summary": "S",
                "stages": [{
                    "stage_id": "1",
                    "title": "Basics",
                    "description": "D",
                    "learning_objectives": ["o1", "o2"],
                    "project_idea": "P",
                    "quiz": [{"question": "Q", "options": ["A", "B"], "correct_answer": "A"}]
                }]
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_render_roadmap_sections() {
        let out = render_roadmap(&sample_roadmap());
        assert!(out.contains("Go Deep Dive"));
        assert!(out.contains("Stage 1: Basics"));
        assert!(out.contains("- o1"));
        assert!(out.contains("Capstone project: P"));
        assert!(out.contains("Knowledge check: 1 question(s)"));
    }

    #[test]
    fn test_render_stage_index_fallback_and_resources() {
        let mut roadmap = sample_roadmap();
        roadmap.stages[0].stage_id.clear();
        roadmap.stages[0].resources = Some(vec![Resource {
            title: "The Book".into(),
            url: "https://example.com".into(),
        }]);
        let out = render_stage(0, &roadmap.stages[0]);
        assert!(out.contains("Stage 1: Basics"));
        assert!(out.contains("The Book <https://example.com>"));
    }

    #[test]
    fn test_render_empty_saved_list() {
        assert_eq!(render_saved_list(&[]), "No roadmaps saved yet.\n");
    }
}
