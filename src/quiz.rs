//! Interactive stage/quiz session over stdin/stdout.
//!
//! A thin prompt loop around [`RoadmapController`]: every user action maps
//! to one controller operation, and everything shown is derived from the
//! controller's snapshot. Reveals are permanent for the lifetime of the
//! session; a revealed question is shown with its outcome instead of being
//! asked again.

use std::io::{self, BufRead, Write};

use skillforge_core::{Roadmap, RoadmapController};

use crate::render;

/// Read one line, returning `None` on EOF.
fn read_line<R: BufRead>(input: &mut R) -> io::Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line))
}

pub fn run_session<R: BufRead, W: Write>(
    roadmap: Roadmap,
    input: &mut R,
    output: &mut W,
) -> io::Result<()> {
    // Saved roadmaps arrive unvalidated; drop unanswerable quiz items
    // before the controller sees them, same as the extraction path.
    let mut controller = RoadmapController::new(roadmap.sanitized());
    let stage_count = controller.roadmap().stage_count();
    if stage_count == 0 {
        writeln!(output, "This roadmap has no stages.")?;
        return Ok(());
    }

    loop {
        writeln!(output)?;
        writeln!(output, "Learning path: {}", controller.roadmap().roadmap_title)?;
        for (index, stage) in controller.roadmap().stages.iter().enumerate() {
            writeln!(
                output,
                "  [{}] {} ({} track items)",
                index + 1,
                stage.title,
                stage.learning_objectives.len()
            )?;
        }
        write!(output, "Select a stage (1-{}) or q to quit: ", stage_count)?;
        output.flush()?;

        let Some(line) = read_line(input)? else { break };
        let choice = line.trim();
        if choice.eq_ignore_ascii_case("q") {
            break;
        }
        let Ok(number) = choice.parse::<usize>() else {
            writeln!(output, "Not a stage number.")?;
            continue;
        };
        if number == 0 || number > stage_count {
            writeln!(output, "No stage {}.", number)?;
            continue;
        }

        let stage_index = number - 1;
        controller.select_stage(stage_index);
        let Some(stage) = controller.roadmap().stage(stage_index).cloned() else {
            continue;
        };
        writeln!(output)?;
        write!(output, "{}", render::render_stage(stage_index, &stage))?;
        run_stage_quiz(&mut controller, stage_index, input, output)?;
    }
    Ok(())
}

fn run_stage_quiz<R: BufRead, W: Write>(
    controller: &mut RoadmapController,
    stage_index: usize,
    input: &mut R,
    output: &mut W,
) -> io::Result<()> {
    let items = controller
        .roadmap()
        .stage(stage_index)
        .map(|s| s.quiz_items().to_vec())
        .unwrap_or_default();

    for (quiz_index, item) in items.iter().enumerate() {
        writeln!(output)?;
        writeln!(output, "Q{}: {}", quiz_index + 1, item.question)?;

        if controller.is_revealed(stage_index, quiz_index) {
            let verdict = match controller.is_correct(stage_index, quiz_index) {
                Some(true) => "answered correctly".to_string(),
                _ => format!("answered incorrectly; the right answer is: {}", item.correct_answer),
            };
            writeln!(output, "  Already {}.", verdict)?;
            continue;
        }

        for (option_index, option) in item.options.iter().enumerate() {
            writeln!(output, "  [{}] {}", option_index + 1, option)?;
        }

        loop {
            write!(
                output,
                "Your answer (1-{}, s to skip): ",
                item.options.len()
            )?;
            output.flush()?;

            let Some(line) = read_line(input)? else { return Ok(()) };
            let choice = line.trim();
            if choice.eq_ignore_ascii_case("s") {
                break;
            }
            let picked = match choice.parse::<usize>() {
                Ok(n) if n >= 1 && n <= item.options.len() => &item.options[n - 1],
                _ => {
                    writeln!(output, "Not an option.")?;
                    continue;
                }
            };

            controller.select_answer(stage_index, quiz_index, picked.clone());
            controller.reveal(stage_index, quiz_index);
            match controller.is_correct(stage_index, quiz_index) {
                Some(true) => writeln!(output, "  Correct! Well done.")?,
                _ => writeln!(
                    output,
                    "  Incorrect. The right answer is: {}",
                    item.correct_answer
                )?,
            }
            break;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn quiz_roadmap() -> Roadmap {
        serde_json::from_str(
            r#"{
                "roadmap_title": "T",
                "summary": "",
                "stages": [{
                    "title": "Basics",
                    "description": "D",
                    "learning_objectives": ["o1"],
                    "project_idea": "P",
                    "quiz": [{"question": "Pick B", "options": ["A", "B"], "correct_answer": "B"}]
                }]
            }"#,
        )
        .unwrap()
    }

    fn run(script: &str) -> String {
        let mut input = Cursor::new(script.to_string());
        let mut output = Vec::new();
        run_session(quiz_roadmap(), &mut input, &mut output).unwrap();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn test_correct_answer_flow() {
        let out = run("1\n2\nq\n");
        assert!(out.contains("Pick B"));
        assert!(out.contains("Correct! Well done."));
    }

    #[test]
    fn test_incorrect_answer_shows_right_one() {
        let out = run("1\n1\nq\n");
        assert!(out.contains("Incorrect. The right answer is: B"));
    }

    #[test]
    fn test_revealed_question_is_not_asked_again() {
        // Answer once, revisit the stage: the reveal is terminal.
        let out = run("1\n1\n1\nq\n");
        assert!(out.contains("Already answered incorrectly"));
    }

    #[test]
    fn test_skip_and_invalid_input() {
        let out = run("1\ns\nx\nq\n");
        assert!(out.contains("Not a stage number."));
    }

    #[test]
    fn test_unanswerable_quiz_item_is_never_asked() {
        // A stored roadmap can carry a quiz item whose declared correct
        // answer is missing from its options; asking it would be
        // always-wrong, so it must be dropped on entry.
        let roadmap: Roadmap = serde_json::from_str(
            r#"{
                "roadmap_title": "T",
                "summary": "",
                "stages": [{
                    "title": "Basics",
                    "quiz": [
                        {"question": "Ghost", "options": ["A", "B"], "correct_answer": "Z"},
                        {"question": "Pick B", "options": ["A", "B"], "correct_answer": "B"}
                    ]
                }]
            }"#,
        )
        .unwrap();
        let mut input = Cursor::new("1\n2\nq\n".to_string());
        let mut output = Vec::new();
        run_session(roadmap, &mut input, &mut output).unwrap();
        let out = String::from_utf8(output).unwrap();
        assert!(!out.contains("Ghost"));
        assert!(out.contains("Pick B"));
        assert!(out.contains("Correct! Well done."));
    }

    #[test]
    fn test_eof_ends_session() {
        let out = run("");
        assert!(out.contains("Select a stage"));
    }

    #[test]
    fn test_empty_roadmap() {
        let roadmap: Roadmap =
            serde_json::from_str(r#"{"roadmap_title":"T","summary":"","stages":[]}"#).unwrap();
        let mut input = Cursor::new(String::new());
        let mut output = Vec::new();
        run_session(roadmap, &mut input, &mut output).unwrap();
        assert!(String::from_utf8(output).unwrap().contains("no stages"));
    }
}
