use super::*;

fn mono(s: &str) -> f32 {
    s.chars().count() as f32 * 10.0
}

#[test]
fn wrap_uppercases_and_keeps_short_caption_on_one_line() {
    let lines = wrap_caption("team work", 200.0, mono);
    assert_eq!(lines, vec!["TEAM WORK".to_string()]);
}

#[test]
fn wrap_breaks_only_at_word_boundaries() {
    // "SYNERGY ACHIEVED" is 160px, so it cannot share a 100px line.
    let lines = wrap_caption("synergy achieved today", 100.0, mono);
    assert_eq!(lines, vec!["SYNERGY", "ACHIEVED", "TODAY"]);

    let rejoined = lines.join(" ");
    assert_eq!(rejoined, "SYNERGY ACHIEVED TODAY");
}

#[test]
fn wrap_lines_fit_when_max_width_covers_widest_word() {
    let caption = "when the quarterly report says synergy but the metrics say otherwise";
    let widest = caption
        .split_whitespace()
        .map(mono)
        .fold(0.0f32, f32::max);

    for max_width in [widest, widest + 15.0, widest * 2.0, 1000.0] {
        for line in wrap_caption(caption, max_width, mono) {
            assert!(mono(&line) <= max_width, "{line:?} overflows {max_width}");
            assert!(!line.starts_with(' ') && !line.ends_with(' '));
        }
    }
}

#[test]
fn wrap_overlong_word_sits_alone() {
    let lines = wrap_caption("a supercalifragilistic b", 50.0, mono);
    assert_eq!(lines, vec!["A", "SUPERCALIFRAGILISTIC", "B"]);
}

#[test]
fn wrap_collapses_runs_of_whitespace() {
    let lines = wrap_caption("  double   spaced\ttext ", 1000.0, mono);
    assert_eq!(lines, vec!["DOUBLE SPACED TEXT"]);
}

#[test]
fn wrap_blank_input_commits_one_empty_line() {
    assert_eq!(wrap_caption("", 100.0, mono), vec![String::new()]);
    assert_eq!(wrap_caption("   ", 100.0, mono), vec![String::new()]);
}

#[test]
fn top_anchor_grows_downward_from_first_line() {
    let block = place_lines(
        vec!["A".into(), "B".into(), "C".into()],
        CaptionAnchor::Top { y: 5.0 },
        11.0,
    );
    let ys: Vec<f32> = block.lines.iter().map(|l| l.y).collect();
    assert_eq!(ys, vec![5.0, 16.0, 27.0]);
    assert!(block.lines.iter().all(|l| l.edge == LineEdge::Top));
}

#[test]
fn bottom_anchor_pins_last_line_for_any_line_count() {
    for n in 1..=6 {
        let lines: Vec<String> = (0..n).map(|i| format!("L{i}")).collect();
        let block = place_lines(lines, CaptionAnchor::Bottom { y: 95.0 }, 11.0);
        assert_eq!(block.lines.len(), n);
        assert_eq!(block.lines.last().unwrap().y, 95.0);
        assert_eq!(block.lines[0].y, 95.0 - (n - 1) as f32 * 11.0);
        assert!(block.lines.iter().all(|l| l.edge == LineEdge::Bottom));
    }
}

#[test]
fn top_anchor_first_line_fixed_for_any_line_count() {
    for n in 1..=6 {
        let lines: Vec<String> = (0..n).map(|i| format!("L{i}")).collect();
        let block = place_lines(lines, CaptionAnchor::Top { y: 5.0 }, 11.0);
        assert_eq!(block.lines[0].y, 5.0);
    }
}

#[test]
fn layout_caption_blank_draws_nothing() {
    let block = layout_caption("  ", 100.0, 10.0, CaptionAnchor::Bottom { y: 90.0 }, mono);
    assert!(block.is_empty());
}

#[test]
fn layout_caption_wraps_then_places() {
    let block = layout_caption(
        "synergy achieved",
        100.0,
        12.0,
        CaptionAnchor::Bottom { y: 90.0 },
        mono,
    );
    let got: Vec<(&str, f32)> = block.lines.iter().map(|l| (l.text.as_str(), l.y)).collect();
    assert_eq!(got, vec![("SYNERGY", 78.0), ("ACHIEVED", 90.0)]);
}

#[test]
fn wrap_counts_the_trailing_separator_at_the_boundary() {
    // "AB CD" is exactly 50px but "AB CD " is 60px, so the second word moves down.
    assert_eq!(wrap_caption("ab cd", 50.0, mono), vec!["AB", "CD"]);
    assert_eq!(wrap_caption("ab cd", 60.0, mono), vec!["AB CD"]);
}

#[test]
fn wrap_never_measures_a_lone_first_word() {
    let mut measured = Vec::new();
    let lines = wrap_caption("synergy", 1.0, |s: &str| {
        measured.push(s.to_string());
        mono(s)
    });
    assert_eq!(lines, vec!["SYNERGY"]);
    assert!(measured.is_empty());
}
