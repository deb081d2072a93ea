use super::*;

fn with_history(lines: &[&str]) -> Input {
    let mut input = Input::default();
    for l in lines {
        input.push_history(l);
    }
    input
}

#[test]
fn up_up_down_walks_newest_first() {
    let mut input = with_history(&["a", "b", "c"]);

    input.history_up();
    assert_eq!(input.buf(), "c");
    input.history_up();
    assert_eq!(input.buf(), "b");
    input.history_down();
    assert_eq!(input.buf(), "c");
    assert_eq!(input.history_pos(), Some(0));
}

#[test]
fn up_stops_at_oldest_and_down_past_newest_clears() {
    let mut input = with_history(&["a", "b"]);
    for _ in 0..5 {
        input.history_up();
    }
    assert_eq!(input.buf(), "a");
    assert_eq!(input.history_pos(), Some(1));

    input.history_down();
    input.history_down();
    assert_eq!(input.buf(), "");
    assert_eq!(input.history_pos(), None);

    input.history_down();
    assert_eq!(input.buf(), "");
}

#[test]
fn up_on_empty_history_does_nothing() {
    let mut input = Input::default();
    input.set("draft");
    input.history_up();
    assert_eq!(input.buf(), "draft");
    assert_eq!(input.history_pos(), None);
}

#[test]
fn any_edit_ends_recall() {
    let mut input = with_history(&["first", "second"]);
    input.history_up();
    input.history_up();
    assert_eq!(input.history_pos(), Some(1));

    input.backspace();
    assert_eq!(input.buf(), "firs");
    assert_eq!(input.history_pos(), None);

    input.history_up();
    assert_eq!(input.buf(), "second");
}

#[test]
fn consecutive_duplicates_collapse_and_blank_lines_are_skipped() {
    let input = with_history(&["ls", "ls", "  ", "pwd", "ls"]);
    let got: Vec<&str> = input.history().collect();
    assert_eq!(got, vec!["ls", "pwd", "ls"]);
}

#[test]
fn history_is_capped() {
    let lines: Vec<String> = (0..HISTORY_LIMIT + 7).map(|i| format!("cmd {}", i)).collect();
    let refs: Vec<&str> = lines.iter().map(|s| s.as_str()).collect();
    let input = with_history(&refs);

    let kept: Vec<&str> = input.history().collect();
    assert_eq!(kept.len(), HISTORY_LIMIT);
    assert_eq!(kept[0], format!("cmd {}", HISTORY_LIMIT + 6));
    assert_eq!(*kept.last().unwrap(), "cmd 7");
}

#[test]
fn cursor_edits_respect_char_boundaries() {
    let mut input = Input::default();
    for c in "héllo".chars() {
        input.insert_char(c);
    }
    input.move_left();
    input.move_left();
    input.move_left();
    input.move_left();
    input.backspace();
    assert_eq!(input.buf(), "éllo");
    assert_eq!(input.cursor(), 0);

    input.move_right();
    input.delete();
    assert_eq!(input.buf(), "élo");
    assert_eq!(input.cursor(), 'é'.len_utf8());
}

#[test]
fn take_empties_the_line() {
    let mut input = Input::default();
    input.set("kit status");
    assert_eq!(input.take(), "kit status");
    assert_eq!(input.buf(), "");
    assert_eq!(input.cursor(), 0);
}
