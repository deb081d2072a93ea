use super::*;

pub(super) fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<()> {
    loop {
        app.pump();

        terminal
            .draw(|f| super::render::draw(f, app))
            .context("draw")?;
        if app.quit {
            return Ok(());
        }

        if event::poll(Duration::from_millis(50)).context("poll")? {
            match event::read().context("read event")? {
                Event::Key(k) if k.kind == KeyEventKind::Press => handle_key(app, k),
                _ => {}
            }
        }
    }
}

pub(crate) fn handle_key(app: &mut App, key: KeyEvent) {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.quit = true;
        return;
    }
    if app.prompt.is_some() {
        handle_prompt_key(app, key);
        return;
    }
    match app.focus {
        Focus::Explorer => handle_explorer_key(app, key),
        Focus::Terminal => handle_terminal_key(app, key),
    }
}

fn handle_prompt_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => return app.cancel_prompt(),
        KeyCode::Enter => return app.confirm_prompt(),
        _ => {}
    }
    let Some(prompt) = app.prompt.as_mut() else {
        return;
    };
    match key.code {
        KeyCode::Left => prompt.input.move_left(),
        KeyCode::Right => prompt.input.move_right(),
        KeyCode::Backspace => prompt.input.backspace(),
        KeyCode::Delete => prompt.input.delete(),
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            prompt.input.insert_char(c)
        }
        _ => {}
    }
}

fn handle_explorer_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') => app.quit = true,
        KeyCode::Tab | KeyCode::Esc => app.focus = Focus::Terminal,
        KeyCode::Up | KeyCode::Char('k') => app.move_selection(-1),
        KeyCode::Down | KeyCode::Char('j') => app.move_selection(1),
        KeyCode::Char('a') => app.begin_new_file(),
        KeyCode::Char('A') => app.begin_new_folder(),
        KeyCode::Char('r') => app.begin_rename(),
        KeyCode::Char('d') | KeyCode::Delete => app.delete_selected(),
        _ => {}
    }
}

fn handle_terminal_key(app: &mut App, key: KeyEvent) {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Esc => app.focus = Focus::Explorer,
        KeyCode::Enter => app.submit_input(),
        KeyCode::Tab => app.shell.complete(),
        KeyCode::Up => app.shell.recall_up(),
        KeyCode::Down => app.shell.recall_down(),
        KeyCode::Char('p') if ctrl => app.shell.recall_up(),
        KeyCode::Char('n') if ctrl => app.shell.recall_down(),
        KeyCode::Char('u') if ctrl => app.shell.input_mut().clear(),
        KeyCode::Left => app.shell.input_mut().move_left(),
        KeyCode::Right => app.shell.input_mut().move_right(),
        KeyCode::Backspace => app.shell.input_mut().backspace(),
        KeyCode::Delete => app.shell.input_mut().delete(),
        KeyCode::Char(c) if !ctrl => app.shell.input_mut().insert_char(c),
        _ => {}
    }
}
