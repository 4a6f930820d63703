//! Signup form demo
//!
//! Run with `cargo run --example signup`. Tab cycles focus, space toggles
//! the newsletter field, Ctrl+S (Cmd+S on macOS) submits, Esc quits. The
//! aggregated data is printed as JSON after a successful submission.

use std::cell::RefCell;
use std::io;
use std::rc::Rc;

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use formview::{platform, FormOptions, FormView, TextField, ToggleField};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    style::{Color, Style},
    widgets::Paragraph,
    Terminal,
};
use serde_json::Value;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const FOCUS_ORDER: [&str; 4] = ["user.email", "user.name", "bio", "newsletter"];

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "formview=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run(&mut terminal);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    match result {
        Ok(Some(data)) => {
            println!("{}", serde_json::to_string_pretty(&data)?);
            Ok(())
        }
        Ok(None) => Ok(()),
        Err(err) => {
            eprintln!("Error: {err:?}");
            std::process::exit(1);
        }
    }
}

fn run<B: ratatui::backend::Backend>(terminal: &mut Terminal<B>) -> Result<Option<Value>> {
    let submitted: Rc<RefCell<Option<Value>>> = Rc::new(RefCell::new(None));
    let sink = Rc::clone(&submitted);

    let options = FormOptions::new()
        .field(
            TextField::new("user.email", "Email")
                .required()
                .trim()
                .validator(|value| value.contains('@')),
        )
        .field(TextField::new("user.name", "Name").required().trim())
        .field(TextField::new("bio", "Bio").multiline())
        .field(ToggleField::new("newsletter", "Subscribe to the newsletter"))
        .clean(|mut data| {
            if let Value::Object(map) = &mut data {
                map.insert("source".into(), Value::String("tui-demo".into()));
            }
            data
        })
        .on_submit(move |data| *sink.borrow_mut() = Some(data));

    let mut form = FormView::new(options)?;
    form.mount()?;

    let mut focus = 0usize;
    set_focus(&mut form, focus);

    loop {
        terminal.draw(|frame| {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Min(1), Constraint::Length(1)])
                .split(frame.area());

            form.draw(frame, chunks[0]);

            let help = format!(
                "Tab: next field  {}: submit  Esc: quit",
                platform::SUBMIT_SHORTCUT
            );
            frame.render_widget(
                Paragraph::new(help).style(Style::default().fg(Color::DarkGray)),
                chunks[1],
            );
        })?;

        if event::poll(std::time::Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if key.code == KeyCode::Esc {
                    return Ok(None);
                }

                // Submission interception gets first refusal.
                if form.handle_key(key).is_some() {
                    if let Some(data) = submitted.borrow_mut().take() {
                        return Ok(Some(data));
                    }
                    continue;
                }

                match key.code {
                    KeyCode::Tab => {
                        focus = (focus + 1) % FOCUS_ORDER.len();
                        set_focus(&mut form, focus);
                    }
                    KeyCode::BackTab => {
                        focus = (focus + FOCUS_ORDER.len() - 1) % FOCUS_ORDER.len();
                        set_focus(&mut form, focus);
                    }
                    _ => {
                        let name = FOCUS_ORDER[focus];
                        let consumed = form
                            .get_field_mut(name)
                            .map(|field| field.handle_key(key))
                            .unwrap_or(false);
                        if consumed {
                            form.update(name);
                        }
                    }
                }
            }
        }
    }
}

fn set_focus(form: &mut FormView, focus: usize) {
    for (idx, name) in FOCUS_ORDER.iter().enumerate() {
        if let Some(field) = form.get_field_mut(name) {
            field.set_focused(idx == focus);
        }
    }
}
