use crate::application::{App, AppMode, Screen};
use crate::domain::{FilterField, Question};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Tabs, Wrap},
    Frame,
};

const ANSWER_INDENT: &str = "    ";

pub fn render_ui(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(3),
        ])
        .split(f.area());

    render_header(f, app, chunks[0]);
    match app.screen {
        Screen::Home => render_home(f, chunks[1]),
        Screen::Questions => render_questions(f, app, chunks[1]),
    }
    render_status_bar(f, app, chunks[2]);

    match app.mode {
        AppMode::Picking(field) => render_picker_popup(f, app, field),
        AppMode::Help => render_help_popup(f, app.help_scroll),
        AppMode::Normal => {}
    }
}

fn render_header(f: &mut Frame, app: &App, area: Rect) {
    let titles: Vec<Line> = Screen::ALL
        .iter()
        .enumerate()
        .map(|(i, screen)| Line::from(format!("[{}] {}", i + 1, screen.title())))
        .collect();

    let tabs = Tabs::new(titles)
        .select(app.screen.index())
        .style(Style::default().fg(Color::Cyan))
        .highlight_style(Style::default().fg(Color::Black).bg(Color::LightBlue))
        .divider("|");
    f.render_widget(tabs, area);
}

fn render_home(f: &mut Frame, area: Rect) {
    let text = vec![
        Line::from(Span::styled(
            "Interview Prep Hub",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from("Browse interview questions by category, sub-category and difficulty,"),
        Line::from("and reveal each answer when you are ready."),
        Line::from(""),
        Line::from("Press 2 or Tab to open the question list, ? for help, q to quit."),
    ];

    let home = Paragraph::new(text)
        .block(Block::default().borders(Borders::ALL).title("Home"))
        .wrap(Wrap { trim: false });
    f.render_widget(home, area);
}

fn render_questions(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(area);

    render_filter_bar(f, app, chunks[0]);
    render_question_list(f, app, chunks[1]);
}

fn render_filter_bar(f: &mut Frame, app: &App, area: Rect) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 3); 3])
        .split(area);

    for (field, column) in FilterField::ALL.iter().zip(columns.iter()) {
        let key = picker_key(*field);
        let (value, style) = match app.filters.criteria().get(*field) {
            Some(value) => (value.to_string(), Style::default().fg(Color::Yellow)),
            None => ("Any".to_string(), Style::default().fg(Color::DarkGray)),
        };
        let selector = Paragraph::new(value).style(style).block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!("{} [{}]", field.label(), key)),
        );
        f.render_widget(selector, *column);
    }
}

fn render_question_list(f: &mut Frame, app: &App, area: Rect) {
    let text_width = (area.width as usize).saturating_sub(2 + ANSWER_INDENT.len()).max(10);
    let items: Vec<ListItem> = app
        .questions()
        .iter()
        .enumerate()
        .map(|(index, question)| {
            let revealed = app.disclosure.is_revealed(&question.id);
            ListItem::new(question_lines(index, question, revealed, text_width))
        })
        .collect();

    let title = format!("Interview Prep Questions ({})", app.questions().len());
    let block = Block::default().borders(Borders::ALL).title(title);

    if items.is_empty() {
        let empty = Paragraph::new("No questions to show.")
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        f.render_widget(empty, area);
        return;
    }

    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().bg(Color::Blue).fg(Color::White));
    let mut state = ListState::default().with_selected(Some(app.selected));
    f.render_stateful_widget(list, area, &mut state);
}

/// Lines for one question. Answer text only appears when `revealed`.
fn question_lines(index: usize, question: &Question, revealed: bool, width: usize) -> Vec<Line<'static>> {
    let marker = if revealed { "▾" } else { "▸" };
    let mut heading = vec![
        Span::raw(format!("{marker} {}. {}", index + 1, question.question_text)),
        Span::styled(
            format!("  [{}]", question.difficulty_level),
            Style::default().fg(Color::Magenta),
        ),
    ];
    if !question.tags.is_empty() {
        heading.push(Span::styled(
            format!("  #{}", question.tags.join(" #")),
            Style::default().fg(Color::DarkGray),
        ));
    }

    let mut lines = vec![Line::from(heading)];
    if revealed {
        if let Some(short) = &question.short_answer {
            for row in wrap_text(short, width) {
                lines.push(Line::from(Span::styled(
                    format!("{ANSWER_INDENT}{row}"),
                    Style::default().fg(Color::Cyan),
                )));
            }
        }
        for row in wrap_text(&question.detailed_answer, width) {
            lines.push(Line::from(Span::styled(
                format!("{ANSWER_INDENT}{row}"),
                Style::default().fg(Color::Green),
            )));
        }
    }
    lines
}

/// Greedy word wrap. Explicit newlines are kept; words longer than `width`
/// are split.
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut rows = Vec::new();

    for paragraph in text.lines() {
        let mut row = String::new();
        for word in paragraph.split_whitespace() {
            let mut word = word;
            while word.chars().count() > width {
                if !row.is_empty() {
                    rows.push(std::mem::take(&mut row));
                }
                let split = word.char_indices().nth(width).map(|(i, _)| i).unwrap_or(word.len());
                rows.push(word[..split].to_string());
                word = &word[split..];
            }
            if word.is_empty() {
                continue;
            }
            let needed = if row.is_empty() { 0 } else { row.chars().count() + 1 };
            if needed + word.chars().count() > width {
                rows.push(std::mem::take(&mut row));
            }
            if !row.is_empty() {
                row.push(' ');
            }
            row.push_str(word);
        }
        rows.push(row);
    }

    if rows.is_empty() {
        rows.push(String::new());
    }
    rows
}

fn picker_key(field: FilterField) -> char {
    match field {
        FilterField::Category => 'c',
        FilterField::SubCategory => 's',
        FilterField::DifficultyLevel => 'd',
    }
}

fn render_status_bar(f: &mut Frame, app: &App, area: Rect) {
    let status_text = match app.mode {
        AppMode::Normal => match app.screen {
            Screen::Home => "1/2/Tab: switch screen | F1/?: help | q: quit".to_string(),
            Screen::Questions => {
                let loading = if app.controller.is_loading() { " | loading…" } else { "" };
                format!(
                    "{} questions | {} revealed{} | ↑↓: move | Enter: reveal/hide | c/s/d: filter | r: refresh | ?: help | q: quit",
                    app.questions().len(),
                    app.disclosure.revealed_count(),
                    loading
                )
            }
        },
        AppMode::Picking(field) => format!(
            "Choose {}: ↑↓ select | Enter: apply | x: clear | Esc: cancel",
            field.label()
        ),
        AppMode::Help => "↑↓/jk: scroll | PgUp/PgDn: fast scroll | Home: top | Esc/q: close help".to_string(),
    };

    let status = Paragraph::new(status_text)
        .block(Block::default().borders(Borders::ALL).title("Status"))
        .style(match app.mode {
            AppMode::Normal => Style::default(),
            AppMode::Picking(_) => Style::default().fg(Color::Yellow),
            AppMode::Help => Style::default().fg(Color::Cyan),
        });
    f.render_widget(status, area);
}

fn render_picker_popup(f: &mut Frame, app: &App, field: FilterField) {
    let options = app.picker_options(field);
    let area = f.area();
    let height = (options.len() as u16 + 2).clamp(3, area.height.saturating_sub(4).max(3));
    let width = (area.width / 2).max(20).min(area.width);
    let popup_area = Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + area.height.saturating_sub(height) / 2,
        width,
        height: height.min(area.height),
    };

    f.render_widget(Clear, popup_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(field.label())
        .style(Style::default().fg(Color::Yellow));

    if options.is_empty() {
        let empty = Paragraph::new("No options available").block(block);
        f.render_widget(empty, popup_area);
        return;
    }

    let items: Vec<ListItem> = options.iter().map(|option| ListItem::new(option.as_str())).collect();
    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().bg(Color::Yellow).fg(Color::Black));
    let mut state = ListState::default().with_selected(Some(app.picker_index));
    f.render_stateful_widget(list, popup_area, &mut state);
}

fn render_help_popup(f: &mut Frame, scroll: usize) {
    let area = f.area();
    let popup_area = Rect {
        x: area.width / 10,
        y: area.height / 10,
        width: area.width * 4 / 5,
        height: area.height * 4 / 5,
    };

    f.render_widget(Clear, popup_area);

    let help_lines: Vec<&str> = HELP_TEXT.lines().collect();
    let visible_height = popup_area.height.saturating_sub(2) as usize;

    let start_line = scroll.min(help_lines.len().saturating_sub(visible_height));
    let end_line = (start_line + visible_height).min(help_lines.len());

    let visible_text = help_lines[start_line..end_line].join("\n");

    let help_widget = Paragraph::new(visible_text)
        .block(Block::default()
            .borders(Borders::ALL)
            .title(format!("prephub Help (Line {}/{})", start_line + 1, help_lines.len()))
            .style(Style::default().fg(Color::Cyan)))
        .style(Style::default().fg(Color::White));

    f.render_widget(help_widget, popup_area);
}

const HELP_TEXT: &str = r#"PREPHUB KEY REFERENCE

=== SCREENS ===
1               Home
2               Interview prep questions
Tab             Switch between screens
                Opening the question screen reloads the list

=== QUESTION LIST ===
↑↓ or j/k       Move between questions
Enter / Space   Reveal or hide the selected answer
r               Reload filter options and questions

=== FILTERS ===
c               Choose a category
s               Choose a sub-category
d               Choose a difficulty level
                Filters combine; an unset filter matches everything

=== FILTER PICKER ===
↑↓ or j/k       Move between options
Enter           Apply the highlighted option
x / Backspace   Clear this filter
Esc             Close without changing anything

=== HELP NAVIGATION ===
↑↓ or j/k       Scroll help text up/down one line
Page Up/Down    Scroll help text up/down 5 lines
Home            Jump to top of help text
Esc/F1/?/q      Close this help window

=== CONFIGURATION ===
PREPHUB_BACKEND_URL   Backend base URL (default http://localhost:8000)
PREPHUB_TIMEOUT_SECS  Per-request timeout in seconds (default 30)
PREPHUB_LOG           Log filter, e.g. prephub=debug (default info)
PREPHUB_LOG_FILE      Log file path (default prephub.log)"#;
