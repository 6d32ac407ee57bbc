use anyhow::Result;
use crossterm::{
    ExecutableCommand,
    event::{self, Event, KeyCode, KeyEventKind},
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
};
use std::io::stdout;

use crate::table::{ResultTable, truncate};

struct AppState<'a> {
    title: &'a str,
    table: &'a ResultTable,
    selected: usize,
    scroll_offset: u16,
}

impl<'a> AppState<'a> {
    fn new(title: &'a str, table: &'a ResultTable) -> Self {
        Self {
            title,
            table,
            selected: 0,
            scroll_offset: 0,
        }
    }

    fn next(&mut self) {
        if !self.table.is_empty() && self.selected < self.table.len() - 1 {
            self.selected += 1;
            self.scroll_offset = 0;
        }
    }

    fn prev(&mut self) {
        if self.selected > 0 {
            self.selected -= 1;
            self.scroll_offset = 0;
        }
    }

    fn scroll_down(&mut self) {
        self.scroll_offset = self.scroll_offset.saturating_add(3);
    }

    fn scroll_up(&mut self) {
        self.scroll_offset = self.scroll_offset.saturating_sub(3);
    }
}

/// Browse a result set: rows on the left, every column of the selected row on the right.
pub fn run_browse(title: &str, table: &ResultTable) -> Result<()> {
    if table.is_empty() {
        println!("No rows.");
        return Ok(());
    }

    let mut state = AppState::new(title, table);

    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;

    let result = run_loop(&mut terminal, &mut state);

    disable_raw_mode()?;
    stdout().execute(LeaveAlternateScreen)?;

    result
}

fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    state: &mut AppState,
) -> Result<()> {
    let mut list_state = ListState::default();
    list_state.select(Some(0));

    loop {
        terminal.draw(|frame| draw(frame, state, &mut list_state))?;

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            match key.code {
                KeyCode::Char('q') | KeyCode::Esc => break,
                KeyCode::Down | KeyCode::Char('j') => state.next(),
                KeyCode::Up | KeyCode::Char('k') => state.prev(),
                KeyCode::Char('J') | KeyCode::PageDown => state.scroll_down(),
                KeyCode::Char('K') | KeyCode::PageUp => state.scroll_up(),
                KeyCode::Home | KeyCode::Char('g') => {
                    state.selected = 0;
                    state.scroll_offset = 0;
                }
                _ => {}
            }
            list_state.select(Some(state.selected));
        }
    }
    Ok(())
}

fn draw(frame: &mut Frame, state: &AppState, list_state: &mut ListState) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(frame.area());
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(rows[0]);

    let items: Vec<ListItem> = (0..state.table.len())
        .map(|row| ListItem::new(row_label(state.table, row)))
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" {} ({}) ", state.title, state.table.len())),
        )
        .highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD))
        .highlight_symbol("> ");

    frame.render_stateful_widget(list, chunks[0], list_state);

    let detail = Paragraph::new(build_detail(state))
        .block(Block::default().borders(Borders::ALL).title(" Detail "))
        .wrap(Wrap { trim: false })
        .scroll((state.scroll_offset, 0));
    frame.render_widget(detail, chunks[1]);

    let help = Paragraph::new(" j/k:navigate  J/K:scroll  g:top  q:quit")
        .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(help, rows[1]);
}

/// The first three columns of a row, joined for the list panel.
fn row_label(table: &ResultTable, row: usize) -> String {
    let cells: Vec<String> = (0..table.columns.len().min(3))
        .map(|col| table.cell(row, col))
        .collect();
    truncate(&cells.join(" | "), 48)
}

fn build_detail<'a>(state: &AppState) -> Text<'a> {
    let table = state.table;
    if state.selected >= table.len() {
        return Text::raw("No row selected");
    }

    let width = table.columns.iter().map(|c| c.chars().count()).max().unwrap_or(0);
    let mut lines: Vec<Line> = Vec::new();
    for (col, name) in table.columns.iter().enumerate() {
        let value = table.cell(state.selected, col);
        let mut wrapped = textwrap::wrap(&value, 60).into_iter();
        let first = wrapped.next().map(|s| s.into_owned()).unwrap_or_default();
        lines.push(Line::from(vec![
            Span::styled(
                format!("{name:<width$}  "),
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            ),
            Span::raw(first),
        ]));
        for rest in wrapped {
            lines.push(Line::from(format!("{:width$}  {}", "", rest)));
        }
    }
    Text::from(lines)
}
