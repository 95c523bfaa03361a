use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame, Terminal,
};
use split_smart::{Page, Participant, Session, Settings, SplitSummary, TipSelection, TIP_PRESETS};
use std::io;
use tracing::debug;

// ============================================================================
// FOCUS
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Bill,
    Currency,
    People,
    Tip,
    Name(usize),
    Share(usize),
}

impl Field {
    /// Fields in display order for `people` participants
    fn order(people: usize) -> Vec<Field> {
        let mut fields = vec![Field::Bill, Field::Currency, Field::People, Field::Tip];
        for i in 0..people {
            fields.push(Field::Name(i));
            fields.push(Field::Share(i));
        }
        fields
    }

    fn is_text(&self) -> bool {
        !matches!(self, Field::Currency)
    }
}

// ============================================================================
// APP
// ============================================================================

pub struct App {
    pub session: Session,
    pub current_page: Page,
    pub focus: Field,

    /// Text being typed into the focused field, `None` when not editing
    pub editing: Option<String>,

    /// Session as it was when editing started, restored on Esc
    before_edit: Option<Session>,
}

impl App {
    pub fn new(settings: &Settings) -> Self {
        Self {
            session: Session::new(settings),
            current_page: Page::Home,
            focus: Field::Bill,
            editing: None,
            before_edit: None,
        }
    }

    pub fn next_page(&mut self) {
        self.current_page = self.current_page.next();
    }

    pub fn previous_page(&mut self) {
        self.current_page = self.current_page.previous();
    }

    pub fn next_field(&mut self) {
        let order = Field::order(self.session.num_people());
        let pos = order.iter().position(|f| *f == self.focus).unwrap_or(0);
        self.focus = order[(pos + 1) % order.len()];
    }

    pub fn previous_field(&mut self) {
        let order = Field::order(self.session.num_people());
        let pos = order.iter().position(|f| *f == self.focus).unwrap_or(0);
        self.focus = order[(pos + order.len() - 1) % order.len()];
    }

    /// Current text of a field, as shown before editing starts
    pub fn field_text(&self, field: Field) -> String {
        let participants = self.session.participants();
        match field {
            Field::Bill => format!("{}", self.session.total_bill),
            Field::Currency => self.session.currency.label(),
            Field::People => format!("{}", self.session.num_people()),
            Field::Tip => match &self.session.tip {
                TipSelection::Custom(raw) => raw.clone(),
                preset => format!("{}", preset.percentage()),
            },
            Field::Name(i) => participants.get(i).map(|p| p.name.clone()).unwrap_or_default(),
            Field::Share(i) => participants.get(i).map(|p| format!("{}", p.share)).unwrap_or_default(),
        }
    }

    pub fn start_editing(&mut self) {
        if self.focus.is_text() {
            self.editing = Some(self.field_text(self.focus));
            self.before_edit = Some(self.session.clone());
        }
    }

    /// Drop the edit buffer and restore the session from before the edit
    pub fn cancel_editing(&mut self) {
        self.editing = None;
        if let Some(session) = self.before_edit.take() {
            self.session = session;
        }
        self.clamp_focus();
    }

    /// Finish editing. People is resized here; every other field is already live.
    pub fn commit_editing(&mut self) {
        let Some(text) = self.editing.take() else {
            return;
        };
        self.before_edit = None;

        if self.focus == Field::People {
            self.session.set_num_people_text(&text);
        } else {
            self.apply_buffer(&text);
        }
        self.clamp_focus();
    }

    /// Push the buffer into the session so the summary follows every keystroke.
    /// People waits for Enter: resizing on a partial count would drop names.
    fn apply_buffer(&mut self, text: &str) {
        match self.focus {
            Field::Bill => self.session.set_total_bill(text),
            Field::Tip => self.session.set_tip(TipSelection::Custom(text.to_string())),
            Field::Name(i) => self.session.set_name(i, text),
            Field::Share(i) => self.session.set_share(i, text),
            Field::People | Field::Currency => {}
        }
    }

    /// Left/Right on a non-text adjustment: currency, people count, tip preset
    pub fn adjust(&mut self, forward: bool) {
        match self.focus {
            Field::Currency => {
                let currency = if forward {
                    self.session.currency.next()
                } else {
                    self.session.currency.previous()
                };
                self.session.set_currency(currency);
            }
            Field::People => {
                let count = self.session.num_people();
                let target = if forward { count + 1 } else { count.saturating_sub(1) };
                self.session.set_num_people(target);
                self.clamp_focus();
            }
            Field::Tip => {
                let next = match self.session.tip {
                    TipSelection::Preset(i) if forward => (i + 1) % TIP_PRESETS.len(),
                    TipSelection::Preset(i) => (i + TIP_PRESETS.len() - 1) % TIP_PRESETS.len(),
                    TipSelection::Custom(_) => 0,
                };
                self.session.set_tip(TipSelection::Preset(next));
            }
            _ => {}
        }
    }

    pub fn select_tip_preset(&mut self, index: usize) {
        if index < TIP_PRESETS.len() {
            self.session.set_tip(TipSelection::Preset(index));
        }
    }

    pub fn randomize_exempt(&mut self) {
        let picked = self.session.randomize_exempt(&mut rand::rng());
        debug!(?picked, "exempt participant picked");
    }

    pub fn clear_exempt(&mut self) {
        self.session.set_exempt(None);
    }

    /// Keep focus on an existing participant after the count shrinks
    fn clamp_focus(&mut self) {
        let people = self.session.num_people();
        self.focus = match self.focus {
            Field::Name(i) if i >= people => Field::People,
            Field::Share(i) if i >= people => Field::People,
            other => other,
        };
    }

    /// Returns `false` when the app should quit
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        if let Some(buffer) = self.editing.as_mut() {
            match key.code {
                KeyCode::Enter => self.commit_editing(),
                KeyCode::Esc => self.cancel_editing(),
                KeyCode::Backspace => {
                    buffer.pop();
                    let text = buffer.clone();
                    self.apply_buffer(&text);
                }
                KeyCode::Char(c) => {
                    buffer.push(c);
                    let text = buffer.clone();
                    self.apply_buffer(&text);
                }
                _ => {}
            }
            return true;
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => return false,
            KeyCode::Tab => {
                if key.modifiers.contains(KeyModifiers::SHIFT) {
                    self.previous_page();
                } else {
                    self.next_page();
                }
            }
            KeyCode::BackTab => self.previous_page(),
            _ if self.current_page != Page::Home => {}
            KeyCode::Down | KeyCode::Char('j') => self.next_field(),
            KeyCode::Up | KeyCode::Char('k') => self.previous_field(),
            KeyCode::Left | KeyCode::Char('h') => self.adjust(false),
            KeyCode::Right | KeyCode::Char('l') => self.adjust(true),
            KeyCode::Enter => self.start_editing(),
            KeyCode::Char('r') => self.randomize_exempt(),
            KeyCode::Char('x') => self.clear_exempt(),
            KeyCode::Char(c @ '1'..='4') => self.select_tip_preset(c as usize - '1' as usize),
            _ => {}
        }
        true
    }
}

pub fn run_ui(app: &mut App) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run the app
    let res = run_app(&mut terminal, app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        tracing::error!(error = %err, "terminal UI failed");
        return Err(err.into());
    }

    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> io::Result<()> {
    loop {
        terminal.draw(|f| ui(f, app))?;

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            if !app.handle_key(key) {
                return Ok(());
            }
        }
    }
}

// ============================================================================
// RENDERING
// ============================================================================

fn ui(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header with navigation
            Constraint::Min(0),    // Content area
            Constraint::Length(3), // Status bar
        ])
        .split(f.size());

    render_header(f, chunks[0], app);

    match app.current_page {
        Page::Home => {
            let content_chunks = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
                .split(chunks[1]);

            let summary = app.session.summary();
            render_inputs(f, content_chunks[0], app);
            render_summary(f, content_chunks[1], &summary);
        }
        page => render_static_page(f, chunks[1], page),
    }

    render_status_bar(f, chunks[2], app);
}

fn render_header(f: &mut Frame, area: Rect, app: &App) {
    let mut tab_spans = vec![Span::styled(
        "SplitSmart  ",
        Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD),
    )];

    for (i, page) in Page::ALL.iter().enumerate() {
        if i > 0 {
            tab_spans.push(Span::raw(" │ "));
        }

        let style = if *page == app.current_page {
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
        } else {
            Style::default().fg(Color::DarkGray)
        };

        tab_spans.push(Span::styled(page.title(), style));
    }

    let header = Paragraph::new(vec![Line::from(tab_spans)])
        .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(Color::Cyan)));

    f.render_widget(header, area);
}

fn field_label(app: &App, field: Field) -> String {
    match field {
        Field::Bill => "Total Bill".to_string(),
        Field::Currency => "Currency".to_string(),
        Field::People => "Number of People".to_string(),
        Field::Tip => "Tip Percentage".to_string(),
        Field::Name(i) => {
            let name = app
                .session
                .participants()
                .get(i)
                .map(|p| p.name.clone())
                .unwrap_or_else(|| Participant::default_name(i));
            if app.session.is_exempt(i) {
                format!("{} (Exempt)", name)
            } else {
                name
            }
        }
        Field::Share(_) => "  Share %".to_string(),
    }
}

fn render_inputs(f: &mut Frame, area: Rect, app: &App) {
    let mut lines = vec![Line::from("")];

    for field in Field::order(app.session.num_people()) {
        let focused = field == app.focus;
        let value = match (&app.editing, focused) {
            (Some(buffer), true) => format!("{}▏", buffer),
            _ => app.field_text(field),
        };

        let label_style = if focused {
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Cyan)
        };
        let value_style = if focused && app.editing.is_some() {
            Style::default().fg(Color::Black).bg(Color::Yellow)
        } else if focused {
            Style::default().add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        };

        let mut spans = vec![
            Span::raw(if focused { "→ " } else { "  " }),
            Span::styled(format!("{:<20}", field_label(app, field)), label_style),
            Span::styled(value, value_style),
        ];

        if field == Field::Tip {
            spans.push(Span::raw("   "));
            for (i, preset) in TIP_PRESETS.iter().enumerate() {
                let active = app.session.tip == TipSelection::Preset(i);
                let style = if active {
                    Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(Color::DarkGray)
                };
                spans.push(Span::styled(format!("[{}] {}% ", i + 1, preset), style));
            }
        }

        lines.push(Line::from(spans));
    }

    let inputs = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White))
            .title(" Bill & People "),
    );

    f.render_widget(inputs, area);
}

fn render_summary(f: &mut Frame, area: Rect, summary: &SplitSummary) {
    let key = Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD);

    let mut content = vec![
        Line::from(""),
        Line::from(vec![Span::styled("  Total Bill: ", key), Span::raw(summary.money(summary.total_bill))]),
        Line::from(vec![Span::styled("  Tip Percentage: ", key), Span::raw(format!("{}%", summary.tip_percentage))]),
        Line::from(vec![Span::styled("  Tip Amount: ", key), Span::raw(summary.money(summary.tip_amount))]),
        Line::from(vec![
            Span::styled("  Total Amount: ", key),
            Span::styled(summary.money(summary.total_amount), Style::default().fg(Color::Green)),
        ]),
        Line::from(""),
        Line::from("  ─────────────────────────────────────"),
        Line::from(""),
    ];

    for (i, line) in summary.lines.iter().enumerate() {
        let amount_style = if line.amount.is_undefined() {
            Style::default().fg(Color::Red)
        } else if line.exempt {
            Style::default().fg(Color::DarkGray)
        } else {
            Style::default().fg(Color::White)
        };
        content.push(Line::from(vec![
            Span::styled(format!("  {}: ", summary.line_label(i)), key),
            Span::styled(line.display.clone(), amount_style),
        ]));
    }

    content.push(Line::from(""));
    content.push(chart_bar(summary, area.width.saturating_sub(6) as usize));
    content.push(Line::from(""));

    for (i, line) in summary.lines.iter().enumerate() {
        let swatch = match summary.angles.get(i).and_then(|s| s.color.as_deref()) {
            Some(hex) => Span::styled("██", Style::default().fg(hex_color(hex))),
            None => Span::styled("░░", Style::default().fg(Color::DarkGray)),
        };
        let label = if line.exempt {
            format!(" {} (Exempt)", line.name)
        } else {
            format!(" {}", line.name)
        };
        content.push(Line::from(vec![Span::raw("  "), swatch, Span::raw(label)]));
    }

    let panel = Paragraph::new(content).wrap(Wrap { trim: false }).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow))
            .title(" Split Summary "),
    );

    f.render_widget(panel, area);
}

/// The radial chart flattened into one proportional bar
fn chart_bar(summary: &SplitSummary, width: usize) -> Line<'static> {
    let mut spans = vec![Span::raw("  ")];
    let mut used = 0;

    let active: Vec<_> = summary.angles.iter().filter(|s| !s.is_empty()).collect();
    for (n, span) in active.iter().enumerate() {
        let sweep = span.sweep();
        if !sweep.is_finite() {
            continue;
        }
        let cells = if n + 1 == active.len() {
            width.saturating_sub(used)
        } else {
            ((sweep / 360.0) * width as f64).round() as usize
        };
        used += cells;
        let color = span.color.as_deref().map(hex_color).unwrap_or(Color::DarkGray);
        spans.push(Span::styled("█".repeat(cells), Style::default().fg(color)));
    }

    Line::from(spans)
}

fn hex_color(hex: &str) -> Color {
    let digits = hex.trim_start_matches('#');
    let channel = |range: std::ops::Range<usize>| {
        digits
            .get(range)
            .and_then(|s| u8::from_str_radix(s, 16).ok())
            .unwrap_or(0)
    };
    Color::Rgb(channel(0..2), channel(2..4), channel(4..6))
}

fn render_static_page(f: &mut Frame, area: Rect, page: Page) {
    let mut content = vec![
        Line::from(""),
        Line::from(vec![Span::styled(
            format!("  {}", page.title()),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        )]),
        Line::from(""),
    ];
    for text in page.body() {
        content.push(Line::from(format!("  {}", text)));
        content.push(Line::from(""));
    }
    content.push(Line::from(vec![Span::styled(
        "  © 2024 Pelican Pointe LLC. All rights reserved.",
        Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
    )]));

    let paragraph = Paragraph::new(content).wrap(Wrap { trim: false }).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White))
            .title(format!(" {} ", page.title())),
    );

    f.render_widget(paragraph, area);
}

fn render_status_bar(f: &mut Frame, area: Rect, app: &App) {
    let mut status_spans = vec![Span::styled(
        format!(" {} ", app.session.currency.label()),
        Style::default().fg(Color::Cyan),
    )];

    let hints: &[(&str, &str)] = if app.editing.is_some() {
        &[("Enter", " Save | "), ("Esc", " Cancel")]
    } else if app.current_page == Page::Home {
        &[
            ("↑/↓", " Field | "),
            ("Enter", " Edit | "),
            ("←/→", " Adjust | "),
            ("1-4", " Tip | "),
            ("r", " Random exempt | "),
            ("x", " Clear | "),
            ("Tab", " Page | "),
        ]
    } else {
        &[("Tab", " Page | ")]
    };

    status_spans.push(Span::raw("| "));
    for (key, text) in hints {
        status_spans.push(Span::styled(*key, Style::default().fg(Color::Yellow)));
        status_spans.push(Span::raw(*text));
    }
    if app.editing.is_none() {
        status_spans.push(Span::styled("q", Style::default().fg(Color::Red)));
        status_spans.push(Span::raw(" Quit"));
    }

    let status_bar = Paragraph::new(vec![Line::from(status_spans)]).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White)),
    );

    f.render_widget(status_bar, area);
}
