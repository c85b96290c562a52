use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use finance_tracker::controller::today;
use finance_tracker::{
    chart, format_amount, parse_hex, ChartData, Controller, DeletePrompt, FinanceError, FormField,
    Kind, Level, Mode, Notice, ReportOutcome, Theme,
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{
        Block, Borders, Cell, Clear, Paragraph, Row, Table, TableState, Wrap,
    },
    Frame, Terminal,
};
use std::io;
use tracing::error;

const PAGE_SIZE: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Table,
    Form(FormField),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportInput {
    Year,
    Month,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportDialog {
    pub year: String,
    pub month: String,
    pub input: ReportInput,
    pub output: Option<String>,
}

impl ReportDialog {
    fn new() -> Self {
        Self {
            year: String::new(),
            month: String::new(),
            input: ReportInput::Year,
            output: None,
        }
    }

    fn active_text(&mut self) -> &mut String {
        match self.input {
            ReportInput::Year => &mut self.year,
            ReportInput::Month => &mut self.month,
        }
    }

    fn switch_input(&mut self) {
        self.input = match self.input {
            ReportInput::Year => ReportInput::Month,
            ReportInput::Month => ReportInput::Year,
        };
    }
}

/// Modal popups; the last one in the stack receives input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dialog {
    Message(Notice),
    ConfirmDelete { id: i64, title: String, message: String },
    Report(ReportDialog),
}

#[derive(Debug, Clone, Copy)]
pub struct Palette {
    pub income: Color,
    pub expense: Color,
    pub accent: Color,
    pub highlight: Color,
    pub text: Color,
}

impl Palette {
    pub fn from_theme(theme: &Theme) -> Self {
        let color = |hex: &str, fallback: Color| {
            parse_hex(hex)
                .map(|(r, g, b)| Color::Rgb(r, g, b))
                .unwrap_or(fallback)
        };

        Self {
            income: color(&theme.income, Color::Blue),
            expense: color(&theme.expense, Color::Red),
            accent: color(&theme.accent, Color::Cyan),
            highlight: color(&theme.highlight, Color::DarkGray),
            text: color(&theme.text, Color::Black),
        }
    }

    fn kind(&self, kind: Kind) -> Color {
        match kind {
            Kind::Income => self.income,
            Kind::Expense => self.expense,
        }
    }
}

pub struct App {
    pub controller: Controller,
    pub state: TableState,
    pub focus: Focus,
    pub dialogs: Vec<Dialog>,
    pub palette: Palette,
    pub fatal: Option<FinanceError>,
    pub should_quit: bool,
}

impl App {
    pub fn new(controller: Controller, theme: &Theme) -> Self {
        let mut state = TableState::default();
        if !controller.transactions().is_empty() {
            state.select(Some(0));
        }

        Self {
            controller,
            state,
            focus: Focus::Table,
            dialogs: Vec::new(),
            palette: Palette::from_theme(theme),
            fatal: None,
            should_quit: false,
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }

        if !self.dialogs.is_empty() {
            self.handle_dialog_key(key);
            return;
        }

        if key.modifiers.contains(KeyModifiers::CONTROL) {
            match key.code {
                KeyCode::Char('n') => self.clear_form(),
                KeyCode::Char('d') => self.request_delete(),
                KeyCode::Char('r') => self.open_report(),
                KeyCode::Char('c') => self.should_quit = true,
                _ => {}
            }
            return;
        }

        match self.focus {
            Focus::Table => self.handle_table_key(key),
            Focus::Form(field) => self.handle_form_key(field, key),
        }
    }

    fn handle_table_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Down | KeyCode::Char('j') => self.next(),
            KeyCode::Up | KeyCode::Char('k') => self.previous(),
            KeyCode::PageDown => self.page_down(),
            KeyCode::PageUp => self.page_up(),
            KeyCode::Home => self.state.select(Some(0)),
            KeyCode::End => {
                let len = self.controller.transactions().len();
                if len > 0 {
                    self.state.select(Some(len - 1));
                }
            }
            KeyCode::Enter => self.select_row(),
            KeyCode::Tab => self.focus = Focus::Form(FormField::Kind),
            KeyCode::Char('d') | KeyCode::Delete => self.request_delete(),
            KeyCode::Char('c') => self.clear_form(),
            KeyCode::Char('r') => self.open_report(),
            _ => {}
        }
    }

    fn handle_form_key(&mut self, field: FormField, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => {
                self.focus = Focus::Table;
                return;
            }
            KeyCode::Enter => {
                let result = self.controller.submit();
                self.finish_action(result);
                return;
            }
            KeyCode::Tab | KeyCode::Down => {
                self.focus = Focus::Form(field.next());
                return;
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.focus = Focus::Form(field.previous());
                return;
            }
            _ => {}
        }

        let form = self.controller.form_mut();
        match field {
            FormField::Kind => {
                if matches!(key.code, KeyCode::Char(' ') | KeyCode::Left | KeyCode::Right) {
                    form.kind = form.kind.toggle();
                }
            }
            FormField::Category | FormField::Amount => {
                let text = if field == FormField::Category {
                    &mut form.category
                } else {
                    &mut form.amount
                };
                match key.code {
                    KeyCode::Char(c) => text.push(c),
                    KeyCode::Backspace => {
                        text.pop();
                    }
                    _ => {}
                }
            }
            FormField::Date => match key.code {
                KeyCode::Left | KeyCode::Char('-') => form.shift_days(-1),
                KeyCode::Right | KeyCode::Char('+') => form.shift_days(1),
                KeyCode::Char('[') => form.shift_months(-1),
                KeyCode::Char(']') => form.shift_months(1),
                KeyCode::Char('t') => form.date = today(),
                _ => {}
            },
        }
    }

    fn handle_dialog_key(&mut self, key: KeyEvent) {
        let Some(dialog) = self.dialogs.pop() else {
            return;
        };

        match dialog {
            Dialog::Message(notice) => match key.code {
                KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ') => {
                    if notice.level == Level::Error && self.fatal.is_some() {
                        self.should_quit = true;
                    }
                }
                _ => self.dialogs.push(Dialog::Message(notice)),
            },
            Dialog::ConfirmDelete { id, title, message } => match key.code {
                KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
                    let result = self.controller.confirm_delete(id);
                    self.finish_action(result);
                }
                KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {}
                _ => self.dialogs.push(Dialog::ConfirmDelete { id, title, message }),
            },
            Dialog::Report(mut report) => match key.code {
                KeyCode::Esc => {}
                KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => {
                    report.switch_input();
                    self.dialogs.push(Dialog::Report(report));
                }
                KeyCode::Backspace => {
                    report.active_text().pop();
                    self.dialogs.push(Dialog::Report(report));
                }
                KeyCode::Char(c) => {
                    report.active_text().push(c);
                    self.dialogs.push(Dialog::Report(report));
                }
                KeyCode::Enter => {
                    let outcome = self.controller.monthly_report(&report.year, &report.month);
                    match outcome {
                        Ok(ReportOutcome::Ready(monthly)) => {
                            report.output = Some(monthly.to_string());
                            self.dialogs.push(Dialog::Report(report));
                        }
                        Ok(ReportOutcome::Rejected(notice)) => {
                            self.dialogs.push(Dialog::Report(report));
                            self.dialogs.push(Dialog::Message(notice));
                        }
                        Err(err) => {
                            self.dialogs.push(Dialog::Report(report));
                            self.fail(err);
                        }
                    }
                }
                _ => self.dialogs.push(Dialog::Report(report)),
            },
        }
    }

    fn select_row(&mut self) {
        if let Some(i) = self.state.selected() {
            if self.controller.select(i) {
                self.focus = Focus::Form(FormField::Category);
            }
        }
    }

    fn clear_form(&mut self) {
        self.controller.clear();
    }

    fn request_delete(&mut self) {
        let dialog = match self.controller.request_delete() {
            DeletePrompt::NothingSelected(notice) => Dialog::Message(notice),
            DeletePrompt::Confirm { id, title, message } => {
                Dialog::ConfirmDelete { id, title, message }
            }
        };
        self.dialogs.push(dialog);
    }

    fn open_report(&mut self) {
        self.dialogs.push(Dialog::Report(ReportDialog::new()));
    }

    fn finish_action(&mut self, result: finance_tracker::Result<Notice>) {
        match result {
            Ok(notice) => {
                self.sync_selection();
                self.dialogs.push(Dialog::Message(notice));
            }
            Err(err) => self.fail(err),
        }
    }

    fn fail(&mut self, err: FinanceError) {
        error!(error = %err, "storage failure");
        self.dialogs.push(Dialog::Message(Notice::error("Error", &err.to_string())));
        self.fatal = Some(err);
    }

    /// Hands back the storage failure that ended the session, if any.
    pub fn finish(&mut self) -> Result<()> {
        match self.fatal.take() {
            Some(err) => Err(err.into()),
            None => Ok(()),
        }
    }

    /// Keeps the table cursor on a valid row after the rows were reloaded.
    fn sync_selection(&mut self) {
        let len = self.controller.transactions().len();
        let selected = match self.controller.selected_index() {
            Some(i) => Some(i),
            None if len == 0 => None,
            None => Some(self.state.selected().unwrap_or(0).min(len - 1)),
        };
        self.state.select(selected);
    }

    pub fn next(&mut self) {
        let len = self.controller.transactions().len();
        if len == 0 {
            return;
        }
        let i = match self.state.selected() {
            Some(i) if i >= len - 1 => 0,
            Some(i) => i + 1,
            None => 0,
        };
        self.state.select(Some(i));
    }

    pub fn previous(&mut self) {
        let len = self.controller.transactions().len();
        if len == 0 {
            return;
        }
        let i = match self.state.selected() {
            Some(0) => len - 1,
            Some(i) => i - 1,
            None => 0,
        };
        self.state.select(Some(i));
    }

    pub fn page_down(&mut self) {
        let len = self.controller.transactions().len();
        if len == 0 {
            return;
        }
        let i = match self.state.selected() {
            Some(i) => (i + PAGE_SIZE).min(len - 1),
            None => 0,
        };
        self.state.select(Some(i));
    }

    pub fn page_up(&mut self) {
        let i = self.state.selected().map(|i| i.saturating_sub(PAGE_SIZE)).unwrap_or(0);
        self.state.select(Some(i));
    }
}

pub fn run_ui(app: &mut App) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res?;
    app.finish()
}

fn run_app<B: ratatui::backend::Backend>(terminal: &mut Terminal<B>, app: &mut App) -> io::Result<()> {
    while !app.should_quit {
        terminal.draw(|f| ui(f, app))?;

        if let Event::Key(key) = event::read()? {
            app.handle_key(key);
        }
    }
    Ok(())
}

fn ui(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),  // Header with totals
            Constraint::Length(5),  // Entry form
            Constraint::Min(6),     // Transaction table
            Constraint::Length(12), // Chart
            Constraint::Length(3),  // Status bar
        ])
        .split(f.size());

    render_header(f, chunks[0], app);
    render_form(f, chunks[1], app);
    render_table(f, chunks[2], app);
    render_chart(f, chunks[3], app.controller.chart(), &app.palette);
    render_status_bar(f, chunks[4], app);

    for dialog in &app.dialogs {
        render_dialog(f, dialog, &app.palette);
    }
}

fn render_header(f: &mut Frame, area: Rect, app: &App) {
    let chart = app.controller.chart();
    let currency = app.controller.currency();
    let income = chart.bar(Kind::Income).value;
    let expense = chart.bar(Kind::Expense).value;

    let spans = vec![
        Span::styled(
            "Personal Finance Tracker",
            Style::default()
                .fg(app.palette.accent)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("  |  "),
        Span::styled(
            format!("Income: {}", format_amount(income, currency)),
            Style::default().fg(app.palette.income),
        ),
        Span::raw("  "),
        Span::styled(
            format!("Expense: {}", format_amount(expense, currency)),
            Style::default().fg(app.palette.expense),
        ),
        Span::raw("  "),
        Span::styled(
            format!("Balance: {}", format_amount(income - expense, currency)),
            Style::default().add_modifier(Modifier::BOLD),
        ),
    ];

    let header = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(app.palette.accent)),
    );

    f.render_widget(header, area);
}

fn render_form(f: &mut Frame, area: Rect, app: &App) {
    let form = app.controller.form();
    let mode = app.controller.mode();
    let currency = app.controller.currency();

    let render_field = |field: FormField, value: String| -> Vec<Span<'static>> {
        let focused = app.focus == Focus::Form(field);
        let label = if field == FormField::Amount && !currency.is_empty() {
            format!("{} ({}): ", field.label(), currency)
        } else {
            format!("{}: ", field.label())
        };
        let value_style = if focused {
            Style::default()
                .bg(app.palette.highlight)
                .fg(Color::White)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().add_modifier(Modifier::UNDERLINED)
        };
        let cursor = if focused && matches!(field, FormField::Category | FormField::Amount) {
            "▏"
        } else {
            ""
        };

        vec![
            Span::styled(label, Style::default().fg(Color::Gray)),
            Span::styled(format!(" {}{} ", value, cursor), value_style),
            Span::raw("    "),
        ]
    };

    let kind_value = format!("{} ◂▸", form.kind.label());
    let date_value = form.date.format("%Y-%m-%d").to_string();

    let mut first = render_field(FormField::Kind, kind_value);
    first.extend(render_field(FormField::Category, form.category.clone()));
    let mut second = render_field(FormField::Amount, form.amount.clone());
    second.extend(render_field(FormField::Date, date_value));

    let button = Line::from(vec![Span::styled(
        format!("  [ {} ]  ", mode.primary_label()),
        Style::default()
            .bg(app.palette.accent)
            .fg(Color::White)
            .add_modifier(Modifier::BOLD),
    )]);

    let title = match mode {
        Mode::Idle => " Add Transaction ".to_string(),
        Mode::Editing { id } => format!(" Update Transaction #{} ", id),
    };

    let paragraph = Paragraph::new(vec![Line::from(first), Line::from(second), button]).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(if matches!(app.focus, Focus::Form(_)) {
                app.palette.accent
            } else {
                Color::White
            }))
            .title(title),
    );

    f.render_widget(paragraph, area);
}

fn render_table(f: &mut Frame, area: Rect, app: &mut App) {
    let header_cells = ["ID", "Kind", "Category", "Amount", "Date"].iter().map(|h| {
        Cell::from(*h).style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
    });

    let header = Row::new(header_cells)
        .style(Style::default().bg(Color::DarkGray))
        .height(1);

    let editing = app.controller.mode().selected_id();
    let palette = app.palette;

    let rows = app.controller.transactions().iter().map(|tx| {
        let color = palette.kind(tx.kind);
        let marker = if editing == Some(tx.id) { "●" } else { "" };

        let cells = vec![
            Cell::from(format!("{}{}", marker, tx.id)),
            Cell::from(tx.kind.label()).style(Style::default().fg(color)),
            Cell::from(truncate(&tx.category, 30)),
            Cell::from(format!("{:.2}", tx.amount)).style(Style::default().fg(color)),
            Cell::from(tx.date.format("%Y-%m-%d").to_string()),
        ];

        Row::new(cells).height(1)
    });

    let border = if app.focus == Focus::Table {
        palette.accent
    } else {
        Color::White
    };

    let table = Table::new(
        rows,
        [
            Constraint::Length(8),
            Constraint::Length(10),
            Constraint::Min(20),
            Constraint::Length(14),
            Constraint::Length(12),
        ],
    )
    .header(header)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border))
            .title(format!(
                " Transactions ({}) ",
                app.controller.transactions().len()
            )),
    )
    .highlight_style(
        Style::default()
            .bg(palette.highlight)
            .add_modifier(Modifier::BOLD),
    )
    .highlight_symbol("→ ");

    f.render_stateful_widget(table, area, &mut app.state);
}

fn render_chart(f: &mut Frame, area: Rect, chart_data: &ChartData, palette: &Palette) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::White))
        .title(format!(" {} ", chart::TITLE));
    let inner = block.inner(area);
    f.render_widget(block, area);

    // Needs at least one bar row, the value label row and the kind row
    if inner.height < 3 || inner.width < 2 {
        return;
    }

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(2), Constraint::Length(1)])
        .split(inner);
    let (plot, axis) = (rows[0], rows[1]);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(inner);

    let bar_width = (inner.width.saturating_sub(8) / 4).clamp(3, 24);

    for (bar, column) in chart_data.bars.iter().zip(columns.iter()) {
        let color = palette.kind(bar.kind);

        // The top plot row is always left free for the value label
        let scaled = (chart_data.fill_ratio(bar.kind) * f64::from(plot.height)).round() as u16;
        let bar_height = scaled.min(plot.height - 1);

        let width = bar_width.min(column.width);
        let bar_area = Rect::new(
            column.x + (column.width - width) / 2,
            plot.bottom() - bar_height,
            width,
            bar_height,
        );
        let label_area = Rect::new(column.x, bar_area.y - 1, column.width, 1);
        let kind_area = Rect::new(column.x, axis.y, column.width, 1);

        f.render_widget(Block::default().style(Style::default().bg(color)), bar_area);
        f.render_widget(
            Paragraph::new(bar.label.clone())
                .alignment(Alignment::Center)
                .style(Style::default().fg(color).add_modifier(Modifier::BOLD)),
            label_area,
        );
        f.render_widget(
            Paragraph::new(bar.kind.label()).alignment(Alignment::Center),
            kind_area,
        );
    }
}

fn render_status_bar(f: &mut Frame, area: Rect, app: &App) {
    let selected = app.state.selected().map(|i| i + 1).unwrap_or(0);
    let total = app.controller.transactions().len();

    let key = |k: &'static str| Span::styled(k, Style::default().fg(Color::Yellow));

    let mut spans = vec![
        Span::styled(
            format!(" Row: {}/{} ", selected, total),
            Style::default().fg(Color::Cyan),
        ),
        Span::raw(" | "),
    ];

    match app.focus {
        Focus::Table => spans.extend([
            key("Enter"),
            Span::raw(" Select | "),
            key("Tab"),
            Span::raw(" Form | "),
            key("d"),
            Span::raw(" Delete | "),
            key("c"),
            Span::raw(" Clear | "),
            key("r"),
            Span::raw(" Report | "),
            Span::styled("q", Style::default().fg(Color::Red)),
            Span::raw(" Quit"),
        ]),
        Focus::Form(field) => {
            spans.extend([
                key("Enter"),
                Span::raw(format!(" {} | ", app.controller.mode().primary_label())),
                key("Tab"),
                Span::raw(" Next field | "),
            ]);
            match field {
                FormField::Kind => spans.extend([key("Space"), Span::raw(" Toggle | ")]),
                FormField::Date => spans.extend([
                    key("←/→"),
                    Span::raw(" Day | "),
                    key("[/]"),
                    Span::raw(" Month | "),
                    key("t"),
                    Span::raw(" Today | "),
                ]),
                FormField::Category | FormField::Amount => {}
            }
            spans.extend([
                key("Ctrl+N"),
                Span::raw(" Clear | "),
                key("Ctrl+D"),
                Span::raw(" Delete | "),
                key("Esc"),
                Span::raw(" Table"),
            ]);
        }
    }

    let status_bar = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White)),
    );

    f.render_widget(status_bar, area);
}

fn render_dialog(f: &mut Frame, dialog: &Dialog, palette: &Palette) {
    match dialog {
        Dialog::Message(notice) => {
            let color = match notice.level {
                Level::Info => palette.accent,
                Level::Warning => Color::Yellow,
                Level::Error => Color::Red,
            };
            let lines = vec![
                Line::from(""),
                Line::from(notice.message.clone()),
                Line::from(""),
                Line::from(Span::styled(
                    "Enter: OK",
                    Style::default()
                        .fg(Color::DarkGray)
                        .add_modifier(Modifier::ITALIC),
                )),
            ];
            render_popup(f, 50, 30, &notice.title, color, lines);
        }
        Dialog::ConfirmDelete { title, message, .. } => {
            let lines = vec![
                Line::from(""),
                Line::from(message.clone()),
                Line::from(""),
                Line::from(vec![
                    Span::styled("y", Style::default().fg(Color::Yellow)),
                    Span::raw(": Yes    "),
                    Span::styled("n", Style::default().fg(Color::Yellow)),
                    Span::raw(": No"),
                ]),
            ];
            render_popup(f, 50, 30, title, Color::Yellow, lines);
        }
        Dialog::Report(report) => {
            let input = |name: &str, value: &str, active: bool| {
                let style = if active {
                    Style::default()
                        .bg(palette.highlight)
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default().add_modifier(Modifier::UNDERLINED)
                };
                Line::from(vec![
                    Span::styled(format!("{:<14}", name), Style::default().fg(Color::Gray)),
                    Span::styled(format!(" {:<6}", value), style),
                ])
            };

            let mut lines = vec![
                input("Year:", &report.year, report.input == ReportInput::Year),
                input("Month (1-12):", &report.month, report.input == ReportInput::Month),
                Line::from(""),
                Line::from(vec![
                    Span::styled("Enter", Style::default().fg(Color::Yellow)),
                    Span::raw(": Show report  "),
                    Span::styled("Tab", Style::default().fg(Color::Yellow)),
                    Span::raw(": Switch  "),
                    Span::styled("Esc", Style::default().fg(Color::Yellow)),
                    Span::raw(": Close"),
                ]),
                Line::from(""),
            ];
            if let Some(output) = &report.output {
                lines.extend(output.lines().map(|l| Line::from(l.to_string())));
            }
            render_popup(f, 60, 70, "Monthly Report", palette.accent, lines);
        }
    }
}

fn render_popup(
    f: &mut Frame,
    percent_x: u16,
    percent_y: u16,
    title: &str,
    color: Color,
    lines: Vec<Line<'static>>,
) {
    let area = centered_rect(percent_x, percent_y, f.size());
    let popup = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(color))
                .title(format!(" {} ", title)),
        )
        .alignment(Alignment::Left)
        .wrap(Wrap { trim: false });

    f.render_widget(Clear, area);
    f.render_widget(popup, area);
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        let head: String = s.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{}...", head)
    }
}
