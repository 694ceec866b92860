use crossterm::event::{KeyCode, KeyEvent};
use murmur_core::VerificationSubmission;
use murmur_service::BlockingHttpService;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use crate::verify::{FormState, Navigator, Route, Toast, ToastKind, VerifyForm};

const ACCENT: Color = Color::Rgb(0x8a, 0x2b, 0xe2);

pub struct App {
    service: BlockingHttpService,
    nav: Navigator,
    form: VerifyForm,
    /// Request accepted by the form but not yet sent. The event loop draws
    /// the `Submitting` frame, then calls `perform_submit`.
    pending: Option<VerificationSubmission>,
    should_quit: bool,
}

impl App {
    pub fn new(service: BlockingHttpService, username: &str) -> Self {
        Self {
            service,
            nav: Navigator::new(Route::Verify {
                username: username.to_string(),
            }),
            form: VerifyForm::new(username),
            pending: None,
            should_quit: false,
        }
    }

    pub fn route(&self) -> &Route {
        self.nav.current()
    }

    pub fn navigator(&self) -> &Navigator {
        &self.nav
    }

    pub fn form(&self) -> &VerifyForm {
        &self.form
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// True while keystrokes go to the code field.
    pub fn is_input_mode(&self) -> bool {
        matches!(self.route(), Route::Verify { .. }) && self.form.is_editable()
    }

    pub fn needs_submit(&self) -> bool {
        self.pending.is_some()
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        let on_verify_page = matches!(self.route(), Route::Verify { .. });
        if on_verify_page {
            match key.code {
                KeyCode::Esc => self.should_quit = true,
                KeyCode::Enter => {
                    if let Some(submission) = self.form.begin_submit() {
                        self.pending = Some(submission);
                    }
                }
                KeyCode::Backspace => self.form.backspace(),
                KeyCode::Char(c) => self.form.push_char(c),
                _ => {}
            }
        } else if matches!(
            key.code,
            KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q')
        ) {
            self.should_quit = true;
        }
    }

    /// Send the pending verification and resolve the form with the result.
    pub fn perform_submit(&mut self) {
        if let Some(submission) = self.pending.take() {
            let result = self.service.verify_code(&submission);
            self.form.finish_submit(result, &mut self.nav);
        }
    }

    pub fn render(&self, frame: &mut Frame) {
        let area = frame.area();

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Min(0),
                Constraint::Length(1),
            ])
            .split(area);

        self.render_title_bar(frame, layout[0]);
        match self.route() {
            Route::Verify { .. } => self.render_verify_page(frame, layout[1]),
            Route::SignIn => self.render_sign_in_page(frame, layout[1]),
        }
        self.render_status_bar(frame, layout[2]);
    }

    fn render_title_bar(&self, frame: &mut Frame, area: Rect) {
        let title = Line::from(vec![
            Span::styled(" murmur ", Style::default().bold().fg(ACCENT)),
            Span::raw("| "),
            Span::styled(self.route().path(), Style::default().fg(Color::DarkGray)),
        ]);
        frame.render_widget(title, area);
    }

    fn render_verify_page(&self, frame: &mut Frame, area: Rect) {
        let popup = centered_rect(60, 60, area);
        frame.render_widget(Clear, popup);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(ACCENT));
        let inner = block.inner(popup);
        frame.render_widget(block, popup);

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2),
                Constraint::Length(2),
                Constraint::Length(3),
                Constraint::Length(1),
                Constraint::Min(0),
            ])
            .split(inner);

        let heading = Paragraph::new(Line::from(Span::styled(
            "Verify your account",
            Style::default().bold().fg(ACCENT),
        )))
        .alignment(Alignment::Center);
        frame.render_widget(heading, rows[0]);

        let prompt = Paragraph::new("Enter the verification code sent to your email")
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });
        frame.render_widget(prompt, rows[1]);

        let input_title = match self.form.state() {
            FormState::Submitting => " Verification Code (submitting...) ",
            _ => " Verification Code ",
        };
        let input = if self.form.code().is_empty() {
            Paragraph::new(Span::styled("code", Style::default().fg(Color::DarkGray)))
        } else {
            Paragraph::new(self.form.code())
        };
        let input = input.block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan))
                .title(input_title),
        );
        frame.render_widget(input, rows[2]);

        let button = Paragraph::new(Line::from(Span::styled(
            " Submit code ",
            Style::default().fg(Color::White).bg(ACCENT),
        )))
        .alignment(Alignment::Center);
        frame.render_widget(button, rows[3]);
    }

    fn render_sign_in_page(&self, frame: &mut Frame, area: Rect) {
        let popup = centered_rect(50, 40, area);
        frame.render_widget(Clear, popup);
        let block = Block::default()
            .title(" Sign in ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(ACCENT));
        let text = Paragraph::new("Your account is verified. Sign in to continue.")
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(block);
        frame.render_widget(text, popup);
    }

    fn render_status_bar(&self, frame: &mut Frame, area: Rect) {
        if let Some(toast) = self.form.last_toast() {
            frame.render_widget(toast_line(toast), area);
            return;
        }

        let hints: &[(&str, &str)] = match self.route() {
            Route::Verify { .. } => &[("Enter", "submit"), ("Esc", "quit")],
            Route::SignIn => &[("q", "quit")],
        };
        let mut spans = Vec::new();
        for (k, desc) in hints {
            spans.push(Span::styled(format!(" {k}"), Style::default().bold()));
            spans.push(Span::raw(format!(" {desc} ")));
        }
        frame.render_widget(Line::from(spans), area);
    }
}

fn toast_line(toast: &Toast) -> Line<'_> {
    let color = match toast.kind {
        ToastKind::Success => Color::Green,
        ToastKind::Error => Color::Red,
    };
    let mut spans = vec![Span::styled(
        format!(" {}", toast.title),
        Style::default().bold().fg(color),
    )];
    if let Some(ref description) = toast.description {
        spans.push(Span::styled(
            format!(": {description}"),
            Style::default().fg(color),
        ));
    }
    Line::from(spans)
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
