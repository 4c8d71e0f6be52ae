/// Login screen
///
/// Form state plus rendering. Submission itself (validation, delay, verify)
/// is driven by the app loop through `core::auth::attempt_login`.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::core::auth::LoginError;
use crate::utils::{
    mask_secret, APP_TITLE, LOGIN_KEYS, LOGIN_SUBTITLE, PASSWORD_PLACEHOLDER, REMEMBER_ME_LABEL,
    SIGNING_IN_LABEL, SIGN_IN_LABEL, USERNAME_PLACEHOLDER,
};
use crate::widgets::centered_rect;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoginField {
    #[default]
    Username,
    Password,
    Remember,
}

impl LoginField {
    pub fn next(&self) -> Self {
        match self {
            LoginField::Username => LoginField::Password,
            LoginField::Password => LoginField::Remember,
            LoginField::Remember => LoginField::Username,
        }
    }

    pub fn prev(&self) -> Self {
        match self {
            LoginField::Username => LoginField::Remember,
            LoginField::Password => LoginField::Username,
            LoginField::Remember => LoginField::Password,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
    pub show_password: bool,
    pub remember: bool,
    pub focus: LoginField,
    pub error: Option<String>,
    pub signing_in: bool,
}

impl LoginForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn focus_next(&mut self) {
        self.focus = self.focus.next();
    }

    pub fn focus_prev(&mut self) {
        self.focus = self.focus.prev();
    }

    /// Type into the focused field. Space on the checkbox toggles it.
    pub fn insert_char(&mut self, c: char) {
        if self.signing_in {
            return;
        }
        match self.focus {
            LoginField::Username => self.username.push(c),
            LoginField::Password => self.password.push(c),
            LoginField::Remember => {
                if c == ' ' {
                    self.toggle_remember();
                }
            }
        }
    }

    pub fn backspace(&mut self) {
        if self.signing_in {
            return;
        }
        match self.focus {
            LoginField::Username => {
                self.username.pop();
            }
            LoginField::Password => {
                self.password.pop();
            }
            LoginField::Remember => {}
        }
    }

    pub fn toggle_remember(&mut self) {
        self.remember = !self.remember;
    }

    pub fn toggle_show_password(&mut self) {
        self.show_password = !self.show_password;
    }

    /// Enter the signing-in state. False if a submission is already running.
    pub fn begin_submit(&mut self) -> bool {
        if self.signing_in {
            return false;
        }
        self.error = None;
        self.signing_in = true;
        true
    }

    pub fn fail(&mut self, error: &LoginError) {
        self.signing_in = false;
        self.error = Some(error.to_string());
    }

    fn password_text(&self) -> String {
        if self.show_password {
            self.password.clone()
        } else {
            mask_secret(&self.password)
        }
    }
}

pub struct LoginScreen;

impl LoginScreen {
    pub fn render(frame: &mut Frame, form: &LoginForm) {
        let area = centered_rect(60, 22, frame.size());
        frame.render_widget(Clear, area);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .title(Span::styled(
                format!(" {} ", APP_TITLE),
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            ))
            .title_alignment(Alignment::Center);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints([
                Constraint::Length(2), // subtitle
                Constraint::Length(2), // error
                Constraint::Length(3), // username
                Constraint::Length(3), // password
                Constraint::Length(2), // remember me
                Constraint::Length(1), // button
                Constraint::Min(0),    // key hints
            ])
            .split(inner);

        let subtitle = Paragraph::new(LOGIN_SUBTITLE)
            .style(Style::default().fg(Color::Gray))
            .alignment(Alignment::Center);
        frame.render_widget(subtitle, chunks[0]);

        if let Some(ref error) = form.error {
            let error_line = Paragraph::new(Span::styled(
                format!("✗ {}", error),
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            ))
            .alignment(Alignment::Center);
            frame.render_widget(error_line, chunks[1]);
        }

        Self::render_input(
            frame,
            chunks[2],
            "Username",
            &form.username,
            USERNAME_PLACEHOLDER,
            form.focus == LoginField::Username,
        );
        Self::render_input(
            frame,
            chunks[3],
            if form.show_password { "Password (visible)" } else { "Password" },
            &form.password_text(),
            PASSWORD_PLACEHOLDER,
            form.focus == LoginField::Password,
        );

        let checkbox = if form.remember { "[x]" } else { "[ ]" };
        let remember_style = if form.focus == LoginField::Remember {
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };
        let remember = Paragraph::new(Span::styled(
            format!("{} {}", checkbox, REMEMBER_ME_LABEL),
            remember_style,
        ));
        frame.render_widget(remember, chunks[4]);

        let button = if form.signing_in {
            Paragraph::new(Span::styled(
                SIGNING_IN_LABEL,
                Style::default().fg(Color::Gray).add_modifier(Modifier::ITALIC),
            ))
        } else {
            Paragraph::new(Span::styled(
                format!("[ {} ]", SIGN_IN_LABEL),
                Style::default().fg(Color::Black).bg(Color::Cyan).add_modifier(Modifier::BOLD),
            ))
        };
        frame.render_widget(button.alignment(Alignment::Center), chunks[5]);

        let hints: Vec<Span> = LOGIN_KEYS
            .iter()
            .flat_map(|(key, desc)| {
                vec![
                    Span::styled(format!("[{}] ", key), Style::default().fg(Color::Cyan)),
                    Span::styled(format!("{}  ", desc), Style::default().fg(Color::DarkGray)),
                ]
            })
            .collect();
        let hints = Paragraph::new(Line::from(hints))
            .alignment(Alignment::Center)
            .wrap(ratatui::widgets::Wrap { trim: true });
        frame.render_widget(hints, chunks[6]);
    }

    fn render_input(frame: &mut Frame, area: Rect, label: &str, value: &str, placeholder: &str, focused: bool) {
        let border_color = if focused { Color::Yellow } else { Color::DarkGray };

        let content = if value.is_empty() {
            Span::styled(placeholder.to_string(), Style::default().fg(Color::DarkGray))
        } else if focused {
            Span::styled(format!("{}_", value), Style::default().fg(Color::White))
        } else {
            Span::styled(value.to_string(), Style::default().fg(Color::White))
        };

        let input = Paragraph::new(content).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(border_color))
                .title(format!(" {} ", label)),
        );
        frame.render_widget(input, area);
    }
}
