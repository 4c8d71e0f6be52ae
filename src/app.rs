/// Main TUI application

use anyhow::Result;
use chrono::Utc;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Frame, Terminal};
use std::io;
use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::task::JoinHandle;

use crate::core::auth::{attempt_login, Authenticator, ConfiguredAuthenticator, LoginError};
use crate::core::dashboard::DashboardState;
use crate::core::metrics::RandomSampleSource;
use crate::core::session::{resolve_route, FileSessionStore, Route, Session};
use crate::core::ticker::{TickUpdate, TickerHandle};
use crate::core::toast::ToastQueue;
use crate::screens::{DashboardScreen, DashboardView, LoginForm, LoginScreen};
use crate::utils::AppConfig;

const POLL_INTERVAL: Duration = Duration::from_millis(100);

pub struct App {
    config: AppConfig,
    session: Session,
    authenticator: Arc<dyn Authenticator>,
    route: Route,
    login: LoginForm,
    pending_login: Option<JoinHandle<Result<String, LoginError>>>,
    dashboard: Option<DashboardState>,
    ticker: Option<TickerHandle>,
    // Used for manual refresh; the ticker owns its own source
    sampler: RandomSampleSource,
    toasts: ToastQueue,
    refresh_interval: Duration,
    login_delay: Duration,
    search_mode: bool,
    show_help: bool,
    should_quit: bool,
}

impl App {
    /// Build the app from config, with the session flag stored in `data_dir`
    pub fn new(config: AppConfig, data_dir: &Path) -> Result<Self> {
        let session = Session::init(Box::new(FileSessionStore::in_dir(data_dir)), Utc::now());
        let authenticator: Arc<dyn Authenticator> = Arc::new(ConfiguredAuthenticator::new(&config.auth));
        Self::with_parts(config, session, authenticator)
    }

    pub fn with_parts(config: AppConfig, session: Session, authenticator: Arc<dyn Authenticator>) -> Result<Self> {
        let refresh_interval = config.refresh_every()?;
        let login_delay = config.login_wait()?;
        let toasts = ToastQueue::new(config.toast_for()?);

        Ok(Self {
            config,
            session,
            authenticator,
            route: Route::Login,
            login: LoginForm::new(),
            pending_login: None,
            dashboard: None,
            ticker: None,
            sampler: RandomSampleSource::new(),
            toasts,
            refresh_interval,
            login_delay,
            search_mode: false,
            show_help: false,
            should_quit: false,
        })
    }

    pub fn route(&self) -> Route {
        self.route
    }

    pub async fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        // The landing route is the dashboard; the guard decides
        self.navigate(Route::Dashboard);

        let result = self.run_loop(&mut terminal).await;

        self.shutdown();

        // Restore terminal
        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        result
    }

    async fn run_loop<B: ratatui::backend::Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        loop {
            self.pump().await;

            terminal.draw(|f| self.render(f))?;

            if event::poll(POLL_INTERVAL)? {
                if let Event::Key(key_event) = event::read()? {
                    self.handle_key(key_event);
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    /// Non-blocking housekeeping between frames
    async fn pump(&mut self) {
        self.poll_login().await;

        // Only the newest tick matters
        if let (Some(ticker), Some(dashboard)) = (self.ticker.as_mut(), self.dashboard.as_mut()) {
            if let Some(update) = ticker.latest() {
                dashboard.apply(update, &mut self.toasts);
            }
        }

        self.toasts.prune(Instant::now());
    }

    fn render(&self, frame: &mut Frame) {
        match (self.route, self.dashboard.as_ref()) {
            (Route::Dashboard, Some(state)) => {
                let view = DashboardView {
                    user: self.session.user(),
                    search_mode: self.search_mode,
                    show_help: self.show_help,
                };
                DashboardScreen::render(frame, state, &self.toasts, view);
            }
            _ => LoginScreen::render(frame, &self.login),
        }
    }

    /// Go to `requested`, subject to the session guard
    fn navigate(&mut self, requested: Route) {
        self.route = resolve_route(requested, &self.session);
        if self.route == Route::Dashboard {
            self.enter_dashboard();
        }
    }

    fn enter_dashboard(&mut self) {
        if self.dashboard.is_none() {
            let initial = TickUpdate::generate(&mut self.sampler);
            self.dashboard = Some(DashboardState::new(self.config.thresholds.clone(), initial));
        }
        if self.ticker.is_none() {
            self.ticker = Some(TickerHandle::spawn(RandomSampleSource::new(), self.refresh_interval));
        }
    }

    fn stop_ticker(&mut self) {
        if let Some(ticker) = self.ticker.take() {
            ticker.cancel();
        }
    }

    fn shutdown(&mut self) {
        self.stop_ticker();
        if let Some(handle) = self.pending_login.take() {
            handle.abort();
        }
    }

    fn submit_login(&mut self) {
        if !self.login.begin_submit() {
            return;
        }

        let authenticator = Arc::clone(&self.authenticator);
        let username = self.login.username.clone();
        let password = self.login.password.clone();
        let delay = self.login_delay;

        self.pending_login = Some(tokio::spawn(async move {
            attempt_login(authenticator.as_ref(), &username, &password, delay).await
        }));
    }

    async fn poll_login(&mut self) {
        let finished = self.pending_login.as_ref().map_or(false, |h| h.is_finished());
        if !finished {
            return;
        }

        if let Some(handle) = self.pending_login.take() {
            match handle.await {
                Ok(Ok(user)) => self.complete_login(&user),
                Ok(Err(e)) => self.login.fail(&e),
                Err(e) => {
                    tracing::error!("login task failed: {}", e);
                    self.login.signing_in = false;
                    self.login.error = Some("Sign-in was interrupted, please try again".to_string());
                }
            }
        }
    }

    fn complete_login(&mut self, user: &str) {
        if let Err(e) = self.session.establish(user, self.login.remember, Utc::now()) {
            tracing::warn!("failed to persist session: {}", e);
        }
        self.login = LoginForm::new();
        self.navigate(Route::Dashboard);
    }

    fn logout(&mut self) {
        self.stop_ticker();
        self.dashboard = None;
        self.toasts.clear();
        self.search_mode = false;
        self.show_help = false;

        if let Err(e) = self.session.teardown() {
            tracing::warn!("failed to clear session: {}", e);
        }
        tracing::info!("logged out");

        self.navigate(Route::Login);
    }

    /// Reopen the view with a fresh sample and restart the tick schedule
    fn refresh_now(&mut self) {
        let Some(dashboard) = self.dashboard.as_mut() else {
            return;
        };
        dashboard.reload(TickUpdate::generate(&mut self.sampler));

        self.stop_ticker();
        self.ticker = Some(TickerHandle::spawn(RandomSampleSource::new(), self.refresh_interval));
        tracing::debug!("manual refresh");
    }

    fn handle_key(&mut self, key_event: KeyEvent) {
        if key_event.kind != KeyEventKind::Press {
            return;
        }

        if key_event.modifiers.contains(KeyModifiers::CONTROL) && key_event.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }

        match self.route {
            Route::Login => self.handle_login_key(key_event.code),
            Route::Dashboard => self.handle_dashboard_key(key_event.code),
        }
    }

    fn handle_login_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Esc => self.should_quit = true,
            KeyCode::Tab | KeyCode::Down => self.login.focus_next(),
            KeyCode::BackTab | KeyCode::Up => self.login.focus_prev(),
            KeyCode::F(2) => self.login.toggle_show_password(),
            KeyCode::Enter => self.submit_login(),
            KeyCode::Backspace => self.login.backspace(),
            KeyCode::Char(c) => self.login.insert_char(c),
            _ => {}
        }
    }

    fn handle_dashboard_key(&mut self, key: KeyCode) {
        if self.search_mode {
            self.handle_search_key(key);
            return;
        }

        if self.show_help {
            if matches!(key, KeyCode::Esc | KeyCode::Char('?') | KeyCode::F(1)) {
                self.show_help = false;
            }
            return;
        }

        let Some(dashboard) = self.dashboard.as_mut() else {
            return;
        };

        match key {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Char('?') | KeyCode::F(1) => self.show_help = true,
            KeyCode::Char('/') => self.search_mode = true,
            KeyCode::Char('s') => dashboard.cycle_status_filter(),
            KeyCode::Char('t') => dashboard.cycle_threshold_filter(),
            KeyCode::Char('c') => dashboard.clear_filters(),
            KeyCode::Up | KeyCode::Char('k') => dashboard.select_prev(),
            KeyCode::Down | KeyCode::Char('j') => dashboard.select_next(),
            KeyCode::Char('r') => self.refresh_now(),
            KeyCode::Char('l') => self.logout(),
            _ => {}
        }
    }

    /// Search filters live as the user types
    fn handle_search_key(&mut self, key: KeyCode) {
        let Some(dashboard) = self.dashboard.as_mut() else {
            self.search_mode = false;
            return;
        };

        match key {
            KeyCode::Enter => self.search_mode = false,
            KeyCode::Esc => {
                dashboard.set_search(String::new());
                self.search_mode = false;
            }
            KeyCode::Backspace => {
                let mut search = dashboard.search.clone();
                search.pop();
                dashboard.set_search(search);
            }
            KeyCode::Char(c) => {
                let mut search = dashboard.search.clone();
                search.push(c);
                dashboard.set_search(search);
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::auth::{AuthOutcome, MockAuthenticator};
    use crate::core::metrics::{FixedSampleSource, MetricSample};
    use crate::core::processes::{ProcessStatus, StatusFilter};
    use crate::core::session::{PersistedSession, SessionStore, SESSION_FILE};
    use chrono::Duration as ChronoDuration;
    use tempfile::TempDir;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            app.handle_key(key(KeyCode::Char(c)));
        }
    }

    fn test_config() -> AppConfig {
        AppConfig {
            login_delay: "0s".to_string(),
            ..AppConfig::default()
        }
    }

    fn app_with(dir: &TempDir, outcome: AuthOutcome) -> App {
        let mut mock = MockAuthenticator::new();
        mock.expect_verify().returning(move |_| outcome);
        let session = Session::init(Box::new(FileSessionStore::in_dir(dir.path())), Utc::now());
        App::with_parts(test_config(), session, Arc::new(mock)).unwrap()
    }

    async fn settle_login(app: &mut App) {
        for _ in 0..100 {
            app.pump().await;
            if app.pending_login.is_none() {
                return;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        panic!("login never completed");
    }

    async fn sign_in(app: &mut App, remember: bool) {
        type_text(app, "admin@innaesim.com");
        app.handle_key(key(KeyCode::Tab));
        type_text(app, "admin");
        if remember {
            app.login.toggle_remember();
        }
        app.handle_key(key(KeyCode::Enter));
        settle_login(app).await;
    }

    #[tokio::test]
    async fn test_unauthenticated_lands_on_login() {
        let dir = TempDir::new().unwrap();
        let mut app = app_with(&dir, AuthOutcome::Success);

        app.navigate(Route::Dashboard);

        assert_eq!(app.route(), Route::Login);
        assert!(app.ticker.is_none());
        assert!(app.dashboard.is_none());
    }

    #[tokio::test]
    async fn test_login_opens_dashboard_and_starts_ticker() {
        let dir = TempDir::new().unwrap();
        let mut app = app_with(&dir, AuthOutcome::Success);

        sign_in(&mut app, true).await;

        assert_eq!(app.route(), Route::Dashboard);
        assert!(app.session.is_authenticated());
        assert_eq!(app.session.user(), Some("admin@innaesim.com"));
        assert!(app.ticker.as_ref().map_or(false, |t| t.is_running()));
        assert!(app.dashboard.is_some());
        assert!(dir.path().join(SESSION_FILE).exists());
        assert!(app.login.username.is_empty());
    }

    #[tokio::test]
    async fn test_login_without_remember_still_sets_flag() {
        let dir = TempDir::new().unwrap();
        let mut app = app_with(&dir, AuthOutcome::Success);

        sign_in(&mut app, false).await;

        assert_eq!(app.route(), Route::Dashboard);
        assert!(dir.path().join(SESSION_FILE).exists());

        let restarted = Session::init(Box::new(FileSessionStore::in_dir(dir.path())), Utc::now());
        assert!(restarted.is_authenticated());
        assert_eq!(restarted.user(), Some("admin@innaesim.com"));
        app.shutdown();
    }

    #[tokio::test]
    async fn test_rejected_login_shows_error() {
        let dir = TempDir::new().unwrap();
        let mut app = app_with(&dir, AuthOutcome::Failure);

        sign_in(&mut app, false).await;

        assert_eq!(app.route(), Route::Login);
        assert!(!app.login.signing_in);
        assert_eq!(app.login.error.as_deref(), Some("Invalid credentials."));
        assert!(app.ticker.is_none());
    }

    #[tokio::test]
    async fn test_empty_fields_rejected_before_verify() {
        let dir = TempDir::new().unwrap();
        let mut mock = MockAuthenticator::new();
        mock.expect_verify().never();
        let session = Session::init(Box::new(FileSessionStore::in_dir(dir.path())), Utc::now());
        let mut app = App::with_parts(test_config(), session, Arc::new(mock)).unwrap();

        app.handle_key(key(KeyCode::Enter));
        settle_login(&mut app).await;

        assert_eq!(app.login.error.as_deref(), Some("Please fill in all fields"));
        assert_eq!(app.route(), Route::Login);
    }

    #[tokio::test]
    async fn test_logout_stops_ticker_and_clears_session() {
        let dir = TempDir::new().unwrap();
        let mut app = app_with(&dir, AuthOutcome::Success);
        sign_in(&mut app, true).await;

        app.handle_key(key(KeyCode::Char('l')));

        assert_eq!(app.route(), Route::Login);
        assert!(app.ticker.is_none());
        assert!(app.dashboard.is_none());
        assert!(!app.session.is_authenticated());
        assert!(!dir.path().join(SESSION_FILE).exists());

        // Guard holds after logout
        app.navigate(Route::Dashboard);
        assert_eq!(app.route(), Route::Login);
    }

    #[tokio::test]
    async fn test_remembered_session_skips_login() {
        let dir = TempDir::new().unwrap();
        FileSessionStore::in_dir(dir.path())
            .save(&PersistedSession {
                authenticated: true,
                user: Some("admin@innaesim.com".to_string()),
                expires_at: Some(Utc::now() + ChronoDuration::days(3)),
            })
            .unwrap();

        let mut app = app_with(&dir, AuthOutcome::Failure);
        app.navigate(Route::Dashboard);

        assert_eq!(app.route(), Route::Dashboard);
        assert!(app.ticker.is_some());
        app.shutdown();
        assert!(app.ticker.is_none());
    }

    #[tokio::test]
    async fn test_dashboard_keys() {
        let dir = TempDir::new().unwrap();
        let mut app = app_with(&dir, AuthOutcome::Success);
        sign_in(&mut app, false).await;

        app.handle_key(key(KeyCode::Char('/')));
        assert!(app.search_mode);
        type_text(&mut app, "dock");
        app.handle_key(key(KeyCode::Backspace));
        app.handle_key(key(KeyCode::Enter));
        assert!(!app.search_mode);

        let dashboard = app.dashboard.as_ref().unwrap();
        assert_eq!(dashboard.search, "doc");
        assert_eq!(dashboard.visible_processes().len(), 1);

        app.handle_key(key(KeyCode::Char('s')));
        assert_eq!(
            app.dashboard.as_ref().unwrap().status_filter,
            StatusFilter::Only(ProcessStatus::Running)
        );

        app.handle_key(key(KeyCode::Char('c')));
        let dashboard = app.dashboard.as_ref().unwrap();
        assert!(dashboard.search.is_empty());
        assert_eq!(dashboard.status_filter, StatusFilter::All);

        app.handle_key(key(KeyCode::Char('?')));
        assert!(app.show_help);
        app.handle_key(key(KeyCode::Char('q')));
        assert!(!app.should_quit);
        app.handle_key(key(KeyCode::Esc));
        assert!(!app.show_help);

        app.handle_key(key(KeyCode::Char('q')));
        assert!(app.should_quit);
    }

    #[tokio::test]
    async fn test_search_escape_clears_query() {
        let dir = TempDir::new().unwrap();
        let mut app = app_with(&dir, AuthOutcome::Success);
        sign_in(&mut app, false).await;

        app.handle_key(key(KeyCode::Char('/')));
        type_text(&mut app, "nginx");
        app.handle_key(key(KeyCode::Esc));

        assert!(!app.search_mode);
        assert!(app.dashboard.as_ref().unwrap().search.is_empty());
        assert!(!app.should_quit);
    }

    #[tokio::test]
    async fn test_manual_refresh_updates_timestamp() {
        let dir = TempDir::new().unwrap();
        let mut app = app_with(&dir, AuthOutcome::Success);
        sign_in(&mut app, false).await;

        let before = app.dashboard.as_ref().unwrap().last_update();
        tokio::time::sleep(Duration::from_millis(10)).await;
        app.handle_key(key(KeyCode::Char('r')));

        assert!(app.dashboard.as_ref().unwrap().last_update() > before);
    }

    #[tokio::test(start_paused = true)]
    async fn test_manual_refresh_clears_alerts_and_restarts_ticker() {
        let dir = TempDir::new().unwrap();
        let mut app = app_with(&dir, AuthOutcome::Success);
        sign_in(&mut app, false).await;

        let hot = TickUpdate::generate(&mut FixedSampleSource::new(MetricSample::new(90.0, 90.0, 10.0, 10.0)));
        app.dashboard.as_mut().unwrap().apply(hot, &mut app.toasts);
        assert_eq!(app.dashboard.as_ref().unwrap().alerts().len(), 2);
        let toasts_before = app.toasts.len();

        // Most of a period elapses before the refresh
        tokio::time::sleep(Duration::from_secs(5)).await;
        for _ in 0..50 {
            app.handle_key(key(KeyCode::Char('r')));
            assert!(app.dashboard.as_ref().unwrap().alerts().is_empty());
        }
        assert_eq!(app.toasts.len(), toasts_before);

        // The old schedule would have ticked at 7s; the new one waits a full period
        tokio::time::sleep(Duration::from_secs(3)).await;
        tokio::task::yield_now().await;
        assert!(app.ticker.as_mut().unwrap().try_next().is_none());
        assert!(app.ticker.as_ref().unwrap().is_running());

        app.shutdown();
    }
}
