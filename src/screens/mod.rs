pub mod dashboard;
pub mod login;

// Two routes, one screen each:
// - Login: credentials form with remember-me
// - Dashboard: metric cards, alerts, charts and the process table
//
// Overlays (help, toasts) are drawn by the dashboard screen.

pub use dashboard::{DashboardScreen, DashboardView};
pub use login::{LoginField, LoginForm, LoginScreen};
