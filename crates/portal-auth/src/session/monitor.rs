//! Inactivity warning and token refresh state machine for a signed-in client.
//!
//! A client drives the monitor with its own clock: it reports user activity
//! through [`SessionMonitor::record_activity`], calls [`SessionMonitor::poll`]
//! on a tick, and performs whatever [`MonitorAction`]s come back. Three
//! deadlines are tracked:
//!
//! - **inactivity**: no activity for `inactivity_timeout` opens the warning
//! - **countdown**: the warning stays open for `countdown` before logout
//! - **refresh**: every `refresh_interval` the token is refreshed, but only
//!   if activity was seen since the previous refresh tick
//!
//! All three live in one value, so resetting one can never leave a stale
//! timer behind. `Logout` is emitted at most once per monitor.

use std::time::{Duration, Instant};

/// Timer lengths.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonitorSettings {
    /// Idle time before the warning opens.
    pub inactivity_timeout: Duration,
    /// How long the warning stays open before logout.
    pub countdown: Duration,
    /// Period of the background refresh tick.
    pub refresh_interval: Duration,
}

impl Default for MonitorSettings {
    fn default() -> Self {
        Self {
            inactivity_timeout: Duration::from_secs(4 * 60),
            countdown: Duration::from_secs(60),
            refresh_interval: Duration::from_secs(4 * 60),
        }
    }
}

/// Side effect the client must perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonitorAction {
    /// Open the "you will be logged out" warning.
    ShowWarning {
        /// Time left before automatic logout.
        remaining: Duration,
    },
    /// Close the warning.
    HideWarning,
    /// Call the refresh endpoint and report failure via
    /// [`SessionMonitor::refresh_failed`].
    RefreshToken,
    /// Clear local state and call the logout endpoint.
    Logout,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Active { idle_deadline: Instant },
    Warning { logout_deadline: Instant },
    LoggedOut,
}

/// Per-session monitor. One per signed-in client.
#[derive(Debug, Clone)]
pub struct SessionMonitor {
    settings: MonitorSettings,
    phase: Phase,
    active_since_refresh: bool,
    next_refresh: Instant,
}

impl SessionMonitor {
    /// Starts monitoring at `now`. Sign-in counts as activity.
    pub fn new(settings: MonitorSettings, now: Instant) -> Self {
        Self {
            settings,
            phase: Phase::Active {
                idle_deadline: now + settings.inactivity_timeout,
            },
            active_since_refresh: true,
            next_refresh: now + settings.refresh_interval,
        }
    }

    /// Returns `true` once `Logout` has been emitted.
    pub fn is_logged_out(&self) -> bool {
        self.phase == Phase::LoggedOut
    }

    /// Returns `true` while the warning is open.
    pub fn is_warning(&self) -> bool {
        matches!(self.phase, Phase::Warning { .. })
    }

    /// Whole seconds left on the countdown, rounded up, while the warning is open.
    pub fn countdown_seconds(&self, now: Instant) -> Option<u64> {
        match self.phase {
            Phase::Warning { logout_deadline } => {
                let left = logout_deadline.saturating_duration_since(now);
                Some(left.as_millis().div_ceil(1000) as u64)
            }
            _ => None,
        }
    }

    /// Mouse, keyboard, scroll, or touch input. Restarts the inactivity
    /// timer and closes an open warning.
    pub fn record_activity(&mut self, now: Instant) -> Vec<MonitorAction> {
        let mut actions = Vec::new();
        match self.phase {
            Phase::LoggedOut => return actions,
            Phase::Warning { .. } => actions.push(MonitorAction::HideWarning),
            Phase::Active { .. } => {}
        }
        self.active_since_refresh = true;
        self.phase = Phase::Active {
            idle_deadline: now + self.settings.inactivity_timeout,
        };
        actions
    }

    /// "Stay logged in" pressed on the warning. Closes it and requests an
    /// immediate refresh.
    pub fn stay_logged_in(&mut self, now: Instant) -> Vec<MonitorAction> {
        if self.is_logged_out() {
            return Vec::new();
        }
        let mut actions = self.record_activity(now);
        actions.push(MonitorAction::RefreshToken);
        actions
    }

    /// A refresh requested by the monitor failed. Forces logout.
    pub fn refresh_failed(&mut self) -> Vec<MonitorAction> {
        self.logout()
    }

    /// Explicit logout. Emits `Logout` unless already logged out.
    pub fn logout(&mut self) -> Vec<MonitorAction> {
        if self.is_logged_out() {
            return Vec::new();
        }
        self.phase = Phase::LoggedOut;
        vec![MonitorAction::Logout]
    }

    /// Advances all timers to `now`.
    pub fn poll(&mut self, now: Instant) -> Vec<MonitorAction> {
        let mut actions = Vec::new();

        if let Phase::Active { idle_deadline } = self.phase {
            if now >= idle_deadline {
                let logout_deadline = idle_deadline + self.settings.countdown;
                self.phase = Phase::Warning { logout_deadline };
                self.active_since_refresh = false;
                actions.push(MonitorAction::ShowWarning {
                    remaining: logout_deadline.saturating_duration_since(now),
                });
            }
        }

        if let Phase::Warning { logout_deadline } = self.phase {
            if now >= logout_deadline {
                actions.extend(self.logout());
                return actions;
            }
        }

        if self.is_logged_out() {
            return actions;
        }

        if now >= self.next_refresh {
            if self.active_since_refresh {
                actions.push(MonitorAction::RefreshToken);
            }
            self.active_since_refresh = false;
            while self.next_refresh <= now {
                self.next_refresh += self.settings.refresh_interval;
            }
        }

        actions
    }
}
