//! The shell's screen flow as an explicit state machine. The engine never
//! depends on this; it exists so session commands share one notion of
//! "where the user is" instead of ad-hoc flags.

/// The named screens of the shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Login,
    BidderHome,
    ContactHome,
    AdminHome,
}

/// Events driving screen transitions.
#[derive(Debug, Clone, Copy)]
pub enum Event {
    BidderAuthenticated,
    ContactAuthenticated,
    AdminAuthenticated,
    LoggedOut,
}

impl Screen {
    /// Applies a transition event. Events with no transition defined for
    /// the current screen leave it unchanged.
    pub fn apply(self, event: Event) -> Screen {
        match (self, event) {
            (Screen::Login, Event::BidderAuthenticated) => Screen::BidderHome,
            (Screen::Login, Event::ContactAuthenticated) => Screen::ContactHome,
            (Screen::Login, Event::AdminAuthenticated) => Screen::AdminHome,
            (_, Event::LoggedOut) => Screen::Login,
            (screen, _) => screen,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn authentication_routes_by_role() {
        assert_eq!(
            Screen::Login.apply(Event::BidderAuthenticated),
            Screen::BidderHome
        );
        assert_eq!(
            Screen::Login.apply(Event::ContactAuthenticated),
            Screen::ContactHome
        );
        assert_eq!(
            Screen::Login.apply(Event::AdminAuthenticated),
            Screen::AdminHome
        );
    }

    #[test]
    fn logout_always_returns_to_login() {
        assert_eq!(Screen::AdminHome.apply(Event::LoggedOut), Screen::Login);
        assert_eq!(Screen::BidderHome.apply(Event::LoggedOut), Screen::Login);
    }

    #[test]
    fn undefined_transitions_keep_the_screen() {
        assert_eq!(
            Screen::BidderHome.apply(Event::AdminAuthenticated),
            Screen::BidderHome
        );
    }
}
