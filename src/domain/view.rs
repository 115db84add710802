use serde::{Deserialize, Serialize};

/// Pages reachable from the navigation bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum View {
    Home,
    About,
    Booking,
}

impl View {
    pub const ALL: [View; 3] = [View::Home, View::About, View::Booking];

    pub fn from_path(path: &str) -> Option<Self> {
        let trimmed = path.trim();
        let normalized = if trimmed.len() > 1 {
            trimmed.trim_end_matches('/')
        } else {
            trimmed
        };

        match normalized {
            "/" | "" => Some(View::Home),
            "/about" => Some(View::About),
            "/prenota" | "/booking" => Some(View::Booking),
            _ => None,
        }
    }

    pub fn path(&self) -> &'static str {
        match self {
            View::Home => "/",
            View::About => "/about",
            View::Booking => "/prenota",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            View::Home => "Book your spot in seconds",
            View::About => "About us",
            View::Booking => "Book your slot",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_path() {
        assert_eq!(View::from_path("/"), Some(View::Home));
        assert_eq!(View::from_path("/about/"), Some(View::About));
        assert_eq!(View::from_path("/prenota"), Some(View::Booking));
        assert_eq!(View::from_path("/booking"), Some(View::Booking));
        assert_eq!(View::from_path("/checkout"), None);
    }

    #[test]
    fn test_path_resolves_back_to_view() {
        for view in View::ALL {
            assert_eq!(View::from_path(view.path()), Some(view));
        }
    }
}
