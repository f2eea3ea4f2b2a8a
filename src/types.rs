//! Core data types for pulseboard
//!
//! Navigation enums and the static content of the About page.

/// Top-level pages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Page {
    #[default]
    Index,
    About,
}

impl Page {
    pub fn label(&self) -> &'static str {
        match self {
            Page::Index => "Index",
            Page::About => "About",
        }
    }

    pub fn other(&self) -> Self {
        match self {
            Page::Index => Page::About,
            Page::About => Page::Index,
        }
    }
}

/// Tabs of the index page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Dashboard,
    Analytics,
    Settings,
}

impl Tab {
    pub fn all() -> &'static [Tab] {
        &[Tab::Dashboard, Tab::Analytics, Tab::Settings]
    }

    pub fn index(&self) -> usize {
        match self {
            Tab::Dashboard => 0,
            Tab::Analytics => 1,
            Tab::Settings => 2,
        }
    }

    pub fn from_index(idx: usize) -> Self {
        match idx {
            0 => Tab::Dashboard,
            1 => Tab::Analytics,
            2 => Tab::Settings,
            _ => Tab::Dashboard,
        }
    }

    pub fn next(&self) -> Self {
        Self::from_index((self.index() + 1) % Self::all().len())
    }

    pub fn label(&self) -> &'static str {
        match self {
            Tab::Dashboard => "Dashboard",
            Tab::Analytics => "Analytics",
            Tab::Settings => "Settings",
        }
    }
}

/// A person listed on the About page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TeamMember {
    pub name: &'static str,
    pub role: &'static str,
}

pub const MISSION: &str =
    "We strive to create innovative solutions that make a positive impact on people's lives.";

pub const TEAM: &[TeamMember] = &[
    TeamMember { name: "John Doe", role: "Founder & CEO" },
    TeamMember { name: "Jane Smith", role: "CTO" },
    TeamMember { name: "Mike Johnson", role: "Lead Developer" },
    TeamMember { name: "Sarah Brown", role: "UX Designer" },
];
