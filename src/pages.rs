// 🧭 Pages - navigation identifiers and static page text

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Page {
    #[default]
    Home,
    About,
    Contact,
    Privacy,
    Terms,
}

pub const CONTACT_EMAIL: &str = "info@voloview.com";
pub const CONTACT_PHONE: &str = "321-405-3122";
pub const CONTACT_ADDRESS: &str = "5000 W Midway Rd 13593, Ft. Pierce, FL 34979";

impl Page {
    pub const ALL: [Page; 5] = [Page::Home, Page::About, Page::Contact, Page::Privacy, Page::Terms];

    pub fn next(&self) -> Self {
        match self {
            Page::Home => Page::About,
            Page::About => Page::Contact,
            Page::Contact => Page::Privacy,
            Page::Privacy => Page::Terms,
            Page::Terms => Page::Home,
        }
    }

    pub fn previous(&self) -> Self {
        match self {
            Page::Home => Page::Terms,
            Page::About => Page::Home,
            Page::Contact => Page::About,
            Page::Privacy => Page::Contact,
            Page::Terms => Page::Privacy,
        }
    }

    pub fn id(&self) -> &'static str {
        match self {
            Page::Home => "home",
            Page::About => "about",
            Page::Contact => "contact",
            Page::Privacy => "privacy",
            Page::Terms => "terms",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Page::Home => "Calculator",
            Page::About => "About",
            Page::Contact => "Contact",
            Page::Privacy => "Privacy",
            Page::Terms => "Terms",
        }
    }

    /// Static body text. Empty for the calculator, which is rendered live.
    pub fn body(&self) -> Vec<String> {
        match self {
            Page::Home => Vec::new(),
            Page::About => vec![
                "SplitSmart divides a shared bill among friends, family, or colleagues.".to_string(),
                "Enter the bill, pick a tip, weight each person's share, and optionally let one person off the hook.".to_string(),
            ],
            Page::Contact => vec![
                format!("Email: {}", CONTACT_EMAIL),
                format!("Phone: {}", CONTACT_PHONE),
                format!("Address: {}", CONTACT_ADDRESS),
            ],
            Page::Privacy => vec![
                "Bills and names you enter stay in this session and are never stored.".to_string(),
                format!("Questions: {}", CONTACT_EMAIL),
            ],
            Page::Terms => vec![
                "SplitSmart is provided as-is, without warranties of any kind.".to_string(),
                "Amounts are rounded to cents for display and may differ by a cent in total.".to_string(),
                format!("Questions: {}", CONTACT_EMAIL),
            ],
        }
    }
}

impl FromStr for Page {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let id = s.trim().to_lowercase();
        Page::ALL
            .iter()
            .copied()
            .find(|p| p.id() == id)
            .ok_or_else(|| anyhow!("Unknown page: {}", s))
    }
}
