//! Pages and their header/body/footer sections

use super::component::Component;
use serde::{Deserialize, Serialize};

/// One of the three regions of a page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Section {
    Header,
    Body,
    Footer,
}

impl Section {
    pub const ALL: [Section; 3] = [Section::Header, Section::Body, Section::Footer];
}

impl std::fmt::Display for Section {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Section::Header => write!(f, "header"),
            Section::Body => write!(f, "body"),
            Section::Footer => write!(f, "footer"),
        }
    }
}

impl std::str::FromStr for Section {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "header" => Ok(Section::Header),
            "body" => Ok(Section::Body),
            "footer" => Ok(Section::Footer),
            _ => Err(format!("unknown section '{}'", s)),
        }
    }
}

/// The three component lists of a page, without page identity
///
/// List order is paint order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PageContent {
    #[serde(default)]
    pub header: Vec<Component>,
    #[serde(default)]
    pub body: Vec<Component>,
    #[serde(default)]
    pub footer: Vec<Component>,
}

impl PageContent {
    pub fn section(&self, section: Section) -> &Vec<Component> {
        match section {
            Section::Header => &self.header,
            Section::Body => &self.body,
            Section::Footer => &self.footer,
        }
    }

    pub fn section_mut(&mut self, section: Section) -> &mut Vec<Component> {
        match section {
            Section::Header => &mut self.header,
            Section::Body => &mut self.body,
            Section::Footer => &mut self.footer,
        }
    }

    /// Iterate every component, header first
    pub fn components(&self) -> impl Iterator<Item = &Component> {
        self.header.iter().chain(&self.body).chain(&self.footer)
    }

    pub fn component_count(&self) -> usize {
        self.header.len() + self.body.len() + self.footer.len()
    }

    /// Find a component by id in any section
    pub fn find(&self, id: &str) -> Option<(Section, &Component)> {
        Section::ALL.into_iter().find_map(|section| {
            self.section(section)
                .iter()
                .find(|c| c.id == id)
                .map(|c| (section, c))
        })
    }

    pub fn find_mut(&mut self, id: &str) -> Option<&mut Component> {
        let PageContent {
            header,
            body,
            footer,
        } = self;
        header
            .iter_mut()
            .chain(body.iter_mut())
            .chain(footer.iter_mut())
            .find(|c| c.id == id)
    }

    /// Copy of the content without generated components
    pub fn user_content(&self) -> PageContent {
        let keep = |list: &[Component]| -> Vec<Component> {
            list.iter().filter(|c| !c.is_generated).cloned().collect()
        };
        PageContent {
            header: keep(&self.header),
            body: keep(&self.body),
            footer: keep(&self.footer),
        }
    }

    /// Remove a component by id from whichever section holds it
    pub fn remove(&mut self, id: &str) -> Option<Component> {
        Section::ALL.into_iter().find_map(|section| {
            let list = self.section_mut(section);
            let index = list.iter().position(|c| c.id == id)?;
            Some(list.remove(index))
        })
    }
}

/// One printable page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page {
    pub id: String,
    pub name: String,
    #[serde(flatten)]
    pub content: PageContent,
}

impl Page {
    /// A page with no components
    pub fn blank(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            content: PageContent::default(),
        }
    }

    /// A page holding a copy of `content`
    pub fn from_content(
        id: impl Into<String>,
        name: impl Into<String>,
        content: &PageContent,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            content: content.clone(),
        }
    }
}
