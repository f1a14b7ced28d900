use folio_render::{Rgb, Style};

/// What a piece of document text is, for styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    SectionTitle,
    Heading,
    Meta,
    Body,
    Bullet,
    Tag,
    Link,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    pub accent: Rgb,
    pub text: Rgb,
    pub muted: Rgb,
    pub tag_bg: Rgb,
    pub link: Rgb,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            accent: Rgb::new(0xF5, 0xA6, 0x23),
            text: Rgb::new(0xE6, 0xE6, 0xE6),
            muted: Rgb::new(0x8A, 0x8F, 0x98),
            tag_bg: Rgb::new(0x2B, 0x30, 0x3B),
            link: Rgb::new(0x5E, 0xB5, 0xF7),
        }
    }
}

impl Theme {
    #[must_use]
    pub fn role(&self, role: Role) -> Style {
        match role {
            Role::SectionTitle => Style::new().fg(self.accent).bold(),
            Role::Heading => Style::new().fg(self.text).bold(),
            Role::Meta => Style::new().fg(self.muted).italic(),
            Role::Body => Style::new().fg(self.text),
            Role::Bullet => Style::new().fg(self.accent),
            Role::Tag => Style::new().fg(self.text).bg(self.tag_bg),
            Role::Link => Style::new().fg(self.link).underline(),
        }
    }

    #[must_use]
    pub fn name(&self) -> Style {
        Style::new().fg(self.accent).bold()
    }

    #[must_use]
    pub fn subtitle(&self) -> Style {
        Style::new().fg(self.muted)
    }

    #[must_use]
    pub fn shortcut(&self) -> Style {
        Style::new().fg(self.link)
    }

    #[must_use]
    pub fn rule(&self) -> Style {
        Style::new().fg(self.muted).dim()
    }

    #[must_use]
    pub fn nav(&self) -> Style {
        Style::new().fg(self.muted)
    }

    #[must_use]
    pub fn nav_active(&self) -> Style {
        Style::new().fg(self.accent).bold()
    }

    #[must_use]
    pub fn marker(&self) -> Style {
        Style::new().fg(self.accent)
    }
}
