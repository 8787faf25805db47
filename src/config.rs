//! Page file loading: the markup contract.
//!
//! Everything the portfolio shows comes from a TOML page file: the profile,
//! the hero phrases, sections with their cards and images, the contact
//! recipient, and the footer. The controller attaches behavior to whatever
//! the file declares; a missing piece disables just that piece. A built-in
//! sample page keeps the binary runnable with no file at all.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Section id the hero block occupies when present.
pub const HERO_SECTION_ID: &str = "home";

/// Errors that make a page file unusable.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PageError {
    #[error("section id must not be empty")]
    EmptySectionId,
    #[error("duplicate section id: {0}")]
    DuplicateSectionId(String),
    #[error("contact recipient must not be empty")]
    EmptyRecipient,
}

/// Where a loaded page came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageSource {
    File(PathBuf),
    Builtin,
}

impl std::fmt::Display for PageSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PageSource::File(path) => write!(f, "{}", path.display()),
            PageSource::Builtin => write!(f, "built-in sample page"),
        }
    }
}

/// The whole page file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageFile {
    pub profile: Profile,
    #[serde(default)]
    pub hero: Option<Hero>,
    #[serde(default)]
    pub navbar: Option<NavbarConfig>,
    #[serde(default, rename = "section")]
    pub sections: Vec<SectionConfig>,
    #[serde(default)]
    pub contact: Option<ContactConfig>,
    #[serde(default)]
    pub footer: Option<FooterConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    pub name: String,
    #[serde(default)]
    pub tagline: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Hero {
    #[serde(default = "Hero::default_greeting")]
    pub greeting: String,
    #[serde(default = "Hero::default_prefix")]
    pub prefix: String,
    #[serde(default)]
    pub phrases: Vec<String>,
}

impl Hero {
    fn default_greeting() -> String {
        "Hi, I'm".to_string()
    }

    fn default_prefix() -> String {
        "I'm a ".to_string()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NavbarConfig {
    #[serde(default)]
    pub brand: Option<String>,
    #[serde(default, rename = "link")]
    pub links: Vec<NavLink>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NavLink {
    pub label: String,
    pub target: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SectionConfig {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub body: String,
    #[serde(default, rename = "card")]
    pub cards: Vec<CardConfig>,
    #[serde(default, rename = "image")]
    pub images: Vec<ImageConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CardConfig {
    pub title: String,
    #[serde(default)]
    pub lines: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageConfig {
    pub alt: String,
    /// Eagerly shown source, if any.
    #[serde(default)]
    pub source: Option<PathBuf>,
    /// Source promoted only once the image scrolls into view.
    #[serde(default)]
    pub deferred_source: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactConfig {
    pub recipient: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FooterConfig {
    #[serde(default)]
    pub text: String,
    #[serde(default, rename = "social")]
    pub socials: Vec<SocialLink>,
    #[serde(default = "FooterConfig::default_show_year")]
    pub show_year: bool,
}

impl FooterConfig {
    fn default_show_year() -> bool {
        true
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SocialLink {
    pub label: String,
    pub url: String,
}

impl PageFile {
    /// Load the page: an explicit path, else the default location, else the
    /// built-in sample.
    pub fn load(explicit: Option<&Path>) -> Result<(Self, PageSource)> {
        if let Some(path) = explicit {
            let page = Self::load_from(path)?;
            return Ok((page, PageSource::File(path.to_path_buf())));
        }
        if let Some(path) = Self::default_path() {
            if path.exists() {
                let page = Self::load_from(&path)?;
                return Ok((page, PageSource::File(path)));
            }
        }
        Ok((Self::default(), PageSource::Builtin))
    }

    /// Read and parse a specific page file.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read page file {}", path.display()))?;
        let page: PageFile = toml::from_str(&content)
            .with_context(|| format!("failed to parse page file {}", path.display()))?;
        page.validate()
            .with_context(|| format!("invalid page file {}", path.display()))?;
        Ok(page)
    }

    /// The platform default page file location.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("portafolio").join("page.toml"))
    }

    /// Reject pages the renderer cannot make sense of. Dangling nav targets
    /// and sourceless images are deliberately allowed; those degrade at
    /// runtime instead.
    pub fn validate(&self) -> Result<(), PageError> {
        let mut seen = Vec::new();
        for section in &self.sections {
            if section.id.is_empty() {
                return Err(PageError::EmptySectionId);
            }
            if seen.contains(&section.id.as_str()) {
                return Err(PageError::DuplicateSectionId(section.id.clone()));
            }
            seen.push(&section.id);
        }
        if let Some(contact) = &self.contact {
            if contact.recipient.is_empty() {
                return Err(PageError::EmptyRecipient);
            }
        }
        Ok(())
    }

    /// Non-fatal findings for `portafolio check`.
    pub fn lint(&self) -> Vec<String> {
        let mut warnings = Vec::new();

        let section_ids: Vec<&str> = self.sections.iter().map(|s| s.id.as_str()).collect();
        for link in self.nav_links() {
            let hits_hero = self.hero.is_some() && link.target == HERO_SECTION_ID;
            if !hits_hero && !section_ids.contains(&link.target.as_str()) {
                warnings.push(format!(
                    "nav link '{}' targets unknown section '{}' (it will do nothing)",
                    link.label, link.target
                ));
            }
        }
        match &self.hero {
            Some(hero) if hero.phrases.iter().all(|p| p.is_empty()) => {
                warnings.push("hero has no typing phrases; the typing line stays empty".into());
            }
            None => warnings.push("no [hero]; the typing line is disabled".into()),
            _ => {}
        }
        if self.contact.is_none() {
            warnings.push("no [contact]; the contact form is disabled".into());
        }
        for section in &self.sections {
            for image in &section.images {
                if image.source.is_none() && image.deferred_source.is_none() {
                    warnings.push(format!(
                        "image '{}' in section '{}' has no source; it renders as a placeholder",
                        image.alt, section.id
                    ));
                }
            }
        }
        warnings
    }

    /// Links the navbar shows; empty when the page declares no navbar.
    pub fn nav_links(&self) -> &[NavLink] {
        self.navbar.as_ref().map(|n| n.links.as_slice()).unwrap_or(&[])
    }

    /// Brand text for the navbar, falling back to the profile name.
    pub fn brand(&self) -> &str {
        self.navbar
            .as_ref()
            .and_then(|n| n.brand.as_deref())
            .unwrap_or(&self.profile.name)
    }

    pub fn typing_phrases(&self) -> &[String] {
        self.hero.as_ref().map(|h| h.phrases.as_slice()).unwrap_or(&[])
    }
}

impl Default for PageFile {
    /// The built-in sample page, used when no page file exists.
    fn default() -> Self {
        Self {
            profile: Profile {
                name: "Jordan Reyes".to_string(),
                tagline: "Software engineer and writer".to_string(),
            },
            hero: Some(Hero {
                greeting: Hero::default_greeting(),
                prefix: Hero::default_prefix(),
                phrases: vec![
                    "Programmer".to_string(),
                    "Blogger".to_string(),
                    "Keyboard Enthusiast".to_string(),
                    "Software Engineer".to_string(),
                    "GSoC Contributor".to_string(),
                ],
            }),
            navbar: Some(NavbarConfig {
                brand: None,
                links: vec![
                    NavLink {
                        label: "Home".to_string(),
                        target: "home".to_string(),
                    },
                    NavLink {
                        label: "About".to_string(),
                        target: "about".to_string(),
                    },
                    NavLink {
                        label: "Skills".to_string(),
                        target: "skills".to_string(),
                    },
                    NavLink {
                        label: "Achievements".to_string(),
                        target: "achievements".to_string(),
                    },
                    NavLink {
                        label: "Contact".to_string(),
                        target: "contact".to_string(),
                    },
                ],
            }),
            sections: vec![
                SectionConfig {
                    id: "about".to_string(),
                    title: "About Me".to_string(),
                    body: "I build software for people, write about what I learn, \
                           and care a great deal about good keyboards. Away from a \
                           terminal I read, run, and make coffee with too much \
                           equipment."
                        .to_string(),
                    cards: vec![CardConfig {
                        title: "Background".to_string(),
                        lines: vec![
                            "A decade of building tools, services, and the".to_string(),
                            "occasional thing that is just for fun.".to_string(),
                        ],
                    }],
                    images: vec![ImageConfig {
                        alt: "portrait".to_string(),
                        source: None,
                        deferred_source: Some(PathBuf::from("assets/portrait.png")),
                    }],
                },
                SectionConfig {
                    id: "skills".to_string(),
                    title: "Skills".to_string(),
                    body: String::new(),
                    cards: vec![
                        CardConfig {
                            title: "Languages".to_string(),
                            lines: vec![
                                "Rust, Go, TypeScript".to_string(),
                                "and whatever the problem needs".to_string(),
                            ],
                        },
                        CardConfig {
                            title: "Infrastructure".to_string(),
                            lines: vec![
                                "Linux, Nix, CI pipelines".to_string(),
                                "observability that earns its keep".to_string(),
                            ],
                        },
                        CardConfig {
                            title: "Writing".to_string(),
                            lines: vec![
                                "Long-form posts on engineering".to_string(),
                                "practice and tooling".to_string(),
                            ],
                        },
                    ],
                    images: vec![],
                },
                SectionConfig {
                    id: "achievements".to_string(),
                    title: "Achievements".to_string(),
                    body: String::new(),
                    cards: vec![
                        CardConfig {
                            title: "Open source".to_string(),
                            lines: vec![
                                "Maintainer and contributor across a".to_string(),
                                "handful of developer tools.".to_string(),
                            ],
                        },
                        CardConfig {
                            title: "Speaking".to_string(),
                            lines: vec![
                                "Conference and meetup talks on systems".to_string(),
                                "programming and developer experience.".to_string(),
                            ],
                        },
                    ],
                    images: vec![],
                },
                SectionConfig {
                    id: "contact".to_string(),
                    title: "Get In Touch".to_string(),
                    body: "Have a project in mind, or just want to say hello?"
                        .to_string(),
                    cards: vec![CardConfig {
                        title: "Email".to_string(),
                        lines: vec!["hello@example.com".to_string()],
                    }],
                    images: vec![],
                },
            ],
            contact: Some(ContactConfig {
                recipient: "hello@example.com".to_string(),
            }),
            footer: Some(FooterConfig {
                text: "Jordan Reyes".to_string(),
                socials: vec![
                    SocialLink {
                        label: "GitHub".to_string(),
                        url: "https://github.com/jordanreyes".to_string(),
                    },
                    SocialLink {
                        label: "Blog".to_string(),
                        url: "https://example.com/blog".to_string(),
                    },
                ],
                show_year: true,
            }),
        }
    }
}
