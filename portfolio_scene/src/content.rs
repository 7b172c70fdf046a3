//! Static page content: navigation entries, skills and experience.
//!
//! The built-in content can be replaced from a JSON file; sections missing
//! from the file keep their built-in values.

use std::collections::HashSet;
use std::path::Path;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::ContentError;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NavEntry {
    pub id: String,
    pub label: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Skill {
    pub name: String,
    /// Target bar width, percent.
    pub proficiency: u8,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SkillCategory {
    pub category: String,
    pub skills: Vec<Skill>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Experience {
    pub role: String,
    pub company: String,
    pub duration: String,
    pub summary: String,
}

#[derive(Resource, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PortfolioContent {
    pub nav: Vec<NavEntry>,
    pub skills_heading: String,
    pub skills_tagline: String,
    pub skills: Vec<SkillCategory>,
    pub experience: Vec<Experience>,
}

fn nav(id: &str, label: &str) -> NavEntry {
    NavEntry {
        id: id.into(),
        label: label.into(),
    }
}

fn category(name: &str, skills: &[(&str, u8)]) -> SkillCategory {
    SkillCategory {
        category: name.into(),
        skills: skills
            .iter()
            .map(|&(name, proficiency)| Skill {
                name: name.into(),
                proficiency,
            })
            .collect(),
    }
}

fn job(role: &str, company: &str, duration: &str, summary: &str) -> Experience {
    Experience {
        role: role.into(),
        company: company.into(),
        duration: duration.into(),
        summary: summary.into(),
    }
}

impl Default for PortfolioContent {
    fn default() -> Self {
        Self {
            nav: vec![
                nav("home", "Origin"),
                nav("about", "Explorer"),
                nav("projects", "Missions"),
                nav("skills", "Arsenal"),
                nav("contact", "Transmission"),
            ],
            skills_heading: "Internships & Experience".into(),
            skills_tagline: "Technical skills and professional experience across various domains"
                .into(),
            skills: vec![
                category(
                    "Frontend",
                    &[
                        ("React/Next.js", 95),
                        ("TypeScript", 90),
                        ("Three.js/WebGL", 85),
                        ("Tailwind CSS", 92),
                    ],
                ),
                category(
                    "Backend",
                    &[
                        ("Node.js", 88),
                        ("Python", 85),
                        ("PostgreSQL", 82),
                        ("GraphQL", 78),
                    ],
                ),
                category(
                    "Tools & Technologies",
                    &[("Git/GitHub", 92), ("Docker", 85), ("AWS", 80), ("Figma", 75)],
                ),
            ],
            experience: vec![
                job(
                    "Senior Frontend Developer",
                    "Tech Innovations Inc.",
                    "2022 - Present",
                    "Leading development of complex web applications using React and Three.js",
                ),
                job(
                    "Full Stack Developer",
                    "Digital Solutions Ltd.",
                    "2020 - 2022",
                    "Built scalable web applications and APIs for various client projects",
                ),
                job(
                    "Junior Developer",
                    "StartUp Studios",
                    "2019 - 2020",
                    "Contributed to multiple projects focusing on modern web technologies",
                ),
            ],
        }
    }
}

impl PortfolioContent {
    /// `(target percent, stagger index)` for every skill bar in display order.
    pub fn skill_tracks(&self) -> Vec<(f32, usize)> {
        self.skills
            .iter()
            .flat_map(|c| c.skills.iter())
            .enumerate()
            .map(|(index, skill)| (f32::from(skill.proficiency), index))
            .collect()
    }

    fn validate(&self) -> Result<(), ContentError> {
        let mut ids = HashSet::new();
        for entry in &self.nav {
            if entry.id.is_empty() {
                return Err(ContentError::Invalid("empty navigation id".into()));
            }
            if !ids.insert(entry.id.as_str()) {
                return Err(ContentError::Invalid(format!(
                    "duplicate navigation id {:?}",
                    entry.id
                )));
            }
        }
        for skill in self.skills.iter().flat_map(|c| c.skills.iter()) {
            if skill.proficiency > 100 {
                return Err(ContentError::Invalid(format!(
                    "{} proficiency {} exceeds 100",
                    skill.name, skill.proficiency
                )));
            }
        }
        Ok(())
    }
}

pub fn load_content(path: &Path) -> Result<PortfolioContent, ContentError> {
    let raw = std::fs::read_to_string(path).map_err(|source| ContentError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let content: PortfolioContent =
        serde_json::from_str(&raw).map_err(|source| ContentError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
    content.validate()?;
    Ok(content)
}

/// Loads the override at `path` if given, falling back to the built-in content.
pub fn content_or_default(path: Option<&Path>) -> PortfolioContent {
    let Some(path) = path else {
        return PortfolioContent::default();
    };
    match load_content(path) {
        Ok(content) => {
            info!("portfolio: loaded content from {}", path.display());
            content
        }
        Err(err) => {
            warn!("portfolio: {err}; using built-in content");
            PortfolioContent::default()
        }
    }
}
