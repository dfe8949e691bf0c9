use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

// ───── Database Models ───────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Project {
    pub id: i32,
    pub created_at: DateTime<Utc>,
    pub name: String,
    #[serde(rename = "type")]
    #[sqlx(rename = "type")]
    pub project_type: String,
    pub github_link: Option<String>,
    pub project_url: Option<String>,
    pub year: Option<i32>,
    pub dev_time: Option<String>,
    pub technologies: Option<String>,
    pub main_image: Option<String>,
    pub secondary_image: Option<String>,
    pub overview: Option<String>,
    pub detailed_description: Option<String>,
    /// `None` means the status was never recorded.
    pub in_progress: Option<bool>,
    pub bg_color: Option<String>,
    pub text_color: Option<String>,
}

/// List-view projection of [`Project`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct ProjectSummary {
    pub id: i32,
    pub name: String,
    pub main_image: Option<String>,
    pub in_progress: Option<bool>,
    pub bg_color: Option<String>,
    pub text_color: Option<String>,
}

impl From<&Project> for ProjectSummary {
    fn from(project: &Project) -> Self {
        Self {
            id: project.id,
            name: project.name.clone(),
            main_image: project.main_image.clone(),
            in_progress: project.in_progress,
            bg_color: project.bg_color.clone(),
            text_color: project.text_color.clone(),
        }
    }
}

// ───── Input & Validation ───────────────────────────────────────────

/// Body of `POST /api/projects` and `PUT /api/projects`.
///
/// `id` and `created_at` are owned by the database and ignored when sent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct NewProject {
    #[validate(custom(function = "validate_not_blank"))]
    pub name: String,

    #[serde(rename = "type")]
    #[validate(custom(function = "validate_not_blank"))]
    pub project_type: String,

    pub github_link: Option<String>,
    pub project_url: Option<String>,
    pub year: Option<i32>,
    pub dev_time: Option<String>,
    pub technologies: Option<String>,
    pub main_image: Option<String>,
    pub secondary_image: Option<String>,
    pub overview: Option<String>,
    pub detailed_description: Option<String>,
    pub in_progress: Option<bool>,
    pub bg_color: Option<String>,
    pub text_color: Option<String>,
}

impl NewProject {
    pub fn new(name: impl Into<String>, project_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            project_type: project_type.into(),
            ..Default::default()
        }
    }

    /// Builds the stored row, used by in-memory repositories.
    pub fn into_project(self, id: i32, created_at: DateTime<Utc>) -> Project {
        Project {
            id,
            created_at,
            name: self.name,
            project_type: self.project_type,
            github_link: self.github_link,
            project_url: self.project_url,
            year: self.year,
            dev_time: self.dev_time,
            technologies: self.technologies,
            main_image: self.main_image,
            secondary_image: self.secondary_image,
            overview: self.overview,
            detailed_description: self.detailed_description,
            in_progress: self.in_progress,
            bg_color: self.bg_color,
            text_color: self.text_color,
        }
    }

    /// Overwrites every mutable field of `project`. Identity and `created_at` are kept.
    pub fn apply_to(&self, project: &mut Project) {
        project.project_type = self.project_type.clone();
        project.github_link = self.github_link.clone();
        project.project_url = self.project_url.clone();
        project.year = self.year;
        project.dev_time = self.dev_time.clone();
        project.technologies = self.technologies.clone();
        project.main_image = self.main_image.clone();
        project.secondary_image = self.secondary_image.clone();
        project.overview = self.overview.clone();
        project.detailed_description = self.detailed_description.clone();
        project.in_progress = self.in_progress;
        project.bg_color = self.bg_color.clone();
        project.text_color = self.text_color.clone();
    }
}

// ───── Helper Functions ─────────────────────────────────────────────

fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut err = ValidationError::new("blank");
        err.message = Some("Value cannot be empty".into());
        return Err(err);
    }
    Ok(())
}
